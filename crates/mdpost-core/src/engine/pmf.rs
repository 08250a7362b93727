use super::error::EngineError;
use crate::core::models::profile::{Estimate, PmfPoint, PmfProfile};
use crate::core::numerics::gradient::gradient;
use crate::core::numerics::smoothing::Smoother;
use tracing::{debug, warn};

/// Options of the PMF reconstruction `E = sign * ln(-scale * dSP/dx) * kT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmfOptions {
    pub kt: f64,
    /// `true` when the splitting probability came from the negated (reciprocal
    /// density) integrand, giving `sign = +1`.
    pub negated: bool,
    pub scale: f64,
}

impl PmfOptions {
    pub fn new(kt: f64, negated: bool) -> Self {
        Self {
            kt,
            negated,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn sign(&self) -> f64 {
        if self.negated { 1.0 } else { -1.0 }
    }
}

/// Energy at each point of a splitting-probability series.
///
/// `axis` is the variable the gradient is taken against (coordinate or bin
/// index); `probabilities` must already exclude undefined values. The series
/// is passed through `smoother` before differentiation, unless it is shorter
/// than the smoother's window, in which case it is used as is. Points whose
/// energy is not finite (non-negative gradient) come back as
/// [`Estimate::Undefined`].
/// Fewer than two points yield an all-undefined result.
pub fn reconstruct(
    axis: &[f64],
    probabilities: &[f64],
    options: &PmfOptions,
    smoother: &dyn Smoother,
) -> Result<Vec<Estimate>, EngineError> {
    if probabilities.len() < 2 {
        warn!(
            points = probabilities.len(),
            "Too few splitting-probability points to reconstruct a PMF"
        );
        return Ok(vec![Estimate::Undefined; probabilities.len()]);
    }

    let smoothed = if probabilities.len() < smoother.min_len() {
        warn!(
            points = probabilities.len(),
            required = smoother.min_len(),
            "Too few points to smooth; differentiating the unsmoothed splitting probability"
        );
        probabilities.to_vec()
    } else {
        smoother.smooth(probabilities)?
    };
    let slope = gradient(&smoothed, axis)?;
    let sign = options.sign();
    let energies: Vec<Estimate> = slope
        .iter()
        .map(|g| Estimate::from_finite(sign * (-options.scale * g).ln() * options.kt))
        .collect();

    let dropped = energies.iter().filter(|e| !e.is_defined()).count();
    if dropped > 0 {
        warn!(dropped, "Dropped PMF points with a non-negative splitting-probability gradient");
    }
    debug!(points = energies.len(), dropped, "Reconstructed PMF");
    Ok(energies)
}

/// Pairs reconstructed energies with their display coordinates.
pub fn to_profile(coordinates: &[f64], energies: &[Estimate]) -> PmfProfile {
    PmfProfile::new(
        coordinates
            .iter()
            .zip(energies)
            .map(|(&coordinate, &energy)| PmfPoint { coordinate, energy })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numerics::smoothing::{NoSmoothing, SavitzkyGolay};

    #[test]
    fn linear_probability_gives_flat_landscape() {
        let x: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let sp: Vec<f64> = x.iter().map(|v| 1.0 - v / 10.0).collect();
        let kt = 0.6;
        let energies = reconstruct(&x, &sp, &PmfOptions::new(kt, true), &NoSmoothing).unwrap();
        let expected = (0.1f64).ln() * kt;
        for e in energies {
            assert!((e.value().unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn direct_orientation_flips_sign_and_scale_shifts() {
        let x = [0.0, 1.0, 2.0];
        let sp = [1.0, 0.5, 0.0];
        let negated = reconstruct(&x, &sp, &PmfOptions::new(1.0, true), &NoSmoothing).unwrap();
        let direct = reconstruct(&x, &sp, &PmfOptions::new(1.0, false), &NoSmoothing).unwrap();
        assert!((negated[1].value().unwrap() + direct[1].value().unwrap()).abs() < 1e-12);

        let scaled = reconstruct(
            &x,
            &sp,
            &PmfOptions::new(1.0, true).with_scale(2.0),
            &NoSmoothing,
        )
        .unwrap();
        assert!((scaled[1].value().unwrap() - negated[1].value().unwrap() - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn increasing_segments_are_undefined() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let sp = [1.0, 1.0, 1.2, 0.0];
        let energies = reconstruct(&x, &sp, &PmfOptions::new(1.0, true), &NoSmoothing).unwrap();
        assert_eq!(energies[0], Estimate::Undefined);
        assert_eq!(energies[1], Estimate::Undefined);
        assert!(energies[3].is_defined());
        let profile = to_profile(&x, &energies);
        assert_eq!(profile.dropped_count(), 2);
    }

    #[test]
    fn single_point_gives_no_energies() {
        let energies = reconstruct(&[0.0], &[1.0], &PmfOptions::new(1.0, true), &NoSmoothing).unwrap();
        assert_eq!(energies, vec![Estimate::Undefined]);
    }

    #[test]
    fn series_shorter_than_the_filter_window_is_left_unsmoothed() {
        let x = [0.0, 1.0, 2.0];
        let sp = [1.0, 0.6, 0.0];
        let options = PmfOptions::new(1.0, true);
        let filter = SavitzkyGolay::new(5, 2).unwrap();
        let smoothed = reconstruct(&x, &sp, &options, &filter).unwrap();
        let raw = reconstruct(&x, &sp, &options, &NoSmoothing).unwrap();
        assert_eq!(smoothed, raw);
        assert!(smoothed.iter().all(Estimate::is_defined));
    }
}
