use super::tail_probabilities;
use crate::core::models::profile::{DensityProfile, Estimate, SplittingPoint, SplittingProfile};
use crate::engine::config::{Boundaries, IntegrationMethod};
use crate::engine::error::EngineError;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannRow {
    pub coordinate: f64,
    pub density: f64,
    /// `-kT ln P`.
    pub apparent_pmf: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoltzmannEstimate {
    pub rows: Vec<BoltzmannRow>,
    /// Integral of the integrand over all retained samples.
    pub normalization: f64,
    /// Samples between the boundaries dropped for a non-finite apparent PMF.
    pub discarded: usize,
}

impl BoltzmannEstimate {
    pub fn coordinates(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.coordinate).collect()
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.probability).collect()
    }

    pub fn profile(&self) -> SplittingProfile {
        SplittingProfile::new(
            self.rows
                .iter()
                .map(|r| SplittingPoint {
                    coordinate: r.coordinate,
                    bin: None,
                    probability: Estimate::from_finite(r.probability),
                })
                .collect(),
        )
    }
}

/// Splitting probability from an equilibrium density by Boltzmann inversion.
///
/// Samples with `left <= x <= right` are kept, those with `P <= 0` (infinite
/// apparent PMF) are dropped, and the integrand `1/P` (or `P` when `negate`
/// is false) is integrated from each sample to the right boundary.
pub fn estimate(
    density: &DensityProfile,
    boundaries: &Boundaries,
    kt: f64,
    negate: bool,
    method: IntegrationMethod,
) -> Result<BoltzmannEstimate, EngineError> {
    let window = density.between(boundaries.left, boundaries.right);

    let mut kept = Vec::with_capacity(window.len());
    for sample in window.samples() {
        let apparent_pmf = -kt * sample.density.ln();
        if apparent_pmf.is_finite() {
            kept.push((sample.coordinate, sample.density, apparent_pmf));
        }
    }
    let discarded = window.len() - kept.len();
    if discarded > 0 {
        warn!(
            discarded,
            "Dropped samples with a non-finite apparent PMF (density <= 0)"
        );
    }

    let coordinates: Vec<f64> = kept.iter().map(|k| k.0).collect();
    let integrand: Vec<f64> = kept
        .iter()
        .map(|&(_, p, _)| if negate { 1.0 / p } else { p })
        .collect();
    let (probabilities, normalization) = tail_probabilities(&coordinates, &integrand, method)?;
    debug!(samples = kept.len(), normalization, "Integrated splitting probability");

    Ok(BoltzmannEstimate {
        rows: kept
            .into_iter()
            .zip(probabilities)
            .map(|((coordinate, density, apparent_pmf), probability)| BoltzmannRow {
                coordinate,
                density,
                apparent_pmf,
                probability,
            })
            .collect(),
        normalization,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::thermal_energy;

    fn boundaries(left: f64, right: f64) -> Boundaries {
        Boundaries::new(left, right).unwrap()
    }

    #[test]
    fn uniform_density_gives_linear_splitting_probability() {
        let density = DensityProfile::from_pairs((0..=40).map(|i| (i as f64 * 0.25, 0.1)));
        let est = estimate(
            &density,
            &boundaries(2.0, 8.0),
            thermal_energy(300.0),
            true,
            IntegrationMethod::PerPoint,
        )
        .unwrap();
        for row in &est.rows {
            let expected = (8.0 - row.coordinate) / 6.0;
            assert!((row.probability - expected).abs() < 1e-9, "{row:?}");
        }
    }

    #[test]
    fn boundary_values_are_one_and_zero() {
        let density = DensityProfile::from_pairs(
            (0..=100).map(|i| {
                let x = i as f64 * 0.1;
                (x, (-(x - 5.0).powi(2)).exp() + 0.01)
            }),
        );
        let est = estimate(
            &density,
            &boundaries(1.0, 9.0),
            thermal_energy(300.0),
            true,
            IntegrationMethod::PerPoint,
        )
        .unwrap();
        let sp = est.probabilities();
        assert!((sp[0] - 1.0).abs() < 1e-6);
        assert!(sp[sp.len() - 1].abs() < 1e-6);
    }

    #[test]
    fn single_well_density_gives_non_increasing_probability() {
        let density = DensityProfile::from_pairs((0..=60).map(|i| {
            let x = i as f64 * 0.1;
            (x, (-(x - 3.0).powi(2) / 0.5).exp())
        }));
        let est = estimate(
            &density,
            &boundaries(0.5, 5.5),
            thermal_energy(300.0),
            false,
            IntegrationMethod::PerPoint,
        )
        .unwrap();
        assert!(est.profile().is_non_increasing());
    }

    #[test]
    fn zero_density_samples_are_discarded() {
        let density = DensityProfile::from_pairs([(0.0, 0.2), (1.0, 0.0), (2.0, 0.2), (3.0, 0.2)]);
        let est = estimate(
            &density,
            &boundaries(0.0, 3.0),
            thermal_energy(300.0),
            true,
            IntegrationMethod::SuffixSum,
        )
        .unwrap();
        assert_eq!(est.discarded, 1);
        assert_eq!(est.rows.len(), 3);
        assert!(est.rows.iter().all(|r| r.apparent_pmf.is_finite()));
    }

    #[test]
    fn too_few_samples_is_degenerate() {
        let density = DensityProfile::from_pairs([(0.0, 0.2), (5.0, 0.2)]);
        let err = estimate(
            &density,
            &boundaries(1.0, 4.0),
            thermal_energy(300.0),
            true,
            IntegrationMethod::PerPoint,
        );
        assert!(matches!(err, Err(EngineError::DegenerateProfile(_))));
    }
}
