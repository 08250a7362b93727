//! Splitting-probability estimators.
//!
//! Two independent estimators produce the probability that a trajectory
//! started at a given coordinate reaches the left boundary before the right:
//!
//! - [`boltzmann`] integrates a reciprocal density (or any positive integrand)
//!   between the boundaries;
//! - [`counting`] walks a discretized trajectory and counts first arrivals.

pub mod boltzmann;
pub mod counting;

use super::config::IntegrationMethod;
use super::error::EngineError;
use crate::core::numerics::integrate::{trapezoid, trapezoid_tails};
use tracing::warn;

/// Normalised tail integrals `SP_i = ∫_{x >= x_i} g dx / ∫ g dx`.
///
/// With [`IntegrationMethod::PerPoint`] each tail is integrated over the
/// samples whose coordinate is at least `x_i`, in input order. The suffix-sum
/// method assumes ascending coordinates; unsorted input falls back to the
/// per-point method.
///
/// Returns the probabilities together with the normalisation constant.
pub fn tail_probabilities(
    coordinates: &[f64],
    integrand: &[f64],
    method: IntegrationMethod,
) -> Result<(Vec<f64>, f64), EngineError> {
    if coordinates.len() < 2 {
        return Err(EngineError::DegenerateProfile(format!(
            "{} sample(s) between the boundaries, at least 2 are required",
            coordinates.len()
        )));
    }
    let normalization = trapezoid(integrand, coordinates);
    if !(normalization.is_finite() && normalization > 0.0) {
        return Err(EngineError::DegenerateProfile(format!(
            "normalization integral is {normalization}"
        )));
    }

    let sorted = coordinates.windows(2).all(|w| w[0] <= w[1]);
    let probabilities = match method {
        IntegrationMethod::SuffixSum if sorted => {
            // Dividing by the first tail keeps SP(first) at exactly one.
            let tails = trapezoid_tails(integrand, coordinates);
            let total = tails[0];
            tails.into_iter().map(|t| t / total).collect()
        }
        method => {
            if method == IntegrationMethod::SuffixSum {
                warn!("Coordinates are not ascending; using per-point integration");
            }
            per_point_tails(coordinates, integrand)
                .into_iter()
                .map(|t| t / normalization)
                .collect()
        }
    };
    Ok((probabilities, normalization))
}

fn per_point_tails(coordinates: &[f64], integrand: &[f64]) -> Vec<f64> {
    coordinates
        .iter()
        .map(|&x_i| {
            let (xs, ys): (Vec<f64>, Vec<f64>) = coordinates
                .iter()
                .zip(integrand)
                .filter(|(x, _)| **x >= x_i)
                .map(|(x, y)| (*x, *y))
                .unzip();
            trapezoid(&ys, &xs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_agree_on_sorted_input() {
        let x: Vec<f64> = (0..30).map(|i| i as f64 * 0.25).collect();
        let g: Vec<f64> = x.iter().map(|v| 1.0 + (v * 1.3).sin().powi(2)).collect();
        let (a, ca) = tail_probabilities(&x, &g, IntegrationMethod::PerPoint).unwrap();
        let (b, cb) = tail_probabilities(&x, &g, IntegrationMethod::SuffixSum).unwrap();
        assert!((ca - cb).abs() < 1e-12);
        for (p, q) in a.iter().zip(&b) {
            assert!((p - q).abs() < 1e-9);
        }
        assert_eq!(b[0], 1.0);
        assert_eq!(b[x.len() - 1], 0.0);
    }

    #[test]
    fn single_sample_is_degenerate() {
        let err = tail_probabilities(&[1.0], &[1.0], IntegrationMethod::PerPoint);
        assert!(matches!(err, Err(EngineError::DegenerateProfile(_))));
    }

    #[test]
    fn zero_integrand_is_degenerate() {
        let err = tail_probabilities(&[0.0, 1.0], &[0.0, 0.0], IntegrationMethod::PerPoint);
        assert!(matches!(err, Err(EngineError::DegenerateProfile(_))));
    }
}
