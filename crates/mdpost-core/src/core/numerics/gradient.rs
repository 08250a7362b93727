use super::NumericsError;

/// Derivative of `f` with respect to the sample positions `x`.
///
/// Interior points use the second-order accurate centred stencil for unevenly
/// spaced samples; the two end points use first-order one-sided differences.
/// Coincident positions produce non-finite entries, which callers are
/// expected to filter.
pub fn gradient(f: &[f64], x: &[f64]) -> Result<Vec<f64>, NumericsError> {
    if f.len() != x.len() {
        return Err(NumericsError::LengthMismatch {
            left: f.len(),
            right: x.len(),
        });
    }
    let n = f.len();
    if n < 2 {
        return Err(NumericsError::TooFewPoints {
            required: 2,
            found: n,
        });
    }

    let mut out = vec![0.0; n];
    out[0] = (f[1] - f[0]) / (x[1] - x[0]);
    out[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        out[i] = (hs * hs * f[i + 1] + (hd * hd - hs * hs) * f[i] - hd * hd * f[i - 1])
            / (hs * hd * (hd + hs));
    }
    Ok(out)
}

/// Gradient with respect to the sample index (unit spacing).
pub fn gradient_uniform(f: &[f64]) -> Result<Vec<f64>, NumericsError> {
    let x: Vec<f64> = (0..f.len()).map(|i| i as f64).collect();
    gradient(f, &x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn gradient_is_exact_for_quadratics_in_the_interior() {
        let x = [0.0, 0.4, 1.0, 1.5, 2.7];
        let f: Vec<f64> = x.iter().map(|v| v * v).collect();
        let g = gradient(&f, &x).unwrap();
        for i in 1..x.len() - 1 {
            assert!((g[i] - 2.0 * x[i]).abs() < TOLERANCE, "index {i}: {}", g[i]);
        }
    }

    #[test]
    fn gradient_ends_are_one_sided_differences() {
        let x = [0.0, 1.0, 3.0];
        let f = [0.0, 1.0, 9.0];
        let g = gradient(&f, &x).unwrap();
        assert!((g[0] - 1.0).abs() < TOLERANCE);
        assert!((g[2] - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn gradient_uniform_matches_central_differences() {
        let g = gradient_uniform(&[1.0, 2.0, 4.0, 7.0]).unwrap();
        assert_eq!(g, vec![1.0, 1.5, 2.5, 3.0]);
    }

    #[test]
    fn gradient_rejects_short_or_mismatched_input() {
        assert!(matches!(
            gradient(&[1.0], &[0.0]),
            Err(NumericsError::TooFewPoints { found: 1, .. })
        ));
        assert!(matches!(
            gradient(&[1.0, 2.0], &[0.0]),
            Err(NumericsError::LengthMismatch { .. })
        ));
    }
}
