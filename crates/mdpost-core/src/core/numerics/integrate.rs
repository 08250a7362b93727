/// Trapezoidal integral of `y` sampled at `x`.
///
/// Follows the samples in the order given, so a decreasing `x` yields a
/// negative contribution. Fewer than two samples integrate to zero.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

/// Integral from each sample to the last one, i.e. `out[i] == trapezoid(&y[i..], &x[i..])`.
///
/// Computed in a single backward sweep.
pub fn trapezoid_tails(y: &[f64], x: &[f64]) -> Vec<f64> {
    let n = y.len().min(x.len());
    let mut tails = vec![0.0; n];
    for i in (0..n.saturating_sub(1)).rev() {
        tails[i] = tails[i + 1] + 0.5 * (y[i] + y[i + 1]) * (x[i + 1] - x[i]);
    }
    tails
}
