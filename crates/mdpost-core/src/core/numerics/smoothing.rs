use super::NumericsError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// A filter applied to a series before it is differentiated.
///
/// Implementations must return a series of the same length as the input.
pub trait Smoother {
    fn smooth(&self, values: &[f64]) -> Result<Vec<f64>, NumericsError>;

    /// Shortest series [`Smoother::smooth`] accepts.
    fn min_len(&self) -> usize {
        0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoSmoothing;

impl Smoother for NoSmoothing {
    fn smooth(&self, values: &[f64]) -> Result<Vec<f64>, NumericsError> {
        Ok(values.to_vec())
    }
}

/// Savitzky-Golay filter: a least-squares polynomial of degree `poly_order`
/// fitted over a sliding window of `window_length` samples.
///
/// Points closer than half a window to either end are taken from the
/// polynomial fitted to the first (or last) full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavitzkyGolay {
    pub window_length: usize,
    pub poly_order: usize,
}

impl SavitzkyGolay {
    pub fn new(window_length: usize, poly_order: usize) -> Result<Self, NumericsError> {
        if window_length % 2 == 0 {
            return Err(NumericsError::InvalidWindow(format!(
                "Savitzky-Golay window length must be odd, got {window_length}"
            )));
        }
        if poly_order >= window_length {
            return Err(NumericsError::InvalidWindow(format!(
                "polynomial order {poly_order} must be less than the window length {window_length}"
            )));
        }
        Ok(Self {
            window_length,
            poly_order,
        })
    }

    /// Pseudo-inverse of the Vandermonde matrix over offsets `-h..=h`. Row `k`
    /// maps a window of samples to the coefficient of `t^k`.
    fn fit_operator(&self) -> Result<DMatrix<f64>, NumericsError> {
        let half = (self.window_length / 2) as f64;
        let vandermonde = DMatrix::from_fn(self.window_length, self.poly_order + 1, |r, c| {
            (r as f64 - half).powi(c as i32)
        });
        vandermonde.pseudo_inverse(1e-12).map_err(NumericsError::Fit)
    }
}

impl Smoother for SavitzkyGolay {
    fn smooth(&self, values: &[f64]) -> Result<Vec<f64>, NumericsError> {
        let n = values.len();
        let w = self.window_length;
        if n < w {
            return Err(NumericsError::TooFewPoints {
                required: w,
                found: n,
            });
        }
        let half = w / 2;
        let operator = self.fit_operator()?;

        let evaluate = |coefficients: &[f64], t: f64| {
            coefficients
                .iter()
                .rev()
                .fold(0.0, |acc, c| acc * t + c)
        };
        let fit = |start: usize| -> Vec<f64> {
            let window = nalgebra::DVector::from_column_slice(&values[start..start + w]);
            (&operator * window).iter().copied().collect()
        };

        let mut out = vec![0.0; n];
        for i in half..n - half {
            out[i] = fit(i - half)[0];
        }

        let head = fit(0);
        for (i, slot) in out.iter_mut().enumerate().take(half) {
            *slot = evaluate(&head, i as f64 - half as f64);
        }
        let tail = fit(n - w);
        for (k, slot) in out.iter_mut().skip(n - half).enumerate() {
            *slot = evaluate(&tail, (k + 1) as f64);
        }
        Ok(out)
    }

    fn min_len(&self) -> usize {
        self.window_length
    }
}

/// Centred moving average; windows are truncated near the ends so the output
/// keeps the input length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteredMean {
    pub window: usize,
}

impl Smoother for CenteredMean {
    fn smooth(&self, values: &[f64]) -> Result<Vec<f64>, NumericsError> {
        if self.window == 0 {
            return Err(NumericsError::InvalidWindow(
                "moving-average window must be at least one sample".to_string(),
            ));
        }
        let n = values.len();
        let before = (self.window - 1) / 2;
        let after = self.window - 1 - before;
        Ok((0..n)
            .map(|i| {
                let lo = i.saturating_sub(before);
                let hi = (i + after + 1).min(n);
                values[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
            })
            .collect())
    }
}

/// Smoothing selection as it appears in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Smoothing {
    #[default]
    None,
    #[serde(rename_all = "kebab-case")]
    SavitzkyGolay {
        window_length: usize,
        poly_order: usize,
    },
    MovingAverage {
        window: usize,
    },
}

impl Smoothing {
    pub fn smoother(&self) -> Result<Box<dyn Smoother>, NumericsError> {
        Ok(match *self {
            Smoothing::None => Box::new(NoSmoothing),
            Smoothing::SavitzkyGolay {
                window_length,
                poly_order,
            } => Box::new(SavitzkyGolay::new(window_length, poly_order)?),
            Smoothing::MovingAverage { window } => Box::new(CenteredMean { window }),
        })
    }
}

/// Trailing rolling mean: entry `i` averages `values[i + 1 - window..=i]`.
/// The first `window - 1` entries have no full window and are `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, NumericsError> {
    if window == 0 {
        return Err(NumericsError::InvalidWindow(
            "rolling window must be at least one sample".to_string(),
        ));
    }
    Ok((0..values.len())
        .map(|i| {
            (i + 1 >= window).then(|| {
                values[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn savitzky_golay_preserves_polynomials_up_to_its_order() {
        let values: Vec<f64> = (0..12)
            .map(|i| {
                let x = i as f64;
                0.5 * x * x - 3.0 * x + 1.0
            })
            .collect();
        let smoothed = SavitzkyGolay::new(5, 2).unwrap().smooth(&values).unwrap();
        for (a, b) in values.iter().zip(&smoothed) {
            assert!((a - b).abs() < TOLERANCE, "{a} vs {b}");
        }
    }

    #[test]
    fn savitzky_golay_order_zero_is_a_centred_mean_in_the_interior() {
        let values = [1.0, 5.0, 2.0, 8.0, 3.0, 0.0, 4.0];
        let smoothed = SavitzkyGolay::new(3, 0).unwrap().smooth(&values).unwrap();
        assert!((smoothed[3] - (2.0 + 8.0 + 3.0) / 3.0).abs() < TOLERANCE);
        assert!((smoothed[0] - (1.0 + 5.0 + 2.0) / 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn savitzky_golay_rejects_invalid_parameters() {
        assert!(SavitzkyGolay::new(4, 2).is_err());
        assert!(SavitzkyGolay::new(5, 5).is_err());
        let sg = SavitzkyGolay::new(7, 2).unwrap();
        assert!(matches!(
            sg.smooth(&[1.0, 2.0, 3.0]),
            Err(NumericsError::TooFewPoints { required: 7, found: 3 })
        ));
        assert_eq!(sg.min_len(), 7);
        assert_eq!(NoSmoothing.min_len(), 0);
    }

    #[test]
    fn centered_mean_keeps_length() {
        let smoothed = CenteredMean { window: 3 }.smooth(&[3.0, 6.0, 9.0, 12.0]).unwrap();
        assert_eq!(smoothed, vec![4.5, 6.0, 9.0, 10.5]);
    }

    #[test]
    fn rolling_mean_leaves_leading_entries_undefined() {
        let means = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(means, vec![None, None, Some(2.0), Some(3.0)]);
        assert!(rolling_mean(&[1.0], 0).is_err());
    }

    #[test]
    fn smoothing_defaults_to_identity() {
        let smoother = Smoothing::default().smoother().unwrap();
        assert_eq!(smoother.smooth(&[1.0, 2.0]).unwrap(), vec![1.0, 2.0]);
    }
}
