//! # Numerics Module
//!
//! Small, allocation-light numeric kernels used by every analysis stage.
//!
//! - [`integrate`] - Trapezoidal integration over sampled data
//! - [`gradient`] - Second-order finite differences on non-uniform grids
//! - [`histogram`] - Equal-width histograms and density normalisation
//! - [`smoothing`] - Optional filters applied to a series before differentiation
//!
//! All routines operate on plain slices and never reorder their input.

pub mod gradient;
pub mod histogram;
pub mod integrate;
pub mod smoothing;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumericsError {
    #[error("At least {required} points are required, got {found}")]
    TooFewPoints { required: usize, found: usize },
    #[error("Series lengths differ: {left} values vs {right} coordinates")]
    LengthMismatch { left: usize, right: usize },
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Least-squares fit failed: {0}")]
    Fit(&'static str),
}
