use std::fmt;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::error::ParseError;
use crate::core::models::bins::BinningError;
use crate::core::numerics::NumericsError;

/// Which absorbing boundary a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Left,
    Right,
}

impl fmt::Display for BoundarySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundarySide::Left => f.write_str("LEFT"),
            BoundarySide::Right => f.write_str("RIGHT"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{side} boundary = {value} is out of bounds [{min}, {max})")]
    InputRange {
        side: BoundarySide,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Degenerate profile: {0}")]
    DegenerateProfile(String),

    #[error("No samples available: {0}")]
    NoSamples(String),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Binning failed: {source}")]
    Binning {
        #[from]
        source: BinningError,
    },

    #[error("Numerical error: {source}")]
    Numerics {
        #[from]
        source: NumericsError,
    },

    #[error("Failed to read input: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
