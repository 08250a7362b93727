use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Line { line: usize, kind: LineErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Unknown column '{name}' (available: {})", .available.join(", "))]
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    #[error("Invalid integer format (value: '{0}')")]
    InvalidInt(String),
    #[error("Invalid float format (value: '{0}')")]
    InvalidFloat(String),
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
}

impl ParseError {
    pub(crate) fn line(line: usize, kind: LineErrorKind) -> Self {
        ParseError::Line { line, kind }
    }
}

pub(crate) fn parse_float(value: &str, line: usize) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .map_err(|_| ParseError::line(line, LineErrorKind::InvalidFloat(value.to_string())))
}

/// Parses an integer, also accepting a float literal with no fractional part
/// (`"100.0"`), which some tools write for frame indices.
pub(crate) fn parse_int(value: &str, line: usize) -> Result<i64, ParseError> {
    if let Ok(v) = value.parse::<i64>() {
        return Ok(v);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(ParseError::line(
            line,
            LineErrorKind::InvalidInt(value.to_string()),
        )),
    }
}
