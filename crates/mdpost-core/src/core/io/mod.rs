//! Provides input/output functionality for the text formats used in MD
//! post-processing.
//!
//! Inputs are whitespace-delimited tables with an optional comment token and
//! NAMD `.log` files; outputs are delimiter-separated reports preceded by a
//! commented metadata block. Every reader implements the [`traits::DataFile`]
//! interface so it can be driven from a path or any buffered reader.

pub mod error;
pub mod namd;
pub mod profile;
pub mod report;
pub mod table;
pub mod traits;
pub mod trajectory;
