//! # Core Models Module
//!
//! Plain data structures for the quantities that flow through an analysis.
//!
//! ## Key Components
//!
//! - [`trajectory`] - Ordered `(frame, coordinate)` samples and frame-range restriction
//! - [`bins`] - Equal-width bin partitions of the coordinate (or frame) axis
//! - [`profile`] - Density, splitting-probability and PMF profiles along the coordinate
//!
//! Every model is recomputed from the input files on each run; nothing here is
//! mutated incrementally.

pub mod bins;
pub mod profile;
pub mod trajectory;
