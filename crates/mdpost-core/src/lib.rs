//! # mdpost Core Library
//!
//! Post-processing of molecular-dynamics trajectories along a single reaction
//! coordinate: splitting (commitment) probabilities, potential-of-mean-force
//! reconstruction, first-passage-time distributions and energy statistics.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Trajectory`,
//!   `DensityProfile`, `BinEdges`), pure numerical kernels (trapezoidal
//!   integration, non-uniform gradients, histograms, smoothing filters) and
//!   text I/O for trajectories, tables, NAMD logs and delimited reports.
//!
//! - **[`engine`]: The Analysis Stages.** Immutable configuration, error types,
//!   progress reporting and the individual pipeline stages: the discretizer,
//!   both splitting-probability estimators, the PMF reconstructor and the
//!   supplementary analyses.
//!
//! - **[`workflows`]: The Public API.** End-to-end analyses that chain the
//!   engine stages together and produce report-ready results.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
mod testing;
