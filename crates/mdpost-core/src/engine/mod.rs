//! # Engine Module
//!
//! The analysis stages of mdpost and the infrastructure they share.
//!
//! ## Overview
//!
//! Each stage is a pure function from parsed inputs and an immutable
//! configuration to a result. Stages are chained by the [`crate::workflows`]
//! layer; nothing here reads or writes files.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Immutable per-analysis parameters built with builders
//! - **Error Handling** ([`error`]) - Engine-level error types
//! - **Progress Monitoring** ([`progress`]) - Optional progress callbacks
//! - **Discretizer** ([`discretize`]) - Temporal averaging and spatial binning of a trajectory
//! - **Splitting Probability** ([`splitting`]) - Boltzmann-inversion and counting estimators
//! - **PMF Reconstruction** ([`pmf`]) - Energy landscape from the splitting-probability gradient
//! - **Supplementary Stages** - [`density`], [`passage`], [`thermo`], [`energy`], [`smd`] and [`windows`]

pub mod config;
pub mod density;
pub mod discretize;
pub mod energy;
pub mod error;
pub mod passage;
pub mod pmf;
pub mod progress;
pub mod smd;
pub mod splitting;
pub mod thermo;
pub mod windows;
