//! # Core Module
//!
//! Foundational building blocks shared by every analysis in mdpost.
//!
//! - **Physical constants** ([`constants`]) - Gas constant, unit conversions and `k_B T`
//! - **Data models** ([`models`]) - Trajectories, spatial bins and the profiles derived from them
//! - **Numerics** ([`numerics`]) - Integration, differentiation, histogramming and smoothing
//! - **File I/O** ([`io`]) - Whitespace-delimited inputs, NAMD logs and delimited reports
//!
//! Nothing in this module holds state between calls; every function is a pure
//! transformation of its inputs.

pub mod constants;
pub mod io;
pub mod models;
pub mod numerics;
