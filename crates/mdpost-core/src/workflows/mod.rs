//! # Workflows Module
//!
//! End-to-end analyses built on the `core` and `engine` layers.
//!
//! ## Overview
//!
//! Each workflow takes already-parsed input (or, for log-based analyses, the
//! log paths), a validated configuration and a [`ProgressReporter`], runs the
//! full chain of stages, and returns a result value that can render itself as
//! one or more [`Report`]s. Nothing is written to disk here; the caller
//! decides where reports go, once every row has been computed.
//!
//! ## Architecture
//!
//! - **Splitting probability and PMF**
//!   - [`sp_pmf`] - Boltzmann inversion of an equilibrium density
//!   - [`sp_traj`] - direct counting over a discretized trajectory
//!   - [`sp_potential`] - Boltzmann weighting of a potential-energy table
//!   - [`landscape`] - PMF from an existing splitting-probability table
//! - **Supplementary analyses**
//!   - [`ext_pdf`] - extension histogram and moving average
//!   - [`fpt`] - first-passage-time distribution
//!   - [`specific_heat`] - heat capacity from energy fluctuations
//!   - [`namd_energy`] - NAMD energy extraction and averaging
//!   - [`smd_pull`] - constant-velocity SMD force and displacement
//!
//! [`ProgressReporter`]: crate::engine::progress::ProgressReporter
//! [`Report`]: crate::core::io::report::Report

pub mod ext_pdf;
pub mod fpt;
pub mod landscape;
pub mod namd_energy;
pub mod smd_pull;
pub mod sp_pmf;
pub mod sp_potential;
pub mod sp_traj;
pub mod specific_heat;
