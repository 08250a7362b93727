use crate::core::constants::thermal_energy;
use crate::core::io::report::{Report, ReportError};
use crate::core::models::trajectory::Trajectory;
use crate::engine::config::PotentialSpConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::splitting::tail_probabilities;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialSample {
    pub distance: f64,
    pub potential: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PotentialSpResult {
    pub kt: f64,
    pub temperature: f64,
    pub left: f64,
    pub right: f64,
    /// All paired samples sorted by distance.
    pub paired: Vec<PotentialSample>,
    /// `(distance, sp)` between the boundaries.
    pub rows: Vec<(f64, f64)>,
    /// Normalisation of the shifted integrand `exp((U - U_max) / kT)`.
    pub normalization: f64,
}

impl PotentialSpResult {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut report = Report::new("Splitting probability from potential energy", ["DIST", "SP"])
            .with_metadata("Left boundary", self.left)
            .with_metadata("Right boundary", self.right)
            .with_metadata("Temperature (K)", self.temperature)
            .with_metadata("kT (kcal/mol)", self.kt)
            .with_metadata("Samples between boundaries", self.rows.len());
        for (distance, sp) in &self.rows {
            report.push_values(&[*distance, *sp])?;
        }
        Ok(report)
    }

    pub fn paired_report(&self) -> Result<Report, ReportError> {
        let mut report = Report::new("Potential energy against distance", ["DIST", "POTENTIAL"])
            .with_metadata("Samples", self.paired.len());
        for sample in &self.paired {
            report.push_values(&[sample.distance, sample.potential])?;
        }
        Ok(report)
    }
}

/// Pairs distances with potential energies row by row and integrates the
/// Boltzmann factor `exp(U / kT)` between the boundaries.
///
/// The factor is shifted by the largest potential in the interval before
/// exponentiation; the ratio of integrals is unaffected.
#[instrument(skip_all, name = "sp_potential_workflow")]
pub fn run(
    distances: &Trajectory,
    potentials: &[f64],
    config: &PotentialSpConfig,
    reporter: &ProgressReporter,
) -> Result<PotentialSpResult, EngineError> {
    let kt = thermal_energy(config.temperature);

    reporter.phase_start("Pairing");
    if distances.len() != potentials.len() {
        warn!(
            distances = distances.len(),
            potentials = potentials.len(),
            "Distance and potential inputs differ in length; extra rows are ignored"
        );
    }
    let mut paired: Vec<PotentialSample> = distances
        .coordinates()
        .zip(potentials.iter().copied())
        .filter(|(d, u)| d.is_finite() && u.is_finite())
        .map(|(distance, potential)| PotentialSample {
            distance,
            potential,
        })
        .collect();
    paired.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    reporter.phase_finish();

    reporter.phase_start("Splitting Probability");
    let inside: Vec<PotentialSample> = paired
        .iter()
        .copied()
        .filter(|s| config.boundaries.contains(s.distance))
        .collect();
    let peak = inside
        .iter()
        .map(|s| s.potential)
        .fold(f64::NEG_INFINITY, f64::max);
    let coordinates: Vec<f64> = inside.iter().map(|s| s.distance).collect();
    let integrand: Vec<f64> = inside
        .iter()
        .map(|s| ((s.potential - peak) / kt).exp())
        .collect();
    let (probabilities, normalization) =
        tail_probabilities(&coordinates, &integrand, config.integration)?;
    reporter.phase_finish();

    info!(
        paired = paired.len(),
        inside = inside.len(),
        "Potential-based splitting probability finished."
    );

    Ok(PotentialSpResult {
        kt,
        temperature: config.temperature,
        left: config.boundaries.left,
        right: config.boundaries.right,
        paired,
        rows: coordinates.into_iter().zip(probabilities).collect(),
        normalization,
    })
}
