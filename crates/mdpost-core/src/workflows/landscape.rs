use crate::core::constants::thermal_energy;
use crate::core::io::report::{Report, ReportError, format_float};
use crate::core::io::table::ColumnTable;
use crate::core::models::profile::Estimate;
use crate::core::numerics::smoothing::NoSmoothing;
use crate::engine::config::LandscapeConfig;
use crate::engine::error::EngineError;
use crate::engine::pmf::{self, PmfOptions};
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeResult {
    pub kt: f64,
    pub temperature: f64,
    pub headers: Vec<String>,
    /// Input rows in file order, paired with their reconstructed energy.
    pub rows: Vec<(Vec<String>, Estimate)>,
}

impl LandscapeResult {
    pub fn dropped_count(&self) -> usize {
        self.rows.iter().filter(|(_, pe)| !pe.is_defined()).count()
    }

    /// The input table with a trailing `PE` column; rows without a finite
    /// energy are left out.
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let columns = self
            .headers
            .iter()
            .cloned()
            .chain(std::iter::once("PE".to_string()));
        let mut report = Report::new("Energy landscape from splitting probability", columns)
            .with_metadata("Temperature (K)", self.temperature)
            .with_metadata("kT (kcal/mol)", self.kt)
            .with_metadata("Dropped rows", self.dropped_count());
        for (cells, pe) in &self.rows {
            let Some(pe) = pe.value() else { continue };
            let mut row = cells.clone();
            row.push(format_float(pe));
            report.push_row(row)?;
        }
        Ok(report)
    }
}

/// `PE = -ln(-dSP/dx) * kT` over an existing splitting-probability table.
#[instrument(skip_all, name = "landscape_workflow")]
pub fn run(
    table: &ColumnTable,
    config: &LandscapeConfig,
    reporter: &ProgressReporter,
) -> Result<LandscapeResult, EngineError> {
    let kt = thermal_energy(config.temperature);

    reporter.phase_start("Landscape");
    let coordinates = table.column(&config.coordinate_column)?;
    let probabilities = table.column(&config.sp_column)?;
    let energies = pmf::reconstruct(
        &coordinates,
        &probabilities,
        &PmfOptions::new(kt, false),
        &NoSmoothing,
    )?;
    reporter.phase_finish();

    info!(
        rows = table.row_count(),
        "Reconstructed energy landscape from '{}'.", config.sp_column
    );

    Ok(LandscapeResult {
        kt,
        temperature: config.temperature,
        headers: table.headers().to_vec(),
        rows: table.rows().map(<[String]>::to_vec).zip(energies).collect(),
    })
}
