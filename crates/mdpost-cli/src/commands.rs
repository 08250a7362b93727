pub mod energy;
pub mod fpt;
pub mod landscape;
pub mod pdf;
pub mod smd;
pub mod sp_pmf;
pub mod sp_potential;
pub mod sp_traj;
pub mod specific_heat;

use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mdpost::core::io::report::{Report, ReportOptions};
use mdpost::core::io::traits::{DataFile, ReadOptions};
use mdpost::engine::progress::ProgressReporter;
use std::path::Path;
use tracing::info;

/// Everything a command needs from the global flags.
pub struct Session {
    progress: CliProgressHandler,
}

impl Session {
    pub fn new(quiet: bool) -> Self {
        let progress = if quiet {
            CliProgressHandler::hidden()
        } else {
            CliProgressHandler::new()
        };
        Self { progress }
    }

    pub fn reporter(&self) -> ProgressReporter<'static> {
        ProgressReporter::with_callback(self.progress.get_callback())
    }
}

/// Reads `path` with format `F`, attributing parse failures to the file.
pub fn read_input<F: DataFile>(path: &Path, options: &ReadOptions) -> Result<F::Output>
where
    F::Error: Send + Sync + 'static,
{
    info!("Loading input from {:?}", path);
    F::read_from_path(path, options).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Stamps the input files into the metadata block and writes the report.
pub fn write_report(
    mut report: Report,
    inputs: &[&Path],
    path: &Path,
    options: &ReportOptions,
) -> Result<()> {
    for input in inputs {
        report.push_metadata("Input", input.display());
    }
    report
        .write_to_path(path, options)
        .map_err(|source| CliError::Report {
            path: path.to_path_buf(),
            source,
        })?;
    info!(rows = report.row_count(), "Wrote {:?}", path);
    println!("✓ {} rows written to {}", report.row_count(), path.display());
    Ok(())
}
