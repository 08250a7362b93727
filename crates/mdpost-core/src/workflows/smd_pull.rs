use crate::core::io::namd::SmdLog;
use crate::core::io::report::{Report, ReportError, format_float};
use crate::engine::config::SmdConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::smd::{self, SmdSample};
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct SmdResult {
    pub config: SmdConfig,
    pub samples: Vec<SmdSample>,
    /// Malformed `SMD` lines that were skipped.
    pub skipped: usize,
}

impl SmdResult {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut columns = vec!["timestep", "smd_com_force", "smd_com_displacement"];
        if self.config.fixed_com.is_some() {
            columns.push("smd_fixed_dist");
        }
        let mut report = Report::new("SMD constant-velocity pull", columns)
            .with_metadata("Records", self.samples.len())
            .with_metadata("Skipped records", self.skipped);
        match self.config.pull_direction {
            Some(d) => report.push_metadata("Pull direction", format!("{} {} {}", d.x, d.y, d.z)),
            None => report.push_metadata("Pull direction", "none (magnitudes)"),
        }
        if let Some(com) = self.config.fixed_com {
            report.push_metadata("Fixed COM", format!("{} {} {}", com.x, com.y, com.z));
        }

        for sample in &self.samples {
            let mut row = vec![
                sample.timestep.to_string(),
                format_float(sample.force),
                format_float(sample.displacement),
            ];
            if let Some(distance) = sample.fixed_distance {
                row.push(format_float(distance));
            }
            report.push_row(row)?;
        }
        Ok(report)
    }
}

#[instrument(skip_all, name = "smd_workflow")]
pub fn run<P: AsRef<Path>>(
    paths: &[P],
    config: &SmdConfig,
    reporter: &ProgressReporter,
) -> Result<SmdResult, EngineError> {
    reporter.phase_start("Reading Logs");
    let log = SmdLog::read_paths(paths)?;
    reporter.phase_finish();
    if log.skipped > 0 {
        warn!(skipped = log.skipped, "Some SMD records were malformed and skipped");
    }

    reporter.phase_start("SMD Analysis");
    let samples = smd::analyze(&log, config)?;
    reporter.phase_finish();

    info!(records = samples.len(), "SMD pull analysis finished.");
    Ok(SmdResult {
        config: config.clone(),
        samples,
        skipped: log.skipped,
    })
}
