use crate::core::io::report::{Report, ReportError, format_float};
use crate::core::models::trajectory::Trajectory;
use crate::engine::config::PassageConfig;
use crate::engine::error::EngineError;
use crate::engine::passage::{FirstPassage, first_passage};
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct FptResult {
    pub config: PassageConfig,
    pub passage: FirstPassage,
}

impl FptResult {
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["FRAME"];
        if self.config.frame_time_fs.is_some() {
            columns.push("TIME");
        }
        columns.extend(["PDF_AREA", "FPTD"]);
        columns
    }

    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut report = Report::new("First-passage-time distribution", self.columns())
            .with_metadata("Left boundary", self.config.boundaries.left)
            .with_metadata("Right boundary", self.config.boundaries.right)
            .with_metadata("Spatial bins", self.config.bin_count)
            .with_metadata("Frame step", self.config.frame_step)
            .with_metadata("Frames", self.passage.frame_count)
            .with_metadata("Density", self.config.density)
            .with_metadata("Normalized", self.config.normalize);
        if let Some(fs) = self.config.frame_time_fs {
            report.push_metadata("Time per frame (fs)", fs);
        }
        for row in &self.passage.rows {
            let mut cells = vec![row.frame.to_string()];
            if let Some(time) = row.time {
                cells.push(format_float(time));
            }
            cells.push(format_float(row.area));
            cells.push(format_float(row.fptd));
            report.push_row(cells)?;
        }
        Ok(report)
    }
}

#[instrument(skip_all, name = "fpt_workflow")]
pub fn run(
    trajectory: &Trajectory,
    config: &PassageConfig,
    reporter: &ProgressReporter,
) -> Result<FptResult, EngineError> {
    reporter.phase_start("First Passage");
    info!(
        left = config.boundaries.left,
        right = config.boundaries.right,
        step = config.frame_step,
        "Computing first-passage-time distribution."
    );
    let passage = first_passage(trajectory, config, reporter)?;
    reporter.phase_finish();

    Ok(FptResult {
        config: config.clone(),
        passage,
    })
}
