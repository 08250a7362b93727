use crate::core::io::report::{Report, ReportError};
use crate::core::models::trajectory::Trajectory;
use crate::engine::config::DensityConfig;
use crate::engine::density::{self, DensityEstimate};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ExtPdfResult {
    pub config: DensityConfig,
    pub estimate: DensityEstimate,
}

impl ExtPdfResult {
    fn base_report(&self, title: &str, columns: [&str; 2]) -> Report {
        let mut report = Report::new(title, columns)
            .with_metadata("Range", format!("[{}, {}]", self.config.start, self.config.end))
            .with_metadata("Bins", self.config.bin_count)
            .with_metadata("Bin width", self.config.bin_width())
            .with_metadata("Samples in range", self.estimate.samples_in_range);
        if let Some(start) = self.config.frame_range.start {
            report.push_metadata("First frame", start);
        }
        if let Some(end) = self.config.frame_range.end {
            report.push_metadata("End frame (exclusive)", end);
        }
        report
    }

    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut report = self.base_report("Extension probability density", ["EXT", "PDF"]);
        for sample in self.estimate.profile().samples() {
            report.push_values(&[sample.coordinate, sample.density])?;
        }
        Ok(report)
    }

    /// `EXT PDF_AVG` rows, or `None` when no moving average was requested.
    pub fn average_report(&self) -> Result<Option<Report>, ReportError> {
        let Some(average) = &self.estimate.moving_average else {
            return Ok(None);
        };
        let mut report = self.base_report("Extension probability density, moving average", ["EXT", "PDF_AVG"]);
        report.push_metadata("Window (bins)", average.window_bins);
        for (x, value) in self.estimate.averaged() {
            report.push_values(&[x, value])?;
        }
        Ok(Some(report))
    }
}

#[instrument(skip_all, name = "ext_pdf_workflow")]
pub fn run(
    trajectory: &Trajectory,
    config: &DensityConfig,
    reporter: &ProgressReporter,
) -> Result<ExtPdfResult, EngineError> {
    reporter.phase_start("Histogram");
    let estimate = density::estimate(trajectory, config)?;
    reporter.phase_finish();

    info!(
        bins = config.bin_count,
        in_range = estimate.samples_in_range,
        "Extension density computed."
    );
    Ok(ExtPdfResult {
        config: config.clone(),
        estimate,
    })
}
