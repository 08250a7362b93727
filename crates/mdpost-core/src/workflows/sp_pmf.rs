use crate::core::constants::thermal_energy;
use crate::core::io::report::{Report, ReportError};
use crate::core::models::profile::{DensityProfile, Estimate};
use crate::core::numerics::smoothing::Smoother;
use crate::engine::config::SplitPmfConfig;
use crate::engine::error::EngineError;
use crate::engine::pmf::{self, PmfOptions};
use crate::engine::progress::ProgressReporter;
use crate::engine::splitting::boltzmann::{self, BoltzmannRow};
use crate::engine::splitting::tail_probabilities;
use crate::engine::windows::{self, Window};
use tracing::{info, instrument, warn};

pub const COLUMNS: [&str; 5] = ["EXT", "PDF", "PMF_APP", "SP", "PMF_RE"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpPmfRow {
    pub coordinate: f64,
    pub density: f64,
    pub apparent_pmf: f64,
    pub probability: f64,
    pub pmf: Estimate,
}

/// Splitting probability and reconstructed PMF over one coordinate interval.
#[derive(Debug, Clone, PartialEq)]
pub struct SpPmfTable {
    pub left: f64,
    pub right: f64,
    pub normalization: f64,
    pub rows: Vec<SpPmfRow>,
}

impl SpPmfTable {
    /// Rows with a finite PMF, the only ones written out.
    pub fn written_rows(&self) -> impl Iterator<Item = &SpPmfRow> + '_ {
        self.rows
            .iter()
            .filter(|r| r.probability.is_finite() && r.pmf.is_defined())
    }

    pub fn dropped_count(&self) -> usize {
        self.rows.len() - self.written_rows().count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpPmfResult {
    pub kt: f64,
    pub temperature: f64,
    pub negate: bool,
    /// Samples between the boundaries discarded for a non-positive density.
    pub discarded: usize,
    pub full: SpPmfTable,
    /// Per-window results, when windows were requested. Degenerate windows
    /// are omitted.
    pub windows: Vec<(Window, SpPmfTable)>,
}

impl SpPmfResult {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        self.table_report("Splitting probability and PMF (Boltzmann inversion)", &self.full, 1.0)
    }

    pub fn window_reports(&self) -> Result<Vec<(usize, Report)>, ReportError> {
        self.windows
            .iter()
            .map(|(window, table)| {
                let mut report = self.table_report(
                    "Windowed splitting probability and PMF (Boltzmann inversion)",
                    table,
                    table.normalization,
                )?;
                report.push_metadata("Window", window.index);
                Ok((window.index, report))
            })
            .collect()
    }

    fn table_report(&self, title: &str, table: &SpPmfTable, scale: f64) -> Result<Report, ReportError> {
        let mut report = Report::new(title, COLUMNS)
            .with_metadata("Left boundary", table.left)
            .with_metadata("Right boundary", table.right)
            .with_metadata("Temperature (K)", self.temperature)
            .with_metadata("kT (kcal/mol)", self.kt)
            .with_metadata("Integrand", if self.negate { "1/PDF" } else { "PDF" })
            .with_metadata("Normalization", table.normalization)
            .with_metadata("PMF scale", scale)
            .with_metadata("Dropped rows", table.dropped_count());
        for row in table.written_rows() {
            let Some(pmf) = row.pmf.value() else { continue };
            report.push_values(&[
                row.coordinate,
                row.density,
                row.apparent_pmf,
                row.probability,
                pmf,
            ])?;
        }
        Ok(report)
    }
}

#[instrument(skip_all, name = "sp_pmf_workflow")]
pub fn run(
    density: &DensityProfile,
    config: &SplitPmfConfig,
    reporter: &ProgressReporter,
) -> Result<SpPmfResult, EngineError> {
    let kt = thermal_energy(config.temperature);
    let smoother = config.smoothing.smoother()?;

    reporter.phase_start("Splitting Probability");
    info!(
        samples = density.len(),
        left = config.boundaries.left,
        right = config.boundaries.right,
        "Estimating splitting probability from the density profile."
    );
    let estimate = boltzmann::estimate(
        density,
        &config.boundaries,
        kt,
        config.negate,
        config.integration,
    )?;
    reporter.phase_finish();

    reporter.phase_start("PMF Reconstruction");
    let full = table_from_rows(
        config.boundaries.left,
        config.boundaries.right,
        estimate.normalization,
        estimate.rows.clone(),
        PmfOptions::new(kt, config.negate),
        smoother.as_ref(),
    )?;
    reporter.phase_finish();

    let mut windowed = Vec::new();
    if let Some(count) = config.windows {
        let list = windows::half_overlapping(&config.boundaries, count);
        reporter.phase_start("Windows");
        reporter.task_start(list.len());
        for window in list {
            match window_table(&estimate.rows, &window, kt, config, smoother.as_ref()) {
                Ok(table) => windowed.push((window, table)),
                Err(EngineError::DegenerateProfile(reason)) => {
                    warn!(window = window.index, %reason, "Skipping degenerate window");
                }
                Err(e) => return Err(e),
            }
            reporter.task_increment();
        }
        reporter.task_finish();
        reporter.phase_finish();
    }

    info!(
        rows = full.rows.len(),
        dropped = full.dropped_count(),
        windows = windowed.len(),
        "Splitting probability workflow finished."
    );

    Ok(SpPmfResult {
        kt,
        temperature: config.temperature,
        negate: config.negate,
        discarded: estimate.discarded,
        full,
        windows: windowed,
    })
}

/// Re-integrates the retained samples that fall inside `window`; the PMF is
/// scaled by the window's own normalisation.
fn window_table(
    rows: &[BoltzmannRow],
    window: &Window,
    kt: f64,
    config: &SplitPmfConfig,
    smoother: &dyn Smoother,
) -> Result<SpPmfTable, EngineError> {
    let inside: Vec<BoltzmannRow> = rows
        .iter()
        .copied()
        .filter(|r| window.contains(r.coordinate))
        .collect();
    let coordinates: Vec<f64> = inside.iter().map(|r| r.coordinate).collect();
    let integrand: Vec<f64> = inside
        .iter()
        .map(|r| if config.negate { 1.0 / r.density } else { r.density })
        .collect();
    let (probabilities, normalization) =
        tail_probabilities(&coordinates, &integrand, config.integration)?;

    let rows = inside
        .into_iter()
        .zip(probabilities)
        .map(|(row, probability)| BoltzmannRow { probability, ..row })
        .collect();
    table_from_rows(
        window.start,
        window.end,
        normalization,
        rows,
        PmfOptions::new(kt, config.negate).with_scale(normalization),
        smoother,
    )
}

fn table_from_rows(
    left: f64,
    right: f64,
    normalization: f64,
    rows: Vec<BoltzmannRow>,
    options: PmfOptions,
    smoother: &dyn Smoother,
) -> Result<SpPmfTable, EngineError> {
    let coordinates: Vec<f64> = rows.iter().map(|r| r.coordinate).collect();
    let probabilities: Vec<f64> = rows.iter().map(|r| r.probability).collect();
    let energies = pmf::reconstruct(&coordinates, &probabilities, &options, smoother)?;

    Ok(SpPmfTable {
        left,
        right,
        normalization,
        rows: rows
            .into_iter()
            .zip(energies)
            .map(|(row, pmf)| SpPmfRow {
                coordinate: row.coordinate,
                density: row.density,
                apparent_pmf: row.apparent_pmf,
                probability: row.probability,
                pmf,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numerics::smoothing::Smoothing;
    use crate::engine::config::SplitPmfConfigBuilder;

    fn gaussian_density() -> DensityProfile {
        DensityProfile::from_pairs((0..=200).map(|i| {
            let x = i as f64 * 0.05;
            (x, (-(x - 5.0).powi(2) / 2.0).exp())
        }))
    }

    fn config(windows: Option<usize>) -> SplitPmfConfig {
        SplitPmfConfigBuilder::new()
            .left(2.0)
            .right(8.0)
            .temperature(300.0)
            .windows(windows)
            .build()
            .unwrap()
    }

    #[test]
    fn single_well_gives_boundary_values_and_finite_report() {
        let result = run(&gaussian_density(), &config(None), &ProgressReporter::new()).unwrap();
        let first = result.full.rows.first().unwrap();
        let last = result.full.rows.last().unwrap();
        assert!((first.probability - 1.0).abs() < 1e-6);
        assert!(last.probability.abs() < 1e-6);

        let report = result.to_report().unwrap();
        assert_eq!(report.columns(), COLUMNS);
        assert!(report.row_count() <= result.full.rows.len());
        for value in report.column_values("PMF_RE").unwrap() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn windows_cover_the_interval_with_their_own_normalization() {
        let result = run(&gaussian_density(), &config(Some(3)), &ProgressReporter::new()).unwrap();
        assert_eq!(result.windows.len(), 5);
        for (window, table) in &result.windows {
            assert!(table.rows.iter().all(|r| window.contains(r.coordinate)));
            assert!((table.rows[0].probability - 1.0).abs() < 1e-6);
            assert!(table.normalization < result.full.normalization);
        }
        let reports = result.window_reports().unwrap();
        assert_eq!(reports.first().map(|(i, _)| *i), Some(1));
    }

    #[test]
    fn too_few_samples_between_boundaries_is_degenerate() {
        let density = DensityProfile::from_pairs([(0.0, 1.0), (5.0, 1.0), (10.0, 1.0)]);
        let err = run(&density, &config(None), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, EngineError::DegenerateProfile(_)));
    }

    fn smoothed_config(left: f64, right: f64, window_length: usize, windows: Option<usize>) -> SplitPmfConfig {
        SplitPmfConfigBuilder::new()
            .left(left)
            .right(right)
            .temperature(300.0)
            .smoothing(Smoothing::SavitzkyGolay {
                window_length,
                poly_order: 2,
            })
            .windows(windows)
            .build()
            .unwrap()
    }

    #[test]
    fn windows_shorter_than_the_filter_are_still_reconstructed() {
        let density = DensityProfile::from_pairs((0..=20).map(|i| {
            let x = i as f64 * 0.5;
            (x, (-(x - 5.0).powi(2) / 2.0).exp())
        }));
        let result = run(&density, &smoothed_config(0.0, 10.0, 7, Some(4)), &ProgressReporter::new()).unwrap();

        assert_eq!(result.full.rows.len(), 21);
        assert_eq!(result.windows.len(), 7);
        for (_, table) in &result.windows {
            assert!(table.rows.len() < 7);
            assert!(table.rows.iter().any(|r| r.pmf.is_defined()));
        }
        assert_eq!(result.window_reports().unwrap().len(), 7);
    }

    #[test]
    fn three_point_profile_with_smoothing_matches_the_unsmoothed_run() {
        let density = DensityProfile::from_pairs([(0.0, 0.5), (1.0, 1.0), (2.0, 0.5)]);
        let smoothed = run(&density, &smoothed_config(0.0, 2.0, 5, None), &ProgressReporter::new()).unwrap();
        let plain_config = SplitPmfConfigBuilder::new()
            .left(0.0)
            .right(2.0)
            .temperature(300.0)
            .build()
            .unwrap();
        let plain = run(&density, &plain_config, &ProgressReporter::new()).unwrap();
        assert_eq!(smoothed.full, plain.full);
    }
}
