use crate::core::constants::thermal_energy;
use crate::core::io::report::{Report, ReportError, format_float};
use crate::core::models::bins::SpatialBin;
use crate::core::models::profile::Estimate;
use crate::core::models::trajectory::Trajectory;
use crate::core::numerics::smoothing::Smoother;
use crate::engine::config::SplitTrajConfig;
use crate::engine::discretize::{DiscreteTrajectory, discretize};
use crate::engine::error::{BoundarySide, EngineError};
use crate::engine::pmf::{self, PmfOptions};
use crate::engine::progress::ProgressReporter;
use crate::engine::splitting::counting::{self, BinTally};
use crate::engine::windows::{self, Window};
use tracing::{info, instrument, warn};

pub const COLUMNS: [&str; 6] = [
    "EXT_BIN",
    "EXT_BIN_START",
    "EXT_BIN_END",
    "EXT_BIN_MED",
    "SP",
    "PMF_RE",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpTrajRow {
    pub bin: SpatialBin,
    pub tally: BinTally,
    pub probability: Estimate,
    pub pmf: Estimate,
}

/// Counting estimate between two boundary bins, with the PMF reconstructed
/// against the bin index.
#[derive(Debug, Clone, PartialEq)]
pub struct SpTrajTable {
    pub left_bin: usize,
    pub right_bin: usize,
    pub rows: Vec<SpTrajRow>,
    pub empty_bins: Vec<usize>,
}

impl SpTrajTable {
    pub fn written_rows(&self) -> impl Iterator<Item = &SpTrajRow> + '_ {
        self.rows
            .iter()
            .filter(|r| r.probability.is_defined() && r.pmf.is_defined())
    }

    pub fn dropped_count(&self) -> usize {
        self.rows.len() - self.written_rows().count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpTrajResult {
    pub kt: f64,
    pub temperature: f64,
    pub left: f64,
    pub right: f64,
    pub samples: usize,
    pub discrete: DiscreteTrajectory,
    pub full: SpTrajTable,
    /// Per-window results; windows no time bin falls into are omitted.
    pub windows: Vec<(Window, SpTrajTable)>,
}

impl SpTrajResult {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        self.table_report("Splitting probability and PMF (trajectory counting)", &self.full)
    }

    pub fn window_reports(&self) -> Result<Vec<(usize, Report)>, ReportError> {
        self.windows
            .iter()
            .map(|(window, table)| {
                let mut report =
                    self.table_report("Windowed splitting probability and PMF (trajectory counting)", table)?;
                report.push_metadata("Window", window.index);
                report.push_metadata("Window range", format!("[{}, {}]", window.start, window.end));
                Ok((window.index, report))
            })
            .collect()
    }

    fn table_report(&self, title: &str, table: &SpTrajTable) -> Result<Report, ReportError> {
        let edges = self.discrete.spatial_edges();
        let frame_edges = self.discrete.frame_edges();
        let mut report = Report::new(title, COLUMNS)
            .with_metadata("Samples", self.samples)
            .with_metadata("Left boundary", self.left)
            .with_metadata("Right boundary", self.right)
            .with_metadata("Left boundary bin", table.left_bin)
            .with_metadata("Right boundary bin", table.right_bin)
            .with_metadata("Spatial bins", edges.count())
            .with_metadata("Spatial bin width", edges.bin(0).map_or(0.0, |b| b.width()))
            .with_metadata("Temporal bins", frame_edges.count())
            .with_metadata("Occupied temporal bins", self.discrete.len())
            .with_metadata("Temperature (K)", self.temperature)
            .with_metadata("kT (kcal/mol)", self.kt)
            .with_metadata("Dropped rows", table.dropped_count());
        for row in table.written_rows() {
            let (Some(sp), Some(pmf)) = (row.probability.value(), row.pmf.value()) else {
                continue;
            };
            report.push_row(vec![
                row.bin.index.to_string(),
                format_float(row.bin.start),
                format_float(row.bin.end),
                format_float(row.bin.center()),
                format_float(sp),
                format_float(pmf),
            ])?;
        }
        Ok(report)
    }
}

#[instrument(skip_all, name = "sp_traj_workflow")]
pub fn run(
    trajectory: &Trajectory,
    config: &SplitTrajConfig,
    reporter: &ProgressReporter,
) -> Result<SpTrajResult, EngineError> {
    let kt = thermal_energy(config.temperature);
    let smoother = config.smoothing.smoother()?;

    reporter.phase_start("Discretization");
    let restricted = trajectory.restrict(&config.frame_range);
    info!(
        samples = restricted.len(),
        "Discretizing trajectory into temporal and spatial bins."
    );
    let discrete = discretize(&restricted, &config.discretization)?;
    let left_bin = discrete.locate_boundary(BoundarySide::Left, config.boundaries.left)?;
    let right_bin = discrete.locate_boundary(BoundarySide::Right, config.boundaries.right)?;
    reporter.phase_finish();

    reporter.phase_start("Splitting Probability");
    let bins = discrete.bins();
    let full = count_table(&discrete, &bins, left_bin, right_bin, None, kt, smoother.as_ref())?;
    reporter.phase_finish();

    let mut windowed = Vec::new();
    if let Some(count) = config.windows {
        let list = windows::half_overlapping(&config.boundaries, count);
        reporter.phase_start("Windows");
        reporter.task_start(list.len());
        for window in list {
            match window_bins(&discrete, &window) {
                Some((lo, hi)) => {
                    let table =
                        count_table(&discrete, &bins, lo, hi, Some(window.index), kt, smoother.as_ref())?;
                    windowed.push((window, table));
                }
                None => warn!(
                    window = window.index,
                    start = window.start,
                    end = window.end,
                    "No time bin has its mean inside the window; skipping"
                ),
            }
            reporter.task_increment();
        }
        reporter.task_finish();
        reporter.phase_finish();
    }

    info!(
        left_bin,
        right_bin,
        empty_bins = full.empty_bins.len(),
        dropped = full.dropped_count(),
        "Trajectory counting workflow finished."
    );

    Ok(SpTrajResult {
        kt,
        temperature: config.temperature,
        left: config.boundaries.left,
        right: config.boundaries.right,
        samples: restricted.len(),
        discrete,
        full,
        windows: windowed,
    })
}

/// Lowest and highest spatial bin among the time bins whose mean lies in `window`.
fn window_bins(discrete: &DiscreteTrajectory, window: &Window) -> Option<(usize, usize)> {
    discrete
        .steps()
        .iter()
        .filter(|s| window.contains(s.mean))
        .fold(None, |acc, s| match acc {
            None => Some((s.spatial_bin, s.spatial_bin)),
            Some((lo, hi)) => Some((lo.min(s.spatial_bin), hi.max(s.spatial_bin))),
        })
}

fn count_table(
    discrete: &DiscreteTrajectory,
    bins: &[usize],
    left_bin: usize,
    right_bin: usize,
    window: Option<usize>,
    kt: f64,
    smoother: &dyn Smoother,
) -> Result<SpTrajTable, EngineError> {
    let estimate = match window {
        Some(index) => counting::estimate_window(bins, left_bin, right_bin, index),
        None => counting::estimate(bins, left_bin, right_bin),
    };

    let defined: Vec<(usize, f64)> = estimate
        .tallies
        .iter()
        .filter_map(|t| t.probability().value().map(|sp| (t.bin, sp)))
        .collect();
    let axis: Vec<f64> = defined.iter().map(|(bin, _)| *bin as f64).collect();
    let probabilities: Vec<f64> = defined.iter().map(|(_, sp)| *sp).collect();
    let energies = pmf::reconstruct(&axis, &probabilities, &PmfOptions::new(kt, true), smoother)?;

    let mut rows = Vec::with_capacity(estimate.tallies.len());
    let mut energy_iter = defined.iter().map(|(bin, _)| *bin).zip(energies).peekable();
    for tally in &estimate.tallies {
        let bin = discrete
            .spatial_edges()
            .bin(tally.bin)
            .ok_or_else(|| EngineError::Internal(format!("bin {} outside the partition", tally.bin)))?;
        let pmf = match energy_iter.peek() {
            Some((b, _)) if *b == tally.bin => energy_iter.next().map_or(Estimate::Undefined, |(_, e)| e),
            _ => Estimate::Undefined,
        };
        rows.push(SpTrajRow {
            bin,
            tally: *tally,
            probability: tally.probability(),
            pmf,
        });
    }

    Ok(SpTrajTable {
        left_bin: estimate.left_bin,
        right_bin: estimate.right_bin,
        rows,
        empty_bins: estimate.empty_bins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::numerics::smoothing::Smoothing;
    use crate::engine::config::{SpatialBinning, SplitTrajConfigBuilder, TemporalBinning};
    use crate::testing::capture_warnings;

    /// Oscillates between 0 and 10 so every bin is crossed in both directions.
    fn sawtooth() -> Trajectory {
        let cycle: Vec<f64> = (0..=10).chain((1..10).rev()).map(|v| v as f64).collect();
        Trajectory::from_pairs(
            (0..200).map(|i| (i as i64, cycle[i % cycle.len()])),
        )
    }

    fn config(left: f64, right: f64, windows: Option<usize>) -> SplitTrajConfig {
        SplitTrajConfigBuilder::new()
            .left(left)
            .right(right)
            .temperature(300.0)
            .spatial_binning(SpatialBinning::Count(10))
            .temporal_binning(TemporalBinning::FramesPerBin(1))
            .windows(windows)
            .build()
            .unwrap()
    }

    #[test]
    fn boundary_bins_have_probability_one_and_zero() {
        let result = run(&sawtooth(), &config(1.5, 8.5, None), &ProgressReporter::new()).unwrap();
        let rows = &result.full.rows;
        assert_eq!(rows.first().unwrap().probability, Estimate::Value(1.0));
        assert_eq!(rows.last().unwrap().probability, Estimate::Value(0.0));
        assert!(result.full.empty_bins.is_empty());

        let report = result.to_report().unwrap();
        assert_eq!(report.columns(), COLUMNS);
        for value in report.column_values("PMF_RE").unwrap() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn boundary_outside_partition_is_an_input_range_error() {
        let err = run(&sawtooth(), &config(1.5, 45.0, None), &ProgressReporter::new()).unwrap_err();
        match err {
            EngineError::InputRange { side, value, .. } => {
                assert_eq!(side, BoundarySide::Right);
                assert_eq!(value, 45.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn windows_use_bins_of_the_means_inside_them() {
        let result = run(&sawtooth(), &config(1.5, 8.5, Some(2)), &ProgressReporter::new()).unwrap();
        assert_eq!(result.windows.len(), 3);
        for (window, table) in &result.windows {
            assert!(table.left_bin <= table.right_bin);
            let lo = result.discrete.spatial_edges().bin(table.left_bin).unwrap();
            assert!(lo.end > window.start);
        }
    }

    #[test]
    fn smoothing_wider_than_a_window_keeps_every_window() {
        let config = SplitTrajConfigBuilder::new()
            .left(1.5)
            .right(8.5)
            .temperature(300.0)
            .spatial_binning(SpatialBinning::Count(10))
            .temporal_binning(TemporalBinning::FramesPerBin(1))
            .smoothing(Smoothing::SavitzkyGolay {
                window_length: 7,
                poly_order: 2,
            })
            .windows(Some(2))
            .build()
            .unwrap();
        let result = run(&sawtooth(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(result.windows.len(), 3);
        assert!(result.full.written_rows().count() > 0);
    }

    #[test]
    fn empty_bin_is_warned_once_across_overlapping_windows() {
        // Jumps from 3.5 to 5.5, leaving spatial bin 4 unvisited.
        let cycle = [
            0.5, 1.5, 2.5, 3.5, 5.5, 6.5, 7.5, 8.5, 9.5, 8.5, 7.5, 6.5, 5.5, 3.5, 2.5, 1.5,
        ];
        let trajectory =
            Trajectory::from_pairs((0..160).map(|i| (i as i64, cycle[i % cycle.len()])));
        let (result, warnings) =
            capture_warnings(|| run(&trajectory, &config(0.5, 9.5, Some(2)), &ProgressReporter::new()));
        let result = result.unwrap();
        assert_eq!(result.full.empty_bins, vec![4]);
        assert!(result.windows.iter().any(|(_, t)| t.empty_bins.contains(&4)));

        let empty: Vec<&String> = warnings.iter().filter(|w| w.contains("not visited")).collect();
        assert_eq!(empty.len(), 1, "{warnings:?}");
        assert!(empty[0].contains("EXT_BIN 4"));
    }
}
