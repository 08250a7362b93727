use mdpost::core::io::profile::DensityFile;
use mdpost::core::io::report::{Report, ReportOptions};
use mdpost::core::io::traits::{DataFile, ReadOptions};
use mdpost::core::io::trajectory::TrajectoryFile;
use mdpost::core::models::profile::{DensityProfile, Estimate};
use mdpost::core::models::trajectory::Trajectory;
use mdpost::engine::config::{
    DiscretizationConfig, SpatialBinning, SplitPmfConfigBuilder, SplitTrajConfigBuilder,
    TemporalBinning,
};
use mdpost::engine::discretize::discretize;
use mdpost::engine::progress::ProgressReporter;
use mdpost::engine::splitting::counting::{self, Commitment};
use mdpost::workflows::{sp_pmf, sp_traj};
use std::fmt::Write as _;
use std::io::Write;
use tempfile::NamedTempFile;

/// Reflecting random walk on [0, 10] driven by a fixed linear congruential
/// sequence, so every run sees the same trajectory.
fn random_walk(steps: usize) -> Trajectory {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut x = 5.0f64;
    let mut samples = Vec::with_capacity(steps);
    for frame in 0..steps {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let u = (state >> 11) as f64 / (1u64 << 53) as f64;
        x += (u - 0.5) * 0.8;
        if x < 0.0 {
            x = -x;
        }
        if x > 10.0 {
            x = 20.0 - x;
        }
        samples.push((frame as i64, x));
    }
    Trajectory::from_pairs(samples)
}

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn trajectory_file(trajectory: &Trajectory) -> NamedTempFile {
    let mut text = String::from("# FRAME EXT\n");
    for s in trajectory.samples() {
        writeln!(text, "{} {:?}", s.frame, s.coordinate).unwrap();
    }
    write_temp(&text)
}

fn density_file(pairs: impl IntoIterator<Item = (f64, f64)>) -> NamedTempFile {
    let mut text = String::from("# EXT PDF\n\n");
    for (x, p) in pairs {
        writeln!(text, "{x:?}\t{p:?}").unwrap();
    }
    write_temp(&text)
}

/// Data cells of a rendered report, skipping metadata and header.
fn data_cells(report: &Report) -> Vec<Vec<f64>> {
    let bytes = report.render(&ReportOptions::default()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .skip(1)
        .map(|line| line.split('\t').map(|c| c.parse::<f64>().unwrap()).collect())
        .collect()
}

#[test]
fn trajectory_pipeline_writes_only_finite_rows() {
    let walk = random_walk(20_000);
    let file = trajectory_file(&walk);
    let trajectory = TrajectoryFile::read_from_path(file.path(), &ReadOptions::default()).unwrap();
    assert_eq!(trajectory, walk);

    let config = SplitTrajConfigBuilder::new()
        .left(1.0)
        .right(9.0)
        .temperature(300.0)
        .spatial_binning(SpatialBinning::Count(20))
        .temporal_binning(TemporalBinning::FramesPerBin(10))
        .build()
        .unwrap();
    let result = sp_traj::run(&trajectory, &config, &ProgressReporter::new()).unwrap();

    let first = result.full.rows.first().unwrap();
    let last = result.full.rows.last().unwrap();
    assert_eq!(first.probability, Estimate::Value(1.0));
    assert_eq!(last.probability, Estimate::Value(0.0));

    let report = result.to_report().unwrap();
    let cells = data_cells(&report);
    assert!(cells.len() <= result.full.rows.len());
    for row in &cells {
        assert_eq!(row.len(), sp_traj::COLUMNS.len());
        assert!(row.iter().all(|v| v.is_finite()));
        assert!((0.0..=1.0).contains(&row[4]));
    }
}

#[test]
fn trajectory_pipeline_is_deterministic() {
    let trajectory = random_walk(5_000);
    let discretization =
        DiscretizationConfig::new(SpatialBinning::Width(0.5), TemporalBinning::Count(500)).unwrap();
    let a = discretize(&trajectory, &discretization).unwrap();
    let b = discretize(&trajectory, &discretization).unwrap();
    assert_eq!(a, b);

    let config = SplitTrajConfigBuilder::new()
        .left(2.0)
        .right(8.0)
        .temperature(310.0)
        .spatial_binning(SpatialBinning::Width(0.5))
        .temporal_binning(TemporalBinning::Count(500))
        .build()
        .unwrap();
    let render = || {
        sp_traj::run(&trajectory, &config, &ProgressReporter::new())
            .unwrap()
            .to_report()
            .unwrap()
            .render(&ReportOptions::default())
            .unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn boltzmann_pipeline_meets_boundary_conditions_and_monotonicity() {
    let file = density_file((0..=400).map(|i| {
        let x = i as f64 * 0.025;
        (x, (-(x - 5.0).powi(2) / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt())
    }));
    let density = DensityFile::read_from_path(file.path(), &ReadOptions::default()).unwrap();

    let config = SplitPmfConfigBuilder::new()
        .left(3.0)
        .right(7.0)
        .temperature(300.0)
        .build()
        .unwrap();
    let result = sp_pmf::run(&density, &config, &ProgressReporter::new()).unwrap();

    let probabilities: Vec<f64> = result.full.rows.iter().map(|r| r.probability).collect();
    assert!((probabilities[0] - 1.0).abs() < 1e-6);
    assert!(probabilities[probabilities.len() - 1].abs() < 1e-6);
    assert!(probabilities.windows(2).all(|w| w[1] <= w[0]));

    let cells = data_cells(&result.to_report().unwrap());
    assert!(cells.len() <= result.full.rows.len());
    assert!(cells.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn uniform_density_gives_linear_splitting_probability() {
    let density = DensityProfile::from_pairs((0..=64).map(|i| (i as f64 * 0.125, 0.1)));
    let config = SplitPmfConfigBuilder::new()
        .left(2.0)
        .right(6.0)
        .temperature(300.0)
        .build()
        .unwrap();
    let result = sp_pmf::run(&density, &config, &ProgressReporter::new()).unwrap();
    for row in &result.full.rows {
        let expected = (6.0 - row.coordinate) / 4.0;
        assert!((row.probability - expected).abs() < 1e-9, "{row:?}");
    }
}

#[test]
fn second_visit_of_middle_bin_commits_left() {
    let bins = [0, 1, 2, 1, 0];
    let outcomes = counting::visit_outcomes(&bins, 0, 2, 1);
    assert_eq!(outcomes[1], (3, Commitment::Left));
    let estimate = counting::estimate(&bins, 0, 2);
    assert_eq!(estimate.tallies[1].left, 1);
}

#[test]
fn never_visited_bin_is_reported_once_and_left_undefined() {
    let bins = [0, 1, 3, 1, 0, 3, 4];
    let estimate = counting::estimate(&bins, 0, 4);
    assert_eq!(estimate.empty_bins, vec![2]);
    let tally = estimate.tallies.iter().find(|t| t.bin == 2).unwrap();
    assert_eq!(tally.visits, 0);
    assert_eq!(tally.probability(), Estimate::Undefined);
}
