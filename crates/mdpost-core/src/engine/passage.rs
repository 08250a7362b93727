use super::config::PassageConfig;
use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::constants::FS_TO_S;
use crate::core::models::trajectory::Trajectory;
use crate::core::numerics::gradient::gradient;
use crate::core::numerics::histogram::Histogram;
use crate::core::numerics::integrate::trapezoid;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassageRow {
    pub frame: i64,
    /// Seconds, when the time between frames is known.
    pub time: Option<f64>,
    /// Probability mass between the boundaries using frames before `frame`.
    pub area: f64,
    pub fptd: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirstPassage {
    pub rows: Vec<PassageRow>,
    /// Samples left after the frame-range restriction.
    pub frame_count: usize,
}

/// First-passage-time distribution as the negative time derivative of the
/// density mass held between the two boundaries.
#[instrument(skip_all, name = "first_passage")]
pub fn first_passage(
    trajectory: &Trajectory,
    config: &PassageConfig,
    reporter: &ProgressReporter,
) -> Result<FirstPassage, EngineError> {
    let restricted = trajectory.restrict(&config.frame_range);
    let frame_count = restricted.len();
    let instant_count = frame_count / config.frame_step;
    if instant_count < 2 {
        return Err(EngineError::NoSamples(format!(
            "{frame_count} frames with a step of {} give {instant_count} evaluation instant(s), at least 2 are required",
            config.frame_step
        )));
    }

    let origin = config.frame_range.start.filter(|s| *s > 0).unwrap_or(0);
    let step = config.frame_step as i64;
    let instants: Vec<i64> = (1..=instant_count as i64).map(|i| origin + i * step).collect();

    reporter.task_start(instant_count);
    let mut areas = Vec::with_capacity(instant_count);
    for &instant in &instants {
        let values: Vec<f64> = restricted
            .samples()
            .iter()
            .filter(|s| s.frame < instant)
            .map(|s| s.coordinate)
            .collect();
        areas.push(mass_between(&values, config)?);
        reporter.task_increment();
    }
    reporter.task_finish();

    let axis: Vec<f64> = instants.iter().map(|&f| f as f64).collect();
    let mut fptd: Vec<f64> = gradient(&areas, &axis)?.into_iter().map(|g| -g).collect();
    if config.normalize {
        normalize(&mut fptd);
    }
    debug!(instants = instant_count, "Computed first-passage-time distribution");

    let rows = instants
        .iter()
        .zip(areas)
        .zip(fptd)
        .map(|((&frame, area), fptd)| PassageRow {
            frame,
            time: config.frame_time_fs.map(|fs| frame as f64 * fs * FS_TO_S),
            area,
            fptd,
        })
        .collect();
    Ok(FirstPassage { rows, frame_count })
}

/// Trapezoid of the histogram over bin midpoints, from the bin holding the
/// left boundary to the bin holding the right one. Boundaries beyond the
/// histogram are clamped to its first or last bin.
fn mass_between(values: &[f64], config: &PassageConfig) -> Result<f64, EngineError> {
    if values.iter().all(|v| v.is_nan()) {
        return Ok(0.0);
    }
    let histogram = Histogram::auto(values, config.bin_count)?;
    let heights: Vec<f64> = if config.density {
        histogram.density()
    } else {
        histogram.counts().iter().map(|&c| c as f64).collect()
    };
    let midpoints = histogram.edges().centers();

    let last = histogram.edges().count() as isize - 1;
    let clamp = |bin: isize| bin.clamp(0, last) as usize;
    let a = clamp(histogram.edges().insertion_bin(config.boundaries.left));
    let b = clamp(histogram.edges().insertion_bin(config.boundaries.right));
    if a > b {
        return Ok(0.0);
    }
    Ok(trapezoid(&heights[a..=b], &midpoints[a..=b]))
}

fn normalize(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    values.iter_mut().for_each(|v| *v -= min);
    let sum: f64 = values.iter().sum();
    if sum > 0.0 {
        values.iter_mut().for_each(|v| *v /= sum);
    }
}
