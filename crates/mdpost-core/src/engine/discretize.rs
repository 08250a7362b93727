use super::config::{ConfigError, DiscretizationConfig, SpatialBinning, TemporalBinning};
use super::error::{BoundarySide, EngineError};
use crate::core::models::bins::BinEdges;
use crate::core::models::trajectory::Trajectory;
use tracing::{debug, instrument};

/// One occupied temporal bin of a discretized trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteStep {
    pub frame_bin: usize,
    /// Mean coordinate of the samples in the temporal bin.
    pub mean: f64,
    pub spatial_bin: usize,
}

/// A coarse-grained trajectory: one spatial bin per occupied temporal bin,
/// in temporal order.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteTrajectory {
    frame_edges: BinEdges,
    spatial_edges: BinEdges,
    steps: Vec<DiscreteStep>,
}

impl DiscreteTrajectory {
    pub fn frame_edges(&self) -> &BinEdges {
        &self.frame_edges
    }

    pub fn spatial_edges(&self) -> &BinEdges {
        &self.spatial_edges
    }

    pub fn steps(&self) -> &[DiscreteStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The spatial-bin sequence the counting estimator walks over.
    pub fn bins(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.spatial_bin).collect()
    }

    /// Spatial bin containing a boundary value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InputRange`] when `value` lies outside
    /// `[first edge, last edge)`.
    pub fn locate_boundary(&self, side: BoundarySide, value: f64) -> Result<usize, EngineError> {
        self.spatial_edges
            .locate(value)
            .ok_or(EngineError::InputRange {
                side,
                value,
                min: self.spatial_edges.first(),
                max: self.spatial_edges.last(),
            })
    }
}

/// Bins frames into temporal windows, averages the coordinate inside each
/// window, then bins those means along the coordinate.
#[instrument(skip_all, name = "discretize")]
pub fn discretize(
    trajectory: &Trajectory,
    config: &DiscretizationConfig,
) -> Result<DiscreteTrajectory, EngineError> {
    if trajectory.is_empty() {
        return Err(EngineError::NoSamples(
            "trajectory is empty after frame-range restriction".to_string(),
        ));
    }

    let spatial_count = spatial_bin_count(trajectory, config.spatial)?;
    let temporal_count = temporal_bin_count(trajectory, config.temporal)?;

    let frames: Vec<f64> = trajectory.frames().map(|f| f as f64).collect();
    let frame_edges = BinEdges::spanning(&frames, temporal_count)?;

    let mut sums = vec![0.0; temporal_count];
    let mut counts = vec![0usize; temporal_count];
    for (frame, sample) in frames.iter().zip(trajectory.samples()) {
        if sample.coordinate.is_nan() {
            continue;
        }
        if let Some(bin) = frame_edges.locate(*frame) {
            sums[bin] += sample.coordinate;
            counts[bin] += 1;
        }
    }

    let occupied: Vec<(usize, f64)> = counts
        .iter()
        .enumerate()
        .filter(|(_, n)| **n > 0)
        .map(|(bin, n)| (bin, sums[bin] / *n as f64))
        .collect();
    let means: Vec<f64> = occupied.iter().map(|(_, m)| *m).collect();
    let spatial_edges = BinEdges::spanning(&means, spatial_count)?;

    let steps: Vec<DiscreteStep> = occupied
        .into_iter()
        .filter_map(|(frame_bin, mean)| {
            spatial_edges.locate(mean).map(|spatial_bin| DiscreteStep {
                frame_bin,
                mean,
                spatial_bin,
            })
        })
        .collect();

    debug!(
        temporal_bins = temporal_count,
        occupied = steps.len(),
        spatial_bins = spatial_count,
        "Discretized trajectory"
    );

    Ok(DiscreteTrajectory {
        frame_edges,
        spatial_edges,
        steps,
    })
}

fn spatial_bin_count(trajectory: &Trajectory, binning: SpatialBinning) -> Result<usize, EngineError> {
    match binning {
        SpatialBinning::Count(n) => Ok(n),
        SpatialBinning::Width(width) => {
            let (min, max) = trajectory
                .coordinate_range()
                .ok_or_else(|| EngineError::NoSamples("trajectory has no coordinates".to_string()))?;
            let count = ((max - min) / width).floor() as usize;
            if count == 0 {
                return Err(ConfigError::InvalidParameter {
                    parameter: "spatial bin width",
                    reason: format!(
                        "width {width} exceeds the coordinate range [{min}, {max}], giving zero bins"
                    ),
                }
                .into());
            }
            Ok(count)
        }
    }
}

fn temporal_bin_count(trajectory: &Trajectory, binning: TemporalBinning) -> Result<usize, EngineError> {
    match binning {
        TemporalBinning::Count(n) => Ok(n),
        TemporalBinning::FramesPerBin(size) => {
            let count = trajectory.len() / size;
            if count == 0 {
                return Err(ConfigError::InvalidParameter {
                    parameter: "frame bin size",
                    reason: format!(
                        "{size} frames per bin exceeds the {} available samples, giving zero bins",
                        trajectory.len()
                    ),
                }
                .into());
            }
            Ok(count)
        }
    }
}
