use super::config::DensityConfig;
use super::error::EngineError;
use crate::core::models::bins::BinEdges;
use crate::core::models::profile::DensityProfile;
use crate::core::models::trajectory::Trajectory;
use crate::core::numerics::histogram::Histogram;
use crate::core::numerics::smoothing::rolling_mean;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    pub window_bins: usize,
    /// Trailing mean per bin; `None` until a full window is available.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityEstimate {
    pub edges: BinEdges,
    pub density: Vec<f64>,
    pub samples_in_range: u64,
    pub moving_average: Option<MovingAverage>,
}

impl DensityEstimate {
    /// `(left edge, density)` per bin.
    pub fn profile(&self) -> DensityProfile {
        DensityProfile::from_pairs(
            self.edges
                .edges()
                .iter()
                .copied()
                .zip(self.density.iter().copied()),
        )
    }

    /// `(left edge, averaged density)` for bins with a full window.
    pub fn averaged(&self) -> Vec<(f64, f64)> {
        let Some(average) = &self.moving_average else {
            return Vec::new();
        };
        self.edges
            .edges()
            .iter()
            .zip(&average.values)
            .filter_map(|(x, v)| v.map(|v| (*x, v)))
            .collect()
    }
}

/// Density-normalised histogram of the coordinate over a fixed range.
#[instrument(skip_all, name = "density_estimate")]
pub fn estimate(trajectory: &Trajectory, config: &DensityConfig) -> Result<DensityEstimate, EngineError> {
    let restricted = trajectory.restrict(&config.frame_range);
    let coordinates: Vec<f64> = restricted.coordinates().collect();
    let edges = BinEdges::uniform(config.start, config.end, config.bin_count)?;
    let histogram = Histogram::new(&coordinates, edges);

    let samples_in_range = histogram.total();
    if samples_in_range == 0 {
        return Err(EngineError::NoSamples(format!(
            "no coordinates fall inside [{}, {}]",
            config.start, config.end
        )));
    }
    let density = histogram.density();
    debug!(
        samples = coordinates.len(),
        in_range = samples_in_range,
        "Built coordinate histogram"
    );

    let moving_average = match config.moving_average.map(|w| w.to_bins(config.bin_width())) {
        Some(window_bins) if window_bins > 0 => Some(MovingAverage {
            window_bins,
            values: rolling_mean(&density, window_bins)?,
        }),
        _ => None,
    };

    Ok(DensityEstimate {
        edges: histogram.edges().clone(),
        density,
        samples_in_range,
        moving_average,
    })
}
