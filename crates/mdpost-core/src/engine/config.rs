use crate::core::io::namd::TimestepRange;
use crate::core::models::trajectory::FrameRange;
use crate::core::numerics::smoothing::Smoothing;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

fn invalid(parameter: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter,
        reason: reason.into(),
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(parameter, format!("must be a positive number, got {value}")))
    }
}

/// The two absorbing boundaries, `left < right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub left: f64,
    pub right: f64,
}

impl Boundaries {
    pub fn new(left: f64, right: f64) -> Result<Self, ConfigError> {
        if !(left.is_finite() && right.is_finite()) {
            return Err(invalid("boundaries", "both boundaries must be finite"));
        }
        if left >= right {
            return Err(invalid(
                "boundaries",
                format!("left boundary {left} must be less than right boundary {right}"),
            ));
        }
        Ok(Self { left, right })
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value <= self.right
    }
}

/// How the coordinate axis is partitioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialBinning {
    Count(usize),
    /// Bin width in coordinate units; the count is derived from the data range.
    Width(f64),
}

/// How the frame axis is partitioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemporalBinning {
    Count(usize),
    /// Frames per bin; the count is derived from the number of samples.
    FramesPerBin(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscretizationConfig {
    pub spatial: SpatialBinning,
    pub temporal: TemporalBinning,
}

impl DiscretizationConfig {
    pub fn new(spatial: SpatialBinning, temporal: TemporalBinning) -> Result<Self, ConfigError> {
        match spatial {
            SpatialBinning::Count(0) => return Err(invalid("spatial bins", "count must be at least 1")),
            SpatialBinning::Width(w) => {
                positive("spatial bin width", w)?;
            }
            SpatialBinning::Count(_) => {}
        }
        match temporal {
            TemporalBinning::Count(0) => return Err(invalid("frame bins", "count must be at least 1")),
            TemporalBinning::FramesPerBin(0) => {
                return Err(invalid("frame bin size", "must be at least 1 frame"));
            }
            _ => {}
        }
        Ok(Self { spatial, temporal })
    }
}

/// How the tail integrals of the Boltzmann estimator are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationMethod {
    /// One trapezoidal integral per retained sample.
    #[default]
    PerPoint,
    /// A single backward cumulative sweep.
    SuffixSum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitPmfConfig {
    pub boundaries: Boundaries,
    pub temperature: f64,
    /// Integrate `1/P` (the negated apparent PMF) rather than `P`.
    pub negate: bool,
    pub integration: IntegrationMethod,
    pub smoothing: Smoothing,
    /// Number of windows for the windowed variant; `None` analyses the whole range.
    pub windows: Option<usize>,
}

#[derive(Default)]
pub struct SplitPmfConfigBuilder {
    left: Option<f64>,
    right: Option<f64>,
    temperature: Option<f64>,
    negate: Option<bool>,
    integration: Option<IntegrationMethod>,
    smoothing: Option<Smoothing>,
    windows: Option<usize>,
}

impl SplitPmfConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }
    pub fn right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn negate(mut self, negate: bool) -> Self {
        self.negate = Some(negate);
        self
    }
    pub fn integration(mut self, method: IntegrationMethod) -> Self {
        self.integration = Some(method);
        self
    }
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = Some(smoothing);
        self
    }
    pub fn windows(mut self, windows: Option<usize>) -> Self {
        self.windows = windows;
        self
    }

    pub fn build(self) -> Result<SplitPmfConfig, ConfigError> {
        let boundaries = Boundaries::new(
            self.left.ok_or(ConfigError::MissingParameter("left"))?,
            self.right.ok_or(ConfigError::MissingParameter("right"))?,
        )?;
        let temperature = positive(
            "temperature",
            self.temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
        )?;
        Ok(SplitPmfConfig {
            boundaries,
            temperature,
            negate: self.negate.unwrap_or(true),
            integration: self.integration.unwrap_or_default(),
            smoothing: self.smoothing.unwrap_or_default(),
            windows: validate_windows(self.windows)?,
        })
    }
}

fn validate_windows(windows: Option<usize>) -> Result<Option<usize>, ConfigError> {
    match windows {
        Some(0) => Err(invalid("windows", "window count must be at least 1")),
        other => Ok(other),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitTrajConfig {
    pub frame_range: FrameRange,
    pub boundaries: Boundaries,
    pub temperature: f64,
    pub discretization: DiscretizationConfig,
    pub smoothing: Smoothing,
    pub windows: Option<usize>,
}

#[derive(Default)]
pub struct SplitTrajConfigBuilder {
    frame_range: FrameRange,
    left: Option<f64>,
    right: Option<f64>,
    temperature: Option<f64>,
    spatial: Option<SpatialBinning>,
    temporal: Option<TemporalBinning>,
    smoothing: Option<Smoothing>,
    windows: Option<usize>,
}

impl SplitTrajConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_range(mut self, range: FrameRange) -> Self {
        self.frame_range = range;
        self
    }
    pub fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }
    pub fn right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn spatial_binning(mut self, binning: SpatialBinning) -> Self {
        self.spatial = Some(binning);
        self
    }
    pub fn temporal_binning(mut self, binning: TemporalBinning) -> Self {
        self.temporal = Some(binning);
        self
    }
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = Some(smoothing);
        self
    }
    pub fn windows(mut self, windows: Option<usize>) -> Self {
        self.windows = windows;
        self
    }

    pub fn build(self) -> Result<SplitTrajConfig, ConfigError> {
        let boundaries = Boundaries::new(
            self.left.ok_or(ConfigError::MissingParameter("left"))?,
            self.right.ok_or(ConfigError::MissingParameter("right"))?,
        )?;
        let temperature = positive(
            "temperature",
            self.temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
        )?;
        let discretization = DiscretizationConfig::new(
            self.spatial
                .ok_or(ConfigError::MissingParameter("spatial_binning"))?,
            self.temporal
                .ok_or(ConfigError::MissingParameter("temporal_binning"))?,
        )?;
        Ok(SplitTrajConfig {
            frame_range: self.frame_range,
            boundaries,
            temperature,
            discretization,
            smoothing: self.smoothing.unwrap_or_default(),
            windows: validate_windows(self.windows)?,
        })
    }
}

/// Moving-average window for the density profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovingAverageWindow {
    Bins(usize),
    /// Width in coordinate units, rounded to a whole number of bins.
    Width(f64),
}

impl MovingAverageWindow {
    pub fn to_bins(&self, bin_width: f64) -> usize {
        match *self {
            MovingAverageWindow::Bins(n) => n,
            MovingAverageWindow::Width(w) => (w / bin_width).round().max(0.0) as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DensityConfig {
    pub frame_range: FrameRange,
    pub start: f64,
    pub end: f64,
    pub bin_count: usize,
    pub moving_average: Option<MovingAverageWindow>,
}

impl DensityConfig {
    pub fn bin_width(&self) -> f64 {
        (self.end - self.start) / self.bin_count as f64
    }
}

#[derive(Default)]
pub struct DensityConfigBuilder {
    frame_range: FrameRange,
    start: Option<f64>,
    end: Option<f64>,
    bin_count: Option<usize>,
    moving_average: Option<MovingAverageWindow>,
}

impl DensityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_range(mut self, range: FrameRange) -> Self {
        self.frame_range = range;
        self
    }
    pub fn range(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
    pub fn bin_count(mut self, count: usize) -> Self {
        self.bin_count = Some(count);
        self
    }
    pub fn moving_average(mut self, window: Option<MovingAverageWindow>) -> Self {
        self.moving_average = window;
        self
    }

    pub fn build(self) -> Result<DensityConfig, ConfigError> {
        let start = self.start.ok_or(ConfigError::MissingParameter("start"))?;
        let end = self.end.ok_or(ConfigError::MissingParameter("end"))?;
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(invalid("range", format!("[{start}, {end}] is not an increasing interval")));
        }
        let bin_count = self.bin_count.ok_or(ConfigError::MissingParameter("bin_count"))?;
        if bin_count == 0 {
            return Err(invalid("bin_count", "must be at least 1"));
        }
        let moving_average = match self.moving_average {
            Some(MovingAverageWindow::Bins(0)) => None,
            Some(MovingAverageWindow::Width(w)) if w <= 0.0 => None,
            other => other,
        };
        Ok(DensityConfig {
            frame_range: self.frame_range,
            start,
            end,
            bin_count,
            moving_average,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassageConfig {
    pub frame_range: FrameRange,
    pub boundaries: Boundaries,
    pub bin_count: usize,
    /// Frames between successive evaluation instants.
    pub frame_step: usize,
    /// Simulation time between frames, enabling the `TIME` column.
    pub frame_time_fs: Option<f64>,
    pub density: bool,
    pub normalize: bool,
}

#[derive(Default)]
pub struct PassageConfigBuilder {
    frame_range: FrameRange,
    left: Option<f64>,
    right: Option<f64>,
    bin_count: Option<usize>,
    frame_step: Option<usize>,
    frame_time_fs: Option<f64>,
    density: Option<bool>,
    normalize: Option<bool>,
}

impl PassageConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_range(mut self, range: FrameRange) -> Self {
        self.frame_range = range;
        self
    }
    pub fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }
    pub fn right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }
    pub fn bin_count(mut self, count: usize) -> Self {
        self.bin_count = Some(count);
        self
    }
    pub fn frame_step(mut self, frames: usize) -> Self {
        self.frame_step = Some(frames);
        self
    }
    pub fn frame_time_fs(mut self, fs: Option<f64>) -> Self {
        self.frame_time_fs = fs;
        self
    }
    pub fn density(mut self, density: bool) -> Self {
        self.density = Some(density);
        self
    }
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = Some(normalize);
        self
    }

    pub fn build(self) -> Result<PassageConfig, ConfigError> {
        let boundaries = Boundaries::new(
            self.left.ok_or(ConfigError::MissingParameter("left"))?,
            self.right.ok_or(ConfigError::MissingParameter("right"))?,
        )?;
        let bin_count = self.bin_count.ok_or(ConfigError::MissingParameter("bin_count"))?;
        if bin_count == 0 {
            return Err(invalid("bin_count", "must be at least 1"));
        }
        let frame_step = self
            .frame_step
            .ok_or(ConfigError::MissingParameter("frame_step"))?;
        if frame_step == 0 {
            return Err(invalid("frame_step", "must be at least 1 frame"));
        }
        let frame_time_fs = self
            .frame_time_fs
            .map(|fs| positive("frame_time_fs", fs))
            .transpose()?;
        Ok(PassageConfig {
            frame_range: self.frame_range,
            boundaries,
            bin_count,
            frame_step,
            frame_time_fs,
            density: self.density.unwrap_or(true),
            normalize: self.normalize.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PotentialSpConfig {
    pub boundaries: Boundaries,
    pub temperature: f64,
    pub potential_column: String,
    pub integration: IntegrationMethod,
}

impl PotentialSpConfig {
    pub fn new(
        boundaries: Boundaries,
        temperature: f64,
        potential_column: impl Into<String>,
        integration: IntegrationMethod,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            boundaries,
            temperature: positive("temperature", temperature)?,
            potential_column: potential_column.into(),
            integration,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeConfig {
    pub coordinate_column: String,
    pub sp_column: String,
    pub temperature: f64,
}

impl LandscapeConfig {
    pub fn new(
        coordinate_column: impl Into<String>,
        sp_column: impl Into<String>,
        temperature: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            coordinate_column: coordinate_column.into(),
            sp_column: sp_column.into(),
            temperature: positive("temperature", temperature)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecificHeatConfig {
    pub column: String,
    pub temperature: f64,
    /// Molar mass in g/mol, enabling the mass-specific heat capacity.
    pub molar_mass: Option<f64>,
}

impl SpecificHeatConfig {
    pub fn new(
        column: impl Into<String>,
        temperature: f64,
        molar_mass: Option<f64>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            column: column.into(),
            temperature: positive("temperature", temperature)?,
            molar_mass: molar_mass
                .filter(|m| *m != 0.0)
                .map(|m| positive("molar_mass", m))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyConfig {
    pub timesteps: TimestepRange,
    /// Requested columns; empty means all.
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmdConfig {
    /// Direction of the pull; a zero vector is treated as absent.
    pub pull_direction: Option<Vector3<f64>>,
    /// Centre of mass of the fixed atoms.
    pub fixed_com: Option<Vector3<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_pmf_builder_applies_defaults() {
        let config = SplitPmfConfigBuilder::new()
            .left(26.0)
            .right(41.0)
            .temperature(300.0)
            .build()
            .unwrap();
        assert!(config.negate);
        assert_eq!(config.integration, IntegrationMethod::PerPoint);
        assert_eq!(config.smoothing, Smoothing::None);
        assert_eq!(config.windows, None);
    }

    #[test]
    fn split_pmf_builder_reports_missing_parameter() {
        let err = SplitPmfConfigBuilder::new().left(1.0).temperature(300.0).build();
        assert_eq!(err, Err(ConfigError::MissingParameter("right")));
    }

    #[test]
    fn inverted_boundaries_are_rejected() {
        assert!(matches!(
            Boundaries::new(5.0, 1.0),
            Err(ConfigError::InvalidParameter { parameter: "boundaries", .. })
        ));
    }

    #[test]
    fn split_traj_builder_requires_binning() {
        let err = SplitTrajConfigBuilder::new()
            .left(1.0)
            .right(2.0)
            .temperature(300.0)
            .temporal_binning(TemporalBinning::FramesPerBin(20))
            .build();
        assert_eq!(err, Err(ConfigError::MissingParameter("spatial_binning")));
    }

    #[test]
    fn zero_bin_counts_are_rejected() {
        assert!(DiscretizationConfig::new(SpatialBinning::Count(0), TemporalBinning::Count(3)).is_err());
        assert!(DiscretizationConfig::new(SpatialBinning::Width(1.0), TemporalBinning::FramesPerBin(0)).is_err());
        assert!(DiscretizationConfig::new(SpatialBinning::Width(-1.0), TemporalBinning::Count(1)).is_err());
    }

    #[test]
    fn zero_windows_are_rejected() {
        let err = SplitPmfConfigBuilder::new()
            .left(0.0)
            .right(1.0)
            .temperature(300.0)
            .windows(Some(0))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn moving_average_width_rounds_to_bins() {
        assert_eq!(MovingAverageWindow::Width(2.0).to_bins(0.1), 20);
        assert_eq!(MovingAverageWindow::Bins(7).to_bins(0.1), 7);
    }

    #[test]
    fn density_builder_disables_empty_moving_average() {
        let config = DensityConfigBuilder::new()
            .range(0.0, 100.0)
            .bin_count(1000)
            .moving_average(Some(MovingAverageWindow::Bins(0)))
            .build()
            .unwrap();
        assert_eq!(config.moving_average, None);
        assert!((config.bin_width() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn passage_builder_validates_step() {
        let err = PassageConfigBuilder::new()
            .left(1.0)
            .right(2.0)
            .bin_count(10)
            .frame_step(0)
            .build();
        assert!(matches!(err, Err(ConfigError::InvalidParameter { parameter: "frame_step", .. })));
    }

    #[test]
    fn specific_heat_treats_zero_mass_as_absent() {
        let config = SpecificHeatConfig::new("TOTAL", 300.0, Some(0.0)).unwrap();
        assert_eq!(config.molar_mass, None);
        assert!(SpecificHeatConfig::new("TOTAL", -1.0, None).is_err());
    }
}
