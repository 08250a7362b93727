use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::{
    CommonArgs, EnergyCommandArgs, FptArgs, FrameRangeArgs, IntegrationArg, LandscapeArgs,
    PdfArgs, SmdArgs, SmoothingArg, SmoothingArgs, SpPmfArgs, SpPotentialArgs, SpTrajArgs,
    SpecificHeatArgs,
};
use crate::error::{CliError, Result};
use mdpost::core::io::namd::TimestepRange;
use mdpost::core::io::report::ReportOptions;
use mdpost::core::io::traits::ReadOptions;
use mdpost::core::models::trajectory::FrameRange;
use mdpost::core::numerics::smoothing::Smoothing;
use mdpost::engine::config::{
    self as core_config, Boundaries, DensityConfig, EnergyConfig, IntegrationMethod,
    LandscapeConfig, MovingAverageWindow, PassageConfig, PotentialSpConfig, SmdConfig,
    SpatialBinning, SpecificHeatConfig, SplitPmfConfig, SplitTrajConfig, TemporalBinning,
};
use nalgebra::Vector3;
use std::path::{Path, PathBuf};

/// The two configuration layers below the command line: `--set` overrides
/// above it and the optional file below it.
struct Layers {
    set: FileConfig,
    file: FileConfig,
}

impl Layers {
    fn load(common: &CommonArgs) -> Result<Self> {
        let file = match &common.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        let set = FileConfig::from_set_values(&common.set_values)?;
        Ok(Self { set, file })
    }

    /// The same section from both layers, `--set` first.
    fn section<T: Default + Clone>(&self, pick: impl Fn(&FileConfig) -> Option<&T>) -> (T, T) {
        (
            pick(&self.set).cloned().unwrap_or_default(),
            pick(&self.file).cloned().unwrap_or_default(),
        )
    }
}

fn config_error(e: core_config::ConfigError) -> CliError {
    CliError::Config(e.to_string())
}

fn io_options(
    common: &CommonArgs,
    layers: &Layers,
    defaults: &DefaultsConfig,
) -> Result<(ReadOptions, ReportOptions)> {
    let (set_in, file_in) = layers.section(|c| c.input.as_ref());
    let (set_out, file_out) = layers.section(|c| c.output.as_ref());

    let input_token = set_in
        .comment_token
        .or_else(|| common.comment_token.clone())
        .or(file_in.comment_token)
        .unwrap_or_else(|| defaults.comment_token.clone());
    let output_token = set_out
        .comment_token
        .or_else(|| common.comment_token.clone())
        .or(file_out.comment_token)
        .unwrap_or_else(|| defaults.comment_token.clone());

    let delimiter = set_out
        .delimiter
        .or(common.delimiter)
        .or(file_out.delimiter)
        .unwrap_or(defaults.delimiter);
    if !delimiter.is_ascii() {
        return Err(CliError::Argument(format!(
            "Output delimiter must be a single ASCII character, got '{}'",
            delimiter
        )));
    }

    let write_metadata = match set_out.write_metadata {
        Some(value) => value,
        None if common.no_metadata => false,
        None => file_out.write_metadata.unwrap_or(defaults.write_metadata),
    };
    let comment_header = match set_out.comment_header {
        Some(value) => value,
        None if common.comment_header => true,
        None => file_out.comment_header.unwrap_or(defaults.comment_header),
    };

    Ok((
        ReadOptions::with_comment_token(input_token),
        ReportOptions {
            delimiter: delimiter as u8,
            comment_token: output_token,
            write_metadata,
            comment_header,
        },
    ))
}

fn output_path(common: &CommonArgs, default_name: &str) -> PathBuf {
    common
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name))
}

fn frame_range(
    set: (Option<i64>, Option<i64>),
    cli: &FrameRangeArgs,
    file: (Option<i64>, Option<i64>),
) -> FrameRange {
    FrameRange::new(
        set.0.or(cli.frame_start).or(file.0),
        set.1.or(cli.frame_end).or(file.1),
    )
}

fn integration(arg: Option<IntegrationArg>) -> Option<IntegrationMethod> {
    arg.map(|a| match a {
        IntegrationArg::PerPoint => IntegrationMethod::PerPoint,
        IntegrationArg::SuffixSum => IntegrationMethod::SuffixSum,
    })
}

fn smoothing(set: Option<Smoothing>, cli: &SmoothingArgs, file: Option<Smoothing>) -> Result<Smoothing> {
    if let Some(value) = set {
        return Ok(value);
    }
    let Some(method) = cli.smoothing else {
        return Ok(file.unwrap_or_default());
    };
    let window = || {
        cli.smoothing_window.ok_or_else(|| {
            CliError::Config("`--smoothing` requires `--smoothing-window`".to_string())
        })
    };
    Ok(match method {
        SmoothingArg::None => Smoothing::None,
        SmoothingArg::MovingAverage => Smoothing::MovingAverage { window: window()? },
        SmoothingArg::SavitzkyGolay => Smoothing::SavitzkyGolay {
            window_length: window()?,
            poly_order: cli.smoothing_order.ok_or_else(|| {
                CliError::Config(
                    "`--smoothing savitzky-golay` requires `--smoothing-order`".to_string(),
                )
            })?,
        },
    })
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| CliError::Config(format!("Missing required value: `{}`", name)))
}

fn boundaries(left: Option<f64>, right: Option<f64>) -> Result<Boundaries> {
    Boundaries::new(required(left, "left")?, required(right, "right")?).map_err(config_error)
}

/// `<stem>-avg<bins><ext>` next to `output`.
pub fn average_output_path(output: &Path, bins: usize) -> PathBuf {
    suffixed_path(output, &format!("-avg{}", bins))
}

/// `<stem>-win<index><ext>` next to `output`.
pub fn window_output_path(output: &Path, index: usize) -> PathBuf {
    suffixed_path(output, &format!("-win{}", index))
}

fn suffixed_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    output.with_file_name(name)
}

pub fn build_pdf_config(args: &PdfArgs) -> Result<AppConfig<DensityConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.pdf.as_ref());

    let start = set
        .ext_start
        .or(args.ext_start)
        .or(file.ext_start)
        .unwrap_or(defaults.pdf_ext_start);
    let end = set
        .ext_end
        .or(args.ext_end)
        .or(file.ext_end)
        .unwrap_or(defaults.pdf_ext_end);
    let bin_count = set
        .ext_bin_count
        .or(args.ext_bin_count)
        .or(file.ext_bin_count)
        .unwrap_or(defaults.pdf_ext_bin_count);

    let moving_average = set
        .average_bins
        .map(MovingAverageWindow::Bins)
        .or(set.average_width.map(MovingAverageWindow::Width))
        .or(args.average_bins.map(MovingAverageWindow::Bins))
        .or(args.average_width.map(MovingAverageWindow::Width))
        .or(file.average_bins.map(MovingAverageWindow::Bins))
        .or(file.average_width.map(MovingAverageWindow::Width));

    let core_config = core_config::DensityConfigBuilder::new()
        .frame_range(frame_range(
            (set.frame_start, set.frame_end),
            &args.frames,
            (file.frame_start, file.frame_end),
        ))
        .range(start, end)
        .bin_count(bin_count)
        .moving_average(moving_average)
        .build()
        .map_err(config_error)?;

    let output = output_path(&args.common, defaults.pdf_output);
    let secondary_output = core_config.moving_average.map(|window| {
        args.average_output
            .clone()
            .unwrap_or_else(|| average_output_path(&output, window.to_bins(core_config.bin_width())))
    });

    Ok(AppConfig {
        output,
        secondary_output,
        read_options,
        report_options,
        core_config,
    })
}

pub fn build_sp_pmf_config(args: &SpPmfArgs) -> Result<AppConfig<SplitPmfConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.sp_pmf.as_ref());

    let negate = match set.negate {
        Some(value) => value,
        None if args.no_negate => false,
        None => file.negate.unwrap_or(true),
    };

    let mut builder = core_config::SplitPmfConfigBuilder::new()
        .temperature(
            set.temperature
                .or(args.temperature)
                .or(file.temperature)
                .unwrap_or(defaults.temperature),
        )
        .negate(negate)
        .smoothing(smoothing(set.smoothing, &args.smoothing, file.smoothing)?)
        .windows(set.windows.or(args.windows).or(file.windows));
    if let Some(left) = set.left.or(args.boundaries.left).or(file.left) {
        builder = builder.left(left);
    }
    if let Some(right) = set.right.or(args.boundaries.right).or(file.right) {
        builder = builder.right(right);
    }
    if let Some(method) = set
        .integration
        .or(integration(args.integration))
        .or(file.integration)
    {
        builder = builder.integration(method);
    }

    Ok(AppConfig {
        output: output_path(&args.common, defaults.sp_pmf_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config: builder.build().map_err(config_error)?,
    })
}

pub fn build_sp_traj_config(args: &SpTrajArgs) -> Result<AppConfig<SplitTrajConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.sp_traj.as_ref());

    // A bin count beats a bin size within the same layer.
    let spatial = set
        .ext_bin_count
        .map(SpatialBinning::Count)
        .or(set.ext_bin_size.map(SpatialBinning::Width))
        .or(args.ext_bin_count.map(SpatialBinning::Count))
        .or(args.ext_bin_size.map(SpatialBinning::Width))
        .or(file.ext_bin_count.map(SpatialBinning::Count))
        .or(file.ext_bin_size.map(SpatialBinning::Width))
        .unwrap_or(SpatialBinning::Width(defaults.traj_ext_bin_size));
    let temporal = set
        .frame_bin_count
        .map(TemporalBinning::Count)
        .or(set.frame_bin_size.map(TemporalBinning::FramesPerBin))
        .or(args.frame_bin_count.map(TemporalBinning::Count))
        .or(args.frame_bin_size.map(TemporalBinning::FramesPerBin))
        .or(file.frame_bin_count.map(TemporalBinning::Count))
        .or(file.frame_bin_size.map(TemporalBinning::FramesPerBin))
        .unwrap_or(TemporalBinning::FramesPerBin(defaults.traj_frame_bin_size));

    let mut builder = core_config::SplitTrajConfigBuilder::new()
        .frame_range(frame_range(
            (set.frame_start, set.frame_end),
            &args.frames,
            (file.frame_start, file.frame_end),
        ))
        .temperature(
            set.temperature
                .or(args.temperature)
                .or(file.temperature)
                .unwrap_or(defaults.temperature),
        )
        .spatial_binning(spatial)
        .temporal_binning(temporal)
        .smoothing(smoothing(set.smoothing, &args.smoothing, file.smoothing)?)
        .windows(set.windows.or(args.windows).or(file.windows));
    if let Some(left) = set.left.or(args.boundaries.left).or(file.left) {
        builder = builder.left(left);
    }
    if let Some(right) = set.right.or(args.boundaries.right).or(file.right) {
        builder = builder.right(right);
    }

    Ok(AppConfig {
        output: output_path(&args.common, defaults.sp_traj_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config: builder.build().map_err(config_error)?,
    })
}

pub fn build_sp_potential_config(args: &SpPotentialArgs) -> Result<AppConfig<PotentialSpConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.sp_potential.as_ref());

    let core_config = PotentialSpConfig::new(
        boundaries(
            set.left.or(args.boundaries.left).or(file.left),
            set.right.or(args.boundaries.right).or(file.right),
        )?,
        set.temperature
            .or(args.temperature)
            .or(file.temperature)
            .unwrap_or(defaults.temperature),
        set.potential_column
            .or_else(|| args.potential_column.clone())
            .or(file.potential_column)
            .unwrap_or(defaults.potential_column),
        set.integration
            .or(integration(args.integration))
            .or(file.integration)
            .unwrap_or_default(),
    )
    .map_err(config_error)?;

    Ok(AppConfig {
        output: output_path(&args.common, defaults.sp_potential_output),
        secondary_output: args.paired_output.clone(),
        read_options,
        report_options,
        core_config,
    })
}

pub fn build_landscape_config(args: &LandscapeArgs) -> Result<AppConfig<LandscapeConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.landscape.as_ref());

    let core_config = LandscapeConfig::new(
        set.coordinate_column
            .or_else(|| args.coordinate_column.clone())
            .or(file.coordinate_column)
            .unwrap_or(defaults.landscape_coordinate_column),
        set.sp_column
            .or_else(|| args.sp_column.clone())
            .or(file.sp_column)
            .unwrap_or(defaults.landscape_sp_column),
        set.temperature
            .or(args.temperature)
            .or(file.temperature)
            .unwrap_or(defaults.temperature),
    )
    .map_err(config_error)?;

    Ok(AppConfig {
        output: output_path(&args.common, defaults.landscape_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config,
    })
}

pub fn build_fpt_config(args: &FptArgs) -> Result<AppConfig<PassageConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.fpt.as_ref());

    let density = match set.density {
        Some(value) => value,
        None if args.counts => false,
        None => file.density.unwrap_or(true),
    };
    let normalize = match set.normalize {
        Some(value) => value,
        None if args.no_normalize => false,
        None => file.normalize.unwrap_or(true),
    };

    let mut builder = core_config::PassageConfigBuilder::new()
        .frame_range(frame_range(
            (set.frame_start, set.frame_end),
            &args.frames,
            (file.frame_start, file.frame_end),
        ))
        .bin_count(
            set.ext_bin_count
                .or(args.ext_bin_count)
                .or(file.ext_bin_count)
                .unwrap_or(defaults.fpt_ext_bin_count),
        )
        .frame_step(
            set.fpt_step
                .or(args.fpt_step)
                .or(file.fpt_step)
                .unwrap_or(defaults.fpt_step),
        )
        .frame_time_fs(set.frame_time_fs.or(args.frame_time_fs).or(file.frame_time_fs))
        .density(density)
        .normalize(normalize);
    if let Some(left) = set.left.or(args.boundaries.left).or(file.left) {
        builder = builder.left(left);
    }
    if let Some(right) = set.right.or(args.boundaries.right).or(file.right) {
        builder = builder.right(right);
    }

    Ok(AppConfig {
        output: output_path(&args.common, defaults.fpt_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config: builder.build().map_err(config_error)?,
    })
}

pub fn build_specific_heat_config(args: &SpecificHeatArgs) -> Result<AppConfig<SpecificHeatConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.specific_heat.as_ref());

    let column = required(
        set.column.or_else(|| args.column.clone()).or(file.column),
        "column",
    )?;
    let core_config = SpecificHeatConfig::new(
        column,
        set.temperature
            .or(args.temperature)
            .or(file.temperature)
            .unwrap_or(defaults.temperature),
        set.molar_mass.or(args.molar_mass).or(file.molar_mass),
    )
    .map_err(config_error)?;

    Ok(AppConfig {
        output: output_path(&args.common, defaults.specific_heat_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config,
    })
}

pub fn build_energy_config(args: &EnergyCommandArgs, average: bool) -> Result<AppConfig<EnergyConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.energy.as_ref());

    let cli_columns = (!args.columns.is_empty()).then(|| args.columns.clone());
    let columns = set
        .columns
        .or(cli_columns)
        .or(file.columns)
        .unwrap_or_default();
    let timesteps = TimestepRange::new(
        set.first_timestep
            .or(args.first_timestep)
            .or(file.first_timestep),
        set.last_timestep
            .or(args.last_timestep)
            .or(file.last_timestep),
    );

    let default_name = if average {
        defaults.energy_average_output
    } else {
        defaults.energy_output
    };
    Ok(AppConfig {
        output: output_path(&args.common, default_name),
        secondary_output: None,
        read_options,
        report_options,
        core_config: EnergyConfig { timesteps, columns },
    })
}

pub fn build_smd_config(args: &SmdArgs) -> Result<AppConfig<SmdConfig>> {
    let defaults = DefaultsConfig::default();
    let layers = Layers::load(&args.common)?;
    let (read_options, report_options) = io_options(&args.common, &layers, &defaults)?;
    let (set, file) = layers.section(|c| c.smd.as_ref());

    let pull_direction = set
        .pull_direction
        .map(Ok)
        .or_else(|| args.pull_direction.as_deref().map(triple))
        .or(file.pull_direction.map(Ok))
        .transpose()?
        .map(Vector3::from)
        .filter(|v| v.norm() > 0.0);
    let fixed_com = set
        .fixed_com
        .map(Ok)
        .or_else(|| args.fixed_com.as_deref().map(triple))
        .or(file.fixed_com.map(Ok))
        .transpose()?
        .map(Vector3::from);

    Ok(AppConfig {
        output: output_path(&args.common, defaults.smd_output),
        secondary_output: None,
        read_options,
        report_options,
        core_config: SmdConfig {
            pull_direction,
            fixed_com,
        },
    })
}

fn triple(values: &[f64]) -> Result<[f64; 3]> {
    <[f64; 3]>::try_from(values).map_err(|_| {
        CliError::Argument(format!(
            "Expected three comma-separated components, got {}",
            values.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BoundaryArgs;
    use std::fs;
    use tempfile::tempdir;

    fn sp_traj_args() -> SpTrajArgs {
        SpTrajArgs {
            input: PathBuf::from("dist_vs_frame.dat"),
            frames: FrameRangeArgs::default(),
            boundaries: BoundaryArgs {
                left: Some(19.0),
                right: Some(33.0),
            },
            temperature: None,
            ext_bin_count: None,
            ext_bin_size: None,
            frame_bin_count: None,
            frame_bin_size: None,
            windows: None,
            smoothing: SmoothingArgs::default(),
            common: CommonArgs::default(),
        }
    }

    #[test]
    fn sp_traj_uses_defaults_when_nothing_is_given() {
        let app = build_sp_traj_config(&sp_traj_args()).unwrap();
        let defaults = DefaultsConfig::default();
        let cfg = app.core_config;
        assert_eq!(cfg.temperature, defaults.temperature);
        assert_eq!(
            cfg.discretization.spatial,
            SpatialBinning::Width(defaults.traj_ext_bin_size)
        );
        assert_eq!(
            cfg.discretization.temporal,
            TemporalBinning::FramesPerBin(defaults.traj_frame_bin_size)
        );
        assert_eq!(app.output, PathBuf::from("sp_traj.csv"));
        assert_eq!(app.report_options, ReportOptions::default());
        assert_eq!(app.read_options, ReadOptions::default());
    }

    #[test]
    fn cli_beats_file_and_set_beats_cli() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("mdpost.toml");
        fs::write(
            &cfg_path,
            r#"
            [output]
            delimiter = ","

            [sp-traj]
            left = 10.0
            temperature = 310.0
            ext-bin-count = 40
            frame-bin-size = 5
            "#,
        )
        .unwrap();

        let mut args = sp_traj_args();
        args.temperature = Some(290.0);
        args.common.config = Some(cfg_path);
        args.common.set_values = vec!["sp-traj.right=35.0".to_string()];

        let app = build_sp_traj_config(&args).unwrap();
        let cfg = app.core_config;
        assert_eq!(cfg.boundaries.left, 19.0);
        assert_eq!(cfg.boundaries.right, 35.0);
        assert_eq!(cfg.temperature, 290.0);
        assert_eq!(cfg.discretization.spatial, SpatialBinning::Count(40));
        assert_eq!(cfg.discretization.temporal, TemporalBinning::FramesPerBin(5));
        assert_eq!(app.report_options.delimiter, b',');
    }

    #[test]
    fn missing_boundary_is_a_config_error() {
        let mut args = sp_traj_args();
        args.boundaries.right = None;
        let err = build_sp_traj_config(&args).unwrap_err();
        assert!(err.to_string().contains("right"));
    }

    #[test]
    fn savitzky_golay_requires_window_and_order() {
        let cli = SmoothingArgs {
            smoothing: Some(SmoothingArg::SavitzkyGolay),
            smoothing_window: Some(7),
            smoothing_order: None,
        };
        assert!(smoothing(None, &cli, None).is_err());

        let cli = SmoothingArgs {
            smoothing_order: Some(2),
            ..cli
        };
        assert_eq!(
            smoothing(None, &cli, None).unwrap(),
            Smoothing::SavitzkyGolay {
                window_length: 7,
                poly_order: 2
            }
        );
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let mut args = sp_traj_args();
        args.common.delimiter = Some('§');
        assert!(matches!(
            build_sp_traj_config(&args),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn pdf_average_output_is_derived_from_bins() {
        let args = PdfArgs {
            input: PathBuf::from("dist_vs_frame.dat"),
            frames: FrameRangeArgs::default(),
            ext_start: None,
            ext_end: None,
            ext_bin_count: None,
            average_bins: None,
            average_width: Some(2.0),
            average_output: None,
            common: CommonArgs::default(),
        };
        let app = build_pdf_config(&args).unwrap();
        assert_eq!(app.core_config.bin_count, 1000);
        assert_eq!(app.secondary_output, Some(PathBuf::from("ext_pdf-avg20.csv")));
    }

    #[test]
    fn window_paths_keep_directory_and_extension() {
        assert_eq!(
            window_output_path(Path::new("out/sp_traj.csv"), 3),
            PathBuf::from("out/sp_traj-win3.csv")
        );
        assert_eq!(
            window_output_path(Path::new("sp_pmf"), 1),
            PathBuf::from("sp_pmf-win1")
        );
    }

    #[test]
    fn zero_pull_direction_means_magnitudes() {
        let args = SmdArgs {
            inputs: vec![PathBuf::from("smd.log")],
            pull_direction: Some(vec![0.0, 0.0, 0.0]),
            fixed_com: Some(vec![1.0, 2.0, 3.0]),
            common: CommonArgs::default(),
        };
        let app = build_smd_config(&args).unwrap();
        assert_eq!(app.core_config.pull_direction, None);
        assert_eq!(app.core_config.fixed_com, Some(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(app.output, PathBuf::from("smd_pcv_force_displacement.csv"));
    }

    #[test]
    fn specific_heat_requires_a_column() {
        let args = SpecificHeatArgs {
            input: PathBuf::from("energies.csv"),
            column: None,
            temperature: None,
            molar_mass: None,
            common: CommonArgs::default(),
        };
        let err = build_specific_heat_config(&args).unwrap_err();
        assert!(err.to_string().contains("column"));
    }
}
