use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mdpost - post-processing of molecular-dynamics trajectories: splitting probabilities, PMF reconstruction, first-passage times and energy statistics.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Histogram the extension into a probability density, with an optional moving average.
    Pdf(PdfArgs),
    /// Splitting probability and PMF from an equilibrium density (Boltzmann inversion).
    SpPmf(SpPmfArgs),
    /// Splitting probability and PMF by counting first arrivals along a trajectory.
    SpTraj(SpTrajArgs),
    /// Splitting probability from a distance trajectory and a potential-energy table.
    SpPotential(SpPotentialArgs),
    /// Energy landscape from an existing splitting-probability table.
    Landscape(LandscapeArgs),
    /// First-passage-time distribution between two boundaries.
    Fpt(FptArgs),
    /// Heat capacity from the fluctuations of an energy column.
    SpecificHeat(SpecificHeatArgs),
    /// Extract or average the energy table of NAMD log files.
    Energy(EnergyArgs),
    /// Force and displacement of a constant-velocity SMD pull from NAMD log files.
    Smd(SmdArgs),
}

/// Options shared by every analysis: configuration sources and output format.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S sp-traj.left=19.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// Path of the output file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Single-byte delimiter of the output columns (default: tab).
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Comment token of input files and output metadata lines (default: '#').
    #[arg(long, value_name = "TOKEN")]
    pub comment_token: Option<String>,

    /// Do not write the metadata block above the output header.
    #[arg(long)]
    pub no_metadata: bool,

    /// Prefix the output header row with the comment token.
    #[arg(long)]
    pub comment_header: bool,
}

/// Frame window `[start, end)` applied before any analysis.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FrameRangeArgs {
    /// First frame to include.
    #[arg(long, value_name = "FRAME")]
    pub frame_start: Option<i64>,

    /// First frame to exclude.
    #[arg(long, value_name = "FRAME")]
    pub frame_end: Option<i64>,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct BoundaryArgs {
    /// Left absorbing boundary.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub left: Option<f64>,

    /// Right absorbing boundary.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub right: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationArg {
    /// Trapezoid integral from every sample to the right boundary.
    PerPoint,
    /// Single backward sweep of trapezoid increments.
    SuffixSum,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingArg {
    None,
    SavitzkyGolay,
    MovingAverage,
}

/// Smoothing applied to the splitting probability before differentiation.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct SmoothingArgs {
    #[arg(long, value_enum, value_name = "METHOD")]
    pub smoothing: Option<SmoothingArg>,

    /// Window length of the smoothing filter, in points.
    #[arg(long, value_name = "INT")]
    pub smoothing_window: Option<usize>,

    /// Polynomial order of the Savitzky-Golay filter.
    #[arg(long, value_name = "INT")]
    pub smoothing_order: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PdfArgs {
    /// Trajectory file with `FRAME EXT` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub frames: FrameRangeArgs,

    /// Lower end of the histogram range.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub ext_start: Option<f64>,

    /// Upper end of the histogram range.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub ext_end: Option<f64>,

    /// Number of histogram bins.
    #[arg(long, value_name = "INT")]
    pub ext_bin_count: Option<usize>,

    /// Moving-average window in bins (0 disables).
    #[arg(long, value_name = "INT", conflicts_with = "average_width")]
    pub average_bins: Option<usize>,

    /// Moving-average window in coordinate units, rounded to bins.
    #[arg(long, value_name = "FLOAT")]
    pub average_width: Option<f64>,

    /// Path of the moving-average output (default: `<output stem>-avg<bins><ext>`).
    #[arg(long, value_name = "PATH")]
    pub average_output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct SpPmfArgs {
    /// Density profile with `EXT PDF` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub boundaries: BoundaryArgs,

    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Integrate the density itself instead of its reciprocal.
    #[arg(long)]
    pub no_negate: bool,

    #[arg(long, value_enum, value_name = "METHOD")]
    pub integration: Option<IntegrationArg>,

    /// Also analyse 2N-1 half-overlapping windows between the boundaries.
    #[arg(long, value_name = "N")]
    pub windows: Option<usize>,

    #[command(flatten)]
    pub smoothing: SmoothingArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct SpTrajArgs {
    /// Trajectory file with `FRAME EXT` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub frames: FrameRangeArgs,

    #[command(flatten)]
    pub boundaries: BoundaryArgs,

    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Number of spatial bins (takes precedence over --ext-bin-size).
    #[arg(long, value_name = "INT")]
    pub ext_bin_count: Option<usize>,

    /// Width of a spatial bin.
    #[arg(long, value_name = "FLOAT")]
    pub ext_bin_size: Option<f64>,

    /// Number of temporal bins (takes precedence over --frame-bin-size).
    #[arg(long, value_name = "INT")]
    pub frame_bin_count: Option<usize>,

    /// Frames per temporal bin.
    #[arg(long, value_name = "INT")]
    pub frame_bin_size: Option<usize>,

    /// Also analyse 2N-1 half-overlapping windows between the boundaries.
    #[arg(long, value_name = "N")]
    pub windows: Option<usize>,

    #[command(flatten)]
    pub smoothing: SmoothingArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct SpPotentialArgs {
    /// Headerless `FRAME DIST` file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub distances: PathBuf,

    /// Table with a header row holding the potential-energy column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub potentials: PathBuf,

    #[command(flatten)]
    pub boundaries: BoundaryArgs,

    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Name of the potential-energy column.
    #[arg(long, value_name = "NAME")]
    pub potential_column: Option<String>,

    #[arg(long, value_enum, value_name = "METHOD")]
    pub integration: Option<IntegrationArg>,

    /// Also write the paired `DIST POTENTIAL` table to this path.
    #[arg(long, value_name = "PATH")]
    pub paired_output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct LandscapeArgs {
    /// Splitting-probability table with a header row.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Name of the coordinate column.
    #[arg(long, value_name = "NAME")]
    pub coordinate_column: Option<String>,

    /// Name of the splitting-probability column.
    #[arg(long, value_name = "NAME")]
    pub sp_column: Option<String>,

    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct FptArgs {
    /// Trajectory file with `FRAME EXT` columns.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub frames: FrameRangeArgs,

    #[command(flatten)]
    pub boundaries: BoundaryArgs,

    /// Number of histogram bins at every evaluation instant.
    #[arg(long, value_name = "INT")]
    pub ext_bin_count: Option<usize>,

    /// Frames between successive evaluation instants.
    #[arg(long, value_name = "INT")]
    pub fpt_step: Option<usize>,

    /// Time between frames in femtoseconds; adds a TIME column.
    #[arg(long, value_name = "FS")]
    pub frame_time_fs: Option<f64>,

    /// Use raw counts instead of a normalised density.
    #[arg(long)]
    pub counts: bool,

    /// Do not normalise the distribution.
    #[arg(long)]
    pub no_normalize: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct SpecificHeatArgs {
    /// Energy table with a header row.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Name of the energy column.
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Temperature in Kelvin.
    #[arg(short = 'T', long, value_name = "KELVIN")]
    pub temperature: Option<f64>,

    /// Molar mass in g/mol, for the mass-specific heat capacity.
    #[arg(long, value_name = "G_PER_MOL")]
    pub molar_mass: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct EnergyArgs {
    #[command(subcommand)]
    pub command: EnergyCommands,
}

#[derive(Subcommand, Debug)]
pub enum EnergyCommands {
    /// Write the selected energy columns of every record.
    Extract(EnergyCommandArgs),
    /// Write the mean of each selected energy column.
    Average(EnergyCommandArgs),
}

#[derive(Args, Debug)]
pub struct EnergyCommandArgs {
    /// NAMD log files, read in order.
    #[arg(required = true, value_name = "LOG")]
    pub inputs: Vec<PathBuf>,

    /// First timestep to include.
    #[arg(long, value_name = "TS")]
    pub first_timestep: Option<i64>,

    /// Last timestep to include.
    #[arg(long, value_name = "TS")]
    pub last_timestep: Option<i64>,

    /// Energy columns to keep, comma separated (default: all).
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub columns: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct SmdArgs {
    /// NAMD log files, read in order.
    #[arg(required = true, value_name = "LOG")]
    pub inputs: Vec<PathBuf>,

    /// Pull direction as `x,y,z`; magnitudes are reported without one.
    #[arg(long, value_name = "X,Y,Z", value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    pub pull_direction: Option<Vec<f64>>,

    /// Centre of mass of the fixed atoms as `x,y,z`.
    #[arg(long, value_name = "X,Y,Z", value_delimiter = ',', num_args = 3, allow_negative_numbers = true)]
    pub fixed_com: Option<Vec<f64>>,

    #[command(flatten)]
    pub common: CommonArgs,
}
