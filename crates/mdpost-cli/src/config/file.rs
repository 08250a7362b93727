use crate::error::{CliError, Result};
use mdpost::core::numerics::smoothing::Smoothing;
use mdpost::engine::config::IntegrationMethod;
use serde::Deserialize;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInputConfig {
    pub comment_token: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub delimiter: Option<char>,
    pub comment_token: Option<String>,
    pub write_metadata: Option<bool>,
    pub comment_header: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePdfConfig {
    pub frame_start: Option<i64>,
    pub frame_end: Option<i64>,
    pub ext_start: Option<f64>,
    pub ext_end: Option<f64>,
    pub ext_bin_count: Option<usize>,
    pub average_bins: Option<usize>,
    pub average_width: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSpPmfConfig {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub temperature: Option<f64>,
    pub negate: Option<bool>,
    pub integration: Option<IntegrationMethod>,
    pub windows: Option<usize>,
    pub smoothing: Option<Smoothing>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSpTrajConfig {
    pub frame_start: Option<i64>,
    pub frame_end: Option<i64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub temperature: Option<f64>,
    pub ext_bin_count: Option<usize>,
    pub ext_bin_size: Option<f64>,
    pub frame_bin_count: Option<usize>,
    pub frame_bin_size: Option<usize>,
    pub windows: Option<usize>,
    pub smoothing: Option<Smoothing>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSpPotentialConfig {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub temperature: Option<f64>,
    pub potential_column: Option<String>,
    pub integration: Option<IntegrationMethod>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileLandscapeConfig {
    pub coordinate_column: Option<String>,
    pub sp_column: Option<String>,
    pub temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileFptConfig {
    pub frame_start: Option<i64>,
    pub frame_end: Option<i64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub ext_bin_count: Option<usize>,
    pub fpt_step: Option<usize>,
    pub frame_time_fs: Option<f64>,
    pub density: Option<bool>,
    pub normalize: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSpecificHeatConfig {
    pub column: Option<String>,
    pub temperature: Option<f64>,
    pub molar_mass: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEnergyConfig {
    pub first_timestep: Option<i64>,
    pub last_timestep: Option<i64>,
    pub columns: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSmdConfig {
    pub pull_direction: Option<[f64; 3]>,
    pub fixed_com: Option<[f64; 3]>,
}

/// Contents of a TOML configuration file. Every field is optional; values
/// missing here fall back to the built-in defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub input: Option<FileInputConfig>,
    pub output: Option<FileOutputConfig>,
    pub pdf: Option<FilePdfConfig>,
    pub sp_pmf: Option<FileSpPmfConfig>,
    pub sp_traj: Option<FileSpTrajConfig>,
    pub sp_potential: Option<FileSpPotentialConfig>,
    pub landscape: Option<FileLandscapeConfig>,
    pub fpt: Option<FileFptConfig>,
    pub specific_heat: Option<FileSpecificHeatConfig>,
    pub energy: Option<FileEnergyConfig>,
    pub smd: Option<FileSmdConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Builds the override layer from `--set KEY=VALUE` pairs, where `KEY` is
    /// a dotted path such as `sp-traj.left`.
    pub fn from_set_values(set_values: &[String]) -> Result<Self> {
        let mut table = Table::new();
        apply_set_values(&mut table, set_values)?;
        Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(format!("Invalid --set value: {}", e.message())))
    }
}

fn apply_set_values(table: &mut Table, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let segments: Vec<&str> = key.trim().split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CliError::Config(format!(
                "Unsupported configuration key for --set: '{}'",
                key
            )));
        }
        insert_dotted(table, &segments, parse_value(value_str.trim()), key)?;
    }
    Ok(())
}

/// Interprets a `--set` value as TOML, falling back to a bare string so that
/// `--set landscape.sp-column=SP` needs no quoting.
fn parse_value(raw: &str) -> Value {
    toml::from_str::<Table>(&format!("v = {raw}"))
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn insert_dotted(table: &mut Table, segments: &[&str], value: Value, key: &str) -> Result<()> {
    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| CliError::Config(format!("Unsupported configuration key for --set: '{}'", key)))?;
    let mut current = table;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        current = match entry {
            Value::Table(inner) => inner,
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        };
    }
    current.insert(last.to_string(), value);
    Ok(())
}
