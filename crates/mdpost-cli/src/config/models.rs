use mdpost::core::io::report::ReportOptions;
use mdpost::core::io::traits::ReadOptions;
use std::path::PathBuf;

/// A fully resolved command: where to write, how to read and render, and the
/// engine configuration `C` for the analysis itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig<C> {
    pub output: PathBuf,
    /// Second table some analyses write next to the main one.
    pub secondary_output: Option<PathBuf>,
    pub read_options: ReadOptions,
    pub report_options: ReportOptions,
    pub core_config: C,
}
