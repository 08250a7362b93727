use crate::core::io::error::ParseError;
use crate::core::io::namd::{EnergyLog, EnergyLogParser};
use crate::core::io::report::{Report, ReportError};
use crate::engine::config::EnergyConfig;
use crate::engine::energy::{self, EnergyAccumulator};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Selected columns of every `ENERGY:` record, as written in the log.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    pub config: EnergyConfig,
    pub titles: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl EnergyTable {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut report = Report::new("NAMD energies", self.titles.iter().cloned())
            .with_metadata("Records", self.rows.len());
        push_range_metadata(&mut report, &self.config);
        for row in &self.rows {
            report.push_row(row.clone())?;
        }
        Ok(report)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyAverages {
    pub config: EnergyConfig,
    pub accumulator: EnergyAccumulator,
}

impl EnergyAverages {
    pub fn to_report(&self) -> Result<Report, ReportError> {
        let mut report = Report::new(
            "NAMD energy averages",
            self.accumulator.titles().iter().cloned(),
        )
        .with_metadata("Records", self.accumulator.count());
        push_range_metadata(&mut report, &self.config);
        if let Some(means) = self.accumulator.means() {
            report.push_values(&means)?;
        }
        Ok(report)
    }
}

fn push_range_metadata(report: &mut Report, config: &EnergyConfig) {
    if let Some(start) = config.timesteps.start {
        report.push_metadata("First timestep", start);
    }
    if let Some(end) = config.timesteps.end {
        report.push_metadata("Last timestep", end);
    }
}

fn read_log<P: AsRef<Path>>(
    paths: &[P],
    config: &EnergyConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyLog, EngineError> {
    reporter.phase_start("Reading Logs");
    reporter.task_start(paths.len());
    // One parser across all files so titles carry over restarts.
    let mut parser = EnergyLogParser::new(config.timesteps);
    for path in paths {
        debug!(path = %path.as_ref().display(), "Reading NAMD energy log");
        let mut reader = BufReader::new(File::open(path).map_err(ParseError::from)?);
        parser.feed(&mut reader)?;
        reporter.task_increment();
    }
    reporter.task_finish();
    reporter.phase_finish();
    Ok(parser.finish()?)
}

/// Copies the selected columns (timestep always included) of every record.
#[instrument(skip_all, name = "energy_extract_workflow")]
pub fn extract<P: AsRef<Path>>(
    paths: &[P],
    config: &EnergyConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyTable, EngineError> {
    let log = read_log(paths, config, reporter)?;
    let indices = log.column_indices(&config.columns, true)?;

    let titles = indices.iter().map(|&i| log.titles()[i].clone()).collect();
    let rows: Vec<Vec<String>> = log
        .records()
        .iter()
        .map(|record| indices.iter().map(|&i| record.values[i].clone()).collect())
        .collect();
    info!(records = rows.len(), columns = indices.len(), "Extracted NAMD energies.");

    Ok(EnergyTable {
        config: config.clone(),
        titles,
        rows,
    })
}

/// Mean of each selected column over every record in the timestep range.
#[instrument(skip_all, name = "energy_average_workflow")]
pub fn average<P: AsRef<Path>>(
    paths: &[P],
    config: &EnergyConfig,
    reporter: &ProgressReporter,
) -> Result<EnergyAverages, EngineError> {
    let log = read_log(paths, config, reporter)?;
    let indices = log.column_indices(&config.columns, false)?;
    let accumulator = energy::average(&log, &indices)?;
    info!(records = accumulator.count(), "Averaged NAMD energies.");

    Ok(EnergyAverages {
        config: config.clone(),
        accumulator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::namd::TimestepRange;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LOG: &str = "\
Info: startup
ETITLE:      TS           BOND          ANGLE          TOTAL
ENERGY:       0         1.0000         2.0000        -10.0000
ENERGY:     100         3.0000         4.0000        -12.0000
ENERGY:     200         5.0000         6.0000        -14.0000
WRITING COORDINATES
";

    fn log_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        file
    }

    #[test]
    fn extract_keeps_timestep_and_log_column_order() {
        let file = log_file();
        let config = EnergyConfig {
            timesteps: TimestepRange::new(Some(100), None),
            columns: vec!["TOTAL".to_string(), "BOND".to_string()],
        };
        let table = extract(&[file.path()], &config, &ProgressReporter::new()).unwrap();
        assert_eq!(table.titles, vec!["TS", "BOND", "TOTAL"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["100", "3.0000", "-12.0000"]);
    }

    #[test]
    fn average_over_inclusive_range() {
        let file = log_file();
        let config = EnergyConfig {
            timesteps: TimestepRange::new(Some(0), Some(100)),
            columns: vec!["BOND".to_string(), "TOTAL".to_string()],
        };
        let averages = average(&[file.path()], &config, &ProgressReporter::new()).unwrap();
        assert_eq!(averages.accumulator.count(), 2);
        assert_eq!(averages.accumulator.means(), Some(vec![2.0, -11.0]));

        let report = averages.to_report().unwrap();
        assert_eq!(report.columns(), ["BOND", "TOTAL"]);
        assert_eq!(report.row_count(), 1);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let file = log_file();
        let config = EnergyConfig {
            timesteps: TimestepRange::default(),
            columns: vec!["DIHED".to_string()],
        };
        let err = extract(&[file.path()], &config, &ProgressReporter::new()).unwrap_err();
        assert!(err.to_string().contains("DIHED"));
    }
}
