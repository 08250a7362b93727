//! Readers for NAMD `.log` output.
//!
//! Two record kinds are understood: the `ETITLE:`/`ENERGY:` energy table and
//! the `SMD` lines written during constant-velocity pulling. Both readers
//! fold over any number of log files in order, so a simulation split across
//! restarts reads as one series.

use super::error::{LineErrorKind, ParseError, parse_float, parse_int};
use super::traits::{DataFile, ReadOptions};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

const ENERGY_TITLE_TAG: &str = "ETITLE:";
const ENERGY_TAG: &str = "ENERGY:";
const SMD_TAG: &str = "SMD";
const SMD_FIELD_COUNT: usize = 8;

/// Inclusive timestep window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestepRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimestepRange {
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, timestep: i64) -> bool {
        self.start.is_none_or(|s| timestep >= s) && self.end.is_none_or(|e| timestep <= e)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRecord {
    pub timestep: i64,
    /// Raw values in title order, timestep included.
    pub values: Vec<String>,
    /// Line within its log file, for error reporting.
    pub line: usize,
}

/// The energy table of one or more NAMD logs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyLog {
    titles: Vec<String>,
    records: Vec<EnergyRecord>,
}

impl EnergyLog {
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// Reads every path in order, keeping records whose timestep lies in `range`.
    pub fn read_paths<P: AsRef<Path>>(
        paths: &[P],
        range: TimestepRange,
    ) -> Result<Self, ParseError> {
        let mut parser = EnergyLogParser::new(range);
        for path in paths {
            debug!(path = %path.as_ref().display(), "Reading NAMD energy log");
            let mut reader = BufReader::new(File::open(path)?);
            parser.feed(&mut reader)?;
        }
        parser.finish()
    }

    /// Column indices for `names`, in log order. With `keep_timestep` the
    /// timestep column is included even if not requested. An empty selection
    /// means every column.
    pub fn column_indices(
        &self,
        names: &[String],
        keep_timestep: bool,
    ) -> Result<Vec<usize>, ParseError> {
        if names.is_empty() {
            return Ok((0..self.titles.len()).collect());
        }
        let mut indices = names
            .iter()
            .map(|name| {
                self.titles
                    .iter()
                    .position(|t| t == name)
                    .ok_or_else(|| ParseError::UnknownColumn {
                        name: name.clone(),
                        available: self.titles.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if keep_timestep && !self.titles.is_empty() {
            indices.push(0);
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }
}

/// Accumulates an [`EnergyLog`] line by line across files.
///
/// Titles come from the first `ETITLE:` line seen; `ENERGY:` lines before it
/// are ignored, as are later title lines.
#[derive(Debug, Default)]
pub struct EnergyLogParser {
    range: TimestepRange,
    titles: Option<Vec<String>>,
    records: Vec<EnergyRecord>,
}

impl EnergyLogParser {
    pub fn new(range: TimestepRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn feed(&mut self, reader: &mut impl BufRead) -> Result<(), ParseError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            self.feed_line(index + 1, &line)?;
        }
        Ok(())
    }

    fn feed_line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        let mut words = line.split_whitespace();
        let tag = words.next();

        if self.titles.is_none() {
            if tag == Some(ENERGY_TITLE_TAG) {
                self.titles = Some(words.map(str::to_string).collect());
            }
            return Ok(());
        }
        if tag != Some(ENERGY_TAG) {
            return Ok(());
        }

        let expected = self.titles.as_ref().map_or(0, Vec::len);
        let values: Vec<String> = words.map(str::to_string).collect();
        if values.len() != expected {
            return Err(ParseError::line(
                number,
                LineErrorKind::FieldCount {
                    expected,
                    found: values.len(),
                },
            ));
        }
        let Some(first) = values.first() else {
            return Ok(());
        };
        let timestep = parse_int(first, number)?;
        if self.range.contains(timestep) {
            self.records.push(EnergyRecord {
                timestep,
                values,
                line: number,
            });
        }
        Ok(())
    }

    pub fn finish(self) -> Result<EnergyLog, ParseError> {
        let titles = self
            .titles
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ParseError::MissingRecord(ENERGY_TITLE_TAG.to_string()))?;
        Ok(EnergyLog {
            titles,
            records: self.records,
        })
    }
}

pub struct NamdEnergyFile;

impl DataFile for NamdEnergyFile {
    type Output = EnergyLog;
    type Error = ParseError;

    fn read_from(
        reader: &mut impl BufRead,
        _options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        let mut parser = EnergyLogParser::new(TimestepRange::default());
        parser.feed(reader)?;
        parser.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmdRecord {
    pub timestep: i64,
    pub position: Vector3<f64>,
    pub force: Vector3<f64>,
}

/// `SMD ts x y z fx fy fz` records of one or more logs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmdLog {
    pub records: Vec<SmdRecord>,
    /// Records ignored because they had the wrong number of fields.
    pub skipped: usize,
}

impl SmdLog {
    pub fn read_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ParseError> {
        let mut log = SmdLog::default();
        for path in paths {
            debug!(path = %path.as_ref().display(), "Reading NAMD SMD log");
            let mut reader = BufReader::new(File::open(path)?);
            log.feed(&mut reader)?;
        }
        Ok(log)
    }

    pub fn feed(&mut self, reader: &mut impl BufRead) -> Result<(), ParseError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.first() != Some(&SMD_TAG) {
                continue;
            }
            if words.len() != SMD_FIELD_COUNT {
                warn!(
                    line = number,
                    fields = words.len(),
                    "Skipping SMD record with unexpected field count"
                );
                self.skipped += 1;
                continue;
            }
            let v = |i: usize| parse_float(words[i], number);
            self.records.push(SmdRecord {
                timestep: parse_int(words[1], number)?,
                position: Vector3::new(v(2)?, v(3)?, v(4)?),
                force: Vector3::new(v(5)?, v(6)?, v(7)?),
            });
        }
        Ok(())
    }
}

pub struct NamdSmdFile;

impl DataFile for NamdSmdFile {
    type Output = SmdLog;
    type Error = ParseError;

    fn read_from(
        reader: &mut impl BufRead,
        _options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        let mut log = SmdLog::default();
        log.feed(reader)?;
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const LOG: &str = "\
Info: startup
ENERGY:       0   1.0 2.0
ETITLE:      TS    BOND   ANGLE   TEMP
ENERGY:       0    10.0    20.0   300.0
Info: something else
ENERGY:     100    11.0    21.0   301.0
ETITLE:      TS    BOND   ANGLE   TEMP
ENERGY:     200    12.0    22.0   302.0
";

    #[test]
    fn energy_titles_come_from_first_etitle_line() {
        let log = NamdEnergyFile::read_from(&mut Cursor::new(LOG), &ReadOptions::default())
            .unwrap();
        assert_eq!(log.titles(), &["TS", "BOND", "ANGLE", "TEMP"]);
        assert_eq!(log.records().len(), 3);
        assert_eq!(log.records()[1].timestep, 100);
        assert_eq!(log.records()[1].values[1], "11.0");
    }

    #[test]
    fn timestep_range_is_inclusive() {
        let mut parser = EnergyLogParser::new(TimestepRange::new(Some(100), Some(200)));
        parser.feed(&mut Cursor::new(LOG)).unwrap();
        let log = parser.finish().unwrap();
        let ts: Vec<_> = log.records().iter().map(|r| r.timestep).collect();
        assert_eq!(ts, vec![100, 200]);
    }

    #[test]
    fn log_without_titles_is_an_error() {
        let err = NamdEnergyFile::read_from(
            &mut Cursor::new("ENERGY: 0 1.0\n"),
            &ReadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::MissingRecord(_)));
    }

    #[test]
    fn energy_record_with_wrong_width_is_an_error() {
        let err = NamdEnergyFile::read_from(
            &mut Cursor::new("ETITLE: TS BOND\nENERGY: 0 1.0 2.0\n"),
            &ReadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Line { line: 2, .. }));
    }

    #[test]
    fn column_indices_follow_log_order_and_keep_timestep() {
        let log = NamdEnergyFile::read_from(&mut Cursor::new(LOG), &ReadOptions::default())
            .unwrap();
        let names = vec!["TEMP".to_string(), "BOND".to_string()];
        assert_eq!(log.column_indices(&names, true).unwrap(), vec![0, 1, 3]);
        assert_eq!(log.column_indices(&names, false).unwrap(), vec![1, 3]);
        assert_eq!(log.column_indices(&[], false).unwrap(), vec![0, 1, 2, 3]);
        assert!(log.column_indices(&["NOPE".to_string()], true).is_err());
    }

    fn log_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn multiple_logs_are_read_in_order() {
        let first = log_file("ETITLE: TS BOND\nENERGY: 0 1.0\n");
        let second = log_file("ETITLE: TS BOND\nENERGY: 10 2.0\n");
        let log = EnergyLog::read_paths(&[first.path(), second.path()], TimestepRange::default())
            .unwrap();
        let ts: Vec<_> = log.records().iter().map(|r| r.timestep).collect();
        assert_eq!(ts, vec![0, 10]);
    }

    #[test]
    fn smd_records_are_parsed_and_bad_ones_skipped() {
        let text = "\
SMDTITLE: TS CURRENT_POSITION FORCE
SMD 0 1.0 2.0 3.0 0.1 0.2 0.3
SMD 100 1.5 2.0 3.0
SMD 200 2.0 2.0 3.0 0.4 0.5 0.6
";
        let log = NamdSmdFile::read_from(&mut Cursor::new(text), &ReadOptions::default())
            .unwrap();
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.skipped, 1);
        assert_eq!(log.records[1].timestep, 200);
        assert_eq!(log.records[1].force, Vector3::new(0.4, 0.5, 0.6));
    }
}
