use super::error::EngineError;
use crate::core::io::error::{LineErrorKind, ParseError};
use crate::core::io::namd::EnergyLog;

/// Running per-column sums over energy records.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyAccumulator {
    titles: Vec<String>,
    sums: Vec<f64>,
    count: usize,
}

impl EnergyAccumulator {
    pub fn new(titles: Vec<String>) -> Self {
        let sums = vec![0.0; titles.len()];
        Self {
            titles,
            sums,
            count: 0,
        }
    }

    pub fn push(&mut self, values: &[f64]) {
        for (sum, v) in self.sums.iter_mut().zip(values) {
            *sum += v;
        }
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Per-column means, or `None` before the first record.
    pub fn means(&self) -> Option<Vec<f64>> {
        (self.count > 0).then(|| self.sums.iter().map(|s| s / self.count as f64).collect())
    }
}

/// Averages the selected columns over every record of `log`.
pub fn average(log: &EnergyLog, indices: &[usize]) -> Result<EnergyAccumulator, EngineError> {
    let titles = indices.iter().map(|&i| log.titles()[i].clone()).collect();
    let accumulator = log.records().iter().try_fold(
        EnergyAccumulator::new(titles),
        |mut acc, record| -> Result<_, ParseError> {
            let values = indices
                .iter()
                .map(|&i| {
                    record.values[i].parse::<f64>().map_err(|_| {
                        ParseError::line(
                            record.line,
                            LineErrorKind::InvalidFloat(record.values[i].clone()),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            acc.push(&values);
            Ok(acc)
        },
    )?;
    if accumulator.count() == 0 {
        return Err(EngineError::NoSamples(
            "no ENERGY records inside the timestep range".to_string(),
        ));
    }
    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::namd::NamdEnergyFile;
    use crate::core::io::traits::{DataFile, ReadOptions};
    use std::io::Cursor;

    fn log(text: &str) -> EnergyLog {
        NamdEnergyFile::read_from(&mut Cursor::new(text), &ReadOptions::default()).unwrap()
    }

    #[test]
    fn averages_selected_columns() {
        let log = log("ETITLE: TS BOND TEMP\nENERGY: 0 1.0 300\nENERGY: 10 3.0 302\n");
        let acc = average(&log, &[1, 2]).unwrap();
        assert_eq!(acc.titles(), &["BOND", "TEMP"]);
        assert_eq!(acc.means(), Some(vec![2.0, 301.0]));
    }

    #[test]
    fn no_records_is_an_error() {
        let log = log("ETITLE: TS BOND\n");
        assert!(matches!(average(&log, &[1]), Err(EngineError::NoSamples(_))));
    }

    #[test]
    fn non_numeric_value_reports_line() {
        let log = log("ETITLE: TS BOND\nENERGY: 0 abc\n");
        assert!(matches!(
            average(&log, &[1]),
            Err(EngineError::Parse {
                source: ParseError::Line { line: 2, .. }
            })
        ));
    }

    #[test]
    fn accumulator_has_no_means_before_first_record() {
        let acc = EnergyAccumulator::new(vec!["A".into()]);
        assert_eq!(acc.means(), None);
    }
}
