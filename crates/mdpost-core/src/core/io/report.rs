use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row has {found} values but the report has {expected} columns")]
    ShapeMismatch { expected: usize, found: usize },
}

/// How a [`Report`] is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub delimiter: u8,
    /// Prefix of metadata lines (and of the header, with `comment_header`).
    pub comment_token: String,
    pub write_metadata: bool,
    /// Prefix the header row with the comment token, for plotting tools that
    /// cannot skip a header.
    pub comment_header: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            comment_token: "#".to_string(),
            write_metadata: true,
            comment_header: false,
        }
    }
}

/// A delimited output table together with the run metadata that produced it.
///
/// Rows are held in memory and only written once complete, so a failed
/// analysis never leaves a partial file behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    title: String,
    metadata: Vec<(String, String)>,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Report {
    pub fn new<S: Into<String>>(title: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            metadata: Vec::new(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push_metadata(key, value);
        self
    }

    pub fn push_metadata(&mut self, key: impl Into<String>, value: impl ToString) {
        self.metadata.push((key.into(), value.to_string()));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), ReportError> {
        if row.len() != self.columns.len() {
            return Err(ReportError::ShapeMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn push_values(&mut self, values: &[f64]) -> Result<(), ReportError> {
        self.push_row(values.iter().copied().map(format_float).collect())
    }

    /// Floating-point column values, for inspection and tests.
    pub fn column_values(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.rows
            .iter()
            .map(|row| row[index].parse::<f64>().ok())
            .collect()
    }

    /// Renders the full report into a byte buffer.
    pub fn render(&self, options: &ReportOptions) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        if options.write_metadata && !options.comment_token.is_empty() {
            let token = &options.comment_token;
            writeln!(buffer, "{token} {}", self.title)?;
            for (key, value) in &self.metadata {
                writeln!(buffer, "{token} {key}: {value}")?;
            }
            writeln!(buffer, "{token}-----------------------------")?;
        }

        {
            let mut writer = WriterBuilder::new()
                .delimiter(options.delimiter)
                .quote_style(QuoteStyle::Never)
                .has_headers(false)
                .from_writer(&mut buffer);

            let mut header = self.columns.clone();
            if options.comment_header {
                if let Some(first) = header.first_mut() {
                    first.insert_str(0, &options.comment_token);
                }
            }
            writer.write_record(&header)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        Ok(buffer)
    }

    pub fn write_to(&self, writer: &mut impl Write, options: &ReportOptions) -> Result<(), ReportError> {
        writer.write_all(&self.render(options)?)?;
        Ok(())
    }

    /// Renders first, then creates `path`, so nothing is written on a render failure.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P, options: &ReportOptions) -> Result<(), ReportError> {
        let bytes = self.render(options)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Shortest round-trip representation, switching to exponent notation for
/// very large or small magnitudes.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_report() -> Report {
        let mut report = Report::new("Splitting probability", ["EXT", "SP"])
            .with_metadata("Input", "traj.dat")
            .with_metadata("kT", 0.596);
        report.push_values(&[1.0, 1.0]).unwrap();
        report.push_values(&[1.5, 0.25]).unwrap();
        report
    }

    #[test]
    fn render_writes_metadata_header_and_rows() {
        let text = String::from_utf8(sample_report().render(&ReportOptions::default()).unwrap()).unwrap();
        let expected = "\
# Splitting probability
# Input: traj.dat
# kT: 0.596
#-----------------------------
EXT\tSP
1.0\t1.0
1.5\t0.25
";
        assert_eq!(text, expected);
    }

    #[test]
    fn metadata_can_be_disabled_and_header_commented() {
        let options = ReportOptions {
            delimiter: b',',
            write_metadata: false,
            comment_header: true,
            ..ReportOptions::default()
        };
        let text = String::from_utf8(sample_report().render(&options).unwrap()).unwrap();
        assert!(text.starts_with("#EXT,SP\n1.0,1.0\n"));
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut report = Report::new("t", ["A", "B"]);
        assert!(matches!(
            report.push_values(&[1.0]),
            Err(ReportError::ShapeMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = sample_report();
        let options = ReportOptions::default();
        assert_eq!(report.render(&options).unwrap(), report.render(&options).unwrap());
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.dat");
        sample_report().write_to_path(&path, &ReportOptions::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("EXT\tSP"));
        assert_eq!(sample_report().column_values("SP"), Some(vec![1.0, 0.25]));
    }

    #[test]
    fn tiny_values_use_exponent_notation() {
        assert_eq!(format_float(1e-20), "1e-20");
        assert_eq!(format_float(0.5), "0.5");
    }
}
