use super::error::{LineErrorKind, ParseError, parse_float};
use super::traits::{DataFile, ReadOptions, content_lines};
use std::io::BufRead;

/// Whitespace table whose first content line names the columns.
///
/// Cells are kept as text; numeric access goes through [`ColumnTable::column`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    headers: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl ColumnTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw cells of every data row, in file order.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.rows.iter().map(|(_, cells)| cells.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, ParseError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ParseError::UnknownColumn {
                name: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Values of the named column parsed as floats.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, ParseError> {
        let index = self.index_of(name)?;
        self.rows
            .iter()
            .map(|(line, cells)| parse_float(&cells[index], *line))
            .collect()
    }
}

pub struct TableFile;

impl DataFile for TableFile {
    type Output = ColumnTable;
    type Error = ParseError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        let lines = content_lines(reader, &options.comment_token)?;
        let mut iter = lines.into_iter();
        let header = iter
            .next()
            .ok_or_else(|| ParseError::MissingRecord("header row".to_string()))?;
        let headers: Vec<String> = header.fields().iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for line in iter {
            let cells: Vec<String> = line.fields().iter().map(|s| s.to_string()).collect();
            if cells.len() != headers.len() {
                return Err(ParseError::line(
                    line.number,
                    LineErrorKind::FieldCount {
                        expected: headers.len(),
                        found: cells.len(),
                    },
                ));
            }
            rows.push((line.number, cells));
        }
        Ok(ColumnTable { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table(text: &str) -> ColumnTable {
        TableFile::read_from(&mut Cursor::new(text), &ReadOptions::default()).unwrap()
    }

    #[test]
    fn first_content_line_is_the_header() {
        let t = table("# generated\nTS POTENTIAL TEMP\n0 -10.0 300\n100 -11.5 301\n");
        assert_eq!(t.headers(), &["TS", "POTENTIAL", "TEMP"]);
        assert_eq!(t.column("POTENTIAL").unwrap(), vec![-10.0, -11.5]);
        assert_eq!(t.row_count(), 2);
    }

    #[test]
    fn unknown_column_is_reported() {
        let t = table("A B\n1 2\n");
        assert!(matches!(
            t.column("C"),
            Err(ParseError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TableFile::read_from(&mut Cursor::new("A B\n1\n"), &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::Line { line: 2, .. }));
    }

    #[test]
    fn non_numeric_cell_reports_original_line() {
        let t = table("A\n1\n\nx\n");
        assert!(matches!(t.column("A"), Err(ParseError::Line { line: 4, .. })));
    }

    #[test]
    fn missing_header_is_an_error() {
        let err = TableFile::read_from(&mut Cursor::new("# only\n"), &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingRecord(_)));
    }
}
