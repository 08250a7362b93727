use super::error::{LineErrorKind, ParseError, parse_float};
use super::traits::{DataFile, ReadOptions, content_lines};
use crate::core::models::profile::{DensityProfile, DensitySample};
use std::io::BufRead;

/// Headerless two-column `EXT PDF` density profile.
pub struct DensityFile;

impl DataFile for DensityFile {
    type Output = DensityProfile;
    type Error = ParseError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        content_lines(reader, &options.comment_token)?
            .iter()
            .map(|line| {
                let fields = line.fields();
                if fields.len() != 2 {
                    return Err(ParseError::line(
                        line.number,
                        LineErrorKind::FieldCount {
                            expected: 2,
                            found: fields.len(),
                        },
                    ));
                }
                Ok(DensitySample {
                    coordinate: parse_float(fields[0], line.number)?,
                    density: parse_float(fields[1], line.number)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DensityProfile::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_density_pairs() {
        let text = "# EXT PDF\n1.0 0.1\n1.5 0.3\n2.0 0.0\n";
        let profile = DensityFile::read_from(&mut Cursor::new(text), &ReadOptions::default())
            .unwrap();
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.samples()[1].density, 0.3);
    }

    #[test]
    fn rejects_non_numeric_density() {
        let err = DensityFile::read_from(&mut Cursor::new("1.0 x\n"), &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::Line { line: 1, .. }));
    }
}
