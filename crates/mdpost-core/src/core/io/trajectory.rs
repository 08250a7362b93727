use super::error::{LineErrorKind, ParseError, parse_float, parse_int};
use super::traits::{DataFile, ReadOptions, content_lines};
use crate::core::models::trajectory::{Trajectory, TrajectorySample};
use std::io::BufRead;

/// Headerless two-column `FRAME EXT` time series.
pub struct TrajectoryFile;

impl DataFile for TrajectoryFile {
    type Output = Trajectory;
    type Error = ParseError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        let lines = content_lines(reader, &options.comment_token)?;
        let mut samples = Vec::with_capacity(lines.len());
        for line in &lines {
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
            samples.push(TrajectorySample::new(
                parse_int(fields[0], line.number)?,
                parse_float(fields[1], line.number)?,
            ));
        }
        Ok(Trajectory::new(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn reads_frames_and_coordinates_in_order() {
        let text = "# FRAME EXT\n0 10.5\n1\t11.0\n2 9.75 # note\n";
        let traj = TrajectoryFile::read_from(&mut Cursor::new(text), &ReadOptions::default())
            .unwrap();
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.samples()[2], TrajectorySample::new(2, 9.75));
    }

    #[test]
    fn keeps_duplicate_frames() {
        let traj = TrajectoryFile::read_from(
            &mut Cursor::new("5 1.0\n5 2.0\n"),
            &ReadOptions::default(),
        )
        .unwrap();
        assert_eq!(traj.frames().collect::<Vec<_>>(), vec![5, 5]);
    }

    #[test]
    fn malformed_line_reports_its_line_number() {
        let err = TrajectoryFile::read_from(
            &mut Cursor::new("0 1.0\n\n1 abc\n"),
            &ReadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Line {
                line: 3,
                kind: LineErrorKind::InvalidFloat(_)
            }
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = TrajectoryFile::read_from(&mut Cursor::new("0 1.0 2.0\n"), &ReadOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Line {
                line: 1,
                kind: LineErrorKind::FieldCount { expected: 2, found: 3 }
            }
        ));
    }

    #[test]
    fn honours_custom_comment_token() {
        let traj = TrajectoryFile::read_from(
            &mut Cursor::new("@ title\n0 1.0\n"),
            &ReadOptions::with_comment_token("@"),
        )
        .unwrap();
        assert_eq!(traj.len(), 1);
    }

    #[test]
    fn reads_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 1.0\n1 2.0").unwrap();
        let traj = TrajectoryFile::read_from_path(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(traj.coordinate_range(), Some((1.0, 2.0)));
    }
}
