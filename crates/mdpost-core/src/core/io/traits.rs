use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Options shared by every text reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Everything from this token to the end of a line is ignored. An empty
    /// token disables comment stripping.
    pub comment_token: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            comment_token: "#".to_string(),
        }
    }
}

impl ReadOptions {
    pub fn with_comment_token(token: impl Into<String>) -> Self {
        Self {
            comment_token: token.into(),
        }
    }
}

/// Defines the interface for reading one input file format.
///
/// Implementors are usually unit structs naming the format; the parsed value
/// is returned as [`DataFile::Output`].
pub trait DataFile {
    /// The value produced by a successful parse.
    type Output;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads the format from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `options` - Comment handling shared by all readers.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be parsed or the reader fails.
    fn read_from(
        reader: &mut impl BufRead,
        options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error>;

    /// Reads the format from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &ReadOptions,
    ) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, options)
    }
}

/// A non-empty line with comments removed, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentLine {
    pub number: usize,
    pub text: String,
}

impl ContentLine {
    pub fn fields(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// Collects the content lines of `reader`, dropping comments and blank lines.
pub(crate) fn content_lines(
    reader: &mut impl BufRead,
    comment_token: &str,
) -> io::Result<Vec<ContentLine>> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = match comment_token {
            "" => line.as_str(),
            token => line.split(token).next().unwrap_or(""),
        };
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        lines.push(ContentLine {
            number: index + 1,
            text: content.to_string(),
        });
    }
    Ok(lines)
}
