use std::io::BufRead;

use eyre::{Result, WrapErr};

use crate::error::RecordError;
use crate::traits::Provenance;

/// Line-oriented reader that remembers where each line came from.
///
/// Blank lines, `#` comments and UCSC `track`/`browser` header lines are skipped. Line numbers
/// are 1-based and count every physical line, including the skipped ones.
pub struct Lines<R> {
    reader: R,
    source: String,
    buffer: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            buffer: String::new(),
            line: 0,
        }
    }

    /// Move to the next data line. Returns `false` at the end of the input.
    pub fn advance(&mut self) -> Result<bool> {
        loop {
            self.buffer.clear();
            let read = self
                .reader
                .read_line(&mut self.buffer)
                .wrap_err_with(|| format!("Failed to read line {} of {}", self.line + 1, self.source))?;
            if read == 0 {
                return Ok(false);
            }
            self.line += 1;

            if !is_header(self.current()) {
                return Ok(true);
            }
        }
    }

    /// Current line with the line terminator removed.
    pub fn current(&self) -> &str {
        self.buffer.trim_end_matches(['\n', '\r'])
    }

    /// Error pointing at the current line.
    pub fn malformed(&self, field: &'static str, reason: impl Into<String>) -> RecordError {
        RecordError::Malformed {
            file: self.source.clone(),
            line: self.line,
            field,
            reason: reason.into(),
            content: self.current().to_owned(),
        }
    }
}

impl<R> Provenance for Lines<R> {
    fn source(&self) -> &str {
        &self.source
    }

    fn line(&self) -> usize {
        self.line
    }
}

fn is_header(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("track ")
        || line.starts_with("browser ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_skips_headers_and_counts_lines() -> Result<()> {
        let content = "# comment\ntrack name=x\n\nchr1\t10\r\nchr1\t20\n\n";
        let mut lines = Lines::new(Cursor::new(content), "test.bed");

        assert!(lines.advance()?);
        assert_eq!(lines.current(), "chr1\t10");
        assert_eq!(lines.line(), 4);
        assert!(lines.advance()?);
        assert_eq!(lines.current(), "chr1\t20");
        assert_eq!(lines.line(), 5);
        assert!(!lines.advance()?);
        assert!(!lines.advance()?);
        Ok(())
    }

    #[test]
    fn test_malformed_points_at_current_line() -> Result<()> {
        let mut lines = Lines::new(Cursor::new("chr1\t10\nchr1\tx\n"), "nucs.bed");
        lines.advance()?;
        lines.advance()?;

        let err = lines.malformed("dyad", "not an integer");
        assert_eq!(err.file(), "nucs.bed");
        assert_eq!(err.line(), 2);
        assert_eq!(
            err.to_string(),
            "nucs.bed:2: invalid dyad (not an integer) in record 'chr1\tx'"
        );
        Ok(())
    }
}
