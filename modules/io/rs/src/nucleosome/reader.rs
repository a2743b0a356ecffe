use std::io::BufRead;
use std::path::Path;

use eyre::Result;
use mutperiod_core_rs::loc::Position;

use super::record::Record;
use crate::compression;
use crate::lines::Lines;
use crate::traits::{Provenance, ReadRecord};

pub struct Reader<R> {
    lines: Lines<R>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            lines: Lines::new(reader, source),
        }
    }
}

impl Reader<Box<dyn BufRead + Send + Sync + 'static>> {
    /// Open a nucleosome dyad file, plain text or gzip-compressed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stream = compression::read_file(path)?.box_bufread();
        Ok(Self::new(stream, path.display().to_string()))
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    fn read_record(&mut self, into: &mut Record) -> Result<bool> {
        if !self.lines.advance()? {
            return Ok(false);
        }

        let mut fields = self.lines.current().split_whitespace();
        let (chromosome, dyad) = match (fields.next(), fields.next()) {
            (Some(chromosome), Some(dyad)) => (chromosome, dyad),
            (chromosome, _) => {
                let found = chromosome.map_or(0, |_| 1);
                let err = self
                    .lines
                    .malformed("columns", format!("expected at least 2, found {found}"));
                return Err(err.into());
            }
        };

        let dyad = dyad
            .parse::<i64>()
            .map_err(|_| self.lines.malformed("dyad", "not an integer"))?;
        let dyad =
            Position::new(dyad).map_err(|err| self.lines.malformed("dyad", err.to_string()))?;

        into.set(chromosome, dyad);
        Ok(true)
    }
}

impl<R> Provenance for Reader<R> {
    fn source(&self) -> &str {
        self.lines.source()
    }

    fn line(&self) -> usize {
        self.lines.line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordError;
    use std::io::Cursor;

    fn reader(content: &str) -> Reader<Cursor<String>> {
        Reader::new(Cursor::new(content.to_owned()), "dyads.bed")
    }

    #[test]
    fn test_read_records() -> Result<()> {
        let mut reader = reader("track name=dyads\nchr1\t100\t101\nchr1 250\nchr2\t5\t6\t+\n");

        let mut records = Vec::new();
        reader.read_to_end(&mut records)?;
        assert_eq!(
            records,
            vec![
                Record::new("chr1".into(), 100)?,
                Record::new("chr1".into(), 250)?,
                Record::new("chr2".into(), 5)?,
            ]
        );
        assert_eq!(reader.line(), 4);
        Ok(())
    }

    #[test]
    fn test_malformed_records() {
        for (content, field) in [
            ("chr1\n", "columns"),
            ("chr1\t100.5\t101\n", "dyad"),
            ("chr1\tcentre\n", "dyad"),
            ("chr1\t-\n", "dyad"),
            ("chr1\t-4611686018427387904\n", "dyad"),
            ("chr1\t1099511627776\t1099511627777\n", "dyad"),
        ] {
            let mut record = Record::default();
            let err = reader(content).read_record(&mut record).unwrap_err();
            match err.downcast_ref::<RecordError>() {
                Some(RecordError::Malformed { field: f, line, .. }) => {
                    assert_eq!(*f, field);
                    assert_eq!(*line, 1);
                }
                other => panic!("Unexpected error for {content:?}: {other:?}"),
            }
        }
    }
}
