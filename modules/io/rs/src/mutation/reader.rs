use std::io::BufRead;
use std::path::Path;

use eyre::Result;
use mutperiod_core_rs::loc::{Position, Strand};

use super::record::Record;
use crate::compression;
use crate::lines::Lines;
use crate::traits::{Provenance, ReadRecord};

const COLUMNS: usize = 6;

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
    /// Open a mutation file, plain text or gzip-compressed.
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
        let line = self.lines.current();

        let mut fields = [""; COLUMNS];
        let mut found = 0;
        for (slot, field) in fields.iter_mut().zip(line.split_whitespace()) {
            *slot = field;
            found += 1;
        }
        if found < COLUMNS {
            return Err(self
                .lines
                .malformed("columns", format!("expected at least {COLUMNS}, found {found}"))
                .into());
        }

        let position = fields[1]
            .parse::<Position>()
            .map_err(|err| self.lines.malformed("position", err.to_string()))?;
        let strand = fields[5]
            .parse::<Strand>()
            .map_err(|_| self.lines.malformed("strand", "expected '+' or '-'"))?;

        into.set(fields[0], position, strand);
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
