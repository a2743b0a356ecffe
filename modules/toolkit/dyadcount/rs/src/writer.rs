use std::io::Write;

use eyre::Result;
use itertools::Itertools;
use mutperiod_io_rs::WriteRecord;

use crate::result::Row;

pub const HEADER: [&str; 5] = [
    "Dyad_Position",
    "Plus_Strand_Counts",
    "Minus_Strand_Counts",
    "Both_Strands_Counts",
    "Aligned_Strands_Counts",
];

/// Tab-separated writer for the per-offset count table. The header is emitted before the first
/// row (or on flush if there were no rows).
pub struct Writer<W> {
    writer: W,
    header: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header: false,
        }
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.header {
            writeln!(self.writer, "{}", HEADER.iter().join("\t"))?;
            self.header = true;
        }
        Ok(())
    }
}

impl<W: Write> WriteRecord for Writer<W> {
    type Record = Row;

    fn write_record(&mut self, row: &Row) -> Result<()> {
        self.ensure_header()?;
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{}",
            row.offset(),
            row.plus(),
            row.minus(),
            row.both(),
            row.aligned()
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
