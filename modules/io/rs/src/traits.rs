use eyre::Result;
use mutperiod_core_rs::loc::Position;

/// A trait for reading structured records one at a time from a forward-only stream.
pub trait ReadRecord {
    /// The type of the records that will be read.
    type Record;

    /// Read a single record from the input into the provided buffer.
    /// Returns `true` if a record was read and `false` if the end of the input was reached.
    ///
    /// Running out of records is not an error: readers keep returning `false` once exhausted.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool>;

    /// Read all remaining records and append them to the provided vector. Returns the number of
    /// records read.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize>
    where
        Self::Record: Default,
    {
        let mut total = 0;
        loop {
            let mut record = Self::Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }
}

impl<T: ReadRecord + ?Sized> ReadRecord for Box<T> {
    type Record = T::Record;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        (**self).read_record(into)
    }
}

/// A trait for writing structured records. Modeled after the `Write` trait in the std.
pub trait WriteRecord {
    type Record;

    /// Write a single record.
    fn write_record(&mut self, record: &Self::Record) -> Result<()>;

    /// Write a sequence of records, stopping at the first failure.
    fn write_records<'a>(&mut self, records: impl IntoIterator<Item = &'a Self::Record>) -> Result<()>
    where
        Self::Record: 'a,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Flush the output.
    fn flush(&mut self) -> Result<()>;
}

/// Where the last record came from: a human-readable source name and a 1-based line number.
pub trait Provenance {
    fn source(&self) -> &str;

    fn line(&self) -> usize;
}

/// Records that have a genomic location used for the (chromosome, position) sort order.
pub trait Located {
    fn chromosome(&self) -> &str;

    fn coordinate(&self) -> Position;
}
