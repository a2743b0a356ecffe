use eyre::Result;
use mutperiod_core_rs::loc::Position;

use crate::error::RecordError;
use crate::traits::{Located, Provenance, ReadRecord};

/// Reader adapter that enforces the (chromosome, position) sort order of the wrapped stream.
///
/// Chromosomes are compared as plain strings, the same ordering the dyad/mutation join uses to
/// reconcile the two streams. Any record that sorts strictly before its predecessor fails with
/// [`RecordError::Unsorted`]; equal keys are allowed.
pub struct Sorted<R> {
    inner: R,
    chromosome: String,
    position: Option<Position>,
}

impl<R> Sorted<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            chromosome: String::new(),
            position: None,
        }
    }
}

impl<R> ReadRecord for Sorted<R>
where
    R: ReadRecord + Provenance,
    R::Record: Located,
{
    type Record = R::Record;

    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        if !self.inner.read_record(into)? {
            return Ok(false);
        }

        let (chromosome, position) = (into.chromosome(), into.coordinate());
        if let Some(previous) = self.position {
            let sorted = match self.chromosome.as_str().cmp(chromosome) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => previous <= position,
                std::cmp::Ordering::Greater => false,
            };
            if !sorted {
                return Err(RecordError::Unsorted {
                    file: self.inner.source().to_owned(),
                    line: self.inner.line(),
                    previous: format!("{}:{}", self.chromosome, previous),
                    current: format!("{}:{}", chromosome, position),
                }
                .into());
            }
        }

        if self.chromosome != chromosome {
            self.chromosome.clear();
            self.chromosome.push_str(chromosome);
        }
        self.position = Some(position);
        Ok(true)
    }
}

impl<R: Provenance> Provenance for Sorted<R> {
    fn source(&self) -> &str {
        self.inner.source()
    }

    fn line(&self) -> usize {
        self.inner.line()
    }
}
