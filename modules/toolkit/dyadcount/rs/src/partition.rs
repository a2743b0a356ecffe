use derive_getters::{Dissolve, Getters};
use eyre::Result;
use itertools::{EitherOrBoth, Itertools};
use mutperiod_io_rs::{mutation, nucleosome, Located, ReadRecord};

/// Records of a single chromosome replayed as a stream.
pub struct Replay<T> {
    records: std::vec::IntoIter<T>,
}

impl<T> Replay<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl<T> ReadRecord for Replay<T> {
    type Record = T;

    fn read_record(&mut self, into: &mut T) -> Result<bool> {
        match self.records.next() {
            Some(record) => {
                *into = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Mutations and nucleosomes of one chromosome, processed independently of all other chromosomes.
#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Partition {
    chromosome: String,
    mutations: Vec<mutation::Record>,
    nucleosomes: Vec<nucleosome::Record>,
}

impl Partition {
    /// Split both streams into chromosomes and pair them up. Chromosomes present in only one of
    /// the streams can't produce any counts and are dropped.
    pub fn build<M, N>(mutations: M, nucleosomes: N) -> Result<Vec<Partition>>
    where
        M: ReadRecord<Record = mutation::Record> + Send,
        N: ReadRecord<Record = nucleosome::Record> + Send,
    {
        let (mutations, nucleosomes) =
            rayon::join(|| chromosomes(mutations), || chromosomes(nucleosomes));
        let (mutations, nucleosomes) = (mutations?, nucleosomes?);

        let mut skipped = 0;
        let partitions = mutations
            .into_iter()
            .merge_join_by(nucleosomes, |m, n| m.0.cmp(&n.0))
            .filter_map(|pair| match pair {
                EitherOrBoth::Both((chromosome, mutations), (_, nucleosomes)) => Some(Partition {
                    chromosome,
                    mutations,
                    nucleosomes,
                }),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .collect::<Vec<_>>();

        if skipped > 0 {
            log::debug!("{skipped} chromosome(s) are present in only one of the inputs");
        }
        Ok(partitions)
    }

    pub fn join(self) -> (String, Replay<mutation::Record>, Replay<nucleosome::Record>) {
        (
            self.chromosome,
            Replay::new(self.mutations),
            Replay::new(self.nucleosomes),
        )
    }
}

// Group a stream sorted by chromosome into consecutive per-chromosome chunks
fn chromosomes<S>(mut source: S) -> Result<Vec<(String, Vec<S::Record>)>>
where
    S: ReadRecord,
    S::Record: Located + Default,
{
    let mut chunks: Vec<(String, Vec<S::Record>)> = Vec::new();
    let mut record = S::Record::default();
    while source.read_record(&mut record)? {
        let record = std::mem::take(&mut record);
        match chunks.last_mut() {
            Some((chromosome, records)) if chromosome.as_str() == record.chromosome() => {
                records.push(record)
            }
            _ => chunks.push((record.chromosome().to_owned(), vec![record])),
        }
    }
    Ok(chunks)
}
