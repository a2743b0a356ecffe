use eyre::Result;

use crate::accumulator::Accumulator;
use crate::config::Config;
use crate::domain::Domain;
use crate::join::Join;
use crate::partition::Partition;
use crate::result::{Counts, Summary};

/// Per-thread state of the engine: counts for all partitions processed by the thread so far.
pub struct Worker {
    accumulator: Accumulator,
    summaries: Vec<Summary>,
}

impl Worker {
    pub fn new(domain: Domain) -> Self {
        Self {
            accumulator: Accumulator::new(domain),
            summaries: Vec::new(),
        }
    }

    /// Drop the results of the previous run. A worker created for a different domain is rebuilt.
    pub fn reset(&mut self, domain: Domain) {
        if *self.accumulator.domain() != domain {
            self.accumulator = Accumulator::new(domain);
        } else {
            self.accumulator.reset();
        }
        self.summaries.clear();
    }

    pub fn process(&mut self, config: Config, partition: Partition) -> Result<()> {
        let (chromosome, mutations, nucleosomes) = partition.join();
        log::debug!("Processing partition {chromosome}");

        let summaries = Join::new(config, mutations, nucleosomes).run(&mut self.accumulator)?;
        self.summaries.extend(summaries);
        Ok(())
    }

    /// Sum the counts collected by all workers.
    pub fn aggregate<'a>(
        config: Config,
        workers: impl Iterator<Item = &'a mut Worker>,
    ) -> Result<Counts> {
        let mut accumulator = Accumulator::new(Domain::new(&config));
        let mut summaries = Vec::new();
        for worker in workers {
            accumulator.merge(&worker.accumulator)?;
            summaries.append(&mut worker.summaries);
        }
        Ok(Counts::new(config, accumulator, summaries))
    }
}
