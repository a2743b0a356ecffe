use std::cell::RefCell;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use derive_more::Constructor;
use eyre::{eyre, Result, WrapErr};
use mutperiod_io_rs::{mutation, nucleosome, Provenance, ReadRecord, Sorted};
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use crate::builder::EngineBuilder;
use crate::config::Config;
use crate::domain::Domain;
use crate::partition::Partition;
use crate::result::Counts;
use crate::worker::Worker;

/// Parallel counting engine. Chromosomes are independent of each other, so the inputs are split
/// into per-chromosome partitions that are joined concurrently on the thread pool (or the global
/// rayon pool if none was provided).
///
/// The result is identical to the sequential [`crate::count`], but both inputs are read (and
/// validated) in full before counting starts.
#[derive(Constructor)]
pub struct Engine {
    config: Config,
    thread_pool: Option<ThreadPool>,
    workers: ThreadLocal<RefCell<Worker>>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Count mutations around dyads for a pair of (optionally gzipped) files.
    pub fn run(
        &mut self,
        mutations: impl AsRef<Path>,
        nucleosomes: impl AsRef<Path>,
    ) -> Result<Counts> {
        let (mutations, nucleosomes) = (mutations.as_ref(), nucleosomes.as_ref());
        let mutations = mutation::Reader::from_path(mutations)
            .wrap_err_with(|| format!("Failed to open mutations: {}", mutations.display()))?;
        let nucleosomes = nucleosome::Reader::from_path(nucleosomes)
            .wrap_err_with(|| format!("Failed to open nucleosomes: {}", nucleosomes.display()))?;
        self.run_streams(mutations, nucleosomes)
    }

    /// Count mutations around dyads for a pair of record streams. Both streams are checked to be
    /// sorted by chromosome and position.
    pub fn run_streams<M, N>(&mut self, mutations: M, nucleosomes: N) -> Result<Counts>
    where
        M: ReadRecord<Record = mutation::Record> + Provenance + Send,
        N: ReadRecord<Record = nucleosome::Record> + Provenance + Send,
    {
        match self.thread_pool.take() {
            Some(pool) => {
                let result = pool.install(|| self._run(mutations, nucleosomes));
                self.thread_pool = Some(pool);
                result
            }
            None => self._run(mutations, nucleosomes),
        }
    }

    fn _run<M, N>(&mut self, mutations: M, nucleosomes: N) -> Result<Counts>
    where
        M: ReadRecord<Record = mutation::Record> + Provenance + Send,
        N: ReadRecord<Record = nucleosome::Record> + Provenance + Send,
    {
        let (config, domain) = (self.config, Domain::new(&self.config));

        // Soft-reset all workers
        for worker in self.workers.iter_mut() {
            worker.get_mut().reset(domain);
        }

        let partitions = Partition::build(Sorted::new(mutations), Sorted::new(nucleosomes))?;
        if partitions.is_empty() {
            log::warn!("Mutations and nucleosomes share no chromosomes, all counts will be zero");
        }

        let has_failed = AtomicBool::new(false);
        let failure = Mutex::new(None);
        let workers = &self.workers;
        rayon::scope(|s| {
            for partition in partitions {
                // Don't schedule new work after the first failure
                if has_failed.load(Ordering::Relaxed) {
                    return;
                }

                let (has_failed, failure) = (&has_failed, &failure);
                s.spawn(move |_| {
                    if has_failed.load(Ordering::Relaxed) {
                        return;
                    }

                    let mut worker = workers
                        .get_or(|| RefCell::new(Worker::new(domain)))
                        .borrow_mut();

                    if let Err(err) = worker.process(config, partition) {
                        has_failed.store(true, Ordering::Relaxed);
                        log::error!("Dyad counting failed: {:?}", err);
                        if let Ok(mut failure) = failure.lock() {
                            failure.get_or_insert(err);
                        }
                    }
                });
            }
        });

        if has_failed.into_inner() {
            return Err(failure
                .into_inner()
                .ok()
                .flatten()
                .unwrap_or_else(|| eyre!("Dyad counting failed. See log for details.")));
        }

        let counts = Worker::aggregate(config, self.workers.iter_mut().map(|x| x.get_mut()))?;
        log::info!(
            "Credited {} mutations across {} chromosome(s)",
            counts.total(),
            counts.summaries().len()
        );
        Ok(counts)
    }
}
