use std::time::Instant;

use eyre::Result;
use mutperiod_io_rs::{mutation, nucleosome, ReadRecord};

use crate::accumulator::Accumulator;
use crate::carryover::CarryOver;
use crate::config::Config;
use crate::result::Summary;
use crate::window::Window;

/// Current record of a forward-only stream.
struct Head<S: ReadRecord> {
    source: S,
    record: S::Record,
    live: bool,
}

impl<S: ReadRecord> Head<S>
where
    S::Record: Default,
{
    fn new(source: S) -> Self {
        Self {
            source,
            record: S::Record::default(),
            live: true,
        }
    }

    fn advance(&mut self) -> Result<()> {
        if self.live {
            self.live = self.source.read_record(&mut self.record)?;
        }
        Ok(())
    }

    fn current(&self) -> Option<&S::Record> {
        self.live.then_some(&self.record)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    // Advance the lagging stream until both streams are on the same chromosome
    Reconciling,
    // Credit buffered and freshly read mutations to the current nucleosome
    Counting,
    // Move to the next nucleosome
    Advancing,
    Done,
}

struct Tally {
    summary: Summary,
    launched_at: Instant,
}

/// Merge-join of a sorted mutation stream with a sorted nucleosome stream.
///
/// Both streams must be sorted by chromosome (compared as strings) and then by position. The join
/// doesn't check this itself; wrap the readers in [`mutperiod_io_rs::Sorted`] to fail fast on
/// unsorted input instead of silently under-counting.
pub struct Join<M, N>
where
    M: ReadRecord<Record = mutation::Record>,
    N: ReadRecord<Record = nucleosome::Record>,
{
    config: Config,
    mutations: Head<M>,
    nucleosomes: Head<N>,
    carryover: CarryOver,
    tally: Option<Tally>,
    summaries: Vec<Summary>,
}

impl<M, N> Join<M, N>
where
    M: ReadRecord<Record = mutation::Record>,
    N: ReadRecord<Record = nucleosome::Record>,
{
    pub fn new(config: Config, mutations: M, nucleosomes: N) -> Self {
        Self {
            config,
            mutations: Head::new(mutations),
            nucleosomes: Head::new(nucleosomes),
            carryover: CarryOver::default(),
            tally: None,
            summaries: Vec::new(),
        }
    }

    /// Run the join to completion, crediting every match to the accumulator. Returns a summary
    /// for each chromosome that had nucleosomes and mutations.
    pub fn run(mut self, accumulator: &mut Accumulator) -> Result<Vec<Summary>> {
        self.mutations.advance()?;
        self.nucleosomes.advance()?;

        if self.mutations.current().is_none() {
            log::warn!("Mutation stream is empty, all counts will be zero");
        }
        if self.nucleosomes.current().is_none() {
            log::warn!("Nucleosome stream is empty, all counts will be zero");
        }

        let mut state = State::Reconciling;
        while state != State::Done {
            state = match state {
                State::Reconciling => self.reconcile()?,
                State::Counting => self.count(accumulator)?,
                State::Advancing => self.advance()?,
                State::Done => State::Done,
            };
        }
        self.finish_chromosome();

        Ok(self.summaries)
    }

    fn reconcile(&mut self) -> Result<State> {
        self.finish_chromosome();
        // Nucleosomes never overlap across chromosomes
        self.carryover.clear();

        loop {
            let (mutation, nucleosome) =
                match (self.mutations.current(), self.nucleosomes.current()) {
                    (Some(m), Some(n)) => (m, n),
                    _ => return Ok(State::Done),
                };

            match mutation.chromosome().cmp(nucleosome.chromosome()) {
                std::cmp::Ordering::Less => self.mutations.advance()?,
                std::cmp::Ordering::Greater => self.nucleosomes.advance()?,
                std::cmp::Ordering::Equal => {
                    log::debug!("Counting mutations on {}", nucleosome.chromosome());
                    self.tally = Some(Tally {
                        summary: Summary::new(nucleosome.chromosome().clone(), 0, 0, 0, 0, 0.0),
                        launched_at: Instant::now(),
                    });
                    return Ok(State::Counting);
                }
            }
        }
    }

    fn count(&mut self, accumulator: &mut Accumulator) -> Result<State> {
        let Some(nucleosome) = self.nucleosomes.current() else {
            return Ok(State::Done);
        };
        let window = Window::new(nucleosome, &self.config);
        let (mut hits, mut carried, mut scanned) = (0, 0, 0);

        // Mutations credited to the previous nucleosome(s) that overlap with this one. Survivors
        // stay buffered, so a mutation covered by 3+ windows is credited to every one of them.
        self.carryover.prune(&window);
        for (position, strand) in self.carryover.iter() {
            if window.covers(*position) {
                accumulator.add(window.offset(*position), *strand)?;
                carried += 1;
            }
        }

        // Fresh mutations up to the end of the window
        while !window.is_past(self.mutations.current()) {
            let mutation = &self.mutations.record;
            let position = *mutation.position();
            scanned += 1;

            if window.covers(position) {
                accumulator.add(window.offset(position), *mutation.strand())?;
                self.carryover
                    .push(window.chromosome(), position, *mutation.strand());
                hits += 1;
            }
            self.mutations.advance()?;
        }

        if let Some(tally) = self.tally.as_mut() {
            let summary = &mut tally.summary;
            summary.nucleosomes += 1;
            summary.mutations += scanned;
            summary.hits += hits;
            summary.carried += carried;
        }
        Ok(State::Advancing)
    }

    fn advance(&mut self) -> Result<State> {
        self.nucleosomes.advance()?;

        let chromosome = self.tally.as_ref().map(|x| x.summary.chromosome.as_str());
        let state = match self.nucleosomes.current() {
            None => State::Done,
            Some(next) if Some(next.chromosome().as_str()) != chromosome => State::Reconciling,
            // Nothing left that could be credited
            Some(_) if self.mutations.current().is_none() && self.carryover.is_empty() => {
                State::Done
            }
            Some(_) => State::Counting,
        };
        Ok(state)
    }

    fn finish_chromosome(&mut self) {
        if let Some(Tally {
            mut summary,
            launched_at,
        }) = self.tally.take()
        {
            summary.time_s = launched_at.elapsed().as_secs_f64();
            log::debug!(
                "Finished {}: {} nucleosomes, {} mutations, {} hits (+{} from overlapping windows)",
                summary.chromosome,
                summary.nucleosomes,
                summary.mutations,
                summary.hits,
                summary.carried
            );
            self.summaries.push(summary);
        }
    }
}
