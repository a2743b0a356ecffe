use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use eyre::{ensure, Result, WrapErr};
use mutperiod_core_rs::loc::{PerStrand, Position};
use mutperiod_io_rs::WriteRecord;

use crate::accumulator::Accumulator;
use crate::config::Config;
use crate::writer::Writer;

#[derive(Clone, PartialEq, Debug, Default, Constructor, Dissolve, Getters)]
pub struct Summary {
    pub(crate) chromosome: String,
    // Nucleosomes processed on the chromosome
    pub(crate) nucleosomes: u64,
    // Mutations drained from the stream while counting on the chromosome
    pub(crate) mutations: u64,
    // Mutations credited on first sight
    pub(crate) hits: u64,
    // Additional credits from the carry-over buffer (overlapping windows)
    pub(crate) carried: u64,
    // Time spent processing the chromosome
    pub(crate) time_s: f64,
}

/// One line of the output table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Constructor, Getters)]
pub struct Row {
    offset: Position,
    plus: u64,
    minus: u64,
    both: u64,
    aligned: u64,
}

#[derive(Clone, PartialEq, Debug, Dissolve, Getters)]
pub struct Counts {
    config: Config,
    accumulator: Accumulator,
    summaries: Vec<Summary>,
}

impl Counts {
    pub fn new(config: Config, accumulator: Accumulator, mut summaries: Vec<Summary>) -> Self {
        summaries.sort_by(|a, b| a.chromosome.cmp(&b.chromosome));
        Self {
            config,
            accumulator,
            summaries,
        }
    }

    pub fn get(&self, offset: Position) -> Option<&PerStrand<u64>> {
        self.accumulator.get(offset)
    }

    pub fn total(&self) -> u64 {
        self.accumulator.total()
    }

    /// Table rows in ascending offset order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.accumulator.iter().map(|(offset, cnts)| {
            let aligned = self.accumulator.aligned(offset);
            Row::new(offset, cnts.plus, cnts.minus, cnts.total(), aligned)
        })
    }

    /// Combine with counts from an independent run over the same configuration.
    pub fn merge(&mut self, other: Counts) -> Result<()> {
        ensure!(
            self.config == other.config,
            "Can't merge counts collected with different configurations: {:?} vs {:?}",
            self.config,
            other.config
        );
        self.accumulator.merge(&other.accumulator)?;
        self.summaries.extend(other.summaries);
        self.summaries.sort_by(|a, b| a.chromosome.cmp(&b.chromosome));
        Ok(())
    }

    /// Write the table to any output.
    pub fn write_to<W: std::io::Write>(&self, output: W) -> Result<()> {
        let mut writer = Writer::new(output);
        for row in self.rows() {
            writer.write_record(&row)?;
        }
        writer.flush()
    }

    /// Create (or overwrite) a tab-separated table at the given path. The counts stay untouched
    /// on failure, so the write can be retried.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        File::create(path)
            .map_err(eyre::Report::from)
            .and_then(|file| self.write_to(BufWriter::new(file)))
            .wrap_err_with(|| format!("Failed to write counts to {}", path.display()))
    }
}
