use std::path::Path;

use eyre::{Result, WrapErr};
use mutperiod_core_rs::loc::Position;
use mutperiod_io_rs::{mutation, nucleosome, ReadRecord, Sorted};

pub use accumulator::Accumulator;
pub use builder::EngineBuilder;
pub use carryover::CarryOver;
pub use config::{Config, Parity};
pub use domain::Domain;
pub use engine::Engine;
pub use join::Join;
pub use partition::{Partition, Replay};
pub use result::{Counts, Row, Summary};
pub use window::Window;
pub use writer::{Writer, HEADER};

mod accumulator;
mod builder;
mod carryover;
mod config;
mod domain;
mod engine;
mod join;
mod partition;
mod result;
mod window;
mod worker;
mod writer;

/// Signed distance from a dyad, in the same half-unit fixed point as [`Position`].
pub type Offset = Position;

/// Count mutations around nucleosome dyads on the calling thread.
///
/// Both streams must be sorted by chromosome and position, see [`Join`].
pub fn count<M, N>(mutations: M, nucleosomes: N, config: &Config) -> Result<Counts>
where
    M: ReadRecord<Record = mutation::Record>,
    N: ReadRecord<Record = nucleosome::Record>,
{
    let mut accumulator = Accumulator::new(Domain::new(config));
    let summaries = Join::new(*config, mutations, nucleosomes).run(&mut accumulator)?;
    Ok(Counts::new(*config, accumulator, summaries))
}

/// Sequential counting for a pair of (optionally gzipped) files. Unsorted input is rejected.
pub fn count_files(
    mutations: impl AsRef<Path>,
    nucleosomes: impl AsRef<Path>,
    config: &Config,
) -> Result<Counts> {
    let (mutations, nucleosomes) = (mutations.as_ref(), nucleosomes.as_ref());
    let mreader = mutation::Reader::from_path(mutations)
        .wrap_err_with(|| format!("Failed to open mutations: {}", mutations.display()))?;
    let nreader = nucleosome::Reader::from_path(nucleosomes)
        .wrap_err_with(|| format!("Failed to open nucleosomes: {}", nucleosomes.display()))?;

    count(Sorted::new(mreader), Sorted::new(nreader), config).wrap_err_with(|| {
        format!(
            "Failed to count mutations from {} around dyads from {}",
            mutations.display(),
            nucleosomes.display()
        )
    })
}
