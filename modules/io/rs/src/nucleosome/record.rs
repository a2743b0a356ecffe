use derive_getters::{Dissolve, Getters};
use mutperiod_core_rs::loc::Position;

use crate::traits::Located;

/// A nucleosome, represented by its dyad (centre of symmetry). The dyad is always a whole
/// coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Getters, Dissolve)]
pub struct Record {
    chromosome: String,
    dyad: Position,
}

impl Record {
    pub fn new(chromosome: String, dyad: i64) -> eyre::Result<Self> {
        Ok(Self {
            chromosome,
            dyad: Position::new(dyad)?,
        })
    }

    pub(crate) fn set(&mut self, chromosome: &str, dyad: Position) {
        debug_assert!(dyad.is_integer());
        if self.chromosome != chromosome {
            self.chromosome.clear();
            self.chromosome.push_str(chromosome);
        }
        self.dyad = dyad;
    }
}

impl Located for Record {
    fn chromosome(&self) -> &str {
        &self.chromosome
    }

    fn coordinate(&self) -> Position {
        self.dyad
    }
}
