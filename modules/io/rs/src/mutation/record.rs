use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use mutperiod_core_rs::loc::{Position, Strand};

use crate::traits::Located;

/// A single point mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Constructor, Getters, Dissolve)]
pub struct Record {
    chromosome: String,
    position: Position,
    strand: Strand,
}

impl Record {
    pub(crate) fn set(&mut self, chromosome: &str, position: Position, strand: Strand) {
        if self.chromosome != chromosome {
            self.chromosome.clear();
            self.chromosome.push_str(chromosome);
        }
        self.position = position;
        self.strand = strand;
    }
}

impl Located for Record {
    fn chromosome(&self) -> &str {
        &self.chromosome
    }

    fn coordinate(&self) -> Position {
        self.position
    }
}
