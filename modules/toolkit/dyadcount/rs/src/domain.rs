use mutperiod_core_rs::loc::Position;

use crate::config::{Config, Parity};

/// Fixed set of offsets from a dyad that can receive counts.
///
/// Offsets span `[-reach, +reach]` in steps of 1, or 0.5 for even-length contexts. Each offset is
/// mapped to a dense index, so counts can live in a flat vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Domain {
    // Both in half-units
    reach: i64,
    step: i64,
}

#[allow(clippy::len_without_is_empty)]
impl Domain {
    pub fn new(config: &Config) -> Self {
        let step = match config.parity() {
            Parity::Odd => 2,
            Parity::Even => 1,
        };
        Self {
            reach: config.reach().halves(),
            step,
        }
    }

    pub fn len(&self) -> usize {
        (2 * self.reach / self.step) as usize + 1
    }

    /// Dense index of the offset, or `None` if the offset is not part of the domain.
    pub fn index(&self, offset: Position) -> Option<usize> {
        let shifted = offset.halves() + self.reach;
        if shifted < 0 || shifted > 2 * self.reach || shifted % self.step != 0 {
            return None;
        }
        Some((shifted / self.step) as usize)
    }

    /// Offset stored at the given dense index.
    pub fn offset(&self, index: usize) -> Position {
        debug_assert!(index < self.len());
        Position::from_halves(index as i64 * self.step - self.reach)
    }

    /// All offsets in ascending order.
    pub fn offsets(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(|ind| self.offset(ind))
    }
}
