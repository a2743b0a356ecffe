use eyre::{ensure, Result};
use mutperiod_core_rs::loc::{PerStrand, Position, Strand};

use crate::domain::Domain;

/// Per-offset, per-strand mutation counts over a fixed [`Domain`].
///
/// Every offset of the domain is present (with zero counts) from the start, and no offset outside
/// of it can ever be created.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Accumulator {
    domain: Domain,
    counts: Vec<PerStrand<u64>>,
}

impl Accumulator {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            counts: vec![PerStrand::default(); domain.len()],
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Credit one mutation at the given offset and strand.
    pub fn add(&mut self, offset: Position, strand: Strand) -> Result<()> {
        let ind = self.domain.index(offset).ok_or_else(|| {
            eyre::eyre!(
                "Offset {offset} is outside of the counting domain [{}, {}]. Half-integer \
                 positions require an even-length sequence context.",
                self.domain.offset(0),
                self.domain.offset(self.domain.len() - 1)
            )
        })?;
        *self.counts[ind].get_mut(strand) += 1;
        Ok(())
    }

    pub fn get(&self, offset: Position) -> Option<&PerStrand<u64>> {
        self.domain.index(offset).map(|ind| &self.counts[ind])
    }

    /// Offsets in ascending order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &PerStrand<u64>)> {
        self.counts
            .iter()
            .enumerate()
            .map(|(ind, cnts)| (self.domain.offset(ind), cnts))
    }

    /// Total number of credited mutations on both strands.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|x| x.total()).sum()
    }

    /// Add counts from another accumulator built over the same domain.
    pub fn merge(&mut self, other: &Accumulator) -> Result<()> {
        ensure!(
            self.domain == other.domain,
            "Can't merge counts collected over different offset domains"
        );
        for (cnts, other) in self.counts.iter_mut().zip(&other.counts) {
            *cnts += *other;
        }
        Ok(())
    }

    /// Zero all counts, keeping the domain.
    pub fn reset(&mut self) {
        self.counts.fill(PerStrand::default());
    }

    /// Count for `offset` on the plus strand together with `-offset` on the minus strand: both
    /// read 5'->3' relative to the dyad. Offsets outside of the domain count as zero.
    pub fn aligned(&self, offset: Position) -> u64 {
        let plus = self.get(offset).map_or(0, |x| x.plus);
        let minus = self.get(-offset).map_or(0, |x| x.minus);
        plus + minus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Parity};

    fn accumulator(radius: u32, parity: Parity) -> Accumulator {
        Accumulator::new(Domain::new(&Config::new(radius, 0, parity).unwrap()))
    }

    #[test]
    fn test_starts_with_zeros() {
        let acc = accumulator(3, Parity::Odd);
        assert_eq!(acc.iter().count(), 7);
        assert!(acc.iter().all(|(_, cnts)| *cnts == PerStrand::default()));
        assert_eq!(acc.total(), 0);
    }

    #[test]
    fn test_add() -> Result<()> {
        let mut acc = accumulator(3, Parity::Odd);
        acc.add(Position::new(-2)?, Strand::Plus)?;
        acc.add(Position::new(-2)?, Strand::Plus)?;
        acc.add(Position::new(2)?, Strand::Minus)?;

        assert_eq!(acc.get(Position::new(-2)?), Some(&PerStrand::new(2, 0)));
        assert_eq!(acc.get(Position::new(2)?), Some(&PerStrand::new(0, 1)));
        assert_eq!(acc.total(), 3);

        assert_eq!(acc.aligned(Position::new(-2)?), 3);
        assert_eq!(acc.aligned(Position::new(2)?), 0);
        assert_eq!(acc.aligned(Position::new(10)?), 0);
        Ok(())
    }

    #[test]
    fn test_add_outside_domain() -> Result<()> {
        let mut acc = accumulator(3, Parity::Odd);
        assert!(acc.add(Position::new(4)?, Strand::Plus).is_err());
        assert!(acc.add(Position::from_halves(1), Strand::Plus).is_err());
        assert_eq!(acc.total(), 0);
        assert_eq!(acc.iter().count(), 7);
        Ok(())
    }

    #[test]
    fn test_merge_and_reset() -> Result<()> {
        let mut left = accumulator(2, Parity::Even);
        let mut right = accumulator(2, Parity::Even);
        left.add(Position::from_halves(1), Strand::Minus)?;
        right.add(Position::from_halves(1), Strand::Minus)?;
        right.add(Position::new(0)?, Strand::Plus)?;

        left.merge(&right)?;
        assert_eq!(left.get(Position::from_halves(1)), Some(&PerStrand::new(0, 2)));
        assert_eq!(left.total(), 3);

        assert!(left.merge(&accumulator(3, Parity::Even)).is_err());

        left.reset();
        assert_eq!(left.total(), 0);
        Ok(())
    }
}
