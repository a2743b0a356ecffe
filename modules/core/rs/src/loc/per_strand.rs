use std::ops::{Add, AddAssign};

use derive_getters::Dissolve;
use derive_more::Constructor;

use super::strand::Strand;

/// A struct that holds data for each strand.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Dissolve, Constructor,
)]
pub struct PerStrand<T> {
    pub plus: T,
    pub minus: T,
}

impl<T> PerStrand<T> {
    /// Gets a reference to the data for the specified strand.
    pub fn get(&self, strand: Strand) -> &T {
        match strand {
            Strand::Plus => &self.plus,
            Strand::Minus => &self.minus,
        }
    }

    /// Gets a mutable reference to the data for the specified strand.
    pub fn get_mut(&mut self, strand: Strand) -> &mut T {
        match strand {
            Strand::Plus => &mut self.plus,
            Strand::Minus => &mut self.minus,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Strand, &T)> {
        [(Strand::Plus, &self.plus), (Strand::Minus, &self.minus)].into_iter()
    }
}

impl<T: Add<Output = T> + Copy> PerStrand<T> {
    /// Sum over both strands.
    pub fn total(&self) -> T {
        self.plus + self.minus
    }
}

impl<T: AddAssign> AddAssign for PerStrand<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.plus += rhs.plus;
        self.minus += rhs.minus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_strand_access() {
        let mut data = PerStrand::new(1u64, 2u64);
        assert_eq!(*data.get(Strand::Plus), 1);
        assert_eq!(*data.get(Strand::Minus), 2);

        *data.get_mut(Strand::Minus) += 10;
        assert_eq!(data, PerStrand::new(1, 12));
        assert_eq!(data.total(), 13);
    }

    #[test]
    fn test_per_strand_add_assign() {
        let mut data = PerStrand::new(1u64, 2u64);
        data += PerStrand::new(3, 4);
        assert_eq!(data.dissolve(), (4, 6));
    }
}
