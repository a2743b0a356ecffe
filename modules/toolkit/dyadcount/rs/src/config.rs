use derive_getters::Getters;
use eyre::{ensure, Result};
use mutperiod_core_rs::loc::Position;

/// Parity of the sequence context used to call mutation positions.
///
/// Even-length contexts are centred between two bases, so mutation positions (and therefore
/// offsets from a dyad) may be half-integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Parity {
    #[default]
    Odd,
    Even,
}

impl Parity {
    pub fn of_context(length: usize) -> Self {
        if length % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

/// Counting window around each dyad: `radius` bases on each side plus an optional linker margin.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Getters)]
pub struct Config {
    radius: u32,
    linker: u32,
    parity: Parity,
}

impl Config {
    /// Half-width of the DNA wrapped around a single nucleosome.
    pub const NUCLEOSOME_RADIUS: u32 = 73;
    /// Half-width used to study periodicity across groups of neighbouring nucleosomes.
    pub const GROUP_RADIUS: u32 = 1000;
    /// Linker DNA margin added around single nucleosomes.
    pub const LINKER: u32 = 30;
    /// Upper bound for `radius + linker`.
    pub const MAX_REACH: u32 = 1_000_000;

    pub fn new(radius: u32, linker: u32, parity: Parity) -> Result<Self> {
        ensure!(radius > 0, "Counting radius must be positive");
        ensure!(
            linker == 0 || radius != Self::GROUP_RADIUS,
            "Linker offset can't be combined with the nucleosome group radius"
        );
        // Every offset in [-reach, reach] gets a dense counter
        ensure!(
            radius as u64 + linker as u64 <= Self::MAX_REACH as u64,
            "Counting window is too large: radius + linker must not exceed {}, got {radius} + {linker}",
            Self::MAX_REACH
        );
        Ok(Self {
            radius,
            linker,
            parity,
        })
    }

    pub fn nucleosome(parity: Parity) -> Self {
        Self {
            radius: Self::NUCLEOSOME_RADIUS,
            linker: 0,
            parity,
        }
    }

    pub fn nucleosome_with_linker(parity: Parity) -> Self {
        Self {
            radius: Self::NUCLEOSOME_RADIUS,
            linker: Self::LINKER,
            parity,
        }
    }

    pub fn nucleosome_group(parity: Parity) -> Self {
        Self {
            radius: Self::GROUP_RADIUS,
            linker: 0,
            parity,
        }
    }

    /// Largest absolute offset from the dyad that is still counted: `radius + linker`.
    pub fn reach(&self) -> Position {
        Position::from_halves(2 * (self.radius as i64 + self.linker as i64))
    }
}
