use std::fmt::Display;
use std::str::FromStr;

use eyre::{eyre, Report};

/// DNA strand of a point mutation (or of any stranded genomic feature).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(i8)]
pub enum Strand {
    /// The plus strand, also known as the forward or Watson strand.
    #[default]
    Plus = 1,
    /// The minus strand, also known as the reverse or Crick strand.
    Minus = -1,
}

impl Strand {
    /// Get the symbolic representation of the strand.
    pub fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Strand {
    type Error = Report;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Self::Plus),
            '-' => Ok(Self::Minus),
            _ => Err(eyre!("Strand must be '+' or '-', got '{value}'")),
        }
    }
}

impl FromStr for Strand {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            _ => Err(eyre!("Strand must be '+' or '-', got '{s}'")),
        }
    }
}
