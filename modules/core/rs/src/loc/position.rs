use std::fmt::Display;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use eyre::{ensure, eyre, Report, Result};

/// Genomic coordinate that is either an integer or an integer + 0.5.
///
/// Half-integer coordinates appear when the sequence context of a mutation has even length and
/// its centre falls between two bases. The value is stored as a fixed-point integer scaled by two,
/// which keeps comparisons, hashing and differences exact.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Position(i64);

impl Position {
    /// Coordinates must be strictly within `(-LIMIT, LIMIT)`, so that sums and differences of
    /// positions and window offsets never overflow.
    pub const LIMIT: i64 = 1 << 40;

    /// Position at the given whole coordinate.
    pub fn new(value: i64) -> Result<Self> {
        ensure!(
            value.unsigned_abs() < Self::LIMIT as u64,
            "Position {value} is out of the supported range (|position| < 2^40)"
        );
        Ok(Self(value * 2))
    }

    /// Position from a number of half-units, i.e. `from_halves(201) == 100.5`.
    pub const fn from_halves(halves: i64) -> Self {
        Self(halves)
    }

    pub const fn halves(&self) -> i64 {
        self.0
    }

    pub const fn is_integer(&self) -> bool {
        self.0 % 2 == 0
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Position {
    type Output = Position;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        if abs % 2 == 0 {
            write!(f, "{sign}{}", abs / 2)
        } else {
            write!(f, "{sign}{}.5", abs / 2)
        }
    }
}

impl FromStr for Position {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        ensure!(
            !whole.is_empty() && whole.bytes().all(|b| b.is_ascii_digit()),
            "Position must be an integer or a half-integer, got '{s}'"
        );
        let whole = whole
            .parse::<i64>()
            .ok()
            .filter(|x| *x < Self::LIMIT)
            .ok_or_else(|| eyre!("Position is out of the supported range (|position| < 2^40): '{s}'"))?;

        let half = match fraction {
            None => 0,
            Some(digits) => match digits.split_at_checked(1) {
                Some(("0", rest)) if rest.bytes().all(|b| b == b'0') => 0,
                Some(("5", rest)) if rest.bytes().all(|b| b == b'0') => 1,
                _ => return Err(eyre!("Position must be an integer or a half-integer, got '{s}'")),
            },
        };

        let halves = whole * 2 + half;
        Ok(Self(if negative { -halves } else { halves }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!("100".parse::<Position>().unwrap(), Position::new(100).unwrap());
        assert_eq!("0".parse::<Position>().unwrap(), Position::default());
        assert_eq!("-3".parse::<Position>().unwrap(), Position::from_halves(-6));
        assert_eq!("100.0".parse::<Position>().unwrap(), Position::from_halves(200));
    }

    #[test]
    fn test_parse_half_integer() {
        assert_eq!("100.5".parse::<Position>().unwrap(), Position::from_halves(201));
        assert_eq!("100.50".parse::<Position>().unwrap(), Position::from_halves(201));
        assert_eq!("-0.5".parse::<Position>().unwrap(), Position::from_halves(-1));
        assert!(!Position::from_halves(201).is_integer());
    }

    #[test]
    fn test_parse_invalid() {
        for invalid in ["", "-", ".5", "1.", "1.25", "1.7", "abc", "1e3", "+5", "--5", "1.5.5"] {
            assert!(invalid.parse::<Position>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(Position::new(Position::LIMIT - 1).is_ok());
        assert!(Position::new(-Position::LIMIT + 1).is_ok());
        assert!(Position::new(Position::LIMIT).is_err());
        assert!(Position::new(-Position::LIMIT).is_err());
        assert!(Position::new(i64::MIN).is_err());

        assert!("1099511627775.5".parse::<Position>().is_ok());
        for invalid in [
            "1099511627776",
            "-1099511627776",
            "4611686018427387903",
            "99999999999999999999",
        ] {
            assert!(invalid.parse::<Position>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_display() {
        for (halves, expected) in [
            (0, "0"),
            (200, "100"),
            (201, "100.5"),
            (-1, "-0.5"),
            (-7, "-3.5"),
            (-146, "-73"),
        ] {
            assert_eq!(Position::from_halves(halves).to_string(), expected);
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Position::from_halves(211);
        let b = Position::new(100).unwrap();
        assert_eq!((a - b).to_string(), "5.5");
        assert_eq!((b - a).to_string(), "-5.5");
        assert_eq!(-(a - b), b - a);
        assert_eq!(b + Position::new(3).unwrap(), Position::new(103).unwrap());
    }
}
