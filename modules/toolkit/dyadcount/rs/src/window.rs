use mutperiod_core_rs::loc::Position;
use mutperiod_io_rs::{mutation, nucleosome};

use crate::config::Config;

/// Counting window `[dyad - reach, dyad + reach]` around a single nucleosome.
///
/// The two bounds are tested separately: [`Window::is_past`] (strict upper bound) decides when to
/// stop draining mutations for this nucleosome, and [`Window::covers`] (inclusive lower bound)
/// decides whether a drained mutation is counted. A mutation is only ever tested with `covers`
/// after `is_past` returned false for it, which makes the upper bound inclusive in effect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Window<'a> {
    chromosome: &'a str,
    dyad: Position,
    reach: Position,
}

impl<'a> Window<'a> {
    pub fn new(nucleosome: &'a nucleosome::Record, config: &Config) -> Self {
        Self {
            chromosome: nucleosome.chromosome(),
            dyad: *nucleosome.dyad(),
            reach: config.reach(),
        }
    }

    pub fn chromosome(&self) -> &'a str {
        self.chromosome
    }

    pub fn start(&self) -> Position {
        self.dyad - self.reach
    }

    pub fn end(&self) -> Position {
        self.dyad + self.reach
    }

    /// True if there is no mutation, the mutation is on another chromosome, or it lies strictly
    /// downstream of the window.
    pub fn is_past(&self, mutation: Option<&mutation::Record>) -> bool {
        match mutation {
            None => true,
            Some(mutation) => {
                mutation.chromosome() != self.chromosome
                    || *mutation.position() - self.dyad > self.reach
            }
        }
    }

    /// True if the position is at or after the window start.
    pub fn covers(&self, position: Position) -> bool {
        position >= self.start()
    }

    /// Signed distance from the dyad.
    pub fn offset(&self, position: Position) -> Position {
        position - self.dyad
    }
}
