use std::collections::VecDeque;

use mutperiod_core_rs::loc::{Position, Strand};

use crate::window::Window;

/// Mutations credited to the current nucleosome that may also fall into the next one.
///
/// Windows of neighbouring nucleosomes can overlap. Instead of re-reading the mutation stream,
/// each mutation accepted into a window is kept here and re-tested against the following
/// nucleosomes. For every new window the buffer is first pruned (prune-then-retest): entries from
/// another chromosome or upstream of the window start are evicted. Entries are in stream order,
/// so eviction only happens at the front and the buffer never holds more than one window's
/// worth of mutations.
#[derive(Clone, Debug, Default)]
pub struct CarryOver {
    chromosome: String,
    entries: VecDeque<(Position, Strand)>,
}

impl CarryOver {
    /// Append a mutation accepted into the current window.
    pub fn push(&mut self, chromosome: &str, position: Position, strand: Strand) {
        if self.chromosome != chromosome {
            self.clear();
            self.chromosome.push_str(chromosome);
        }
        debug_assert!(self.entries.back().is_none_or(|(last, _)| *last <= position));
        self.entries.push_back((position, strand));
    }

    /// Evict every entry that can't belong to the window. Returns the number of evicted entries.
    pub fn prune(&mut self, window: &Window) -> usize {
        let before = self.entries.len();
        if self.chromosome != window.chromosome() {
            self.entries.clear();
        } else {
            while let Some((position, _)) = self.entries.front() {
                if window.covers(*position) {
                    break;
                }
                self.entries.pop_front();
            }
        }
        before - self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Position, Strand)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.chromosome.clear();
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Parity};
    use mutperiod_io_rs::nucleosome;

    fn pos(value: i64) -> Position {
        Position::new(value).unwrap()
    }

    #[test]
    fn test_prune_evicts_upstream_entries() {
        let config = Config::new(10, 0, Parity::Odd).unwrap();
        let mut buffer = CarryOver::default();
        for value in [95, 101, 110, 115] {
            buffer.push("chr1", pos(value), Strand::Plus);
        }

        let next = nucleosome::Record::new("chr1".into(), 112).unwrap();
        assert_eq!(buffer.prune(&Window::new(&next, &config)), 2);
        assert_eq!(
            buffer.iter().map(|(p, _)| *p).collect::<Vec<_>>(),
            vec![pos(110), pos(115)]
        );
    }

    #[test]
    fn test_prune_keeps_boundary_entry() {
        let config = Config::new(10, 0, Parity::Odd).unwrap();
        let mut buffer = CarryOver::default();
        buffer.push("chr1", pos(90), Strand::Minus);

        let next = nucleosome::Record::new("chr1".into(), 100).unwrap();
        assert_eq!(buffer.prune(&Window::new(&next, &config)), 0);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_prune_clears_other_chromosome() {
        let config = Config::new(10, 0, Parity::Odd).unwrap();
        let mut buffer = CarryOver::default();
        buffer.push("chr1", pos(100), Strand::Plus);
        buffer.push("chr1", pos(105), Strand::Minus);

        let next = nucleosome::Record::new("chr2".into(), 100).unwrap();
        assert_eq!(buffer.prune(&Window::new(&next, &config)), 2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_push_on_new_chromosome_resets() {
        let mut buffer = CarryOver::default();
        buffer.push("chr1", pos(100), Strand::Plus);
        buffer.push("chr2", pos(5), Strand::Plus);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.iter().next(), Some(&(pos(5), Strand::Plus)));
    }
}
