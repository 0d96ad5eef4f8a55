//! Random sources for palette shuffling, easy-mode moves and opponent marks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Anything that can pick a uniformly distributed index.
///
/// The session holds a boxed source so tests can swap in a scripted
/// sequence while real games use [`SessionRng`].
pub trait RandomSource: Send + std::fmt::Debug {
    /// Returns an index in `0..len`. `len` is never zero.
    fn index_below(&mut self, len: usize) -> usize;
}

/// Picks one element of `items` uniformly, `None` when empty.
pub fn choose<'a, T>(rng: &mut (impl RandomSource + ?Sized), items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index_below(items.len()))
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(rng: &mut (impl RandomSource + ?Sized), items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}

/// Seeded standard RNG; the seed is kept so a game can be replayed.
#[derive(Debug)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    /// Creates a generator from a fixed seed.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a generator seeded from the thread RNG.
    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        debug!(seed, "Seeding session RNG");
        Self::new(seed)
    }

    /// Returns the seed this generator started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn index_below(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of picks, each reduced modulo the requested range.
///
/// Once the list is exhausted every pick is `0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    picks: VecDeque<usize>,
}

impl SequenceRng {
    /// Creates a source that yields `picks` in order.
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceRng {
    fn index_below(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_rng_wraps_and_defaults() {
        let mut rng = SequenceRng::new([7, 2]);
        assert_eq!(rng.index_below(5), 2);
        assert_eq!(rng.index_below(5), 2);
        assert_eq!(rng.index_below(5), 0);
    }

    #[test]
    fn test_session_rng_is_reproducible() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        let left: Vec<usize> = (0..16).map(|_| a.index_below(9)).collect();
        let right: Vec<usize> = (0..16).map(|_| b.index_below(9)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|&i| i < 9));
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = SessionRng::new(7);
        let mut items: Vec<u32> = (0..24).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_with_zero_picks_rotates_predictably() {
        // Every pick 0: each step swaps the tail element to the front.
        let mut rng = SequenceRng::default();
        let mut items = [1, 2, 3];
        shuffle(&mut rng, &mut items);
        assert_eq!(items, [2, 3, 1]);
    }

    #[test]
    fn test_choose_empty_is_none() {
        let mut rng = SequenceRng::default();
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
        assert_eq!(choose(&mut rng, &[9, 8]), Some(&9));
    }
}
