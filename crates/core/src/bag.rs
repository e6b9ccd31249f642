//! Bag module - "bag" piece selection
//!
//! The bag holds the piece kinds not yet dealt in the current cycle. Each draw
//! removes one kind picked uniformly at random; when the bag is found empty it
//! is refilled with all seven kinds first. Any aligned run of seven draws
//! therefore contains every kind exactly once.
//!
//! Randomness comes from a small seeded LCG so sessions are reproducible.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever produce the increment sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`, using the high bits (the low bits of an LCG cycle quickly).
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

/// Piece kinds remaining in the current cycle.
#[derive(Debug, Clone)]
pub struct BlockBag {
    remaining: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
    seed: u32,
}

impl BlockBag {
    /// Create a full bag with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            remaining: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Refill the bag for a new session. The RNG keeps running, so a reset
    /// session does not replay the previous piece sequence.
    pub fn reset(&mut self) {
        self.refill();
    }

    /// Deal one piece kind.
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let idx = self.rng.next_range(self.remaining.len() as u32) as usize;
        // Order within the bag is irrelevant, so swap_remove keeps this O(1).
        self.remaining.swap_remove(idx)
    }

    /// Kinds not yet dealt in this cycle.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }

    /// Seed the bag was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for BlockBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_starts_full() {
        let bag = BlockBag::new(1);
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_bag_cycle_deals_each_kind_once() {
        let mut bag = BlockBag::new(99);
        for _cycle in 0..5 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
            drawn.sort();
            assert_eq!(drawn, PieceKind::ALL.to_vec());
            assert!(bag.remaining().is_empty());
        }
    }

    #[test]
    fn test_drawn_kind_leaves_the_bag() {
        let mut bag = BlockBag::new(3);
        let kind = bag.draw();
        assert_eq!(bag.remaining().len(), 6);
        assert!(!bag.remaining().contains(&kind));
    }

    #[test]
    fn test_reset_refills_mid_cycle() {
        let mut bag = BlockBag::new(5);
        bag.draw();
        bag.draw();
        bag.reset();
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = BlockBag::new(42);
        let mut b = BlockBag::new(42);
        for _ in 0..21 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
