//! Seeded linear-congruential generator driving piece selection.

const M: u64 = 1 << 31;
const A: u64 = 2_875_461_234;
const C: u64 = 465_665;

/// Seed the game uses when none is given.
pub const DEFAULT_SEED: u32 = 63_987_543;

/// `seed = (A * seed + C) mod 2^31`. Same seed, same infinite sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    /// Advance once and return the raw state. A u32 seed times `A` stays below 2^64.
    fn next_raw(&mut self) -> u64 {
        self.state = (A * self.state + C) % M;
        self.state
    }

    /// Next value in the inclusive range `[min, max]`. `min > max` is the caller's bug.
    pub fn next_in(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        let span = u64::from(max - min) + 1;
        min + (self.next_raw() % span) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(DEFAULT_SEED);
        let mut b = Lcg::new(DEFAULT_SEED);
        for _ in 0..200 {
            assert_eq!(a.next_in(0, 6), b.next_in(0, 6));
        }
    }

    #[test]
    fn first_value_follows_formula() {
        let mut rng = Lcg::new(DEFAULT_SEED);
        let expected = (A * u64::from(DEFAULT_SEED) + C) % M;
        assert_eq!(u64::from(rng.next_in(0, 6)), expected % 7);
    }

    #[test]
    fn stays_in_range() {
        let mut rng = Lcg::new(1);
        for _ in 0..1000 {
            let v = rng.next_in(3, 5);
            assert!((3..=5).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_is_constant() {
        let mut rng = Lcg::new(42);
        for _ in 0..10 {
            assert_eq!(rng.next_in(4, 4), 4);
        }
    }
}
