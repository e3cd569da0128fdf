//! Random number seam.
//!
//! Delay jitter and tie-breaking between matching rules both draw from a
//! [`RandomSource`], so tests can script the draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform integers over an inclusive range.
pub trait RandomSource: Send {
    /// Draw from `low..=high`. Callers guarantee `low <= high`.
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32;
}

/// Default source backed by a `StdRng`.
#[derive(Debug, Clone)]
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        (**self).range_inclusive(low, high)
    }
}
