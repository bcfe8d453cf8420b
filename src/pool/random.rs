//! Seedable randomness for spawning.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A small, fast RNG. Seed it for reproducible rounds.
#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Uses `seed` when given, otherwise seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os, Self::seeded)
    }

    /// Derives an independent generator, so a seeded parent yields reproducible children.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.random())
    }

    /// A uniformly distributed integer in the inclusive range.
    pub fn int(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.rng.random_range(range)
    }

    /// A uniformly distributed real in `[min, max]`. An empty range yields `min`.
    pub fn float(&mut self, min: f32, max: f32) -> f32 {
        match min.partial_cmp(&max) {
            Some(Ordering::Less) => self.rng.random_range(min..=max),
            _ => min,
        }
    }

    /// A uniformly distributed real in `[min, max)`. An empty range yields `min`.
    pub fn float_below(&mut self, min: f32, max: f32) -> f32 {
        match min.partial_cmp(&max) {
            Some(Ordering::Less) => self.rng.random_range(min..max),
            _ => min,
        }
    }
}
