//! Shared utilities

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of pseudo-random integers in a bounded range.
///
/// Noise fills take one of these explicitly so that a fixed seed (or a
/// scripted source in tests) reproduces the same image.
pub trait RandomSource {
    /// Uniform integer in [0, bound). Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32;

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.below(2) == 0
    }
}

/// Simple deterministic RNG using xorshift64
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Seed from the wall clock, for runs that don't ask for a fixed seed
    pub fn from_clock() -> Self {
        Self::new(clock_seed())
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Rng {
    #[inline]
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(bound)) as u32
    }
}

/// Seed derived from the current time in nanoseconds
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

/// Clamp an integer into [lower, upper]
#[inline]
pub const fn clamp(value: i32, lower: i32, upper: i32) -> i32 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}
