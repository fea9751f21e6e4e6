//! Injectable randomness for note selection.
//!
//! Selection never reaches for a global generator. Callers pass an
//! [`IndexSource`]: a seeded PCG32 for normal runs, or [`ScriptedIndices`]
//! when a test needs exact draws.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// A source of uniformly distributed indices.
pub trait IndexSource {
    /// Returns an index in `0..upper`. `upper` is always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl IndexSource for Pcg32 {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

impl<S: IndexSource + ?Sized> IndexSource for &mut S {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }
}

/// Replays a fixed list of indices, each reduced modulo the requested bound.
///
/// Once the script is exhausted every further draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndices {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedIndices {
    /// Creates a source that replays `script` in order.
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl IndexSource for ScriptedIndices {
    fn next_index(&mut self, upper: usize) -> usize {
        let value = self.script.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        value % upper.max(1)
    }
}
