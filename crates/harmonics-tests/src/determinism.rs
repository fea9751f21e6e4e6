//! Determinism verification.
//!
//! Runs a generation closure several times and compares the outputs
//! byte-for-byte.

use std::fmt;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Size of the first run's output in bytes.
    pub output_size: usize,
    /// BLAKE3 hash of the first run's output.
    pub hash: String,
    /// First differing byte, if any.
    pub first_difference: Option<Difference>,
}

/// Location of the first byte difference between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Byte offset, or the shorter length when only the sizes differ.
    pub offset: usize,
    /// Which run (0-indexed) differed from run 0.
    pub run_index: usize,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {} differs at byte {}", self.run_index, self.offset)
    }
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = &self.first_difference {
            panic!(
                "output is not deterministic over {} runs: {}",
                self.runs, diff
            );
        }
    }
}

/// Runs `generate` `runs` times and compares every output to the first.
pub fn verify_determinism<F>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Vec<u8>,
{
    let runs = runs.max(2);
    let first = generate();
    let hash = blake3::hash(&first).to_hex().to_string();

    let mut first_difference = None;
    for run_index in 1..runs {
        let output = generate();
        if output != first {
            let offset = first
                .iter()
                .zip(&output)
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| first.len().min(output.len()));
            first_difference = Some(Difference { offset, run_index });
            break;
        }
    }

    DeterminismResult {
        is_deterministic: first_difference.is_none(),
        runs,
        output_size: first.len(),
        hash,
        first_difference,
    }
}
