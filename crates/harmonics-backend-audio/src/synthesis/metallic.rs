//! Metallic voice with inharmonic partials.
//!
//! Partials at non-integer ratios of the fundamental give the characteristic
//! bell/metal timbre that harmonic voices lack.

use std::f64::consts::PI;

use super::Waveform;

/// (frequency ratio, amplitude) for each partial.
pub const METAL_PARTIALS: [(f64, f64); 3] = [(1.0, 0.2), (2.1, 0.1), (3.2, 0.05)];

/// Sum of inharmonic sine partials.
#[derive(Debug, Clone)]
pub struct MetalVoice {
    /// Base frequency in Hz.
    pub base_freq: f64,
    /// Partials as (ratio, amplitude).
    pub partials: Vec<(f64, f64)>,
}

impl MetalVoice {
    /// Creates the metallic voice.
    pub fn new(base_freq: f64) -> Self {
        Self {
            base_freq,
            partials: METAL_PARTIALS.to_vec(),
        }
    }
}

impl Waveform for MetalVoice {
    fn sample_at(&self, t: f64) -> f64 {
        self.partials
            .iter()
            .map(|(ratio, amp)| amp * (2.0 * PI * self.base_freq * ratio * t).sin())
            .sum()
    }

    fn peak_amplitude(&self) -> f64 {
        self.partials.iter().map(|(_, amp)| amp.abs()).sum()
    }
}
