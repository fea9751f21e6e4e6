//! Additive synthesis with a fundamental and two harmonics.
//!
//! Produces a brighter, piano-like tone than the plain sine voice.

use std::f64::consts::PI;

use super::Waveform;

/// Partial amplitudes for the fundamental, 2nd, and 3rd harmonics.
pub const PIANO_PARTIALS: [f64; 3] = [0.3, 0.15, 0.10];

/// Fundamental plus integer harmonics.
#[derive(Debug, Clone)]
pub struct PianoVoice {
    /// Fundamental frequency in Hz.
    pub frequency: f64,
    /// Amplitude of harmonic `n + 1` at index `n`.
    pub partials: Vec<f64>,
}

impl PianoVoice {
    /// Creates the piano-like voice.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            partials: PIANO_PARTIALS.to_vec(),
        }
    }
}

impl Waveform for PianoVoice {
    fn sample_at(&self, t: f64) -> f64 {
        let phase = 2.0 * PI * self.frequency * t;
        self.partials
            .iter()
            .enumerate()
            .map(|(n, amp)| amp * (phase * (n + 1) as f64).sin())
            .sum()
    }

    fn peak_amplitude(&self) -> f64 {
        self.partials.iter().map(|a| a.abs()).sum()
    }
}
