//! Plucked voice: a sine that decays exponentially from the onset.

use std::f64::consts::PI;

use super::Waveform;

/// Output amplitude at the onset.
pub const PLUCK_AMPLITUDE: f64 = 0.4;

/// Decay rate per second.
pub const PLUCK_DECAY: f64 = 2.0;

/// Exponentially decaying sine.
#[derive(Debug, Clone)]
pub struct PluckVoice {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Amplitude at the onset.
    pub amplitude: f64,
    /// Decay rate per second.
    pub decay: f64,
}

impl PluckVoice {
    /// Creates the pluck voice.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            amplitude: PLUCK_AMPLITUDE,
            decay: PLUCK_DECAY,
        }
    }
}

impl Waveform for PluckVoice {
    fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin() * (-self.decay * t).exp()
    }

    fn peak_amplitude(&self) -> f64 {
        self.amplitude
    }
}
