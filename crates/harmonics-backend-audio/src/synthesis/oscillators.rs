//! Plain sine oscillator voice.

use std::f64::consts::PI;

use super::Waveform;

/// Amplitude of the default synth voice.
pub const SINE_AMPLITUDE: f64 = 0.3;

/// Sine wave at the fundamental frequency.
#[derive(Debug, Clone)]
pub struct SineVoice {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Output amplitude.
    pub amplitude: f64,
}

impl SineVoice {
    /// Creates a sine voice at the default amplitude.
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            amplitude: SINE_AMPLITUDE,
        }
    }
}

impl Waveform for SineVoice {
    fn sample_at(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * PI * self.frequency * t).sin()
    }

    fn peak_amplitude(&self) -> f64 {
        self.amplitude
    }
}
