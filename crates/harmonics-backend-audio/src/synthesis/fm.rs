//! FM (phase modulation) voice.
//!
//! The carrier's phase is offset by a sine at twice the fundamental, which
//! adds sidebands for an electric-piano-like timbre.

use std::f64::consts::PI;

use super::Waveform;

/// Modulator frequency as a ratio of the carrier.
pub const FM_RATIO: f64 = 2.0;

/// Modulation index.
pub const FM_INDEX: f64 = 0.5;

/// Output amplitude.
pub const FM_AMPLITUDE: f64 = 0.3;

/// Two-operator FM voice.
#[derive(Debug, Clone)]
pub struct FmVoice {
    /// Carrier frequency in Hz.
    pub carrier_freq: f64,
    /// Modulator frequency in Hz.
    pub modulator_freq: f64,
    /// Modulation index.
    pub modulation_index: f64,
    /// Output amplitude.
    pub amplitude: f64,
}

impl FmVoice {
    /// Creates the FM voice for a fundamental frequency.
    pub fn new(frequency: f64) -> Self {
        Self {
            carrier_freq: frequency,
            modulator_freq: frequency * FM_RATIO,
            modulation_index: FM_INDEX,
            amplitude: FM_AMPLITUDE,
        }
    }
}

impl Waveform for FmVoice {
    fn sample_at(&self, t: f64) -> f64 {
        // carrier = sin(wc*t + index * sin(wm*t))
        let modulator = (2.0 * PI * self.modulator_freq * t).sin();
        self.amplitude * (2.0 * PI * self.carrier_freq * t + self.modulation_index * modulator).sin()
    }

    fn peak_amplitude(&self) -> f64 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_index_is_plain_sine() {
        let mut voice = FmVoice::new(440.0);
        voice.modulation_index = 0.0;
        for i in 0..100 {
            let t = i as f64 / 44100.0;
            let sine = 0.3 * (2.0 * PI * 440.0 * t).sin();
            assert!((voice.sample_at(t) - sine).abs() < 1e-12);
        }
    }

    #[test]
    fn test_modulation_changes_signal() {
        let voice = FmVoice::new(440.0);
        let t = 0.0005;
        let sine = 0.3 * (2.0 * PI * 440.0 * t).sin();
        assert!((voice.sample_at(t) - sine).abs() > 1e-3);
        assert_eq!(voice.modulator_freq, 880.0);
    }
}
