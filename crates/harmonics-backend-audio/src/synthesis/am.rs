//! AM (amplitude modulation) voice.

use std::f64::consts::PI;

use super::Waveform;

/// Modulator frequency as a ratio of the carrier.
pub const AM_RATIO: f64 = 1.5;

/// Constant part of the modulating gain.
pub const AM_OFFSET: f64 = 0.5;

/// Modulation depth.
pub const AM_DEPTH: f64 = 0.3;

/// Output amplitude.
pub const AM_AMPLITUDE: f64 = 0.3;

/// Sine carrier scaled by `offset + depth * sin(modulator)`.
#[derive(Debug, Clone)]
pub struct AmVoice {
    /// Carrier frequency in Hz.
    pub carrier_freq: f64,
    /// Modulator frequency in Hz.
    pub modulator_freq: f64,
    /// Output amplitude.
    pub amplitude: f64,
}

impl AmVoice {
    /// Creates the AM voice for a fundamental frequency.
    pub fn new(frequency: f64) -> Self {
        Self {
            carrier_freq: frequency,
            modulator_freq: frequency * AM_RATIO,
            amplitude: AM_AMPLITUDE,
        }
    }
}

impl Waveform for AmVoice {
    fn sample_at(&self, t: f64) -> f64 {
        let carrier = (2.0 * PI * self.carrier_freq * t).sin();
        let gain = AM_OFFSET + AM_DEPTH * (2.0 * PI * self.modulator_freq * t).sin();
        self.amplitude * carrier * gain
    }

    fn peak_amplitude(&self) -> f64 {
        self.amplitude * (AM_OFFSET + AM_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_range() {
        let voice = AmVoice::new(200.0);
        assert_eq!(voice.modulator_freq, 300.0);
        assert!((voice.peak_amplitude() - 0.24).abs() < 1e-12);
        for i in 0..2000 {
            let t = i as f64 / 8000.0;
            assert!(voice.sample_at(t).abs() <= voice.peak_amplitude() + 1e-12);
        }
    }
}
