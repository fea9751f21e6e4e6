//! Attack/sustain/release envelope for fixed-length notes.
//!
//! The level ramps linearly up over the attack window, holds at 1.0, and
//! ramps linearly down over the release window that ends at the note's
//! duration. When the two windows overlap the lower ramp wins, so short
//! notes rise and fall in one continuous triangle-like shape.

/// Default attack time in seconds.
pub const DEFAULT_ATTACK: f64 = 0.1;

/// Default release time in seconds.
pub const DEFAULT_RELEASE: f64 = 0.5;

/// Attack/release envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    /// Attack time in seconds.
    pub attack: f64,
    /// Release time in seconds.
    pub release: f64,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: DEFAULT_ATTACK,
            release: DEFAULT_RELEASE,
        }
    }
}

impl EnvelopeParams {
    /// Creates new parameters; negative times are treated as zero.
    pub fn new(attack: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            release: release.max(0.0),
        }
    }
}

/// Envelope bound to a note duration.
#[derive(Debug, Clone, Copy)]
pub struct NoteEnvelope {
    params: EnvelopeParams,
    duration: f64,
}

impl NoteEnvelope {
    /// Creates an envelope for a note lasting `duration` seconds.
    pub fn new(params: EnvelopeParams, duration: f64) -> Self {
        Self { params, duration }
    }

    /// Envelope level in `[0, 1]` at time `t` seconds.
    pub fn level_at(&self, t: f64) -> f64 {
        let attack = if self.params.attack > 0.0 {
            t / self.params.attack
        } else {
            1.0
        };
        let release = if self.params.release > 0.0 {
            (self.duration - t) / self.params.release
        } else {
            1.0
        };
        attack.min(release).clamp(0.0, 1.0)
    }

    /// Generates envelope levels for `num_samples` samples at `sample_rate`.
    pub fn generate(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| self.level_at(i as f64 / sample_rate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_note_shape() {
        let env = NoteEnvelope::new(EnvelopeParams::default(), 2.0);
        assert_eq!(env.level_at(0.0), 0.0);
        assert!((env.level_at(0.05) - 0.5).abs() < 1e-12);
        assert_eq!(env.level_at(0.1), 1.0);
        assert_eq!(env.level_at(1.0), 1.0);
        assert_eq!(env.level_at(1.5), 1.0);
        assert!((env.level_at(1.75) - 0.5).abs() < 1e-12);
        assert_eq!(env.level_at(2.0), 0.0);
    }

    #[test]
    fn test_overlapping_windows_take_minimum() {
        let duration = 0.05;
        let env = NoteEnvelope::new(EnvelopeParams::default(), duration);
        for i in 0..=100 {
            let t = duration * i as f64 / 100.0;
            let expected = (t / 0.1).min((duration - t) / 0.5).clamp(0.0, 1.0);
            assert!((env.level_at(t) - expected).abs() < 1e-12);
            assert!(env.level_at(t) <= 1.0);
        }
    }

    #[test]
    fn test_short_note_is_continuous() {
        let sample_rate = 44100.0;
        let duration = 0.05;
        let env = NoteEnvelope::new(EnvelopeParams::default(), duration);
        let levels = env.generate((duration * sample_rate) as usize, sample_rate);

        // Steepest ramp is the attack: 1 / 0.1 per second.
        let max_step = 1.0 / (0.1 * sample_rate) + 1e-12;
        for pair in levels.windows(2) {
            assert!(
                (pair[1] - pair[0]).abs() <= max_step,
                "jump of {} between samples",
                (pair[1] - pair[0]).abs()
            );
        }
    }

    #[test]
    fn test_short_note_peak_is_where_ramps_cross() {
        // t/0.1 == (0.05 - t)/0.5  =>  t = 0.05/6
        let env = NoteEnvelope::new(EnvelopeParams::default(), 0.05);
        let crossing = 0.05 / 6.0;
        let peak = env.level_at(crossing);
        assert!((peak - crossing / 0.1).abs() < 1e-12);
        assert!(env.level_at(crossing - 0.001) < peak);
        assert!(env.level_at(crossing + 0.001) < peak);
    }

    #[test]
    fn test_zero_length_windows() {
        let env = NoteEnvelope::new(EnvelopeParams::new(0.0, 0.0), 1.0);
        assert_eq!(env.level_at(0.0), 1.0);
        assert_eq!(env.level_at(0.999), 1.0);

        let negative = EnvelopeParams::new(-1.0, -2.0);
        assert_eq!(negative.attack, 0.0);
        assert_eq!(negative.release, 0.0);
    }
}
