//! Per-note waveform synthesis.
//!
//! Each instrument family has its own waveform model:
//! - `oscillators` - Plain sine (default synth voice)
//! - `harmonics` - Additive fundamental plus 2nd and 3rd harmonics (piano-like)
//! - `fm` - Sine carrier phase-modulated at twice the fundamental
//! - `am` - Sine carrier with a 1.5x amplitude modulator
//! - `pluck` - Exponentially decaying sine
//! - `metallic` - Inharmonic partials at 2.1x and 3.2x
//!
//! [`synthesize`] evaluates the model at every sample time, applies the
//! attack/release envelope, and clamps the result to `[-1, 1]`.

pub mod am;
pub mod fm;
pub mod harmonics;
pub mod metallic;
pub mod oscillators;
pub mod pluck;

use std::fmt;
use std::str::FromStr;

use harmonics_theory::Pitch;
use serde::{Deserialize, Serialize};

use crate::buffer::SampleBuffer;
use crate::envelope::{EnvelopeParams, NoteEnvelope};
use crate::error::{AudioError, AudioResult};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Highest sample rate whose 16-bit mono byte rate fits the WAV header.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / 2;

/// Most samples one note may hold: `36 + 2 * n` must fit the RIFF size field.
pub const MAX_SAMPLES: usize = (u32::MAX as usize - 36) / 2;

/// A deterministic function of time producing one voice's raw signal.
pub trait Waveform: Send + Sync {
    /// Signal value at time `t` seconds, before the envelope.
    fn sample_at(&self, t: f64) -> f64;

    /// Upper bound on `|sample_at(t)|` over all `t`.
    fn peak_amplitude(&self) -> f64;
}

/// Closed set of synthesized instrument families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentFamily {
    /// Single sine voice.
    #[default]
    Synth,
    /// Additive piano-like voice.
    Piano,
    /// Frequency-modulated voice.
    Fm,
    /// Amplitude-modulated voice.
    Am,
    /// Plucked, decaying voice.
    Pluck,
    /// Inharmonic metallic voice.
    Metal,
}

impl InstrumentFamily {
    /// All families.
    pub const ALL: [InstrumentFamily; 6] = [
        InstrumentFamily::Synth,
        InstrumentFamily::Piano,
        InstrumentFamily::Fm,
        InstrumentFamily::Am,
        InstrumentFamily::Pluck,
        InstrumentFamily::Metal,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            InstrumentFamily::Synth => "synth",
            InstrumentFamily::Piano => "piano",
            InstrumentFamily::Fm => "fm",
            InstrumentFamily::Am => "am",
            InstrumentFamily::Pluck => "pluck",
            InstrumentFamily::Metal => "metal",
        }
    }

    /// Builds this family's waveform model at `frequency` Hz.
    pub fn waveform(self, frequency: f64) -> Box<dyn Waveform> {
        match self {
            InstrumentFamily::Synth => Box::new(oscillators::SineVoice::new(frequency)),
            InstrumentFamily::Piano => Box::new(harmonics::PianoVoice::new(frequency)),
            InstrumentFamily::Fm => Box::new(fm::FmVoice::new(frequency)),
            InstrumentFamily::Am => Box::new(am::AmVoice::new(frequency)),
            InstrumentFamily::Pluck => Box::new(pluck::PluckVoice::new(frequency)),
            InstrumentFamily::Metal => Box::new(metallic::MetalVoice::new(frequency)),
        }
    }
}

impl FromStr for InstrumentFamily {
    type Err = AudioError;

    /// Accepts canonical names and the classic synthesizer names
    /// (`AMSynth`, `FMSynth`, `PluckSynth`, ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family = match s.trim().to_ascii_lowercase().as_str() {
            "synth" | "polysynth" | "monosynth" => InstrumentFamily::Synth,
            "piano" => InstrumentFamily::Piano,
            "fm" | "fmsynth" => InstrumentFamily::Fm,
            "am" | "amsynth" => InstrumentFamily::Am,
            "pluck" | "plucksynth" => InstrumentFamily::Pluck,
            "metal" | "metalsynth" => InstrumentFamily::Metal,
            _ => {
                return Err(AudioError::UnknownInstrument {
                    name: s.to_string(),
                })
            }
        };
        Ok(family)
    }
}

impl fmt::Display for InstrumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of samples for a note, rounded to the nearest whole sample.
pub fn sample_count(duration_seconds: f64, sample_rate: u32) -> usize {
    (duration_seconds * sample_rate as f64).round() as usize
}

/// Renders one note of `family` at `pitch`.
///
/// # Errors
/// - [`AudioError::InvalidSampleRate`] if `sample_rate` is zero or above
///   [`MAX_SAMPLE_RATE`].
/// - [`AudioError::InvalidDuration`] if `duration_seconds` is not a positive
///   finite number, rounds to zero samples, or needs more than
///   [`MAX_SAMPLES`].
pub fn synthesize(
    family: InstrumentFamily,
    pitch: Pitch,
    duration_seconds: f64,
    sample_rate: u32,
) -> AudioResult<SampleBuffer> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(AudioError::InvalidSampleRate { rate: sample_rate });
    }
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(AudioError::InvalidDuration {
            duration: duration_seconds,
        });
    }
    if (duration_seconds * sample_rate as f64).round() > MAX_SAMPLES as f64 {
        return Err(AudioError::InvalidDuration {
            duration: duration_seconds,
        });
    }
    let num_samples = sample_count(duration_seconds, sample_rate);
    if num_samples == 0 {
        return Err(AudioError::InvalidDuration {
            duration: duration_seconds,
        });
    }

    let waveform = family.waveform(pitch.frequency());
    let envelope = NoteEnvelope::new(EnvelopeParams::default(), duration_seconds);
    let rate = sample_rate as f64;

    let samples: Vec<f64> = (0..num_samples)
        .map(|j| {
            let t = j as f64 / rate;
            (waveform.sample_at(t) * envelope.level_at(t)).clamp(-1.0, 1.0)
        })
        .collect();

    tracing::debug!(
        family = family.name(),
        note = %pitch,
        num_samples,
        sample_rate,
        "synthesized note"
    );

    Ok(SampleBuffer::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> Pitch {
        Pitch::from_midi(69).unwrap()
    }

    #[test]
    fn test_family_parse() {
        assert_eq!("synth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Synth);
        assert_eq!("FMSynth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Fm);
        assert_eq!("AMSynth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Am);
        assert_eq!("PluckSynth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Pluck);
        assert_eq!("MetalSynth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Metal);
        assert_eq!("PolySynth".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Synth);
        assert_eq!(" Piano ".parse::<InstrumentFamily>().unwrap(), InstrumentFamily::Piano);
        for family in InstrumentFamily::ALL {
            assert_eq!(family.name().parse::<InstrumentFamily>().unwrap(), family);
        }
    }

    #[test]
    fn test_unknown_family_is_rejected() {
        let err = "kazoo".parse::<InstrumentFamily>().unwrap_err();
        assert!(matches!(err, AudioError::UnknownInstrument { ref name } if name == "kazoo"));
    }

    #[test]
    fn test_synthesize_length() {
        let buffer = synthesize(InstrumentFamily::Synth, a4(), 1.0, 44100).unwrap();
        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.samples()[0], 0.0);

        let buffer = synthesize(InstrumentFamily::Synth, a4(), 0.05, 44100).unwrap();
        assert_eq!(buffer.len(), 2205);
    }

    #[test]
    fn test_synthesize_rejects_bad_arguments() {
        assert!(matches!(
            synthesize(InstrumentFamily::Synth, a4(), 1.0, 0),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                synthesize(InstrumentFamily::Synth, a4(), duration, 44100),
                Err(AudioError::InvalidDuration { .. })
            ));
        }
        // Rounds to zero samples.
        assert!(synthesize(InstrumentFamily::Synth, a4(), 1e-6, 8000).is_err());
    }

    #[test]
    fn test_sample_rate_must_fit_byte_rate() {
        let rate = MAX_SAMPLE_RATE + 1;
        assert!(matches!(
            synthesize(InstrumentFamily::Synth, a4(), 1e-9, rate),
            Err(AudioError::InvalidSampleRate { rate: r }) if r == rate
        ));
        assert!(matches!(
            synthesize(InstrumentFamily::Synth, a4(), 1e-9, 3_000_000_000),
            Err(AudioError::InvalidSampleRate { .. })
        ));

        // The highest accepted rate still encodes a consistent header.
        let buffer = synthesize(InstrumentFamily::Synth, a4(), 1e-9, MAX_SAMPLE_RATE).unwrap();
        let wav = crate::wav::encode(&buffer);
        let header = wav.as_bytes();
        let byte_rate = u32::from_le_bytes([header[28], header[29], header[30], header[31]]);
        assert_eq!(byte_rate, MAX_SAMPLE_RATE * 2);
    }

    #[test]
    fn test_duration_must_fit_data_chunk() {
        for duration in [1e20, f64::MAX] {
            assert!(matches!(
                synthesize(InstrumentFamily::Synth, a4(), duration, 44100),
                Err(AudioError::InvalidDuration { .. })
            ));
        }
        // One sample past the RIFF size limit.
        let over = (MAX_SAMPLES + 1) as f64 / 44100.0;
        assert!(matches!(
            synthesize(InstrumentFamily::Synth, a4(), over, 44100),
            Err(AudioError::InvalidDuration { .. })
        ));
        assert!(36 + 2 * MAX_SAMPLES as u64 <= u32::MAX as u64);
    }

    #[test]
    fn test_every_family_stays_under_its_peak() {
        for family in InstrumentFamily::ALL {
            let waveform = family.waveform(a4().frequency());
            let buffer = synthesize(family, a4(), 1.0, 22050).unwrap();
            assert!(
                buffer.peak() <= waveform.peak_amplitude() + 1e-12,
                "{} exceeded its peak",
                family
            );
            assert!(buffer.peak() > 0.0, "{} produced silence", family);
        }
    }

    #[test]
    fn test_short_note_never_exceeds_raw_waveform() {
        for family in InstrumentFamily::ALL {
            let waveform = family.waveform(a4().frequency());
            let buffer = synthesize(family, a4(), 0.05, 44100).unwrap();
            for (j, sample) in buffer.samples().iter().enumerate() {
                let raw = waveform.sample_at(j as f64 / 44100.0);
                assert!(sample.abs() <= raw.abs() + 1e-12);
            }
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        for family in InstrumentFamily::ALL {
            let a = synthesize(family, a4(), 0.3, 22050).unwrap();
            let b = synthesize(family, a4(), 0.3, 22050).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_families_differ() {
        let sine = synthesize(InstrumentFamily::Synth, a4(), 0.2, 22050).unwrap();
        for family in InstrumentFamily::ALL.into_iter().skip(1) {
            let other = synthesize(family, a4(), 0.2, 22050).unwrap();
            assert_ne!(sine, other, "{} matched the sine voice", family);
        }
    }
}
