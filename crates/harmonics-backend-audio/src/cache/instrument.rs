//! Instrument keys and the resources the cache hands out.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use harmonics_theory::Pitch;

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, AudioResult};
use crate::synthesis::{synthesize, InstrumentFamily};

/// Prefix marking a sample-based instrument in textual keys.
pub const SAMPLER_PREFIX: &str = "sampler:";

/// Identifies one cacheable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrumentKey {
    /// A synthesized waveform family.
    Synth(InstrumentFamily),
    /// A sample library, by name. Loaded through an external loader.
    Sampler(String),
}

impl InstrumentKey {
    /// Key for a sample library.
    pub fn sampler(name: impl Into<String>) -> Self {
        InstrumentKey::Sampler(name.into())
    }
}

impl From<InstrumentFamily> for InstrumentKey {
    fn from(family: InstrumentFamily) -> Self {
        InstrumentKey::Synth(family)
    }
}

impl fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentKey::Synth(family) => write!(f, "{}", family),
            InstrumentKey::Sampler(name) => write!(f, "{}{}", SAMPLER_PREFIX, name),
        }
    }
}

impl FromStr for InstrumentKey {
    type Err = AudioError;

    /// Parses `sampler:<name>` or any instrument family name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_prefix(SAMPLER_PREFIX) {
            Some(name) if !name.is_empty() => Ok(InstrumentKey::sampler(name)),
            Some(_) => Err(AudioError::UnknownInstrument {
                name: trimmed.to_string(),
            }),
            None => trimmed.parse::<InstrumentFamily>().map(InstrumentKey::Synth),
        }
    }
}

/// A ready-to-use synthesized voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthVoice {
    family: InstrumentFamily,
}

impl SynthVoice {
    /// Creates a voice for `family`.
    pub fn new(family: InstrumentFamily) -> Self {
        Self { family }
    }

    /// The waveform family.
    pub fn family(&self) -> InstrumentFamily {
        self.family
    }

    /// Renders one note.
    pub fn render(
        &self,
        pitch: Pitch,
        duration_seconds: f64,
        sample_rate: u32,
    ) -> AudioResult<SampleBuffer> {
        synthesize(self.family, pitch, duration_seconds, sample_rate)
    }
}

/// Opaque handle to a loaded sample library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerHandle {
    /// Library name.
    pub id: String,
    /// Note name to sample location, as reported by the loader.
    pub samples: BTreeMap<String, String>,
}

impl SamplerHandle {
    /// Creates a handle with no sample map.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            samples: BTreeMap::new(),
        }
    }
}

/// A loaded instrument resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instrument {
    /// Synthesized voice.
    Synth(SynthVoice),
    /// Sample library handle, played by an external sink.
    Sampler(SamplerHandle),
}

impl Instrument {
    /// The lightweight voice substituted while a load is pending or failed.
    pub fn placeholder() -> Self {
        Instrument::Synth(SynthVoice::new(InstrumentFamily::Synth))
    }

    /// Voice used for offline rendering.
    ///
    /// Sample libraries cannot be rendered here, so they render through the
    /// placeholder voice.
    pub fn voice(&self) -> SynthVoice {
        match self {
            Instrument::Synth(voice) => *voice,
            Instrument::Sampler(_) => SynthVoice::new(InstrumentFamily::Synth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse_and_display() {
        let key: InstrumentKey = "FMSynth".parse().unwrap();
        assert_eq!(key, InstrumentKey::Synth(InstrumentFamily::Fm));
        assert_eq!(key.to_string(), "fm");

        let key: InstrumentKey = "sampler:violin".parse().unwrap();
        assert_eq!(key, InstrumentKey::sampler("violin"));
        assert_eq!(key.to_string(), "sampler:violin");

        assert!("sampler:".parse::<InstrumentKey>().is_err());
        assert!("banjo".parse::<InstrumentKey>().is_err());
    }

    #[test]
    fn test_sampler_renders_through_placeholder_voice() {
        let sampler = Instrument::Sampler(SamplerHandle::new("violin"));
        assert_eq!(sampler.voice(), SynthVoice::new(InstrumentFamily::Synth));

        let piano = Instrument::Synth(SynthVoice::new(InstrumentFamily::Piano));
        let pitch = Pitch::from_midi(60).unwrap();
        let buffer = piano.voice().render(pitch, 0.1, 8000).unwrap();
        assert_eq!(buffer.len(), 800);
    }
}
