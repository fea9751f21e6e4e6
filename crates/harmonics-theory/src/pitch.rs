//! Pitch classes, concrete pitches, and MIDI/frequency conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};

/// Lowest valid MIDI note number.
pub const MIDI_MIN: i32 = 0;

/// Highest valid MIDI note number.
pub const MIDI_MAX: i32 = 127;

/// Reference pitch for equal temperament (A4).
pub const A4_MIDI: u8 = 69;

/// Reference frequency for A4 in Hz.
pub const A4_FREQ: f64 = 440.0;

/// Semitone offsets for natural note letters.
const SEMITONE_MAP: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// Sharp spellings indexed by semitone, used for rendering pitch names.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the twelve chromatic roots.
///
/// Enharmonic spellings parse to the same value: `"C#"` and `"Db"` are both
/// [`PitchClass::CSharp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    EFlat,
    E,
    F,
    FSharp,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::AFlat,
        PitchClass::A,
        PitchClass::BFlat,
        PitchClass::B,
    ];

    /// Semitone index above C (0-11).
    pub fn semitone(self) -> u8 {
        self as u8
    }

    /// Returns the pitch class for a semitone index, wrapping modulo 12.
    pub fn from_semitone(semitone: i32) -> Self {
        Self::ALL[semitone.rem_euclid(12) as usize]
    }

    /// Display spelling used for root selection (`C`, `C#`, `Eb`, ...).
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::EFlat => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::AFlat => "Ab",
            PitchClass::A => "A",
            PitchClass::BFlat => "Bb",
            PitchClass::B => "B",
        }
    }

    /// Sharp spelling, as used in rendered pitch names.
    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self.semitone() as usize]
    }
}

/// Parses a letter with an optional `#`/`b` accidental into a semitone offset.
///
/// Returns the semitone (possibly -1 or 12 for `Cb`/`B#`) and the number of
/// bytes consumed.
fn parse_letter(name: &str) -> Option<(i32, usize)> {
    let mut chars = name.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let semitone = SEMITONE_MAP
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, s)| *s)?;

    match chars.next() {
        Some('#') => Some((semitone + 1, 2)),
        Some('b') => Some((semitone - 1, 2)),
        _ => Some((semitone, 1)),
    }
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match parse_letter(trimmed) {
            Some((semitone, consumed)) if consumed == trimmed.len() => {
                Ok(Self::from_semitone(semitone))
            }
            _ => Err(TheoryError::unknown("root", s)),
        }
    }
}

impl TryFrom<String> for PitchClass {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(value: PitchClass) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a MIDI note number to frequency in Hz.
///
/// Uses 12-tone equal temperament with A4 = 440 Hz.
///
/// # Examples
/// ```
/// use harmonics_theory::pitch::midi_to_freq;
///
/// assert!((midi_to_freq(69) - 440.0).abs() < 1e-9);
/// assert!((midi_to_freq(60) - 261.626).abs() < 0.01);
/// ```
pub fn midi_to_freq(midi_note: u8) -> f64 {
    A4_FREQ * 2.0_f64.powf((midi_note as f64 - A4_MIDI as f64) / 12.0)
}

/// Computes `(octave + 1) * 12 + semitone` without overflowing.
fn midi_number(octave: i32, semitone: i32) -> TheoryResult<i32> {
    octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(semitone))
        .ok_or(TheoryError::OutOfRange {
            value: if octave < 0 { i32::MIN } else { i32::MAX },
        })
}

/// A concrete sounding note, stored as a MIDI note number.
///
/// Construction is checked: every `Pitch` lies in `0..=127`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch {
    midi: u8,
}

impl Pitch {
    /// Creates a pitch from a MIDI note number.
    ///
    /// Fails with [`TheoryError::OutOfRange`] outside `0..=127`.
    pub fn from_midi(midi: i32) -> TheoryResult<Self> {
        if !(MIDI_MIN..=MIDI_MAX).contains(&midi) {
            return Err(TheoryError::OutOfRange { value: midi });
        }
        Ok(Self { midi: midi as u8 })
    }

    /// Creates a pitch from a pitch class and octave (C4 = MIDI 60).
    pub fn new(class: PitchClass, octave: i32) -> TheoryResult<Self> {
        Self::from_midi(midi_number(octave, class.semitone() as i32)?)
    }

    /// MIDI note number.
    pub fn midi(self) -> u8 {
        self.midi
    }

    /// Octave number in scientific pitch notation.
    pub fn octave(self) -> i32 {
        self.midi as i32 / 12 - 1
    }

    /// Pitch class of this pitch.
    pub fn class(self) -> PitchClass {
        PitchClass::from_semitone(self.midi as i32)
    }

    /// Pitch name with sharps and octave, e.g. `C#4`.
    pub fn name(self) -> String {
        format!("{}{}", self.class().sharp_name(), self.octave())
    }

    /// Frequency in Hz.
    pub fn frequency(self) -> f64 {
        midi_to_freq(self.midi)
    }

    /// Moves the pitch by a number of semitones.
    ///
    /// Fails with [`TheoryError::OutOfRange`] rather than wrapping.
    pub fn transpose(self, semitones: i32) -> TheoryResult<Self> {
        Self::from_midi(self.midi as i32 + semitones)
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (semitone, consumed) =
            parse_letter(trimmed).ok_or_else(|| TheoryError::unknown("pitch", s))?;
        let octave: i32 = trimmed[consumed..]
            .parse()
            .map_err(|_| TheoryError::unknown("pitch", s))?;
        // Cb/B# cross the octave boundary, so work on the raw MIDI number.
        Self::from_midi(midi_number(octave, semitone)?)
    }
}

impl TryFrom<String> for Pitch {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pitch> for String {
    fn from(value: Pitch) -> Self {
        value.name()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class().sharp_name(), self.octave())
    }
}
