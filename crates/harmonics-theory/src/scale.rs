//! Scale templates, mode rotation, and scale construction.
//!
//! A scale is built in two steps: the template's step pattern is rotated to
//! the requested mode degree, then the rotated steps are accumulated upward
//! from the root pitch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};
use crate::pitch::{Pitch, PitchClass};

/// Semitones in one octave.
pub const OCTAVE_SEMITONES: u32 = 12;

/// Number of degrees in a heptatonic scale.
pub const SCALE_DEGREES: usize = 7;

/// Default octave for scale construction.
pub const DEFAULT_OCTAVE: i32 = 4;

/// An immutable 7-step semitone pattern defining a scale family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleTemplate {
    /// Display name.
    pub name: &'static str,
    /// Semitone steps between consecutive degrees; they sum to one octave.
    pub steps: [u8; SCALE_DEGREES],
}

impl ScaleTemplate {
    /// Major (Ionian) scale.
    pub const MAJOR: ScaleTemplate = ScaleTemplate {
        name: "Major",
        steps: [2, 2, 1, 2, 2, 2, 1],
    };

    /// Natural minor (Aeolian) scale.
    pub const NATURAL_MINOR: ScaleTemplate = ScaleTemplate {
        name: "Natural Minor",
        steps: [2, 1, 2, 2, 1, 2, 2],
    };

    /// Harmonic minor scale.
    pub const HARMONIC_MINOR: ScaleTemplate = ScaleTemplate {
        name: "Harmonic Minor",
        steps: [2, 1, 2, 2, 1, 3, 1],
    };

    /// Melodic minor (ascending) scale.
    pub const MELODIC_MINOR: ScaleTemplate = ScaleTemplate {
        name: "Melodic Minor",
        steps: [2, 1, 2, 2, 2, 2, 1],
    };

    /// Every built-in template.
    pub const ALL: [ScaleTemplate; 4] = [
        Self::MAJOR,
        Self::NATURAL_MINOR,
        Self::HARMONIC_MINOR,
        Self::MELODIC_MINOR,
    ];

    /// Sum of all steps in semitones.
    pub fn span(&self) -> u32 {
        self.steps.iter().map(|&s| s as u32).sum()
    }
}

/// Closed set of built-in scale families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
}

impl ScaleKind {
    /// All scale kinds.
    pub const ALL: [ScaleKind; 4] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
    ];

    /// The step template for this scale.
    pub fn template(self) -> &'static ScaleTemplate {
        match self {
            ScaleKind::Major => &ScaleTemplate::MAJOR,
            ScaleKind::NaturalMinor => &ScaleTemplate::NATURAL_MINOR,
            ScaleKind::HarmonicMinor => &ScaleTemplate::HARMONIC_MINOR,
            ScaleKind::MelodicMinor => &ScaleTemplate::MELODIC_MINOR,
        }
    }

    /// Display name of the scale.
    pub fn name(self) -> &'static str {
        self.template().name
    }
}

impl FromStr for ScaleKind {
    type Err = TheoryError;

    /// Accepts the display name in any case, with spaces, dashes, or
    /// underscores between words ("natural minor", "Natural-Minor").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        ScaleKind::ALL
            .into_iter()
            .find(|kind| kind.name().replace(' ', "").to_lowercase() == normalized)
            .ok_or_else(|| TheoryError::unknown("scale", s))
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The seven diatonic modes, identified by their rotation degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    /// All modes in degree order.
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// Rotation degree in `0..=6`.
    pub fn degree(self) -> usize {
        self as usize
    }

    /// Mode for a rotation degree.
    pub fn from_degree(degree: usize) -> TheoryResult<Self> {
        Self::ALL.get(degree).copied().ok_or_else(|| {
            TheoryError::invalid_arg("degree", format!("{} is not in 0..=6", degree))
        })
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ionian => "Ionian",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Aeolian => "Aeolian",
            Mode::Locrian => "Locrian",
        }
    }
}

impl FromStr for Mode {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TheoryError::unknown("mode", s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotates a step pattern so it starts at `degree`, wrapping cyclically.
///
/// # Errors
/// [`TheoryError::InvalidArgument`] if `degree >= steps.len()`.
///
/// # Examples
/// ```
/// use harmonics_theory::scale::{rotate, ScaleTemplate};
///
/// // Dorian from the major template.
/// let dorian = rotate(&ScaleTemplate::MAJOR.steps, 1).unwrap();
/// assert_eq!(dorian, vec![2, 1, 2, 2, 2, 1, 2]);
/// ```
pub fn rotate(steps: &[u8], degree: usize) -> TheoryResult<Vec<u8>> {
    if degree >= steps.len() {
        return Err(TheoryError::invalid_arg(
            "degree",
            format!(
                "{} is not in 0..={}",
                degree,
                steps.len().saturating_sub(1)
            ),
        ));
    }
    let mut rotated = Vec::with_capacity(steps.len());
    rotated.extend_from_slice(&steps[degree..]);
    rotated.extend_from_slice(&steps[..degree]);
    Ok(rotated)
}

/// Builds `steps.len() + 1` pitches from `root` at `octave`.
///
/// The first pitch is the root; each following pitch adds the next step to
/// the running MIDI number.
///
/// # Errors
/// [`TheoryError::OutOfRange`] if the root or any accumulated pitch leaves
/// the MIDI range. Values are never clamped or wrapped.
pub fn build_scale(root: PitchClass, steps: &[u8], octave: i32) -> TheoryResult<Vec<Pitch>> {
    let mut current = Pitch::new(root, octave)?;
    let mut pitches = Vec::with_capacity(steps.len() + 1);
    pitches.push(current);
    for &step in steps {
        current = current.transpose(step as i32)?;
        pitches.push(current);
    }
    Ok(pitches)
}

/// A root, scale, mode, and octave chosen together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleSelection {
    /// Root pitch class.
    pub root: PitchClass,
    /// Scale family.
    pub scale: ScaleKind,
    /// Mode rotation.
    pub mode: Mode,
    /// Octave of the root.
    pub octave: i32,
}

impl Default for ScaleSelection {
    fn default() -> Self {
        Self {
            root: PitchClass::C,
            scale: ScaleKind::Major,
            mode: Mode::Ionian,
            octave: DEFAULT_OCTAVE,
        }
    }
}

impl ScaleSelection {
    /// Creates a selection at the default octave.
    pub fn new(root: PitchClass, scale: ScaleKind, mode: Mode) -> Self {
        Self {
            root,
            scale,
            mode,
            octave: DEFAULT_OCTAVE,
        }
    }

    /// The template's steps rotated to this selection's mode.
    pub fn steps(&self) -> TheoryResult<Vec<u8>> {
        rotate(&self.scale.template().steps, self.mode.degree())
    }

    /// All eight pitches of the selected scale, root through octave.
    pub fn pitches(&self) -> TheoryResult<Vec<Pitch>> {
        build_scale(self.root, &self.steps()?, self.octave)
    }

    /// The seven distinct scale degrees (the octave is dropped).
    pub fn degrees(&self) -> TheoryResult<Vec<Pitch>> {
        let mut pitches = self.pitches()?;
        pitches.truncate(SCALE_DEGREES);
        Ok(pitches)
    }
}
