//! Session configuration.
//!
//! A session is read from an optional JSON file, overridden by command-line
//! flags, then validated into a [`Session`] before any work starts.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use harmonics_backend_audio::{
    ExportOptions, InstrumentFamily, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE,
};
use harmonics_theory::rng::create_rng;
use harmonics_theory::scale::DEFAULT_OCTAVE;
use harmonics_theory::selector::{MAX_SELECTED, MIN_SELECTED};
use harmonics_theory::{Mode, NoteSet, PitchClass, ScaleKind, ScaleSelection};
use serde::{Deserialize, Serialize};

/// Default number of randomly selected notes.
pub const DEFAULT_COUNT: usize = 3;

/// Default note length for sample export, in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 1.0;

/// Unvalidated session settings as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Root pitch class.
    pub root: PitchClass,
    /// Scale family.
    pub scale: ScaleKind,
    /// Mode.
    pub mode: Mode,
    /// Octave of the root.
    pub octave: i32,
    /// Number of randomly selected notes (1-5).
    pub count: usize,
    /// Instrument family name.
    pub instrument: String,
    /// Note length for sample export, in seconds.
    pub duration_seconds: f64,
    /// Sample rate for sample export, in Hz.
    pub sample_rate: u32,
    /// Seed for note selection. Drawn at random when absent.
    pub seed: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            root: PitchClass::C,
            scale: ScaleKind::Major,
            mode: Mode::Ionian,
            octave: DEFAULT_OCTAVE,
            count: DEFAULT_COUNT,
            instrument: InstrumentFamily::Synth.name().to_string(),
            duration_seconds: DEFAULT_DURATION_SECONDS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Validates the settings, drawing a seed if none was given.
    pub fn resolve(&self) -> Result<Session> {
        if !(MIN_SELECTED..=MAX_SELECTED).contains(&self.count) {
            bail!(
                "note count must be between {} and {}, got {}",
                MIN_SELECTED,
                MAX_SELECTED,
                self.count
            );
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            bail!("duration must be a positive number of seconds, got {}", self.duration_seconds);
        }
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            bail!(
                "sample rate must be between 1 and {} Hz, got {}",
                MAX_SAMPLE_RATE,
                self.sample_rate
            );
        }
        let family: InstrumentFamily = self
            .instrument
            .parse()
            .with_context(|| format!("Invalid instrument '{}'", self.instrument))?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u32>();
                tracing::info!(seed, "no seed given, drew one");
                seed
            }
        };

        Ok(Session {
            selection: ScaleSelection {
                root: self.root,
                scale: self.scale,
                mode: self.mode,
                octave: self.octave,
            },
            count: self.count,
            family,
            duration_seconds: self.duration_seconds,
            sample_rate: self.sample_rate,
            seed,
            seed_was_drawn: self.seed.is_none(),
        })
    }
}

/// Validated session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Root, scale, mode, and octave.
    pub selection: ScaleSelection,
    /// Number of randomly selected notes.
    pub count: usize,
    /// Instrument family for sample export.
    pub family: InstrumentFamily,
    /// Note length for sample export, in seconds.
    pub duration_seconds: f64,
    /// Sample rate for sample export, in Hz.
    pub sample_rate: u32,
    /// Seed for note selection.
    pub seed: u32,
    /// True if the seed was drawn rather than configured.
    pub seed_was_drawn: bool,
}

impl Session {
    /// Builds the scale and generates the note set from the session seed.
    pub fn note_set(&self) -> Result<NoteSet> {
        let degrees = self
            .selection
            .degrees()
            .context("Failed to build scale")?;
        let mut rng = create_rng(self.seed);
        let notes = NoteSet::generate(&degrees, self.count, &mut rng)
            .context("Failed to generate note set")?;
        tracing::info!(
            root = %self.selection.root,
            scale = %self.selection.scale,
            mode = %self.selection.mode,
            seed = self.seed,
            "generated note set"
        );
        Ok(notes)
    }

    /// Rendering parameters for sample export.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            family: self.family,
            duration_seconds: self.duration_seconds,
            sample_rate: self.sample_rate,
        }
    }
}
