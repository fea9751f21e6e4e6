//! CLI command implementations

pub mod export_midi;
pub mod export_samples;
pub mod generate;
pub mod instruments;

mod reporting;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use harmonics_theory::{Mode, PitchClass, ScaleKind};

use crate::config::{Session, SessionConfig};

/// Exit code for invalid input (bad flags or config).
pub const EXIT_INVALID_INPUT: u8 = 1;

/// Exit code for a failed generation or export.
pub const EXIT_GENERATION_FAILED: u8 = 2;

/// Session flags shared by the generating commands.
///
/// Flags override values from `--config`.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Session config file (JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Root pitch class (C, C#, Db, ... B)
    #[arg(long)]
    pub root: Option<PitchClass>,

    /// Scale (major, natural-minor, harmonic-minor, melodic-minor)
    #[arg(long)]
    pub scale: Option<ScaleKind>,

    /// Mode (ionian, dorian, phrygian, lydian, mixolydian, aeolian, locrian)
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Octave of the root note
    #[arg(long, allow_hyphen_values = true)]
    pub octave: Option<i32>,

    /// Number of randomly selected notes (1-5)
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Instrument family (synth, piano, fm, am, pluck, metal)
    #[arg(short, long)]
    pub instrument: Option<String>,

    /// Note length for sample export, in seconds
    #[arg(short, long, allow_hyphen_values = true)]
    pub duration: Option<f64>,

    /// Sample rate for sample export, in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Seed for note selection (random when omitted)
    #[arg(long)]
    pub seed: Option<u32>,
}

impl SessionArgs {
    /// Loads `--config` (or the defaults) and applies the flags on top.
    pub fn to_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(Path::new(path))?,
            None => SessionConfig::default(),
        };
        if let Some(root) = self.root {
            config.root = root;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(octave) = self.octave {
            config.octave = octave;
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(instrument) = &self.instrument {
            config.instrument = instrument.clone();
        }
        if let Some(duration) = self.duration {
            config.duration_seconds = duration;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    /// Merged and validated session.
    pub fn resolve(&self) -> Result<Session> {
        self.to_config()?.resolve()
    }
}

/// Reports an error that escaped a command and returns the generation
/// failure exit code. Input errors are handled inside each command.
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    reporting::failure(err)
}

/// Resolves the session, or prints why it is invalid and yields the exit
/// code to return.
fn session_or_exit(args: &SessionArgs) -> std::result::Result<Session, ExitCode> {
    match args.resolve() {
        Ok(session) => Ok(session),
        Err(err) => {
            reporting::print_error(&err);
            Err(ExitCode::from(EXIT_INVALID_INPUT))
        }
    }
}
