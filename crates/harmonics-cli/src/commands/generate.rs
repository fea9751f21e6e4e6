//! Generate command implementation
//!
//! Builds the scale, draws a note set, and prints it.

use std::process::ExitCode;

use anyhow::{Context, Result};
use harmonics_theory::{Mode, Pitch, PitchClass, ScaleKind};
use serde::Serialize;

use super::{reporting, session_or_exit, SessionArgs};
use crate::config::Session;

/// Machine-readable result of `generate --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateOutput {
    /// Seed used for selection.
    pub seed: u32,
    /// Root pitch class.
    pub root: PitchClass,
    /// Scale family.
    pub scale: ScaleKind,
    /// Mode.
    pub mode: Mode,
    /// Octave of the root.
    pub octave: i32,
    /// Scale degrees the selection drew from.
    pub scale_pitches: Vec<Pitch>,
    /// Randomly selected pitches.
    pub selected: Vec<Pitch>,
    /// Fifth-above harmonics of the selected pitches.
    pub harmonics: Vec<Pitch>,
    /// MIDI numbers of the whole note set.
    pub midi: Vec<u8>,
}

/// Generates the note set for a session.
pub fn generate(session: &Session) -> Result<GenerateOutput> {
    let scale_pitches = session
        .selection
        .degrees()
        .context("Failed to build scale")?;
    let notes = session.note_set()?;
    Ok(GenerateOutput {
        seed: session.seed,
        root: session.selection.root,
        scale: session.selection.scale,
        mode: session.selection.mode,
        octave: session.selection.octave,
        scale_pitches,
        selected: notes.selected().to_vec(),
        harmonics: notes.harmonics().to_vec(),
        midi: notes.iter().map(|p| p.midi()).collect(),
    })
}

/// Run the generate command
///
/// # Arguments
/// * `args` - Session flags
/// * `json_output` - Print JSON instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 generation error
pub fn run(args: &SessionArgs, json_output: bool) -> Result<ExitCode> {
    let session = match session_or_exit(args) {
        Ok(session) => session,
        Err(code) => return Ok(code),
    };

    let output = match generate(&session) {
        Ok(output) => output,
        Err(err) => return Ok(reporting::failure(&err)),
    };

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    reporting::print_session(&session);
    reporting::print_note_set(&output.scale_pitches, &output.selected, &output.harmonics);
    println!(
        "MIDI: {}",
        output
            .midi
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(ExitCode::SUCCESS)
}
