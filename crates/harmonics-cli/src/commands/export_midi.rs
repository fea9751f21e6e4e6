//! Export-midi command implementation
//!
//! Writes the note set as `sequence.mid` plus a `sequence.txt` summary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use harmonics_backend_midi::{
    export_sequence, StandardMidiWriter, SEQUENCE_MIDI_FILE, SEQUENCE_TEXT_FILE,
};

use super::{reporting, session_or_exit, SessionArgs};
use crate::config::Session;

/// Paths written by a MIDI export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiExport {
    /// The MIDI file.
    pub midi_path: PathBuf,
    /// The text summary.
    pub text_path: PathBuf,
}

/// Generates the note set and writes both files into `out_dir`.
pub fn export(session: &Session, out_dir: &Path) -> Result<MidiExport> {
    let notes = session.note_set()?;
    let sequence = export_sequence(&notes, &StandardMidiWriter::new())
        .context("Failed to encode MIDI sequence")?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let midi_path = out_dir.join(SEQUENCE_MIDI_FILE);
    let text_path = out_dir.join(SEQUENCE_TEXT_FILE);
    fs::write(&midi_path, &sequence.midi)
        .with_context(|| format!("Failed to write {}", midi_path.display()))?;
    fs::write(&text_path, &sequence.text)
        .with_context(|| format!("Failed to write {}", text_path.display()))?;

    Ok(MidiExport {
        midi_path,
        text_path,
    })
}

/// Run the export-midi command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 export error
pub fn run(args: &SessionArgs, out_dir: Option<&str>) -> Result<ExitCode> {
    let session = match session_or_exit(args) {
        Ok(session) => session,
        Err(code) => return Ok(code),
    };
    reporting::print_session(&session);

    match export(&session, Path::new(out_dir.unwrap_or("."))) {
        Ok(written) => {
            println!("{} {}", "Wrote".green().bold(), written.midi_path.display());
            println!("{} {}", "Wrote".green().bold(), written.text_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(reporting::failure(&err)),
    }
}
