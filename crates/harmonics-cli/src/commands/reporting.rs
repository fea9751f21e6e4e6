//! Shared terminal output for commands.

use std::process::ExitCode;

use colored::Colorize;
use harmonics_backend_audio::AudioError;
use harmonics_backend_midi::MidiError;
use harmonics_theory::{BackendError, Pitch, TheoryError};

use super::EXIT_GENERATION_FAILED;
use crate::config::Session;

/// Stable error code of the first library error in the chain, if any.
pub(crate) fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<AudioError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<TheoryError>() {
            Some(e.code())
        } else {
            cause.downcast_ref::<MidiError>().map(|e| e.code())
        }
    })
}

/// Prints an error and its causes to stderr.
pub(crate) fn print_error(err: &anyhow::Error) {
    let label = match error_code(err) {
        Some(code) => format!("error[{}]", code),
        None => "error".to_string(),
    };
    eprintln!("{}: {}", label.red().bold(), err);
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "caused by:".dimmed(), cause);
    }
}

/// Prints a generation failure and returns its exit code.
pub(crate) fn failure(err: &anyhow::Error) -> ExitCode {
    print_error(err);
    ExitCode::from(EXIT_GENERATION_FAILED)
}

/// Prints the session header shared by every generating command.
pub(crate) fn print_session(session: &Session) {
    let selection = &session.selection;
    println!(
        "{} {} {} ({}), octave {}",
        "Key:".cyan().bold(),
        selection.root,
        selection.scale,
        selection.mode,
        selection.octave
    );
    let seed_note = if session.seed_was_drawn { " (random)" } else { "" };
    println!("{} {}{}", "Seed:".cyan().bold(), session.seed, seed_note.dimmed());
}

fn join_pitches(pitches: &[Pitch]) -> String {
    pitches
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Labelled rows for the scale degrees, selected notes, and harmonics.
pub(crate) fn note_set_rows(
    scale: &[Pitch],
    selected: &[Pitch],
    harmonics: &[Pitch],
) -> [(&'static str, String); 3] {
    [
        ("Scale:", join_pitches(scale)),
        ("Selected:", join_pitches(selected)),
        ("Harmonics:", join_pitches(harmonics)),
    ]
}

/// Prints the scale degrees, the selected notes, and their harmonics.
pub(crate) fn print_note_set(scale: &[Pitch], selected: &[Pitch], harmonics: &[Pitch]) {
    for (label, pitches) in note_set_rows(scale, selected, harmonics) {
        println!("{} {}", label.green().bold(), pitches);
    }
}
