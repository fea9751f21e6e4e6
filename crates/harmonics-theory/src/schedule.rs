//! Timed note events derived from a note set.

use crate::pitch::Pitch;
use crate::selector::NoteSet;

/// Spacing between note onsets in exported sequences, in seconds.
pub const SEQUENCE_SPACING_SECONDS: f64 = 0.25;

/// Length of each note in exported sequences, in seconds.
pub const SEQUENCE_NOTE_SECONDS: f64 = 0.2;

/// A single timed note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// Pitch to sound.
    pub pitch: Pitch,
    /// Onset time in seconds from the start of the sequence.
    pub start_seconds: f64,
    /// Note length in seconds.
    pub duration_seconds: f64,
}

impl NoteEvent {
    /// Time at which the note stops sounding.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}

/// Lays out pitches one after another at a fixed spacing.
pub fn evenly_spaced(
    pitches: impl IntoIterator<Item = Pitch>,
    spacing_seconds: f64,
    duration_seconds: f64,
) -> Vec<NoteEvent> {
    pitches
        .into_iter()
        .enumerate()
        .map(|(i, pitch)| NoteEvent {
            pitch,
            start_seconds: i as f64 * spacing_seconds,
            duration_seconds,
        })
        .collect()
}

/// The event list handed to the MIDI file writer: note-set order,
/// 0.25 s apart, 0.2 s each.
pub fn sequence_schedule(note_set: &NoteSet) -> Vec<NoteEvent> {
    evenly_spaced(
        note_set.iter(),
        SEQUENCE_SPACING_SECONDS,
        SEQUENCE_NOTE_SECONDS,
    )
}
