//! Harmonics MIDI Backend
//!
//! Serializes a note set as a Standard MIDI File and a short text summary.
//!
//! # Example
//!
//! ```
//! use harmonics_backend_midi::{export_sequence, StandardMidiWriter};
//! use harmonics_theory::{NoteSet, ScaleSelection, ScriptedIndices};
//!
//! let scale = ScaleSelection::default().degrees().unwrap();
//! let notes = NoteSet::generate(&scale, 3, &mut ScriptedIndices::new(vec![0, 1, 2])).unwrap();
//! let export = export_sequence(&notes, &StandardMidiWriter::new()).unwrap();
//!
//! assert_eq!(&export.midi[0..4], b"MThd");
//! assert!(export.text.starts_with("MIDI note numbers: 60, 64, 67, 67"));
//! ```

pub mod error;
pub mod smf;
pub mod text;

pub use error::{MidiError, MidiResult};
pub use smf::{write_vlq, MidiFileWriter, StandardMidiWriter};
pub use text::{text_summary, SEQUENCE_MIDI_FILE, SEQUENCE_TEXT_FILE};

use harmonics_theory::{sequence_schedule, NoteSet};

/// The two files written for a sequence export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceExport {
    /// MIDI file contents.
    pub midi: Vec<u8>,
    /// Text summary contents.
    pub text: String,
}

/// Schedules `note_set` (0.25 s apart, 0.2 s each) and renders both files.
pub fn export_sequence(
    note_set: &NoteSet,
    writer: &dyn MidiFileWriter,
) -> MidiResult<SequenceExport> {
    let events = sequence_schedule(note_set);
    let midi = writer.write_sequence(&events)?;
    tracing::info!(notes = events.len(), bytes = midi.len(), "sequence exported");
    Ok(SequenceExport {
        midi,
        text: text_summary(note_set),
    })
}
