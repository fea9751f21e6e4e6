//! Plain-text companion to the MIDI export.

use harmonics_theory::NoteSet;

/// File name of the exported MIDI sequence.
pub const SEQUENCE_MIDI_FILE: &str = "sequence.mid";

/// File name of the text summary.
pub const SEQUENCE_TEXT_FILE: &str = "sequence.txt";

/// Lists the note set as MIDI numbers and as pitch names.
///
/// ```
/// use harmonics_backend_midi::text_summary;
/// use harmonics_theory::{NoteSet, Pitch};
///
/// let c4: Pitch = "C4".parse().unwrap();
/// let g4: Pitch = "G4".parse().unwrap();
/// let set = NoteSet::from_parts(vec![c4], vec![g4]);
/// assert_eq!(text_summary(&set), "MIDI note numbers: 60, 67\nNotes: C4, G4");
/// ```
pub fn text_summary(note_set: &NoteSet) -> String {
    let numbers: Vec<String> = note_set.iter().map(|p| p.midi().to_string()).collect();
    let names: Vec<String> = note_set.iter().map(|p| p.name()).collect();
    format!(
        "MIDI note numbers: {}\nNotes: {}",
        numbers.join(", "),
        names.join(", ")
    )
}
