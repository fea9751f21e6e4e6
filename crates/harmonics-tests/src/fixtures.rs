//! Shared scenarios.

use harmonics_theory::{NoteSet, Pitch, ScaleSelection, ScriptedIndices};

/// C major, Ionian, octave 4: the seven scale degrees.
pub fn c_major_scenario() -> Vec<Pitch> {
    ScaleSelection::default()
        .degrees()
        .expect("C major at octave 4 is in range")
}

/// Note set drawn from `scale` with scripted draws.
///
/// Draws index the candidates that remain after earlier picks.
pub fn scripted_note_set(scale: &[Pitch], count: usize, draws: &[usize]) -> NoteSet {
    NoteSet::generate(scale, count, &mut ScriptedIndices::new(draws.to_vec()))
        .expect("scripted note set should generate")
}
