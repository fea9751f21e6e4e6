//! Harmonics Music Theory Library
//!
//! This crate provides the pure, audio-free half of Harmonics: pitch classes,
//! scale templates and modes, scale construction, random note selection, and
//! the fifth-above harmonics that complete a note set.
//!
//! # Example
//!
//! ```
//! use harmonics_theory::{NoteSet, PitchClass, ScaleKind, Mode, ScaleSelection, ScriptedIndices};
//!
//! let selection = ScaleSelection::new(PitchClass::C, ScaleKind::Major, Mode::Ionian);
//! let scale = selection.degrees().unwrap();
//!
//! // Draw C, E and G, then fill the rest with fifths above them.
//! let mut source = ScriptedIndices::new(vec![0, 1, 2]);
//! let notes = NoteSet::generate(&scale, 3, &mut source).unwrap();
//!
//! assert_eq!(notes.len(), 12);
//! assert_eq!(notes.harmonics()[0].name(), "G4");
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error type and the shared error reporting trait
//! - [`pitch`]: Pitch classes, pitches, and MIDI/frequency conversion
//! - [`scale`]: Scale templates, modes, rotation, and scale building
//! - [`rng`]: Injectable randomness
//! - [`selector`]: Note selection, harmonic derivation, and [`NoteSet`]
//! - [`schedule`]: Timed note events for sequence export

pub mod error;
pub mod pitch;
pub mod rng;
pub mod schedule;
pub mod scale;
pub mod selector;

// Re-export commonly used types at the crate root
pub use error::{BackendError, TheoryError, TheoryResult};
pub use pitch::{midi_to_freq, Pitch, PitchClass};
pub use rng::{create_rng, IndexSource, ScriptedIndices};
pub use schedule::{sequence_schedule, NoteEvent};
pub use scale::{build_scale, rotate, Mode, ScaleKind, ScaleSelection, ScaleTemplate};
pub use selector::{derive_harmonics, select_notes, NoteSet};
