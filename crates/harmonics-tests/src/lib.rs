//! Harmonics End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the flows that cross crates:
//!
//! - Generation: root/scale/mode -> scale pitches -> note set
//! - Export: note set -> WAV archive, note set -> MIDI sequence
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p harmonics-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod format_validators;

// Re-export commonly used items
pub use determinism::{verify_determinism, DeterminismResult};
pub use fixtures::{c_major_scenario, scripted_note_set};
pub use format_validators::{
    parse_midi, read_archive, validate_wav, FormatError, MidiInfo, MidiNote, WavInfo,
};
