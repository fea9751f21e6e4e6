//! Error types for MIDI export.

use harmonics_theory::BackendError;
use thiserror::Error;

/// Result type for MIDI operations.
pub type MidiResult<T> = Result<T, MidiError>;

/// Errors raised while serializing a note sequence.
#[derive(Debug, Error)]
pub enum MidiError {
    /// An event had a negative or non-finite time.
    #[error("invalid event {index}: {message}")]
    InvalidEvent {
        /// Position of the event in the input.
        index: usize,
        /// Error message.
        message: String,
    },

    /// A tick value does not fit a variable-length quantity.
    #[error("delta time {ticks} exceeds the variable-length limit")]
    DeltaTooLarge {
        /// The delta in ticks.
        ticks: u32,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MidiError {
    /// Creates an invalid event error.
    pub fn invalid_event(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            index,
            message: message.into(),
        }
    }
}

impl BackendError for MidiError {
    fn code(&self) -> &'static str {
        match self {
            MidiError::InvalidEvent { .. } => "MIDI_001",
            MidiError::DeltaTooLarge { .. } => "MIDI_002",
            MidiError::Io(_) => "MIDI_003",
        }
    }

    fn category(&self) -> &'static str {
        "midi"
    }
}
