//! Error types for audio backend.

use harmonics_theory::{BackendError, TheoryError};
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Failure to load one instrument resource.
///
/// Cloneable so every caller waiting on the same in-flight load receives
/// the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load instrument '{key}': {message}")]
pub struct LoadError {
    /// Display form of the instrument key.
    pub key: String,
    /// Error message.
    pub message: String,
}

impl LoadError {
    /// Creates a load error for a key.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur during synthesis, encoding, and export.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Instrument name outside the supported families.
    #[error("unknown instrument: '{name}'")]
    UnknownInstrument {
        /// The unrecognized name.
        name: String,
    },

    /// Pitch computation failed.
    #[error(transparent)]
    Theory(#[from] TheoryError),

    /// Instrument resource could not be loaded.
    #[error(transparent)]
    ResourceLoad(#[from] LoadError),

    /// Archive packaging failed.
    #[error("archive error: {message}")]
    Archive {
        /// Error message.
        message: String,
    },

    /// One note of an archive export failed; nothing was produced.
    #[error("export failed at note {index} ({note}): {source}")]
    Export {
        /// 1-based position of the failing note.
        index: usize,
        /// Pitch name of the failing note.
        note: String,
        /// Underlying failure.
        #[source]
        source: Box<AudioError>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Wraps a per-note failure into an export failure.
    pub fn export(index: usize, note: impl Into<String>, source: AudioError) -> Self {
        Self::Export {
            index,
            note: note.into(),
            source: Box::new(source),
        }
    }
}

impl From<zip::result::ZipError> for AudioError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::archive(err.to_string())
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::InvalidDuration { .. } => "AUDIO_002",
            AudioError::UnknownInstrument { .. } => "AUDIO_003",
            AudioError::Theory(_) => "AUDIO_004",
            AudioError::ResourceLoad(_) => "AUDIO_005",
            AudioError::Archive { .. } => "AUDIO_006",
            AudioError::Export { .. } => "AUDIO_007",
            AudioError::Io(_) => "AUDIO_008",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
