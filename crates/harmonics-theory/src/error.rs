//! Error types for music theory operations.

use thiserror::Error;

/// Result type for theory operations.
pub type TheoryResult<T> = Result<T, TheoryError>;

/// Errors raised while building scales and note sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    /// An argument was outside its accepted domain.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Argument name.
        name: String,
        /// Error message.
        message: String,
    },

    /// A pitch computation left the MIDI note range.
    #[error("MIDI note {value} is outside the valid range 0..=127")]
    OutOfRange {
        /// The offending MIDI note number.
        value: i32,
    },

    /// A name could not be parsed.
    #[error("unknown {kind}: '{name}'")]
    UnknownName {
        /// What was being parsed (root, scale, mode, pitch).
        kind: &'static str,
        /// The unparsed input.
        name: String,
    },
}

impl TheoryError {
    /// Creates an invalid argument error.
    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown name error.
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            name: name.into(),
        }
    }
}

/// Common reporting contract for errors from every Harmonics crate.
///
/// The CLI prints the code next to the message so failures can be matched
/// without parsing prose.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "THEORY_001" or "AUDIO_004". Codes are
    /// stable across releases.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category ("theory", "audio", "midi").
    fn category(&self) -> &'static str;
}

impl BackendError for TheoryError {
    fn code(&self) -> &'static str {
        match self {
            TheoryError::InvalidArgument { .. } => "THEORY_001",
            TheoryError::OutOfRange { .. } => "THEORY_002",
            TheoryError::UnknownName { .. } => "THEORY_003",
        }
    }

    fn category(&self) -> &'static str {
        "theory"
    }
}
