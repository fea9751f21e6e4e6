//! Harmonics Audio Backend
//!
//! Renders pitches into sample buffers, encodes them as WAV, caches
//! instrument resources, and packages note sets into sample archives.
//!
//! # Overview
//!
//! Each instrument family has its own waveform model:
//!
//! - **Synth** - Plain sine at the fundamental
//! - **Piano** - Additive fundamental with 2nd and 3rd harmonics
//! - **FM** - Sine carrier phase-modulated at twice the fundamental
//! - **AM** - Sine carrier with a 1.5x amplitude modulator
//! - **Pluck** - Exponentially decaying sine
//! - **Metal** - Inharmonic partials
//!
//! Every note is shaped by a linear attack/release envelope and clamped to
//! `[-1, 1]` before encoding.
//!
//! # Determinism
//!
//! Synthesis has no randomness. The same family, pitch, duration, and sample
//! rate always produce byte-identical WAV output.
//!
//! # Example
//!
//! ```
//! use harmonics_backend_audio::{synthesize, wav, InstrumentFamily};
//! use harmonics_theory::Pitch;
//!
//! let a4 = Pitch::from_midi(69).unwrap();
//! let buffer = synthesize(InstrumentFamily::Piano, a4, 0.5, 22050).unwrap();
//! let bytes = wav::encode(&buffer);
//!
//! assert_eq!(bytes.len(), 44 + 2 * buffer.len());
//! ```
//!
//! # Crate Structure
//!
//! - [`synthesis`] - Instrument families and [`synthesize()`]
//! - [`envelope`] - Attack/release envelope
//! - [`buffer`] - Mono sample buffers
//! - [`wav`] - Canonical WAV encoder
//! - [`cache`] - Instrument resource cache with shared in-flight loads
//! - [`archive`] - Zip export of a whole note set

pub mod archive;
pub mod buffer;
pub mod cache;
pub mod envelope;
pub mod error;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use archive::{export_archive, ArchiveEntry, ExportOptions, SampleArchive};
pub use buffer::SampleBuffer;
pub use cache::{
    Acquired, Instrument, InstrumentCache, InstrumentKey, InstrumentLoader, PreloadReport,
    SlotState, SynthLoader,
};
pub use error::{AudioError, AudioResult, LoadError};
pub use synthesis::{synthesize, InstrumentFamily, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE};
pub use wav::{WavBytes, WavResult};
