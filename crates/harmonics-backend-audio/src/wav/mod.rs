//! Canonical WAV encoding.
//!
//! Buffers are written as 16-bit PCM mono with a fixed 44-byte header and no
//! optional chunks, so identical buffers always produce identical bytes. The
//! BLAKE3 hash of the PCM payload identifies a rendered note independently of
//! its container.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::{WavFormat, HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{encode, samples_to_pcm16, wav_header, write_wav, write_wav_to_vec, WavBytes};
