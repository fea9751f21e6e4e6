//! Encoded note with its content hash.

use crate::buffer::SampleBuffer;

use super::writer::{encode, WavBytes};

/// A buffer encoded to WAV, plus metadata for reports.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file.
    pub wav: WavBytes,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes a buffer and hashes its payload.
    pub fn from_buffer(buffer: &SampleBuffer) -> Self {
        let wav = encode(buffer);
        let pcm_hash = blake3::hash(wav.pcm_data()).to_hex().to_string();
        Self {
            wav,
            pcm_hash,
            sample_rate: buffer.sample_rate(),
            num_samples: buffer.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}
