//! Header layout and PCM conversion.

use std::io::{self, Write};

use crate::buffer::SampleBuffer;

use super::format::{WavFormat, HEADER_LEN};
use super::pcm::extract_pcm_data;

/// An encoded WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes(Vec<u8>);

impl WavBytes {
    /// The full file contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the file is empty. Never the case for encoded output.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The PCM payload following the header.
    pub fn pcm_data(&self) -> &[u8] {
        extract_pcm_data(&self.0).unwrap_or(&[])
    }

    /// Consumes the wrapper, returning the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encodes a sample buffer as a canonical PCM16 mono WAV file.
///
/// The output is exactly `44 + 2 * buffer.len()` bytes.
pub fn encode(buffer: &SampleBuffer) -> WavBytes {
    let format = WavFormat::mono(buffer.sample_rate());
    let pcm = samples_to_pcm16(buffer.samples());
    WavBytes(write_wav_to_vec(&format, &pcm))
}

/// Builds the 44-byte header for `data_len` bytes of PCM.
pub fn wav_header(format: &WavFormat, data_len: usize) -> [u8; HEADER_LEN] {
    let data_size = data_len as u32;
    let riff_size = 36 + data_size;

    let mut header = [0u8; HEADER_LEN];
    // RIFF header
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());
    header
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&wav_header(format, pcm_data.len()))?;
    writer.write_all(pcm_data)
}

/// Writes a WAV file to a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm_data.len());
    buffer.extend_from_slice(&wav_header(format, pcm_data.len()));
    buffer.extend_from_slice(pcm_data);
    buffer
}

/// Converts f64 samples to little-endian 16-bit PCM.
///
/// Each sample becomes `round(clamp(sample, -1, 1) * 32767)`.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}
