//! PCM payload extraction and hashing.

/// Finds the `data` chunk of a WAV file.
///
/// Returns `None` if the RIFF/WAVE header is missing or the chunk is
/// truncated.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;
        let start = pos + 8;

        if chunk_id == b"data" {
            return wav_data.get(start..start.checked_add(chunk_size)?);
        }

        // Chunks are word aligned.
        pos = start + chunk_size + (chunk_size & 1);
    }

    None
}

/// BLAKE3 hex digest of the PCM payload, or `None` for malformed input.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
