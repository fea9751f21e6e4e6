//! Readers for the produced file formats.
//!
//! WAV files are read with `hound` and archives with `zip`, independently of
//! the writers under test. MIDI is parsed here directly.

use std::fmt;
use std::io::{Cursor, Read};

/// Error type for format validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// The format being validated.
    pub format: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl FormatError {
    /// Create a new format error.
    pub fn new(format: &'static str, message: impl Into<String>) -> Self {
        Self {
            format,
            message: message.into(),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.format, self.message)
    }
}

impl std::error::Error for FormatError {}

/// Information read from a WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Decoded samples.
    pub samples: Vec<i16>,
}

/// Decodes a WAV file with `hound`.
pub fn validate_wav(data: &[u8]) -> Result<WavInfo, FormatError> {
    let mut reader =
        hound::WavReader::new(Cursor::new(data)).map_err(|e| FormatError::new("WAV", e.to_string()))?;
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| FormatError::new("WAV", e.to_string()))?;
    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        samples,
    })
}

/// Reads every file of a zip archive as (name, contents), in archive order.
pub fn read_archive(data: &[u8]) -> Result<Vec<(String, Vec<u8>)>, FormatError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(data)).map_err(|e| FormatError::new("ZIP", e.to_string()))?;
    let mut files = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| FormatError::new("ZIP", e.to_string()))?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| FormatError::new("ZIP", e.to_string()))?;
        files.push((file.name().to_string(), contents));
    }
    Ok(files)
}

/// One note reconstructed from a MIDI track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiNote {
    /// MIDI key.
    pub key: u8,
    /// Note-on tick.
    pub start_tick: u32,
    /// Note-off tick.
    pub end_tick: u32,
    /// Note-on velocity.
    pub velocity: u8,
}

/// Parsed format 0 MIDI file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiInfo {
    /// Ticks per quarter note.
    pub division: u16,
    /// Tempo in microseconds per quarter, if present.
    pub tempo: Option<u32>,
    /// Notes in note-on order.
    pub notes: Vec<MidiNote>,
}

fn read_vlq(track: &[u8], pos: &mut usize) -> Result<u32, FormatError> {
    let mut value = 0u32;
    for _ in 0..4 {
        let byte = *track
            .get(*pos)
            .ok_or_else(|| FormatError::new("MIDI", "truncated delta time"))?;
        *pos += 1;
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(FormatError::new("MIDI", "delta time longer than 4 bytes"))
}

/// Parses a single-track MIDI file into notes.
pub fn parse_midi(data: &[u8]) -> Result<MidiInfo, FormatError> {
    let err = |msg: &str| FormatError::new("MIDI", msg);
    if data.len() < 22 || &data[0..4] != b"MThd" || &data[14..18] != b"MTrk" {
        return Err(err("missing MThd/MTrk chunks"));
    }
    let format = u16::from_be_bytes([data[8], data[9]]);
    let tracks = u16::from_be_bytes([data[10], data[11]]);
    if format != 0 || tracks != 1 {
        return Err(err("expected format 0 with one track"));
    }
    let division = u16::from_be_bytes([data[12], data[13]]);
    let len = u32::from_be_bytes([data[18], data[19], data[20], data[21]]) as usize;
    let track = data
        .get(22..22 + len)
        .ok_or_else(|| err("track chunk is truncated"))?;

    let mut tempo = None;
    let mut notes: Vec<MidiNote> = Vec::new();
    let mut pos = 0;
    let mut tick = 0u32;
    let mut ended = false;

    while pos < track.len() {
        tick += read_vlq(track, &mut pos)?;
        let bytes = track.get(pos..pos + 3).ok_or_else(|| err("truncated event"))?;
        match bytes[0] {
            0xFF => {
                let meta = bytes[1];
                let meta_len = bytes[2] as usize;
                let body = track
                    .get(pos + 3..pos + 3 + meta_len)
                    .ok_or_else(|| err("truncated meta event"))?;
                if meta == 0x51 && meta_len == 3 {
                    tempo = Some(u32::from_be_bytes([0, body[0], body[1], body[2]]));
                }
                if meta == 0x2F {
                    ended = true;
                }
                pos += 3 + meta_len;
            }
            0x90 => {
                notes.push(MidiNote {
                    key: bytes[1],
                    start_tick: tick,
                    end_tick: tick,
                    velocity: bytes[2],
                });
                pos += 3;
            }
            0x80 => {
                let open = notes
                    .iter_mut()
                    .find(|n| n.key == bytes[1] && n.end_tick == n.start_tick)
                    .ok_or_else(|| err("note-off without note-on"))?;
                open.end_tick = tick;
                pos += 3;
            }
            status => {
                return Err(FormatError::new(
                    "MIDI",
                    format!("unexpected status byte 0x{:02X}", status),
                ))
            }
        }
    }

    if !ended {
        return Err(err("missing end-of-track"));
    }
    Ok(MidiInfo {
        division,
        tempo,
        notes,
    })
}
