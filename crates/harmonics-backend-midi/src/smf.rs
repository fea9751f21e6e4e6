//! Standard MIDI File writer.
//!
//! Sequences are written as format 0: a single track holding a tempo meta
//! event, note on/off pairs on channel 1, and the end-of-track marker. All
//! multi-byte header fields are big-endian; event delta times are
//! variable-length quantities.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use harmonics_theory::NoteEvent;

use crate::error::{MidiError, MidiResult};

/// Ticks per quarter note.
pub const TICKS_PER_QUARTER: u16 = 480;

/// Default tempo in beats per minute.
pub const DEFAULT_BPM: u32 = 120;

/// Velocity of every note-on.
pub const NOTE_VELOCITY: u8 = 127;

/// Largest value a variable-length quantity can hold.
pub const VLQ_MAX: u32 = 0x0FFF_FFFF;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const META: u8 = 0xFF;
const META_TEMPO: u8 = 0x51;
const META_END_OF_TRACK: u8 = 0x2F;

/// Serializes timed notes into a MIDI byte stream.
pub trait MidiFileWriter {
    /// Encodes `events` as a complete MIDI file.
    fn write_sequence(&self, events: &[NoteEvent]) -> MidiResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Message {
    // Declared first so offs sort ahead of ons at the same tick.
    NoteOff { key: u8 },
    NoteOn { key: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TrackEvent {
    tick: u32,
    message: Message,
}

/// Format 0 writer with a fixed tempo and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardMidiWriter {
    /// Ticks per quarter note.
    pub ticks_per_quarter: u16,
    /// Tempo in beats per minute.
    pub bpm: u32,
    /// Note-on velocity.
    pub velocity: u8,
}

impl Default for StandardMidiWriter {
    fn default() -> Self {
        Self {
            ticks_per_quarter: TICKS_PER_QUARTER,
            bpm: DEFAULT_BPM,
            velocity: NOTE_VELOCITY,
        }
    }
}

impl StandardMidiWriter {
    /// Creates a writer with the default resolution, tempo and velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Microseconds per quarter note for the tempo meta event.
    pub fn micros_per_quarter(&self) -> u32 {
        60_000_000 / self.bpm.max(1)
    }

    /// Converts seconds to ticks, rounding to the nearest tick.
    pub fn seconds_to_ticks(&self, seconds: f64) -> u32 {
        let quarters = seconds * self.bpm as f64 / 60.0;
        (quarters * self.ticks_per_quarter as f64).round() as u32
    }

    /// Writes the complete file for `events` to `writer`.
    pub fn write_to<W: Write>(&self, events: &[NoteEvent], writer: &mut W) -> MidiResult<()> {
        let track = self.track_chunk(events)?;

        // Header chunk
        writer.write_all(b"MThd")?;
        writer.write_u32::<BigEndian>(6)?;
        writer.write_u16::<BigEndian>(0)?; // format 0
        writer.write_u16::<BigEndian>(1)?; // one track
        writer.write_u16::<BigEndian>(self.ticks_per_quarter)?;

        // Track chunk
        writer.write_all(b"MTrk")?;
        writer.write_u32::<BigEndian>(track.len() as u32)?;
        writer.write_all(&track)?;
        Ok(())
    }

    fn timeline(&self, events: &[NoteEvent]) -> MidiResult<Vec<TrackEvent>> {
        let mut timeline = Vec::with_capacity(events.len() * 2);
        for (index, event) in events.iter().enumerate() {
            if !event.start_seconds.is_finite() || event.start_seconds < 0.0 {
                return Err(MidiError::invalid_event(
                    index,
                    format!("start {} is not a non-negative time", event.start_seconds),
                ));
            }
            if !event.duration_seconds.is_finite() || event.duration_seconds < 0.0 {
                return Err(MidiError::invalid_event(
                    index,
                    format!("duration {} is not a non-negative time", event.duration_seconds),
                ));
            }
            let key = event.pitch.midi();
            timeline.push(TrackEvent {
                tick: self.seconds_to_ticks(event.start_seconds),
                message: Message::NoteOn { key },
            });
            timeline.push(TrackEvent {
                tick: self.seconds_to_ticks(event.end_seconds()),
                message: Message::NoteOff { key },
            });
        }
        timeline.sort();
        Ok(timeline)
    }

    fn track_chunk(&self, events: &[NoteEvent]) -> MidiResult<Vec<u8>> {
        let mut track = Vec::new();

        // Tempo
        write_vlq(&mut track, 0)?;
        track.write_all(&[META, META_TEMPO, 3])?;
        track.write_u24::<BigEndian>(self.micros_per_quarter())?;

        let mut last_tick = 0;
        for event in self.timeline(events)? {
            write_vlq(&mut track, event.tick - last_tick)?;
            last_tick = event.tick;
            match event.message {
                Message::NoteOn { key } => track.write_all(&[NOTE_ON, key, self.velocity])?,
                Message::NoteOff { key } => track.write_all(&[NOTE_OFF, key, 0])?,
            }
        }

        write_vlq(&mut track, 0)?;
        track.write_all(&[META, META_END_OF_TRACK, 0])?;
        Ok(track)
    }
}

impl MidiFileWriter for StandardMidiWriter {
    fn write_sequence(&self, events: &[NoteEvent]) -> MidiResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(events, &mut bytes)?;
        tracing::debug!(events = events.len(), bytes = bytes.len(), "wrote MIDI sequence");
        Ok(bytes)
    }
}

/// Writes `value` as a MIDI variable-length quantity.
///
/// # Errors
/// [`MidiError::DeltaTooLarge`] if `value` exceeds [`VLQ_MAX`].
pub fn write_vlq<W: Write>(writer: &mut W, value: u32) -> MidiResult<()> {
    if value > VLQ_MAX {
        return Err(MidiError::DeltaTooLarge { ticks: value });
    }
    let mut groups = [0u8; 4];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    // Most significant group first; all but the last carry the continuation bit.
    for i in (0..len).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        writer.write_u8(groups[i] | continuation)?;
    }
    Ok(())
}
