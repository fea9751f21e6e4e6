//! Sequence export tests that read the MIDI stream back.

use harmonics_backend_midi::{export_sequence, MidiFileWriter, MidiResult, StandardMidiWriter};
use harmonics_theory::{NoteEvent, NoteSet, Pitch, ScaleSelection, ScriptedIndices};
use pretty_assertions::assert_eq;

/// (absolute tick, status, key, velocity) for every channel message.
fn parse_notes(bytes: &[u8]) -> Vec<(u32, u8, u8, u8)> {
    assert_eq!(&bytes[0..4], b"MThd");
    assert_eq!(&bytes[8..14], &[0, 0, 0, 1, 0x01, 0xE0]);
    assert_eq!(&bytes[14..18], b"MTrk");
    let len = u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]) as usize;
    let track = &bytes[22..];
    assert_eq!(track.len(), len);

    let mut notes = Vec::new();
    let mut pos = 0;
    let mut tick = 0u32;
    while pos < track.len() {
        let mut delta = 0u32;
        loop {
            let byte = track[pos];
            pos += 1;
            delta = (delta << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                break;
            }
        }
        tick += delta;
        let status = track[pos];
        if status == 0xFF {
            let meta_len = track[pos + 2] as usize;
            pos += 3 + meta_len;
        } else {
            notes.push((tick, status, track[pos + 1], track[pos + 2]));
            pos += 3;
        }
    }
    notes
}

fn c_major_set() -> NoteSet {
    let scale = ScaleSelection::default().degrees().unwrap();
    NoteSet::generate(&scale, 3, &mut ScriptedIndices::new(vec![0, 1, 2])).unwrap()
}

// ============================================================================
// Schedule on the wire
// ============================================================================

#[test]
fn test_note_set_timing() {
    let export = export_sequence(&c_major_set(), &StandardMidiWriter::new()).unwrap();
    let notes = parse_notes(&export.midi);
    assert_eq!(notes.len(), 24);

    let ons: Vec<(u32, u8)> = notes
        .iter()
        .filter(|n| n.1 == 0x90)
        .map(|n| (n.0, n.2))
        .collect();
    let expected_keys = [60, 64, 67, 67, 71, 74, 67, 71, 74, 67, 71, 74];
    for (i, (tick, key)) in ons.iter().enumerate() {
        assert_eq!(*tick, 240 * i as u32);
        assert_eq!(*key, expected_keys[i]);
    }

    let offs: Vec<u32> = notes.iter().filter(|n| n.1 == 0x80).map(|n| n.0).collect();
    for (i, tick) in offs.iter().enumerate() {
        assert_eq!(*tick, 240 * i as u32 + 192);
    }
    assert!(notes.iter().filter(|n| n.1 == 0x90).all(|n| n.3 == 127));
}

#[test]
fn test_text_summary_lines() {
    let export = export_sequence(&c_major_set(), &StandardMidiWriter::new()).unwrap();
    assert_eq!(
        export.text,
        "MIDI note numbers: 60, 64, 67, 67, 71, 74, 67, 71, 74, 67, 71, 74\n\
         Notes: C4, E4, G4, G4, B4, D5, G4, B4, D5, G4, B4, D5"
    );
}

#[test]
fn test_sharps_in_summary() {
    let cs4: Pitch = "Db4".parse().unwrap();
    let set = NoteSet::from_parts(vec![cs4], vec![cs4.transpose(7).unwrap()]);
    let export = export_sequence(&set, &StandardMidiWriter::new()).unwrap();
    assert_eq!(export.text, "MIDI note numbers: 61, 68\nNotes: C#4, G#4");
}

// ============================================================================
// Writer injection
// ============================================================================

struct RecordingWriter;

impl MidiFileWriter for RecordingWriter {
    fn write_sequence(&self, events: &[NoteEvent]) -> MidiResult<Vec<u8>> {
        Ok(events
            .iter()
            .map(|e| (e.start_seconds * 4.0).round() as u8)
            .collect())
    }
}

#[test]
fn test_custom_writer_receives_schedule() {
    let export = export_sequence(&c_major_set(), &RecordingWriter).unwrap();
    let expected: Vec<u8> = (0..12).collect();
    assert_eq!(export.midi, expected);
}
