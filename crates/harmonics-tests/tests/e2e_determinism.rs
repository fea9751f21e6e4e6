//! Determinism tests: identical inputs give byte-identical output.

use harmonics_backend_audio::wav::encode;
use harmonics_backend_audio::{
    export_archive, synthesize, ExportOptions, InstrumentCache, InstrumentFamily,
};
use harmonics_backend_midi::{export_sequence, StandardMidiWriter};
use harmonics_tests::{c_major_scenario, scripted_note_set, verify_determinism};
use harmonics_theory::{create_rng, NoteSet, ScaleSelection};

fn seeded_set(seed: u32) -> NoteSet {
    let mut rng = create_rng(seed);
    NoteSet::generate(&c_major_scenario(), 4, &mut rng).unwrap()
}

#[test]
fn test_seeded_selection_is_reproducible() {
    let result = verify_determinism(
        || {
            seeded_set(42)
                .iter()
                .map(|p| p.midi())
                .collect::<Vec<u8>>()
        },
        5,
    );
    result.assert_deterministic();
}

#[test]
fn test_wav_encoding_is_reproducible() {
    for family in InstrumentFamily::ALL {
        let pitch = c_major_scenario()[2];
        let result = verify_determinism(
            || {
                encode(&synthesize(family, pitch, 0.1, 22050).unwrap()).into_vec()
            },
            3,
        );
        result.assert_deterministic();
        assert_eq!(result.output_size, 44 + 2205 * 2);
    }
}

#[test]
fn test_midi_is_reproducible() {
    let set = seeded_set(99);
    let result = verify_determinism(
        || export_sequence(&set, &StandardMidiWriter::new()).unwrap().midi,
        3,
    );
    result.assert_deterministic();
}

#[test]
fn test_archive_is_reproducible() {
    let set = scripted_note_set(&c_major_scenario(), 2, &[3, 1]);
    let options = ExportOptions {
        family: InstrumentFamily::Fm,
        duration_seconds: 0.05,
        sample_rate: 8000,
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let result = verify_determinism(
        || {
            runtime
                .block_on(export_archive(
                    &InstrumentCache::default(),
                    &ScaleSelection::default(),
                    &set,
                    &options,
                    |_| {},
                ))
                .unwrap()
                .bytes
        },
        3,
    );
    result.assert_deterministic();
}
