//! Sample archive export integration tests.

use std::io::{Cursor, Read};

use futures_util::future::{self, BoxFuture, FutureExt};
use harmonics_backend_audio::archive::export_archive;
use harmonics_backend_audio::{
    AudioError, ExportOptions, Instrument, InstrumentCache, InstrumentFamily, InstrumentKey,
    InstrumentLoader, LoadError,
};
use harmonics_theory::{NoteSet, ScaleSelection, ScriptedIndices};
use pretty_assertions::assert_eq;

fn c_major_set() -> (ScaleSelection, NoteSet) {
    let selection = ScaleSelection::default();
    let degrees = selection.degrees().unwrap();
    let notes = NoteSet::generate(&degrees, 3, &mut ScriptedIndices::new(vec![0, 1, 2])).unwrap();
    (selection, notes)
}

fn short_options(family: InstrumentFamily) -> ExportOptions {
    ExportOptions {
        family,
        duration_seconds: 0.1,
        sample_rate: 8000,
    }
}

fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}

struct AlwaysFails;

impl InstrumentLoader for AlwaysFails {
    fn load(&self, key: &InstrumentKey) -> BoxFuture<'static, Result<Instrument, LoadError>> {
        future::ready(Err(LoadError::new(key.to_string(), "offline"))).boxed()
    }
}

// ============================================================================
// Archive layout
// ============================================================================

#[tokio::test]
async fn test_archive_contains_every_note_in_order() {
    let (selection, notes) = c_major_set();
    let cache = InstrumentCache::default();
    let options = short_options(InstrumentFamily::Synth);
    let archive = export_archive(&cache, &selection, &notes, &options, |_| {})
        .await
        .unwrap();

    assert_eq!(archive.file_name, "harmonics_samples_C_major_0.1s.zip");
    let expected = vec![
        "note_1_C4.wav",
        "note_2_E4.wav",
        "note_3_G4.wav",
        "note_4_G4.wav",
        "note_5_B4.wav",
        "note_6_D5.wav",
        "note_7_G4.wav",
        "note_8_B4.wav",
        "note_9_D5.wav",
        "note_10_G4.wav",
        "note_11_B4.wav",
        "note_12_D5.wav",
    ];
    let names: Vec<&str> = archive.entries.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(names, expected);

    let zip = zip::ZipArchive::new(Cursor::new(archive.bytes.as_slice())).unwrap();
    let stored: Vec<&str> = zip.file_names().collect();
    assert_eq!(stored.len(), 12);
    for name in expected {
        assert!(stored.contains(&name), "missing {}", name);
    }
}

#[tokio::test]
async fn test_sharp_names_are_transliterated() {
    let selection = ScaleSelection::new(
        harmonics_theory::PitchClass::FSharp,
        harmonics_theory::ScaleKind::Major,
        harmonics_theory::Mode::Ionian,
    );
    let degrees = selection.degrees().unwrap();
    let notes = NoteSet::generate(&degrees, 1, &mut ScriptedIndices::new(vec![0])).unwrap();
    let archive = export_archive(
        &InstrumentCache::default(),
        &selection,
        &notes,
        &short_options(InstrumentFamily::Pluck),
        |_| {},
    )
    .await
    .unwrap();

    assert_eq!(archive.entries[0].file_name, "note_1_Fsharp4.wav");
    assert_eq!(archive.entries[1].file_name, "note_2_Csharp5.wav");
    assert_eq!(archive.file_name, "harmonics_samples_Fsharp_major_0.1s.zip");
}

// ============================================================================
// Stored WAVs
// ============================================================================

#[tokio::test]
async fn test_entries_parse_as_wav() {
    let (selection, notes) = c_major_set();
    let archive = export_archive(
        &InstrumentCache::default(),
        &selection,
        &notes,
        &short_options(InstrumentFamily::Piano),
        |_| {},
    )
    .await
    .unwrap();

    let data = read_entry(&archive.bytes, "note_1_C4.wav");
    assert_eq!(data.len(), 44 + 800 * 2);

    let reader = hound::WavReader::new(Cursor::new(data)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.len(), 800);
    assert_eq!(archive.entries[0].num_samples, 800);
}

#[tokio::test]
async fn test_entry_hashes_match_payloads() {
    let (selection, notes) = c_major_set();
    let archive = export_archive(
        &InstrumentCache::default(),
        &selection,
        &notes,
        &short_options(InstrumentFamily::Fm),
        |_| {},
    )
    .await
    .unwrap();

    for entry in &archive.entries {
        let data = read_entry(&archive.bytes, &entry.file_name);
        assert_eq!(
            harmonics_backend_audio::wav::compute_pcm_hash(&data),
            Some(entry.pcm_hash.clone())
        );
    }
    // Repeated pitches render identically.
    assert_eq!(archive.entries[3].pcm_hash, archive.entries[6].pcm_hash);
    assert_ne!(archive.entries[0].pcm_hash, archive.entries[1].pcm_hash);
}

// ============================================================================
// Progress and failure
// ============================================================================

#[tokio::test]
async fn test_progress_after_each_note() {
    let (selection, notes) = c_major_set();
    let mut progress = Vec::new();
    export_archive(
        &InstrumentCache::default(),
        &selection,
        &notes,
        &short_options(InstrumentFamily::Am),
        |p| progress.push(p),
    )
    .await
    .unwrap();

    assert_eq!(progress.len(), 12);
    for (i, p) in progress.iter().enumerate() {
        assert!((p - (i + 1) as f64 / 12.0).abs() < 1e-12);
    }
    assert_eq!(progress[11], 1.0);
}

#[tokio::test]
async fn test_failure_aborts_whole_export() {
    let (selection, notes) = c_major_set();
    let mut progress = Vec::new();
    let options = ExportOptions {
        duration_seconds: -1.0,
        ..short_options(InstrumentFamily::Synth)
    };
    let err = export_archive(&InstrumentCache::default(), &selection, &notes, &options, |p| {
        progress.push(p)
    })
    .await
    .unwrap_err();

    match err {
        AudioError::Export { index, note, source } => {
            assert_eq!(index, 1);
            assert_eq!(note, "C4");
            assert!(matches!(*source, AudioError::InvalidDuration { .. }));
        }
        other => panic!("expected export error, got {:?}", other),
    }
    assert!(progress.is_empty());
}

#[tokio::test]
async fn test_zero_sample_rate_is_reported() {
    let (selection, notes) = c_major_set();
    let options = ExportOptions {
        sample_rate: 0,
        ..short_options(InstrumentFamily::Metal)
    };
    let err = export_archive(&InstrumentCache::default(), &selection, &notes, &options, |_| {})
        .await
        .unwrap_err();
    assert!(err.to_string().contains("note 1 (C4)"));
}

#[tokio::test]
async fn test_load_failure_falls_back_to_placeholder_voice() {
    let (selection, notes) = c_major_set();
    let failing = InstrumentCache::new(AlwaysFails);
    let fallback = export_archive(
        &failing,
        &selection,
        &notes,
        &short_options(InstrumentFamily::Metal),
        |_| {},
    )
    .await
    .unwrap();
    let sine = export_archive(
        &InstrumentCache::default(),
        &selection,
        &notes,
        &short_options(InstrumentFamily::Synth),
        |_| {},
    )
    .await
    .unwrap();

    let fallback_hashes: Vec<_> = fallback.entries.iter().map(|e| &e.pcm_hash).collect();
    let sine_hashes: Vec<_> = sine.entries.iter().map(|e| &e.pcm_hash).collect();
    assert_eq!(fallback_hashes, sine_hashes);
}

#[tokio::test]
async fn test_export_is_deterministic() {
    let (selection, notes) = c_major_set();
    let cache = InstrumentCache::default();
    let options = short_options(InstrumentFamily::Piano);
    let a = export_archive(&cache, &selection, &notes, &options, |_| {}).await.unwrap();
    let b = export_archive(&cache, &selection, &notes, &options, |_| {}).await.unwrap();
    assert_eq!(a.bytes, b.bytes);
}
