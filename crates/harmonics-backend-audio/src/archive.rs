//! Zip archive of per-note WAV samples.
//!
//! Every note of a note set is rendered, encoded, and stored under a name
//! derived from its position and pitch. Any failure aborts the export and no
//! archive is returned.

use std::io::{Cursor, Write};

use harmonics_theory::{NoteSet, Pitch, PitchClass, ScaleKind, ScaleSelection};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::cache::{Instrument, InstrumentCache, InstrumentKey, SynthVoice};
use crate::error::{AudioError, AudioResult};
use crate::synthesis::{InstrumentFamily, DEFAULT_SAMPLE_RATE};
use crate::wav::WavResult;

/// Rendering parameters shared by every note of an export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// Instrument family to render with.
    pub family: InstrumentFamily,
    /// Length of each note in seconds.
    pub duration_seconds: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            family: InstrumentFamily::Synth,
            duration_seconds: 1.0,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// One stored sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name inside the archive.
    pub file_name: String,
    /// Pitch of the note.
    pub pitch: Pitch,
    /// Samples in the WAV payload.
    pub num_samples: usize,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// A finished archive.
#[derive(Debug, Clone)]
pub struct SampleArchive {
    /// Suggested file name for the archive.
    pub file_name: String,
    /// Zip file contents.
    pub bytes: Vec<u8>,
    /// Entries in note-set order.
    pub entries: Vec<ArchiveEntry>,
}

/// Transliterates a pitch name into a file-system safe form.
///
/// `#` becomes `sharp` and `b` becomes `flat`.
pub fn safe_pitch_name(name: &str) -> String {
    name.replace('#', "sharp").replace('b', "flat")
}

/// `note_<index>_<pitch>.wav`, with a 1-based index.
pub fn entry_file_name(index: usize, pitch: Pitch) -> String {
    format!("note_{}_{}.wav", index, safe_pitch_name(&pitch.name()))
}

/// `harmonics_samples_<root>_<scale>_<duration>s.zip`.
///
/// The scale name is lowercased with spaces replaced by underscores.
pub fn archive_file_name(root: PitchClass, scale: ScaleKind, duration_seconds: f64) -> String {
    format!(
        "harmonics_samples_{}_{}_{}s.zip",
        safe_pitch_name(root.name()),
        scale.name().to_lowercase().replace(' ', "_"),
        duration_seconds
    )
}

/// Renders every note of `note_set` and packages the WAVs into a zip.
///
/// `progress` receives `completed / total` after each note, and control is
/// yielded to the runtime before the next note starts.
///
/// # Errors
/// [`AudioError::Export`] naming the first note that failed. Nothing is
/// produced in that case.
pub async fn export_archive(
    cache: &InstrumentCache,
    selection: &ScaleSelection,
    note_set: &NoteSet,
    options: &ExportOptions,
    mut progress: impl FnMut(f64),
) -> AudioResult<SampleArchive> {
    let voice = match cache.acquire(&InstrumentKey::Synth(options.family)).await {
        Ok(instrument) => instrument.voice(),
        Err(err) => {
            tracing::warn!(error = %err, "rendering export with placeholder voice");
            Instrument::placeholder().voice()
        }
    };

    let zip_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(note_set.len());
    let total = note_set.len();

    for (i, pitch) in note_set.iter().enumerate() {
        let index = i + 1;
        let entry = add_note(&mut writer, zip_options, voice, index, pitch, options)
            .map_err(|err| AudioError::export(index, pitch.name(), err))?;
        tracing::debug!(file = %entry.file_name, "archived note");
        entries.push(entry);

        progress(index as f64 / total as f64);
        tokio::task::yield_now().await;
    }

    let bytes = writer.finish()?.into_inner();
    let file_name = archive_file_name(selection.root, selection.scale, options.duration_seconds);
    tracing::info!(
        file = %file_name,
        notes = entries.len(),
        bytes = bytes.len(),
        "sample archive ready"
    );

    Ok(SampleArchive {
        file_name,
        bytes,
        entries,
    })
}

fn add_note(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    zip_options: SimpleFileOptions,
    voice: SynthVoice,
    index: usize,
    pitch: Pitch,
    options: &ExportOptions,
) -> AudioResult<ArchiveEntry> {
    let buffer = voice.render(pitch, options.duration_seconds, options.sample_rate)?;
    let wav = WavResult::from_buffer(&buffer);
    let file_name = entry_file_name(index, pitch);

    writer.start_file(file_name.clone(), zip_options)?;
    writer.write_all(wav.wav.as_bytes())?;

    Ok(ArchiveEntry {
        file_name,
        pitch,
        num_samples: wav.num_samples,
        pcm_hash: wav.pcm_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_names() {
        let pitch: Pitch = "C#4".parse().unwrap();
        assert_eq!(entry_file_name(2, pitch), "note_2_Csharp4.wav");
        let pitch: Pitch = "G4".parse().unwrap();
        assert_eq!(entry_file_name(12, pitch), "note_12_G4.wav");
        assert_eq!(safe_pitch_name("Bb3"), "Bflat3");
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(
            archive_file_name(PitchClass::C, ScaleKind::Major, 1.0),
            "harmonics_samples_C_major_1s.zip"
        );
        assert_eq!(
            archive_file_name(PitchClass::EFlat, ScaleKind::HarmonicMinor, 0.5),
            "harmonics_samples_Eflat_harmonic_minor_0.5s.zip"
        );
        assert_eq!(
            archive_file_name(PitchClass::FSharp, ScaleKind::NaturalMinor, 2.0),
            "harmonics_samples_Fsharp_natural_minor_2s.zip"
        );
    }
}
