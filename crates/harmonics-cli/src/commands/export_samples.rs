//! Export-samples command implementation
//!
//! Renders every note of the session's note set and writes the zip archive.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use harmonics_backend_audio::{export_archive, InstrumentCache, InstrumentKey, SampleArchive};

use super::{reporting, session_or_exit, SessionArgs};
use crate::config::Session;

/// A written sample archive.
#[derive(Debug, Clone)]
pub struct SampleExport {
    /// Where the archive was written.
    pub path: PathBuf,
    /// The archive and its entries.
    pub archive: SampleArchive,
}

/// Generates the note set, renders the archive, and writes it into
/// `out_dir`. Nothing is written if any note fails.
pub async fn export(session: &Session, out_dir: &Path, show_progress: bool) -> Result<SampleExport> {
    let notes = session.note_set()?;

    let cache = InstrumentCache::default();
    let report = cache
        .preload_all(&[InstrumentKey::Synth(session.family)], |_| {})
        .await;
    for failure in &report.failures {
        tracing::warn!(error = %failure, "preload failed");
    }

    let archive = export_archive(
        &cache,
        &session.selection,
        &notes,
        &session.export_options(),
        |progress| {
            if show_progress {
                eprint!("\r  {} {:>3.0}%", "Rendering".cyan(), progress * 100.0);
                let _ = std::io::stderr().flush();
            }
        },
    )
    .await
    .context("Sample export failed")?;
    if show_progress {
        eprintln!();
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = out_dir.join(&archive.file_name);
    fs::write(&path, &archive.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(SampleExport { path, archive })
}

/// Run the export-samples command
///
/// # Returns
/// Exit code: 0 success, 1 invalid input, 2 export error
pub fn run(args: &SessionArgs, out_dir: Option<&str>) -> Result<ExitCode> {
    let session = match session_or_exit(args) {
        Ok(session) => session,
        Err(code) => return Ok(code),
    };
    reporting::print_session(&session);
    println!(
        "{} {} ({:.2}s @ {} Hz)",
        "Instrument:".cyan().bold(),
        session.family,
        session.duration_seconds,
        session.sample_rate
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let out_dir = Path::new(out_dir.unwrap_or("."));

    match rt.block_on(export(&session, out_dir, true)) {
        Ok(written) => {
            for entry in &written.archive.entries {
                println!(
                    "  {} {} {}",
                    "+".green(),
                    entry.file_name,
                    entry.pcm_hash[..16].dimmed()
                );
            }
            println!("{} {}", "Wrote".green().bold(), written.path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(reporting::failure(&err)),
    }
}
