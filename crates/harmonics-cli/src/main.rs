//! Harmonics CLI - note set generation and sample export
//!
//! This binary generates note sets from a root, scale, and mode, and exports
//! them as WAV sample archives or MIDI sequences.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

// Use modules from the library crate
use harmonics_cli::commands::{self, SessionArgs};
use harmonics_cli::logging;

/// Harmonics - Scale-Based Note and Harmonic Generator
#[derive(Parser)]
#[command(name = "harmonics")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a note set and print it
    Generate {
        #[command(flatten)]
        session: SessionArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render every note to WAV and package them in a zip archive
    ExportSamples {
        #[command(flatten)]
        session: SessionArgs,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// Write the note set as sequence.mid and sequence.txt
    ExportMidi {
        #[command(flatten)]
        session: SessionArgs,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// List instrument families, roots, scales, and modes
    Instruments {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate { session, json } => commands::generate::run(&session, json),
        Commands::ExportSamples { session, out_dir } => {
            commands::export_samples::run(&session, out_dir.as_deref())
        }
        Commands::ExportMidi { session, out_dir } => {
            commands::export_midi::run(&session, out_dir.as_deref())
        }
        Commands::Instruments { json } => commands::instruments::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => commands::report_failure(&e),
    }
}
