//! Instruments command implementation
//!
//! Lists the instrument families, scales, and modes a session can use.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use harmonics_backend_audio::InstrumentFamily;
use harmonics_theory::{Mode, PitchClass, ScaleKind};
use serde::Serialize;

/// The catalogue printed by `instruments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalogue {
    /// Instrument family names.
    pub instruments: Vec<&'static str>,
    /// Root spellings.
    pub roots: Vec<&'static str>,
    /// Scale names.
    pub scales: Vec<&'static str>,
    /// Mode names.
    pub modes: Vec<&'static str>,
}

/// Collects every supported name.
pub fn catalogue() -> Catalogue {
    Catalogue {
        instruments: InstrumentFamily::ALL.iter().map(|f| f.name()).collect(),
        roots: PitchClass::ALL.iter().map(|p| p.name()).collect(),
        scales: ScaleKind::ALL.iter().map(|s| s.name()).collect(),
        modes: Mode::ALL.iter().map(|m| m.name()).collect(),
    }
}

/// Run the instruments command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let catalogue = catalogue();
    if json_output {
        let json = serde_json::to_string_pretty(&catalogue).context("Failed to serialize catalogue")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Instruments:".bold());
    for name in &catalogue.instruments {
        println!("  {} {}", "->".green(), name);
    }
    println!("{} {}", "Roots:".bold(), catalogue.roots.join(" "));
    println!("{} {}", "Scales:".bold(), catalogue.scales.join(", "));
    println!("{} {}", "Modes:".bold(), catalogue.modes.join(", "));
    Ok(ExitCode::SUCCESS)
}
