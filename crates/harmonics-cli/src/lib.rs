//! Harmonics CLI library.
//!
//! This crate provides the core functionality for the `harmonics` binary:
//! session configuration, logging setup, and the command implementations.

pub mod commands;
pub mod config;
pub mod logging;
