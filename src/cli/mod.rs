//! Command-line interface for scribbl-scrobbl.
//!
//! This module provides commands for looking up albums by barcode,
//! logging in to Last.fm, and scrobbling whole albums.

mod commands;

pub use commands::{Cli, Commands, run_command};
