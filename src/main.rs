//! Scribbl Scrobbl - scrobble a physical album to Last.fm by its barcode.
//!
//! A barcode is resolved to an album through MusicBrainz (with cover art
//! from the Cover Art Archive), then every track is submitted to Last.fm
//! as if the album had just been played from start to finish.

pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod lookup;
pub mod model;
pub mod storage;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("scribbl_scrobbl=info".parse()?))
        .init();

    cli::run_command(&args)
}
