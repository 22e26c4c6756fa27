//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `lookup`: Barcode resolution against MusicBrainz
//! - `auth`: Last.fm login, status and logout
//! - `scrobble`: Album submission and history

mod auth;
mod lookup;
mod scrobble;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::{self, Error, ResultExt};
use crate::lastfm::{LastFmConfig, ScrobbleClient};
use crate::model::Album;
use crate::storage::{SqliteStore, db_url};

pub use auth::{cmd_auth_url, cmd_init_config, cmd_login, cmd_logout, cmd_status};
pub use lookup::cmd_lookup;
pub use scrobble::{cmd_history, cmd_scrobble};

/// Scribbl Scrobbl CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: from config, or scribbl_scrobbl.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Last.fm API key
    #[arg(long, global = true, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Last.fm shared secret
    #[arg(long, global = true, env = "LASTFM_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// URL Last.fm redirects to after authorization
    #[arg(long, global = true, env = "LASTFM_CALLBACK_URL")]
    pub callback_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up an album by barcode
    Lookup {
        /// UPC/EAN barcode
        barcode: String,
    },
    /// Print the Last.fm authorization URL
    AuthUrl,
    /// Exchange an authorization token for a session
    Login {
        /// Token Last.fm appended to the callback URL
        token: String,
    },
    /// Look up an album by barcode and scrobble it
    Scrobble {
        /// UPC/EAN barcode
        barcode: String,
        /// Show the planned scrobbles without submitting them
        #[arg(long)]
        dry_run: bool,
    },
    /// Show recently scrobbled albums
    History,
    /// Show the logged-in Last.fm user
    Status,
    /// Forget the stored Last.fm session
    Logout,
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = apply_overrides(cli, config::load());

    match &cli.command {
        Commands::Lookup { barcode } => cmd_lookup(&rt, &config, barcode),
        Commands::AuthUrl => cmd_auth_url(&config),
        Commands::Login { token } => cmd_login(&rt, &config, token),
        Commands::Scrobble { barcode, dry_run } => cmd_scrobble(&rt, &config, barcode, *dry_run),
        Commands::History => cmd_history(&rt, &config),
        Commands::Status => cmd_status(&rt, &config),
        Commands::Logout => cmd_logout(&rt, &config),
        Commands::InitConfig { force } => cmd_init_config(&config, *force),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Client type used by every command that touches Last.fm
pub(crate) type Scrobbler = ScrobbleClient<SqliteStore, SqliteStore>;

/// Layer command-line flags and environment variables over the loaded config
pub(crate) fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(key) = &cli.api_key {
        config.lastfm.api_key = Some(key.clone());
    }
    if let Some(secret) = &cli.api_secret {
        config.lastfm.api_secret = Some(secret.clone());
    }
    if let Some(url) = &cli.callback_url {
        config.lastfm.callback_url = url.clone();
    }
    if let Some(db) = &cli.db {
        config.storage.database_path = Some(db.clone());
    }
    config
}

/// Last.fm settings, failing if the key or secret is missing
pub(crate) fn require_credentials(config: &Config) -> error::Result<LastFmConfig> {
    if !config.has_credentials() {
        return Err(Error::config(
            "Last.fm API key and secret are required \
             (use --api-key/--api-secret, LASTFM_API_KEY/LASTFM_API_SECRET, or [lastfm] in config.toml)",
        ));
    }
    Ok(config.lastfm_config())
}

/// Open the configured SQLite store
pub(crate) async fn open_store(config: &Config) -> error::Result<SqliteStore> {
    let url = db_url(config.storage.database_path.as_deref());
    SqliteStore::open(&url)
        .await
        .with_context(format!("Failed to open {}", url))
}

/// Build a Last.fm client over the configured store
pub(crate) async fn scrobbler(config: &Config, lastfm: &LastFmConfig) -> error::Result<Scrobbler> {
    let store = open_store(config).await?;
    Ok(ScrobbleClient::new(lastfm, store.clone(), store))
}

/// Format seconds as m:ss
pub(crate) fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a unix timestamp for display
pub(crate) fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Print an album header and its track listing
pub(crate) fn print_album(album: &Album) {
    println!("{} - {}", album.artist, album.title);
    if !album.release_date.is_empty() {
        println!("  Released: {}", album.release_date);
    }
    println!("  Barcode:  {}", album.barcode);
    println!("  Release:  https://musicbrainz.org/release/{}", album.id);
    if let Some(cover) = &album.cover_art_url {
        println!("  Cover:    {}", cover);
    }
    println!();
    for track in &album.tracks {
        println!(
            "  {:>2}. {} ({})",
            track.position,
            track.name,
            format_duration(u64::from(track.duration))
        );
    }
    println!();
    println!(
        "  {} tracks, {}",
        album.tracks.len(),
        format_duration(album.total_duration())
    );
}
