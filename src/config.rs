//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\scribbl-scrobbl\config.toml
//! - macOS: ~/Library/Application Support/scribbl-scrobbl/config.toml
//! - Linux: ~/.config/scribbl-scrobbl/config.toml
//!
//! The config file is human-readable and editable. Command-line flags and
//! the `LASTFM_*` environment variables override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lastfm::LastFmConfig;
use crate::lookup::{CoverSize, ResolverConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Last.fm application credentials and endpoints
    pub lastfm: LastFmSettings,

    /// MusicBrainz / Cover Art Archive settings
    pub musicbrainz: MusicBrainzSettings,

    /// Local storage settings
    pub storage: StorageSettings,
}

/// Last.fm application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LastFmSettings {
    /// API key issued for this application
    pub api_key: Option<String>,

    /// Shared secret used to sign requests
    pub api_secret: Option<String>,

    /// Where Last.fm sends the user back after authorizing
    pub callback_url: String,

    /// Web service root
    pub api_url: String,

    /// Page the user visits to authorize
    pub auth_url: String,
}

impl Default for LastFmSettings {
    fn default() -> Self {
        let defaults = LastFmConfig::default();
        Self {
            api_key: None,
            api_secret: None,
            callback_url: defaults.callback_url,
            api_url: defaults.api_url,
            auth_url: defaults.auth_url,
        }
    }
}

/// MusicBrainz lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicBrainzSettings {
    /// MusicBrainz web service root
    pub base_url: String,

    /// Cover Art Archive root
    pub cover_art_url: String,

    /// Thumbnail size: "small" (250px), "medium" (500px), "large" (1200px)
    pub cover_size: CoverSize,
}

impl Default for MusicBrainzSettings {
    fn default() -> Self {
        let defaults = ResolverConfig::default();
        Self {
            base_url: defaults.musicbrainz_url,
            cover_art_url: defaults.cover_art_url,
            cover_size: defaults.cover_size,
        }
    }
}

/// Local storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite database file (empty = `scribbl_scrobbl.db` in the working directory)
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Settings for the Last.fm client.
    ///
    /// Missing credentials become empty strings; callers that sign requests
    /// should check [`Config::has_credentials`] first.
    pub fn lastfm_config(&self) -> LastFmConfig {
        LastFmConfig {
            api_key: self.lastfm.api_key.clone().unwrap_or_default(),
            api_secret: self.lastfm.api_secret.clone().unwrap_or_default(),
            callback_url: self.lastfm.callback_url.clone(),
            api_url: self.lastfm.api_url.clone(),
            auth_url: self.lastfm.auth_url.clone(),
        }
    }

    /// Settings for the metadata resolver
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            musicbrainz_url: self.musicbrainz.base_url.clone(),
            cover_art_url: self.musicbrainz.cover_art_url.clone(),
            cover_size: self.musicbrainz.cover_size,
        }
    }

    /// Whether both the Last.fm API key and secret are set and non-empty
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.lastfm.api_key) && present(&self.lastfm.api_secret)
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scribbl-scrobbl"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist. Returns the path written.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write to temp, then rename
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
