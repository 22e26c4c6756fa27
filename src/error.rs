//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`LookupError`], [`ScrobbleError`], [`StorageError`]), while the CLI
//! uses `anyhow` for convenient error propagation. [`Error`] aggregates the
//! module errors for code that spans several subsystems.
//!
//! # Example
//!
//! ```ignore
//! use scribbl_scrobbl::error::{Error, Result, ResultExt};
//!
//! async fn open(path: &Path) -> Result<SqliteStore> {
//!     SqliteStore::open(&db_url(Some(path))).await.with_context("opening history")
//! }
//! ```

use crate::lastfm::ScrobbleError;
use crate::lookup::LookupError;
use crate::storage::StorageError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Barcode lookup could not reach or understand MusicBrainz
    #[error("Metadata unavailable: {0}")]
    MetadataUnavailable(#[from] LookupError),

    /// Last.fm authentication or submission error
    #[error(transparent)]
    Scrobble(#[from] ScrobbleError),

    /// Session/history persistence error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
