//! Persistence for the Last.fm session and the scrobble history.
//!
//! Both live in a small key-value store:
//! - `lastfm_session` - the current [`Session`], if logged in
//! - `scrobble_history` - the most recent [`ScrobbleRecord`]s, newest first
//!
//! [`SqliteStore`] is the durable implementation used by the CLI;
//! [`MemoryStore`] has identical semantics and backs the tests.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::model::{ScrobbleRecord, Session};

pub use memory::MemoryStore;
pub use sqlite::{DEFAULT_DB_NAME, SqliteStore, db_url};

/// Number of history entries kept
pub const HISTORY_LIMIT: usize = 20;

/// Key holding the serialized session
pub const SESSION_KEY: &str = "lastfm_session";

/// Key holding the serialized history
pub const HISTORY_KEY: &str = "scrobble_history";

/// Errors from the backing store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Holds the single authenticated session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<Session>, StorageError>;

    async fn set(&self, session: &Session) -> Result<(), StorageError>;

    async fn clear(&self) -> Result<(), StorageError>;
}

/// Bounded log of past submissions.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Records, most recent first
    async fn list(&self) -> Result<Vec<ScrobbleRecord>, StorageError>;

    /// Add a record, evicting the oldest beyond [`HISTORY_LIMIT`]
    async fn append(&self, record: ScrobbleRecord) -> Result<(), StorageError>;
}

/// Insert `record` at the front and drop whatever no longer fits.
///
/// Eviction follows insertion order, not the records' timestamps.
pub(crate) fn push_bounded(history: &mut Vec<ScrobbleRecord>, record: ScrobbleRecord) {
    history.insert(0, record);
    history.truncate(HISTORY_LIMIT);
}
