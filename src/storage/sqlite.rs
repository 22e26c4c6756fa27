//! SQLite-backed key-value store.
//!
//! Uses SQLx with SQLite for lightweight, embedded storage. A single table
//! holds JSON values by key:
//!
//! ```sql
//! CREATE TABLE kv (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use scribbl_scrobbl::storage::{SqliteStore, db_url};
//!
//! let store = SqliteStore::open(&db_url(None)).await?;
//! let session = SessionStore::get(&store).await?;
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};

use super::{HISTORY_KEY, HistoryStore, SESSION_KEY, SessionStore, StorageError, push_bounded};
use crate::model::{ScrobbleRecord, Session};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "scribbl_scrobbl.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Durable session and history store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_url` and ensure the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database creation fails
    /// - Connection cannot be established
    /// - The table cannot be created
    pub async fn open(db_url: &str) -> Result<Self, StorageError> {
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            Sqlite::create_database(db_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(db_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    async fn read<T: DeserializeOwned>(
        conn: &mut SqliteConnection,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&mut *conn)
            .await?;

        let Some((raw,)) = row else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Unreadable data is treated as absent rather than blocking the user
                tracing::warn!("Ignoring corrupt stored value for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(
        conn: &mut SqliteConnection,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(raw)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn get(&self) -> Result<Option<Session>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        Self::read(&mut conn, SESSION_KEY).await
    }

    async fn set(&self, session: &Session) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await?;
        Self::write(&mut conn, SESSION_KEY, session).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(SESSION_KEY)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteStore {
    async fn list(&self) -> Result<Vec<ScrobbleRecord>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        Ok(Self::read(&mut conn, HISTORY_KEY).await?.unwrap_or_default())
    }

    async fn append(&self, record: ScrobbleRecord) -> Result<(), StorageError> {
        // Write lock up front; concurrent appends wait on busy_timeout
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let mut history: Vec<ScrobbleRecord> =
            Self::read(&mut tx, HISTORY_KEY).await?.unwrap_or_default();
        push_bounded(&mut history, record);
        Self::write(&mut tx, HISTORY_KEY, &history).await?;

        tx.commit().await?;
        Ok(())
    }
}
