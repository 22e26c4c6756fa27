//! In-memory store with the same semantics as [`SqliteStore`](super::SqliteStore).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{HistoryStore, SessionStore, StorageError, push_bounded};
use crate::model::{ScrobbleRecord, Session};

#[derive(Debug, Default)]
struct State {
    session: Option<Session>,
    history: Vec<ScrobbleRecord>,
}

/// Non-durable store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out logged in
    pub fn with_session(session: Session) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                session: Some(session),
                history: Vec::new(),
            })),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self) -> Result<Option<Session>, StorageError> {
        Ok(self.state.lock().await.session.clone())
    }

    async fn set(&self, session: &Session) -> Result<(), StorageError> {
        self.state.lock().await.session = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.state.lock().await.session = None;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<ScrobbleRecord>, StorageError> {
        Ok(self.state.lock().await.history.clone())
    }

    async fn append(&self, record: ScrobbleRecord) -> Result<(), StorageError> {
        push_bounded(&mut self.state.lock().await.history, record);
        Ok(())
    }
}
