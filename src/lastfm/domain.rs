//! Errors for the Last.fm pipeline.

use crate::storage::StorageError;

/// Fallback message when Last.fm rejects authentication without saying why
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Fallback message when Last.fm rejects a scrobble without saying why
pub const SCROBBLE_FAILED_MESSAGE: &str = "Scrobble failed";

/// Errors that can occur while talking to Last.fm
#[derive(Debug, thiserror::Error)]
pub enum ScrobbleError {
    #[error("Not authenticated with Last.fm")]
    NotAuthenticated,

    /// Provider rejected the auth exchange; carries its message verbatim
    #[error("{0}")]
    AuthenticationFailed(String),

    /// Provider rejected the submission; carries its message verbatim
    #[error("{0}")]
    ScrobbleFailed(String),

    /// A caller tried to set a parameter the signer owns
    #[error("Cannot sign request: {0}")]
    Signature(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
