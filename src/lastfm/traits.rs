//! Transport trait for the Last.fm client.
//!
//! [`ScrobbleClient`](super::ScrobbleClient) only needs "send this signed
//! request, give me the body". Tests substitute a mock that records every
//! request and replays canned bodies.

use async_trait::async_trait;

use super::domain::ScrobbleError;
use super::request::SignedRequest;

/// Trait for sending signed Last.fm calls.
#[async_trait]
pub trait LastFmApi: Send + Sync {
    /// Signed GET (`auth.getSession`, `user.getInfo`)
    async fn get(&self, request: &SignedRequest) -> Result<String, ScrobbleError>;

    /// Signed form POST (`track.scrobble`)
    async fn post(&self, request: &SignedRequest) -> Result<String, ScrobbleError>;
}

#[async_trait]
impl LastFmApi for super::client::LastFmHttpClient {
    async fn get(&self, request: &SignedRequest) -> Result<String, ScrobbleError> {
        self.get(request).await
    }

    async fn post(&self, request: &SignedRequest) -> Result<String, ScrobbleError> {
        self.post(request).await
    }
}
