//! Trait definitions for the lookup pipeline's external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.

use async_trait::async_trait;

use super::coverart::CoverSize;
use super::domain::LookupError;
use super::musicbrainz::dto;

/// Trait for MusicBrainz release lookup.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// Search releases by barcode, best match first.
    async fn search_by_barcode(&self, barcode: &str) -> Result<Vec<dto::Release>, LookupError>;

    /// Fetch a release including its recordings.
    async fn lookup_release(&self, release_id: &str) -> Result<dto::Release, LookupError>;
}

/// Trait for Cover Art Archive lookup.
#[async_trait]
pub trait CoverArtApi: Send + Sync {
    /// Resolve the URL of the front cover for a release.
    async fn front_cover_url(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<String, LookupError>;
}

// Implement traits for real clients

#[async_trait]
impl MusicBrainzApi for super::musicbrainz::MusicBrainzClient {
    async fn search_by_barcode(&self, barcode: &str) -> Result<Vec<dto::Release>, LookupError> {
        self.search_by_barcode(barcode).await
    }

    async fn lookup_release(&self, release_id: &str) -> Result<dto::Release, LookupError> {
        self.lookup_release(release_id).await
    }
}

#[async_trait]
impl CoverArtApi for super::coverart::CoverArtClient {
    async fn front_cover_url(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<String, LookupError> {
        self.front_cover_url(release_id, size).await
    }
}
