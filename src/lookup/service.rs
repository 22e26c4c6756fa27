//! Metadata resolver - orchestrates barcode → album resolution
//!
//! This is the high-level API for the lookup pipeline:
//! 1. Search MusicBrainz releases by barcode (rate-gated)
//! 2. Take the first match as-is
//! 3. Fetch the release's track listing (rate-gated)
//! 4. Try the Cover Art Archive for a front cover (optional, never fails the lookup)
//!
//! When several releases share a barcode, the first search result wins.
//! MusicBrainz ordering is trusted; there is no disambiguation step.

use std::sync::Arc;

use crate::lookup::{
    coverart::{CoverArtClient, CoverSize},
    domain::{LookupError, normalize_barcode},
    musicbrainz::{self, MusicBrainzClient},
    rate_gate::RateGate,
    traits::{CoverArtApi, MusicBrainzApi},
};
use crate::model::Album;

/// Configuration for the metadata resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// MusicBrainz web service root
    pub musicbrainz_url: String,
    /// Cover Art Archive root
    pub cover_art_url: String,
    /// Preferred cover art size
    pub cover_size: CoverSize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            musicbrainz_url: musicbrainz::DEFAULT_BASE_URL.to_string(),
            cover_art_url: crate::lookup::coverart::DEFAULT_BASE_URL.to_string(),
            cover_size: CoverSize::Small,
        }
    }
}

/// Resolves scanned barcodes to albums
pub struct MetadataResolver<M = MusicBrainzClient, C = CoverArtClient> {
    musicbrainz: M,
    coverart: C,
    cover_size: CoverSize,
}

impl MetadataResolver {
    /// Create a resolver backed by the real web services.
    ///
    /// `gate` should be shared with any other MusicBrainz client in the process.
    pub fn new(config: &ResolverConfig, gate: Arc<RateGate>) -> Self {
        Self {
            musicbrainz: MusicBrainzClient::with_base_url(&config.musicbrainz_url, gate),
            coverart: CoverArtClient::with_base_url(&config.cover_art_url),
            cover_size: config.cover_size,
        }
    }
}

impl<M: MusicBrainzApi, C: CoverArtApi> MetadataResolver<M, C> {
    /// Create a resolver from explicit clients
    pub fn with_clients(musicbrainz: M, coverart: C, cover_size: CoverSize) -> Self {
        Self {
            musicbrainz,
            coverart,
            cover_size,
        }
    }

    /// Resolve a barcode to an album.
    ///
    /// Returns `Ok(None)` when MusicBrainz has no release with this barcode.
    /// Errors mean the metadata could not be fetched at all.
    ///
    /// The album keeps the barcode exactly as given; only the search uses the
    /// normalized form.
    pub async fn resolve(&self, input: &str) -> Result<Option<Album>, LookupError> {
        let barcode = normalize_barcode(input)?;

        // Step 1: Search by barcode
        let matches = self.musicbrainz.search_by_barcode(&barcode).await?;

        // Step 2: First match wins
        let Some(hit) = matches.into_iter().next() else {
            tracing::info!("No MusicBrainz release found for barcode {}", barcode);
            return Ok(None);
        };

        // Step 3: Full track listing
        let detail = self.musicbrainz.lookup_release(&hit.id).await?;

        // Step 4: Cover art is optional
        let cover_art_url = self.find_cover_art(&hit.id).await;

        let album = musicbrainz::to_album(&hit, &detail, input, cover_art_url);
        tracing::info!(
            "Resolved barcode {} to \"{}\" by {} ({} tracks)",
            barcode,
            album.title,
            album.artist,
            album.tracks.len()
        );

        Ok(Some(album))
    }

    async fn find_cover_art(&self, release_id: &str) -> Option<String> {
        match self
            .coverart
            .front_cover_url(release_id, self.cover_size)
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                // Log but don't fail - the album is complete without artwork
                tracing::debug!("No cover art for release {}: {}", release_id, e);
                None
            }
        }
    }
}
