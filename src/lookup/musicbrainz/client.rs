//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.
//! Every request goes through the shared [`RateGate`] first.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::dto;
use crate::lookup::domain::LookupError;
use crate::lookup::rate_gate::RateGate;

/// Default MusicBrainz web service root
pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// User agent string - MusicBrainz requires this
pub const USER_AGENT: &str = concat!(
    "scribbl-scrobbl/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/user/scribbl-scrobbl)"
);

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    /// Key under which requests are paced by the gate
    origin: String,
    gate: Arc<RateGate>,
}

impl MusicBrainzClient {
    /// Create a new client pacing its requests through `gate`
    pub fn new(gate: Arc<RateGate>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, gate)
    }

    /// Create a client against a custom base URL (mirrors, tests)
    pub fn with_base_url(base_url: impl Into<String>, gate: Arc<RateGate>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let origin = origin_key(&base_url);

        Self {
            http_client,
            base_url,
            origin,
            gate,
        }
    }

    /// Search releases by barcode. An empty list means no match.
    pub async fn search_by_barcode(&self, barcode: &str) -> Result<Vec<dto::Release>, LookupError> {
        let response: dto::ReleaseSearchResponse =
            self.get_json(&self.search_url(barcode)).await?;
        Ok(response.releases)
    }

    /// Fetch a release with its full track listing
    pub async fn lookup_release(&self, release_id: &str) -> Result<dto::Release, LookupError> {
        self.get_json(&self.release_url(release_id)).await
    }

    fn search_url(&self, barcode: &str) -> String {
        format!(
            "{}/release?query=barcode:{}&fmt=json",
            self.base_url,
            urlencoding::encode(barcode)
        )
    }

    fn release_url(&self, release_id: &str) -> String {
        format!(
            "{}/release/{}?inc=recordings&fmt=json",
            self.base_url,
            urlencoding::encode(release_id)
        )
    }

    /// Send a rate-gated GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        self.gate.acquire(&self.origin).await;
        tracing::debug!("MusicBrainz request: {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        {
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            // Try to parse error response
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(LookupError::Api(error.error));
            }
            return Err(LookupError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

/// Rate-gate key for a base URL: its host, or the URL itself if it has none.
fn origin_key(base_url: &str) -> String {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| base_url.to_string())
}
