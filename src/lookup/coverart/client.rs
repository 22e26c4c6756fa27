//! Cover Art Archive HTTP client
//!
//! Finds album artwork in the Cover Art Archive.
//! No API key required, and it is not subject to the MusicBrainz rate limit.
//!
//! API: https://coverartarchive.org

use serde::{Deserialize, Serialize};

use crate::lookup::domain::LookupError;

/// Default Cover Art Archive root
pub const DEFAULT_BASE_URL: &str = "https://coverartarchive.org";

/// Desired cover art thumbnail size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverSize {
    /// 250px thumbnail (default)
    #[default]
    Small,
    /// 500px thumbnail
    Medium,
    /// 1200px thumbnail
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "-250",
            CoverSize::Medium => "-500",
            CoverSize::Large => "-1200",
        }
    }
}

/// Cover Art Archive client
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the front cover thumbnail for a MusicBrainz release.
    ///
    /// The archive answers with a redirect to the image; the final URL after
    /// redirects is what we hand back. The image body itself is not downloaded.
    pub async fn front_cover_url(
        &self,
        release_id: &str,
        size: CoverSize,
    ) -> Result<String, LookupError> {
        let url = front_cover_request_url(&self.base_url, release_id, size);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            return Err(LookupError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response.url().to_string())
    }
}

impl Default for CoverArtClient {
    fn default() -> Self {
        Self::new()
    }
}

fn front_cover_request_url(base_url: &str, release_id: &str, size: CoverSize) -> String {
    format!(
        "{}/release/{}/front{}",
        base_url,
        urlencoding::encode(release_id),
        size.suffix()
    )
}
