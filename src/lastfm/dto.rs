//! Last.fm API Data Transfer Objects
//!
//! These types match what the Last.fm 2.0 JSON API returns.
//! DO NOT use these types outside the lastfm module - convert to domain types.
//!
//! API Reference: https://www.last.fm/api
//!
//! Last.fm signals failures in the body (`{"error": 4, "message": "..."}`),
//! often alongside a 4xx status, so every body is checked for an error
//! payload before it is parsed as a success.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Either a success payload or a Last.fm error payload
#[derive(Debug, Clone)]
pub enum ApiResponse<T> {
    Ok(T),
    Error(ApiError),
}

/// Error payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    /// Numeric error code (e.g. 4 = invalid token, 9 = invalid session key)
    pub error: serde_json::Value,
    /// Human-readable message
    pub message: Option<String>,
}

impl ApiError {
    pub fn code(&self) -> Option<i64> {
        self.error.as_i64()
    }
}

/// Parse a response body, recognizing error payloads first.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if value.get("error").is_some() {
        return Ok(ApiResponse::Error(serde_json::from_value(value)?));
    }

    Ok(ApiResponse::Ok(serde_json::from_value(value)?))
}

/// `auth.getSession` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionResponse {
    pub session: SessionInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionInfo {
    /// Username
    pub name: String,
    /// Session key (never expires unless revoked)
    pub key: String,
}

/// `user.getInfo` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInfoResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInfo {
    pub name: String,
    /// Profile images in several sizes
    #[serde(default)]
    pub image: Vec<Image>,
}

/// One size of an image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// small, medium, large, extralarge
    pub size: String,
    /// Image URL (empty when the user has no picture)
    #[serde(rename = "#text", default)]
    pub url: String,
}

/// `track.scrobble` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrobbleResponse {
    pub scrobbles: Scrobbles,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scrobbles {
    #[serde(rename = "@attr")]
    pub attr: Option<ScrobbleCounts>,
}

/// Accepted/ignored counts for a batch
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrobbleCounts {
    #[serde(default)]
    pub accepted: Count,
    #[serde(default)]
    pub ignored: Count,
}

/// A count that Last.fm sometimes sends as a string
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Count {
    Number(u32),
    Text(String),
}

impl Default for Count {
    fn default() -> Self {
        Count::Number(0)
    }
}

impl Count {
    pub fn value(&self) -> u32 {
        match self {
            Count::Number(n) => *n,
            Count::Text(s) => s.parse().unwrap_or(0),
        }
    }
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
