//! Last.fm HTTP client
//!
//! Sends signed requests to the Last.fm 2.0 web service and returns the raw
//! body. Interpreting error payloads is left to the caller, because Last.fm
//! reports most failures as JSON with a 4xx status.
//!
//! See: https://www.last.fm/api/rest

use super::domain::ScrobbleError;
use super::request::SignedRequest;

/// Default Last.fm API root
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Last.fm API client
pub struct LastFmHttpClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl LastFmHttpClient {
    /// Create a new client
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom API root
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(crate::lookup::musicbrainz::USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_url: api_url.into(),
        }
    }

    /// Signed GET with the parameters in the query string
    pub async fn get(&self, request: &SignedRequest) -> Result<String, ScrobbleError> {
        tracing::debug!("Last.fm GET {}", request.method());
        let response = self
            .http_client
            .get(&self.api_url)
            .query(request.params())
            .send()
            .await
            .map_err(|e| ScrobbleError::Network(e.to_string()))?;

        read_body(response).await
    }

    /// Signed POST with a form-encoded body
    pub async fn post(&self, request: &SignedRequest) -> Result<String, ScrobbleError> {
        tracing::debug!("Last.fm POST {}", request.method());
        let response = self
            .http_client
            .post(&self.api_url)
            .form(request.params())
            .send()
            .await
            .map_err(|e| ScrobbleError::Network(e.to_string()))?;

        read_body(response).await
    }
}

impl Default for LastFmHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the body, unless a failed status came without a JSON payload to explain it
async fn read_body(response: reqwest::Response) -> Result<String, ScrobbleError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ScrobbleError::Network(e.to_string()))?;

    if !status.is_success() && !body.trim_start().starts_with('{') {
        return Err(ScrobbleError::Network(format!(
            "HTTP {}: {} - {}",
            status,
            status.canonical_reason().unwrap_or("Unknown"),
            body.chars().take(200).collect::<String>()
        )));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lastfm::request::RequestBuilder;
    use crate::lastfm::signer::Signer;
    use crate::test_utils::{TestResponse, TestServer};

    fn client_for(server: &TestServer) -> LastFmHttpClient {
        LastFmHttpClient::with_api_url(format!("{}/2.0/", server.base_url()))
    }

    fn scrobble_request() -> SignedRequest {
        RequestBuilder::new("track.scrobble", "abc123")
            .session("sk-1")
            .param("artist[0]", "Test Artist")
            .param("track[0]", "Track 1")
            .sign(&Signer::new("s3cr3t"))
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = LastFmHttpClient::new();
        assert_eq!(client.api_url, "https://ws.audioscrobbler.com/2.0/");
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = LastFmHttpClient::with_api_url("http://localhost:8080/2.0/");
        assert_eq!(client.api_url, "http://localhost:8080/2.0/");
    }

    #[tokio::test]
    async fn test_get_sends_query_string() {
        let server = TestServer::start(vec![TestResponse::json(200, r#"{"session": {}}"#)]).await;
        let request = RequestBuilder::new("auth.getSession", "abc123")
            .param("token", "tok456")
            .sign(&Signer::new("s3cr3t"))
            .unwrap();

        let body = client_for(&server).get(&request).await.unwrap();
        assert_eq!(body, r#"{"session": {}}"#);

        let sent = &server.requests()[0];
        assert_eq!(sent.method, "GET");
        assert!(sent.target.starts_with("/2.0/?"));
        assert!(sent.target.contains("method=auth.getSession"));
        assert!(sent.target.contains("token=tok456"));
        assert!(sent.target.contains("api_sig=fe33d55b0a85f50793869f537e04de79"));
        assert!(sent.target.ends_with("format=json"));
        assert!(sent.body.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let server = TestServer::start(vec![TestResponse::json(200, r#"{"scrobbles": {}}"#)]).await;

        client_for(&server).post(&scrobble_request()).await.unwrap();

        let sent = &server.requests()[0];
        assert_eq!(sent.method, "POST");
        assert_eq!(sent.target, "/2.0/");
        assert_eq!(
            sent.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(sent.body.contains("method=track.scrobble"));
        assert!(sent.body.contains("artist%5B0%5D=Test+Artist"));
        assert!(sent.body.contains("sk=sk-1"));
        assert!(sent.body.ends_with("format=json"));
    }

    #[tokio::test]
    async fn test_json_error_body_is_returned() {
        let payload = r#"{"error": 9, "message": "Invalid session key"}"#;
        let server = TestServer::start(vec![TestResponse::json(403, payload)]).await;

        let body = client_for(&server).post(&scrobble_request()).await.unwrap();
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_non_json_failure_is_network_error() {
        let server = TestServer::start(vec![TestResponse::text(502, "Bad Gateway")]).await;

        let err = client_for(&server).post(&scrobble_request()).await.unwrap_err();
        assert!(matches!(err, ScrobbleError::Network(ref msg) if msg.contains("502")));
    }
}
