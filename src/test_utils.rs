//! Test utilities and fixtures for scribbl-scrobbl tests.
//!
//! This module provides common test helpers and fixtures to reduce
//! boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_store, mock_album};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (store, _dir) = temp_store().await;
//!     let album = mock_album(&[200, 150, 180]);
//!     // ... test logic
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::lookup::musicbrainz::dto;
use crate::model::{Album, ScrobbleRecord, ScrobbledTrack, Session, Track};
use crate::storage::{SqliteStore, db_url};

/// Creates a temporary SQLite store for testing.
///
/// The database lives in a temporary directory that is deleted when the
/// returned `TempDir` is dropped. Keep it alive for the duration of the test.
pub async fn temp_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let url = db_url(Some(dir.path().join("test.db").as_path()));

    let store = SqliteStore::open(&url)
        .await
        .expect("Failed to initialize test database");

    (store, dir)
}

/// An album by "Test Artist" with one track per given duration.
///
/// Tracks are named "Track 1", "Track 2", ...
pub fn mock_album(durations: &[u32]) -> Album {
    Album {
        id: "release-id".to_string(),
        title: "Test Album".to_string(),
        artist: "Test Artist".to_string(),
        artist_id: "artist-id".to_string(),
        release_date: "2020-01-01".to_string(),
        barcode: "0000000000000".to_string(),
        tracks: durations
            .iter()
            .enumerate()
            .map(|(i, &duration)| Track {
                name: format!("Track {}", i + 1),
                duration,
                position: i as u32 + 1,
            })
            .collect(),
        cover_art_url: None,
    }
}

/// A logged-in session for "listener".
pub fn mock_session() -> Session {
    Session {
        username: "listener".to_string(),
        session_key: "test-session-key".to_string(),
        profile_image_url: Some("https://img.example.com/listener.png".to_string()),
    }
}

/// A history record for an album titled `title`, submitted at `submitted_at`.
pub fn mock_record(title: &str, submitted_at: i64) -> ScrobbleRecord {
    let album = Album {
        title: title.to_string(),
        ..mock_album(&[180])
    };
    ScrobbleRecord {
        tracks: vec![ScrobbledTrack {
            name: "Track 1".to_string(),
            timestamp: submitted_at,
        }],
        album,
        submitted_at,
    }
}

/// A MusicBrainz search hit credited to "Test Artist".
pub fn mock_search_hit(release_id: &str) -> dto::Release {
    dto::Release {
        id: release_id.to_string(),
        title: "Test Album".to_string(),
        date: Some("2020-01-01".to_string()),
        barcode: Some("724385522925".to_string()),
        status: Some("Official".to_string()),
        artist_credit: vec![dto::ArtistCredit {
            name: Some("Test Artist".to_string()),
            artist: Some(dto::Artist {
                id: "artist-id".to_string(),
                name: "Test Artist".to_string(),
                sort_name: None,
            }),
            joinphrase: None,
        }],
        media: vec![],
    }
}

/// Full release detail with `track_count` three-minute tracks on one disc.
pub fn mock_release_detail(release_id: &str, track_count: u32) -> dto::Release {
    let tracks = (1..=track_count)
        .map(|position| dto::Track {
            id: Some(format!("track-{}", position)),
            position: Some(position),
            number: Some(position.to_string()),
            title: Some(format!("Track {}", position)),
            length: Some(180_000),
            recording: None,
        })
        .collect();

    dto::Release {
        artist_credit: vec![],
        media: vec![dto::Medium {
            position: Some(1),
            format: Some("CD".to_string()),
            track_count: Some(track_count),
            tracks,
        }],
        ..mock_search_hit(release_id)
    }
}

// ============================================================================
// Local HTTP server
// ============================================================================

/// A canned HTTP response, served in order by [`TestServer`]
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl TestResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: body.to_string(),
        }
    }

    /// 307 to `location` (absolute path on the same server is fine)
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 307,
            headers: vec![("Location".to_string(), location.to_string())],
            body: String::new(),
        }
    }
}

/// A request as the server saw it. Header names are lowercased.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, exactly as sent
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub received_at: Instant,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Minimal HTTP/1.1 server on 127.0.0.1 answering one request per connection.
///
/// Requests past the end of the script get a plain-text 500.
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(responses: Vec<TestResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Test server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            let mut script = responses.into_iter();
            while let Ok((mut socket, _)) = listener.accept().await {
                let Some(request) = read_request(&mut socket).await else {
                    continue;
                };
                recorded.lock().unwrap().push(request);

                let response = script
                    .next()
                    .unwrap_or_else(|| TestResponse::text(500, "unscripted request"));
                let _ = write_response(&mut socket, &response).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            task,
        }
    }

    /// `http://127.0.0.1:<port>` without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };
    let received_at = Instant::now();

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).into_owned();

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
        received_at,
    })
}

async fn write_response(socket: &mut TcpStream, response: &TestResponse) -> std::io::Result<()> {
    let mut head = format!(
        "HTTP/1.1 {} Scripted\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    socket.write_all(head.as_bytes()).await?;
    socket.write_all(response.body.as_bytes()).await?;
    socket.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_album_durations() {
        let album = mock_album(&[200, 150]);
        assert_eq!(album.tracks.len(), 2);
        assert_eq!(album.tracks[1].name, "Track 2");
        assert_eq!(album.total_duration(), 350);
    }

    #[tokio::test]
    async fn test_temp_store_opens() {
        let (store, dir) = temp_store().await;
        assert!(dir.path().join("test.db").exists());
        drop(store);
    }

    #[tokio::test]
    async fn test_server_records_and_replies() {
        let server = TestServer::start(vec![TestResponse::json(201, r#"{"ok": true}"#)]).await;

        let response = reqwest::Client::new()
            .post(format!("{}/echo?x=1", server.base_url()))
            .body("hello")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
        assert_eq!(response.text().await.unwrap(), r#"{"ok": true}"#);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].target, "/echo?x=1");
        assert_eq!(requests[0].body, "hello");
    }
}
