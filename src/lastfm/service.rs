//! Scrobble client - Last.fm authentication and batch submission
//!
//! This is the high-level API for the Last.fm side:
//! 1. Send the user to [`ScrobbleClient::auth_url`] to approve the application
//! 2. Exchange the returned token with [`ScrobbleClient::complete_auth`]
//! 3. Submit albums with [`ScrobbleClient::submit_scrobble`]
//!
//! The session is read from the [`SessionStore`] on every call; the client
//! itself holds no credentials besides the application key and secret.

use crate::lastfm::{
    client::{DEFAULT_API_URL, LastFmHttpClient},
    domain::{AUTH_FAILED_MESSAGE, SCROBBLE_FAILED_MESSAGE, ScrobbleError},
    dto::{self, ApiResponse},
    request::RequestBuilder,
    signer::Signer,
    traits::LastFmApi,
};
use crate::model::{Album, ScrobbleRecord, ScrobbledTrack, Session};
use crate::storage::{HistoryStore, SessionStore};

/// Last.fm accepts at most this many scrobbles per request
pub const MAX_SCROBBLES_PER_REQUEST: usize = 50;

/// Default Last.fm authorization page
pub const DEFAULT_AUTH_URL: &str = "https://www.last.fm/api/auth/";

/// Profile image sizes, preferred first
const PROFILE_IMAGE_SIZES: [&str; 2] = ["extralarge", "large"];

/// Configuration for the scrobble client
#[derive(Debug, Clone)]
pub struct LastFmConfig {
    /// Application API key (get one at https://www.last.fm/api/account/create)
    pub api_key: String,
    /// Shared secret used to sign requests
    pub api_secret: String,
    /// Where Last.fm redirects after the user approves the application
    pub callback_url: String,
    /// API root
    pub api_url: String,
    /// Authorization page
    pub auth_url: String,
}

impl Default for LastFmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            callback_url: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

impl LastFmConfig {
    /// Authorization page URL. Needs only the API key and callback, no secret.
    pub fn auth_url(&self) -> String {
        build_auth_url(&self.auth_url, &self.api_key, &self.callback_url)
    }
}

fn build_auth_url(auth_url: &str, api_key: &str, callback_url: &str) -> String {
    format!(
        "{}?api_key={}&cb={}",
        auth_url,
        urlencoding::encode(api_key),
        urlencoding::encode(callback_url)
    )
}

/// Authenticates against Last.fm and submits scrobbles
pub struct ScrobbleClient<S, H, A = LastFmHttpClient> {
    api_key: String,
    callback_url: String,
    auth_url: String,
    signer: Signer,
    api: A,
    sessions: S,
    history: H,
}

impl<S: SessionStore, H: HistoryStore> ScrobbleClient<S, H> {
    /// Create a client talking to the real Last.fm API
    pub fn new(config: &LastFmConfig, sessions: S, history: H) -> Self {
        let api = LastFmHttpClient::with_api_url(&config.api_url);
        Self::with_api(config, api, sessions, history)
    }
}

impl<S: SessionStore, H: HistoryStore, A: LastFmApi> ScrobbleClient<S, H, A> {
    /// Create a client with an explicit transport
    pub fn with_api(config: &LastFmConfig, api: A, sessions: S, history: H) -> Self {
        Self {
            api_key: config.api_key.clone(),
            callback_url: config.callback_url.clone(),
            auth_url: config.auth_url.clone(),
            signer: Signer::new(&config.api_secret),
            api,
            sessions,
            history,
        }
    }

    /// URL of the Last.fm page where the user approves this application.
    pub fn auth_url(&self) -> String {
        build_auth_url(&self.auth_url, &self.api_key, &self.callback_url)
    }

    /// Exchange an authorization token for a session and store it.
    pub async fn complete_auth(&self, token: &str) -> Result<Session, ScrobbleError> {
        let request = RequestBuilder::new("auth.getSession", &self.api_key)
            .param("token", token)
            .sign(&self.signer)?;

        let body = self.api.get(&request).await?;
        let info = match parse::<dto::SessionResponse>(&body)? {
            ApiResponse::Ok(dto::SessionResponse { session }) => session,
            ApiResponse::Error(error) => {
                return Err(ScrobbleError::AuthenticationFailed(
                    error.message.unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_string()),
                ));
            }
        };

        let profile_image_url = self.fetch_profile_image(&info.name, &info.key).await;

        let session = Session {
            username: info.name,
            session_key: info.key,
            profile_image_url,
        };
        self.sessions.set(&session).await?;

        tracing::info!("Authenticated with Last.fm as {}", session.username);
        Ok(session)
    }

    /// Look up the user's profile picture. Failure just means no picture.
    async fn fetch_profile_image(&self, username: &str, session_key: &str) -> Option<String> {
        match self.request_user_info(username, session_key).await {
            Ok(ApiResponse::Ok(response)) => select_profile_image(&response.user.image),
            Ok(ApiResponse::Error(error)) => {
                tracing::warn!(
                    "Last.fm user lookup failed: {}",
                    error.message.as_deref().unwrap_or("unknown error")
                );
                None
            }
            Err(e) => {
                tracing::warn!("Last.fm user lookup failed: {}", e);
                None
            }
        }
    }

    async fn request_user_info(
        &self,
        username: &str,
        session_key: &str,
    ) -> Result<ApiResponse<dto::UserInfoResponse>, ScrobbleError> {
        let request = RequestBuilder::new("user.getInfo", &self.api_key)
            .session(session_key)
            .param("user", username)
            .sign(&self.signer)?;
        let body = self.api.get(&request).await?;
        parse(&body)
    }

    /// Scrobble an album as if it had just been played from the start.
    pub async fn submit_scrobble(&self, album: &Album) -> Result<Vec<ScrobbledTrack>, ScrobbleError> {
        self.submit_scrobble_at(album, chrono::Utc::now().timestamp())
            .await
    }

    /// Scrobble an album with the first track starting at `start` (unix seconds).
    pub async fn submit_scrobble_at(
        &self,
        album: &Album,
        start: i64,
    ) -> Result<Vec<ScrobbledTrack>, ScrobbleError> {
        let session = self
            .sessions
            .get()
            .await?
            .ok_or(ScrobbleError::NotAuthenticated)?;

        let scrobbles = plan_scrobbles(album, start);
        if album.tracks.len() > scrobbles.len() {
            tracing::info!(
                "Album has {} tracks; only the first {} are submitted",
                album.tracks.len(),
                scrobbles.len()
            );
        }

        let mut builder =
            RequestBuilder::new("track.scrobble", &self.api_key).session(&session.session_key);
        for (i, (scrobble, track)) in scrobbles.iter().zip(&album.tracks).enumerate() {
            builder = builder
                .param(format!("artist[{}]", i), album.artist.as_str())
                .param(format!("track[{}]", i), scrobble.name.as_str())
                .param(format!("timestamp[{}]", i), scrobble.timestamp.to_string())
                .param(format!("album[{}]", i), album.title.as_str())
                .param(format!("duration[{}]", i), track.scrobble_duration().to_string());
        }
        let request = builder.sign(&self.signer)?;

        let body = self.api.post(&request).await?;
        match parse::<dto::ScrobbleResponse>(&body)? {
            ApiResponse::Ok(response) => {
                if let Some(counts) = response.scrobbles.attr {
                    tracing::info!(
                        "Last.fm accepted {} scrobbles, ignored {}",
                        counts.accepted.value(),
                        counts.ignored.value()
                    );
                }
            }
            ApiResponse::Error(error) => {
                return Err(ScrobbleError::ScrobbleFailed(
                    error
                        .message
                        .unwrap_or_else(|| SCROBBLE_FAILED_MESSAGE.to_string()),
                ));
            }
        }

        let record = ScrobbleRecord {
            album: album.clone(),
            submitted_at: start,
            tracks: scrobbles.clone(),
        };
        self.history.append(record).await?;

        Ok(scrobbles)
    }

    /// Forget the stored session. No network call.
    pub async fn logout(&self) -> Result<(), ScrobbleError> {
        self.sessions.clear().await?;
        Ok(())
    }

    pub async fn current_session(&self) -> Result<Option<Session>, ScrobbleError> {
        Ok(self.sessions.get().await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, ScrobbleError> {
        Ok(self.current_session().await?.is_some())
    }

    /// Past submissions, most recent first
    pub async fn history(&self) -> Result<Vec<ScrobbleRecord>, ScrobbleError> {
        Ok(self.history.list().await?)
    }
}

/// Synthesize play times for the first [`MAX_SCROBBLES_PER_REQUEST`] tracks.
///
/// The first track gets `start`; each following track starts when the
/// previous one ends, in album order.
pub fn plan_scrobbles(album: &Album, start: i64) -> Vec<ScrobbledTrack> {
    let mut clock = start;
    album
        .tracks
        .iter()
        .take(MAX_SCROBBLES_PER_REQUEST)
        .map(|track| {
            let timestamp = clock;
            clock += i64::from(track.scrobble_duration());
            ScrobbledTrack {
                name: track.name.clone(),
                timestamp,
            }
        })
        .collect()
}

/// Pick the largest useful profile image: extralarge, else large.
pub fn select_profile_image(images: &[dto::Image]) -> Option<String> {
    PROFILE_IMAGE_SIZES.iter().find_map(|size| {
        images
            .iter()
            .find(|image| image.size == *size && !image.url.is_empty())
            .map(|image| image.url.clone())
    })
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ScrobbleError> {
    dto::parse_response(body).map_err(|e| ScrobbleError::Parse(e.to_string()))
}
