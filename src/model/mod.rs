//! Core data models shared by the lookup and scrobbling pipelines.
//!
//! Defines the primary entities: [`Track`], [`Album`], [`Session`] and
//! [`ScrobbleRecord`]. These are OUR types; MusicBrainz and Last.fm responses
//! are converted into them by adapters and never leak past their modules.

use serde::{Deserialize, Serialize};

/// Duration assumed for a track when the metadata source has no length.
pub const DEFAULT_TRACK_DURATION_SECS: u32 = 180;

/// Artist name used when a release carries no artist credit.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A single track on a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub name: String,
    /// Duration in whole seconds
    pub duration: u32,
    /// 1-based position on its medium
    pub position: u32,
}

impl Track {
    /// Build a track from a source length in milliseconds.
    ///
    /// Missing lengths become [`DEFAULT_TRACK_DURATION_SECS`]; present lengths
    /// are floored to whole seconds.
    pub fn from_source_length(name: impl Into<String>, length_ms: Option<u64>, position: u32) -> Self {
        let duration = length_ms
            .map(|ms| u32::try_from(ms / 1000).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_TRACK_DURATION_SECS);

        Self {
            name: name.into(),
            duration,
            position,
        }
    }

    /// Duration to report when scrobbling. Zero-length tracks count as the default.
    pub fn scrobble_duration(&self) -> u32 {
        if self.duration == 0 {
            DEFAULT_TRACK_DURATION_SECS
        } else {
            self.duration
        }
    }
}

/// A release resolved from a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// MusicBrainz release ID
    pub id: String,
    pub title: String,
    /// Primary credited artist name
    pub artist: String,
    /// MusicBrainz artist ID (empty when unknown)
    pub artist_id: String,
    /// Release date as given by the source (YYYY, YYYY-MM, YYYY-MM-DD or empty)
    pub release_date: String,
    /// The barcode this release was looked up by
    pub barcode: String,
    /// Tracks in source order across all media
    pub tracks: Vec<Track>,
    /// Front cover thumbnail URL, if the archive had one
    pub cover_art_url: Option<String>,
}

impl Album {
    /// Total running time in seconds.
    pub fn total_duration(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration)).sum()
    }
}

/// An authenticated Last.fm session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    /// Opaque session key (`sk`), the credential for authenticated calls
    pub session_key: String,
    pub profile_image_url: Option<String>,
}

// Keep the session key out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("session_key", &"<redacted>")
            .field("profile_image_url", &self.profile_image_url)
            .finish()
    }
}

/// A track as it was submitted, with its synthesized play time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrobbledTrack {
    pub name: String,
    /// Unix timestamp (seconds) sent to Last.fm
    pub timestamp: i64,
}

/// History entry written after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrobbleRecord {
    pub album: Album,
    /// Unix timestamp (seconds) of the submission
    pub submitted_at: i64,
    pub tracks: Vec<ScrobbledTrack>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_duration_floors_milliseconds() {
        let track = Track::from_source_length("Song", Some(200_999), 1);
        assert_eq!(track.duration, 200);
    }

    #[test]
    fn test_track_duration_defaults_when_missing() {
        let track = Track::from_source_length("Song", None, 3);
        assert_eq!(track.duration, DEFAULT_TRACK_DURATION_SECS);
        assert_eq!(track.position, 3);
    }

    #[test]
    fn test_zero_length_scrobbles_as_default() {
        let track = Track::from_source_length("Intro", Some(400), 1);
        assert_eq!(track.duration, 0);
        assert_eq!(track.scrobble_duration(), DEFAULT_TRACK_DURATION_SECS);
    }

    #[test]
    fn test_session_debug_redacts_key() {
        let session = Session {
            username: "listener".to_string(),
            session_key: "super-secret-key".to_string(),
            profile_image_url: None,
        };
        let debug = format!("{:?}", session);
        assert!(debug.contains("listener"));
        assert!(!debug.contains("super-secret-key"));
    }
}
