//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the lookup module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! We use two endpoints:
//! - `/release?query=barcode:...` to search releases by barcode
//! - `/release/{id}?inc=recordings` to get the full track listing

use serde::{Deserialize, Serialize};

/// Release search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseSearchResponse {
    /// Total number of matches on the server
    #[serde(default)]
    pub count: u32,
    /// Matching releases, best match first
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// Release (album/single/EP)
///
/// Search results carry artist credits but no tracks; the detail lookup with
/// `inc=recordings` carries media and tracks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// MusicBrainz release ID
    pub id: String,
    /// Release title
    pub title: String,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    /// Barcode as recorded in MusicBrainz
    pub barcode: Option<String>,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Artist credits
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Media (discs) in this release
    #[serde(default)]
    pub media: Vec<Medium>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// The artist
    pub artist: Option<Artist>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    /// Official artist name
    pub name: String,
    /// Sort name (e.g., "Beatles, The")
    pub sort_name: Option<String>,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    /// Position in release (disc number)
    pub position: Option<u32>,
    /// Format (CD, Vinyl, Digital, etc.)
    pub format: Option<String>,
    /// Number of tracks
    pub track_count: Option<u32>,
    /// Tracks on this medium
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// MusicBrainz track ID
    pub id: Option<String>,
    /// Track position on medium
    pub position: Option<u32>,
    /// Track number (may include disc prefix like "1-5")
    pub number: Option<String>,
    /// Track title (may differ from recording title)
    pub title: Option<String>,
    /// Track length in milliseconds
    pub length: Option<u64>,
    /// Underlying recording
    pub recording: Option<Recording>,
}

/// Recording behind a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    pub id: String,
    pub title: String,
    /// Duration in milliseconds
    pub length: Option<u64>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_empty_search() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 0,
            "offset": 0,
            "releases": []
        }"#;

        let response: ReleaseSearchResponse =
            serde_json::from_str(json).expect("Should parse empty search");

        assert_eq!(response.count, 0);
        assert!(response.releases.is_empty());
    }

    #[test]
    fn test_parse_search_hit() {
        let json = r#"{
            "count": 1,
            "offset": 0,
            "releases": [{
                "id": "b84ee12a-09ef-421b-82de-0441a926375b",
                "score": 100,
                "title": "OK Computer",
                "status": "Official",
                "date": "1997-05-21",
                "barcode": "724385522925",
                "artist-credit": [{
                    "name": "Radiohead",
                    "artist": {
                        "id": "a74b1b7f-71a5-4011-9441-d0b5e4122711",
                        "name": "Radiohead",
                        "sort-name": "Radiohead"
                    }
                }],
                "media": [{"format": "CD", "track-count": 12}]
            }]
        }"#;

        let response: ReleaseSearchResponse =
            serde_json::from_str(json).expect("Should parse search hit");

        let release = &response.releases[0];
        assert_eq!(release.title, "OK Computer");
        assert_eq!(release.barcode.as_deref(), Some("724385522925"));
        assert_eq!(release.artist_credit[0].name.as_deref(), Some("Radiohead"));
        assert_eq!(
            release.artist_credit[0].artist.as_ref().unwrap().id,
            "a74b1b7f-71a5-4011-9441-d0b5e4122711"
        );
        assert!(release.media[0].tracks.is_empty());
    }

    #[test]
    fn test_parse_release_with_recordings() {
        let json = r#"{
            "id": "rel-123",
            "title": "Test Album",
            "date": "2001",
            "media": [{
                "position": 1,
                "format": "CD",
                "track-count": 2,
                "tracks": [
                    {
                        "id": "t1",
                        "position": 1,
                        "number": "1",
                        "title": "Opening",
                        "length": 201500,
                        "recording": {"id": "r1", "title": "Opening", "length": 201500}
                    },
                    {
                        "id": "t2",
                        "position": 2,
                        "number": "2",
                        "title": "Closing",
                        "length": null,
                        "recording": {"id": "r2", "title": "Closing"}
                    }
                ]
            }]
        }"#;

        let release: Release = serde_json::from_str(json).expect("Should parse release detail");

        assert!(release.artist_credit.is_empty());
        let tracks = &release.media[0].tracks;
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].length, Some(201500));
        assert!(tracks[1].length.is_none());
        assert_eq!(tracks[1].recording.as_ref().unwrap().title, "Closing");
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Not Found",
            "help": "For usage, please see: https://musicbrainz.org/development/mmd"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Not Found");
        assert!(error.help.is_some());
    }
}
