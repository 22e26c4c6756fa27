//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where MusicBrainz DTO types are converted to
//! domain types. Artist data comes from the search hit (the detail lookup
//! with `inc=recordings` does not include credits), tracks from the detail.

use super::dto;
use crate::model::{Album, Track, UNKNOWN_ARTIST};

/// Build an [`Album`] from the search hit and its full release detail.
pub fn to_album(
    hit: &dto::Release,
    detail: &dto::Release,
    barcode: &str,
    cover_art_url: Option<String>,
) -> Album {
    let (artist, artist_id) = primary_artist(&hit.artist_credit);

    Album {
        id: hit.id.clone(),
        title: hit.title.clone(),
        artist,
        artist_id,
        release_date: hit.date.clone().unwrap_or_default(),
        barcode: barcode.to_string(),
        tracks: flatten_tracks(&detail.media),
        cover_art_url,
    }
}

/// Name and ID of the first credited artist, with the unknown-artist fallback.
fn primary_artist(credits: &[dto::ArtistCredit]) -> (String, String) {
    let Some(credit) = credits.first() else {
        return (UNKNOWN_ARTIST.to_string(), String::new());
    };

    // Credited name first, then the artist's official name
    let name = credit
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| credit.artist.as_ref().map(|a| a.name.clone()))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let id = credit
        .artist
        .as_ref()
        .map(|a| a.id.clone())
        .unwrap_or_default();

    (name, id)
}

/// Flatten every medium's tracks into one sequence, keeping source order.
fn flatten_tracks(media: &[dto::Medium]) -> Vec<Track> {
    media
        .iter()
        .flat_map(|medium| medium.tracks.iter())
        .enumerate()
        .map(|(index, track)| {
            let recording = track.recording.as_ref();
            let name = track
                .title
                .clone()
                .or_else(|| recording.map(|r| r.title.clone()))
                .unwrap_or_default();
            let length = track.length.or_else(|| recording.and_then(|r| r.length));
            // Positions are per medium; only synthesize one when the source omits it
            let position = track.position.unwrap_or(index as u32 + 1);

            Track::from_source_length(name, length, position)
        })
        .collect()
}
