//! Cover Art Archive integration
//!
//! Finds album artwork on coverartarchive.org using MusicBrainz release IDs.

mod client;

pub use client::{CoverArtClient, CoverSize, DEFAULT_BASE_URL};
