//! MusicBrainz API integration
//!
//! Resolves a barcode to a release and its track listing.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use adapter::to_album;
pub use client::{DEFAULT_BASE_URL, MusicBrainzClient, USER_AGENT};
