//! Last.fm integration - authentication and scrobble submission.
//!
//! # Architecture
//!
//! - **Signer** (`signer.rs`) - the `api_sig` MD5 canonicalization
//! - **Requests** (`request.rs`) - parameter maps, signed once before sending
//! - **API DTOs** (`dto.rs`) - exact response shapes, including error payloads
//! - **Client** (`client.rs`) - HTTP transport, behind the [`traits::LastFmApi`] trait
//! - **Service** (`service.rs`) - [`ScrobbleClient`]: auth flow, batch submission
//!
//! Last.fm calls are not rate-gated; they never share a budget with MusicBrainz.

pub mod client;
pub mod domain;
pub mod dto;
pub mod request;
pub mod service;
pub mod signer;
pub mod traits;

pub use domain::ScrobbleError;
pub use service::{LastFmConfig, MAX_SCROBBLES_PER_REQUEST, ScrobbleClient, plan_scrobbles};
pub use signer::Signer;
