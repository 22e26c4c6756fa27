//! Barcode lookup - resolves a scanned release barcode to album metadata.
//!
//! # Architecture
//!
//! Same layering as every external integration in this crate:
//! - **Domain** (`domain.rs`) - lookup errors and barcode normalization
//! - **API DTOs** (`musicbrainz/dto.rs`) - exact API response shapes
//! - **Adapter** (`musicbrainz/adapter.rs`) - converts DTOs into [`crate::model::Album`]
//! - **Clients** - HTTP clients for MusicBrainz and the Cover Art Archive
//! - **Rate gate** - per-origin request pacing shared by MusicBrainz clients
//! - **Service** - [`MetadataResolver`], the orchestration of the lookup
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use lookup::{MetadataResolver, RateGate, ResolverConfig};
//!
//! let resolver = MetadataResolver::new(&ResolverConfig::default(), Arc::new(RateGate::new()));
//! match resolver.resolve("724385522925").await? {
//!     Some(album) => println!("{} - {}", album.artist, album.title),
//!     None => println!("Not in MusicBrainz"),
//! }
//! ```

pub mod coverart;
pub mod domain;
pub mod musicbrainz;
pub mod rate_gate;
pub mod service;
pub mod traits;

pub use coverart::CoverSize;
pub use domain::LookupError;
pub use rate_gate::RateGate;
pub use service::{MetadataResolver, ResolverConfig};
