//! Errors for the barcode lookup pipeline.
//!
//! A release that simply isn't in MusicBrainz is NOT an error: resolvers
//! return `Ok(None)` for that. Everything here means the metadata could not
//! be obtained at all.

/// Errors that can occur while resolving a barcode
#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid barcode: {0:?}")]
    InvalidBarcode(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited by metadata provider")]
    RateLimited,
}

/// Normalize a scanned barcode: drop surrounding whitespace, inner spaces and hyphens.
pub fn normalize_barcode(raw: &str) -> Result<String, LookupError> {
    let barcode: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if barcode.is_empty() {
        return Err(LookupError::InvalidBarcode(raw.to_string()));
    }

    Ok(barcode)
}
