//! Signed Last.fm API requests.
//!
//! A request is built up as a plain parameter map, then signed once: the
//! signature is computed over everything present, appended as `api_sig`,
//! and `format=json` goes last. Signed requests are never persisted.

use std::collections::BTreeMap;

use super::domain::ScrobbleError;
use super::signer::Signer;

/// Parameters the signing step adds itself
const RESERVED_PARAMS: [&str; 2] = ["api_sig", "format"];

/// Unsigned Last.fm call under construction
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    params: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Start a call to `method` (e.g. `auth.getSession`)
    pub fn new(method: &str, api_key: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("method".to_string(), method.to_string());
        params.insert("api_key".to_string(), api_key.to_string());
        Self { params }
    }

    /// Authenticate the call with a session key
    pub fn session(self, session_key: &str) -> Self {
        self.param("sk", session_key)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Compute `api_sig` and freeze the request.
    pub fn sign(self, signer: &Signer) -> Result<SignedRequest, ScrobbleError> {
        if let Some(reserved) = RESERVED_PARAMS
            .iter()
            .find(|key| self.params.contains_key(**key))
        {
            return Err(ScrobbleError::Signature(format!(
                "parameter `{}` is set by the signer",
                reserved
            )));
        }

        let api_sig = signer.sign(&self.params);

        let mut params: Vec<(String, String)> = self.params.into_iter().collect();
        params.push(("api_sig".to_string(), api_sig));
        params.push(("format".to_string(), "json".to_string()));

        Ok(SignedRequest { params })
    }
}

/// A signed call, ready to send as a query string or form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: Vec<(String, String)>,
}

impl SignedRequest {
    /// All parameters in wire order: signed parameters, `api_sig`, `format`
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn method(&self) -> &str {
        self.get("method").unwrap_or_default()
    }
}
