//! Last.fm request signing.
//!
//! `api_sig` is the MD5 of every parameter (except `api_sig` and `format`)
//! as `key + value`, keys sorted by byte order, with the shared secret
//! appended. Lower-case hex, 32 characters. The server recomputes it, so
//! this has to be bit-exact.
//!
//! See: https://www.last.fm/api/authspec#_8-signing-calls

/// Parameter names that never take part in the signature
const UNSIGNED_PARAMS: [&str; 2] = ["api_sig", "format"];

/// Computes `api_sig` values with the application's shared secret
#[derive(Clone)]
pub struct Signer {
    secret: String,
}

impl Signer {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Sign a set of parameters. Insertion order does not matter.
    pub fn sign<I, K, V>(&self, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pairs: Vec<(K, V)> = params
            .into_iter()
            .filter(|(key, _)| !UNSIGNED_PARAMS.contains(&key.as_ref()))
            .collect();
        pairs.sort_by(|a, b| a.0.as_ref().as_bytes().cmp(b.0.as_ref().as_bytes()));

        let mut payload = String::new();
        for (key, value) in &pairs {
            payload.push_str(key.as_ref());
            payload.push_str(value.as_ref());
        }
        payload.push_str(&self.secret);

        format!("{:x}", md5::compute(payload.as_bytes()))
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("secret", &"<redacted>").finish()
    }
}
