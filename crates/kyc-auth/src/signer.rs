//! HMAC request signer producing the provider's authentication headers.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::digest::hex_digest;

/// Header carrying the application token.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";
/// Header carrying the unix timestamp (decimal seconds) the request was signed at.
pub const TIMESTAMP_HEADER: &str = "X-App-Access-Ts";
/// Header carrying the lowercase hex HMAC-SHA256 request signature.
pub const SIGNATURE_HEADER: &str = "X-App-Access-Sig";

/// The three authentication headers attached to every outbound API call.
///
/// Produced once per call by [`RequestSigner::sign`] and discarded after the
/// request is sent. No other headers are part of the authentication contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Application token identifying the API credential pair.
    pub app_token: String,
    /// Decimal unix seconds the signature was computed at.
    pub timestamp: String,
    /// Lowercase hex HMAC-SHA256 over the canonical signing string.
    pub signature: String,
}

impl AuthHeaders {
    /// Header name/value pairs in a form convenient to attach to a request.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (APP_TOKEN_HEADER, self.app_token.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

/// Signs outbound API requests with a time-boxed HMAC-SHA256 signature.
///
/// The canonical signing string is `<unix-seconds><METHOD><path><body>`,
/// where the body segment is the exact byte sequence that will be
/// transmitted, or nothing at all for body-less requests. Any mismatch
/// between the bytes signed and the bytes sent invalidates the signature
/// silently, so callers must serialize once and hand the same buffer to
/// both the signer and the transport.
///
/// The timestamp is read when [`sign`](Self::sign) is called, not when the
/// request is sent; the race against a narrow server-side freshness window
/// is accepted here.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    app_token: String,
    secret_key: String,
    now: fn() -> u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl RequestSigner {
    /// Create a signer that reads the wall clock at each call.
    pub fn new(app_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::with_clock(app_token, secret_key, unix_now)
    }

    /// Create a signer with an injected clock returning unix seconds.
    ///
    /// Pinning the clock makes signing deterministic for tests and replay
    /// tooling.
    pub fn with_clock(
        app_token: impl Into<String>,
        secret_key: impl Into<String>,
        now: fn() -> u64,
    ) -> Self {
        Self {
            app_token: app_token.into(),
            secret_key: secret_key.into(),
            now,
        }
    }

    /// Sign a request and produce its authentication headers.
    ///
    /// `body` is the serialized request body exactly as it will be
    /// transmitted; pass `None` for body-less requests (no empty-object
    /// marker is appended in that case).
    pub fn sign(&self, method: &str, path: &str, body: Option<&[u8]>) -> AuthHeaders {
        let timestamp = (self.now)().to_string();

        let mut canonical = Vec::with_capacity(
            timestamp.len() + method.len() + path.len() + body.map_or(0, |b| b.len()),
        );
        canonical.extend_from_slice(timestamp.as_bytes());
        canonical.extend_from_slice(method.as_bytes());
        canonical.extend_from_slice(path.as_bytes());
        if let Some(body) = body {
            canonical.extend_from_slice(body);
        }

        AuthHeaders {
            app_token: self.app_token.clone(),
            timestamp,
            signature: hex_digest(self.secret_key.as_bytes(), &canonical),
        }
    }
}
