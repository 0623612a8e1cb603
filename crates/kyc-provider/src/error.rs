//! Error taxonomy for KYC operations, including the HTTP status classifier.

use std::fmt;

/// Classification of an HTTP error status returned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    /// 400: the request was malformed or semantically invalid.
    BadRequest,
    /// 401 or 403: the credentials were rejected.
    Unauthorized,
    /// 429: the provider is throttling this credential.
    RateLimited,
    /// 500-599: the provider failed internally.
    ServerInternal,
    /// Any other status >= 400.
    Unexpected,
}

impl HttpErrorKind {
    /// Classify a raw status code.
    ///
    /// Returns `None` for codes below 400; those are success-range and
    /// carry no error classification.
    pub fn classify(status: u16) -> Option<Self> {
        match status {
            0..=399 => None,
            400 => Some(Self::BadRequest),
            401 | 403 => Some(Self::Unauthorized),
            429 => Some(Self::RateLimited),
            500..=599 => Some(Self::ServerInternal),
            _ => Some(Self::Unexpected),
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate limited",
            Self::ServerInternal => "server internal",
            Self::Unexpected => "unexpected http error",
        };
        write!(f, "{s}")
    }
}

/// Errors that can occur when interacting with the KYC provider.
#[derive(Debug, thiserror::Error)]
pub enum KycError {
    /// The configuration is missing a mandatory field. Raised at
    /// construction time only, never mid-call.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Caller input failed validation before any network activity.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The request never produced a status code: connection failure,
    /// timeout, or cancellation.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with an error status.
    #[error("http {status} ({kind}): {body}")]
    Http {
        /// Classified kind derived from the status code.
        kind: HttpErrorKind,
        /// The raw status code.
        status: u16,
        /// Response body, truncated to 16 KiB and whitespace-trimmed.
        body: String,
    },

    /// A request body could not be serialized.
    #[error("serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A success-status response body was not the expected JSON shape.
    #[error("decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A webhook body was not syntactically valid JSON.
    #[error("parse webhook payload: {0}")]
    WebhookParse(#[source] serde_json::Error),

    /// The provider returned an empty verification link, which the
    /// protocol does not allow.
    #[error("empty verification link in response")]
    EmptyLink,
}

impl KycError {
    /// The HTTP classification, if this is a classified HTTP error.
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::Http { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
