//! JSON-over-HTTP transport glue for the provider API.
//!
//! Thin wrapper around [`reqwest`]: attaches the authentication headers,
//! classifies error statuses, and decodes success bodies. Empty or
//! no-content success responses decode to `None` rather than an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use kyc_auth::AuthHeaders;

use crate::error::{HttpErrorKind, KycError};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Cap on how much of an error response body is captured for diagnostics.
const ERROR_BODY_CAP: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub(crate) fn new(base_url: &str, timeout_secs: u64) -> Result<Self, KycError> {
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(KycError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        auth: &AuthHeaders,
    ) -> Result<Option<T>, KycError> {
        tracing::debug!(method = "GET", path, "sending provider request");

        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .headers(build_headers(auth, false))
            .send()
            .await?;

        decode_response(resp).await
    }

    /// POST the given byte buffer as a JSON body.
    ///
    /// The buffer must be the same bytes the request signature was computed
    /// over; the transport transmits it untouched.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
        auth: &AuthHeaders,
    ) -> Result<Option<T>, KycError> {
        tracing::debug!(method = "POST", path, "sending provider request");

        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .headers(build_headers(auth, true))
            .body(body)
            .send()
            .await?;

        decode_response(resp).await
    }
}

fn build_headers(auth: &AuthHeaders, has_body: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    for (name, value) in auth.pairs() {
        if let Ok(val) = HeaderValue::from_str(value) {
            headers.insert(name, val);
        }
    }

    headers
}

async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Option<T>, KycError> {
    let status = resp.status();

    if let Some(kind) = HttpErrorKind::classify(status.as_u16()) {
        let body = read_capped_body(resp).await;
        return Err(KycError::Http {
            kind,
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await?;
    if status == StatusCode::NO_CONTENT || is_blank(&bytes) {
        return Ok(None);
    }

    serde_json::from_slice(&bytes).map(Some).map_err(KycError::Decode)
}

/// Capture at most [`ERROR_BODY_CAP`] bytes of an error body, trimmed.
/// A failed read yields an empty capture, not a second error.
async fn read_capped_body(resp: reqwest::Response) -> String {
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(_) => return String::new(),
    };

    let capped = &bytes[..bytes.len().min(ERROR_BODY_CAP)];
    String::from_utf8_lossy(capped).trim().to_string()
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
