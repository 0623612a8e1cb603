//! Webhook digest verification and payload decoding.
//!
//! The provider authenticates its callbacks with an HMAC-SHA256 digest of
//! the raw request body, carried in the [`PAYLOAD_DIGEST_HEADER`] header as
//! raw lowercase hex. No scheme prefix (`sha256=...`) is accepted: a
//! prefixed value fails verification.
//!
//! Verification gates trust, not parseability: the body is decoded whether
//! or not the digest checks out, and a missing or mismatched digest is
//! reported as an outcome for the caller to act on rather than an error.

use reqwest::header::HeaderMap;
use serde::Deserialize;

use kyc_auth::verify_hex_digest;

use crate::error::KycError;
use crate::types::KycResult;

/// Inbound header carrying the hex HMAC-SHA256 digest of the raw body.
pub const PAYLOAD_DIGEST_HEADER: &str = "x-payload-digest";

/// Result of checking the payload digest of an inbound webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestStatus {
    /// The digest matches the body; the callback is authentic.
    Valid,
    /// No digest header was present (or it was empty).
    Missing,
    /// A digest was present but does not match the body.
    Mismatch,
}

/// A webhook event decoded from the provider's wire shape.
///
/// Every field tolerates absence: a structurally sparse but syntactically
/// valid body decodes to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Event type, e.g. `applicantReviewed` or `applicantPending`.
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Provider-side applicant id.
    #[serde(default)]
    pub applicant_id: String,
    /// The caller-supplied external user id.
    #[serde(default)]
    pub external_user_id: String,
    /// Id of the inspection this event belongs to.
    #[serde(default)]
    pub inspection_id: String,
    /// Raw review pipeline state string.
    #[serde(default)]
    pub review_status: String,
    /// Nested review verdict.
    #[serde(default)]
    pub review_result: WebhookReviewResult,
}

/// Nested review verdict of a webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReviewResult {
    /// The provider's verdict; unknown wire values degrade to
    /// [`KycResult::None`].
    #[serde(default)]
    pub review_answer: KycResult,
}

/// Outcome of verifying and decoding a webhook callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookVerification {
    /// Digest check result. [`DigestStatus::Missing`] and
    /// [`DigestStatus::Mismatch`] are left to caller policy
    /// (log-and-drop vs. reject).
    pub digest: DigestStatus,
    /// The decoded payload. Present regardless of the digest outcome.
    pub payload: WebhookPayload,
}

impl WebhookVerification {
    /// Whether the digest proved the callback authentic.
    pub fn is_verified(&self) -> bool {
        self.digest == DigestStatus::Valid
    }
}

pub(crate) fn verify_and_parse(
    webhook_secret: &[u8],
    headers: &HeaderMap,
    raw_body: &[u8],
) -> Result<WebhookVerification, KycError> {
    let digest = match digest_header(headers) {
        None => DigestStatus::Missing,
        Some(claim) if verify_hex_digest(webhook_secret, raw_body, claim) => DigestStatus::Valid,
        Some(_) => {
            tracing::warn!("webhook payload digest mismatch");
            DigestStatus::Mismatch
        }
    };

    let payload = serde_json::from_slice(raw_body).map_err(KycError::WebhookParse)?;

    Ok(WebhookVerification { digest, payload })
}

fn digest_header(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(PAYLOAD_DIGEST_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
