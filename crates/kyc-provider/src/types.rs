//! Configuration, domain model, and wire DTOs for the KYC provider API.

use serde::{Deserialize, Serialize};

/// Configuration for a [`SumsubProvider`](crate::SumsubProvider).
///
/// All four string fields are mandatory; validation happens once at
/// construction so a misconfigured provider can never issue a call.
#[derive(Debug, Clone, Default)]
pub struct KycConfig {
    /// Base URL for the provider API (e.g. `https://api.sumsub.com`).
    pub base_url: String,
    /// Application token sent with every request.
    pub app_token: String,
    /// Secret key used to sign outbound requests.
    pub secret_key: String,
    /// Secret key used to verify inbound webhook digests. Independent of
    /// `secret_key`.
    pub webhook_secret: String,
    /// Request timeout in seconds; 0 selects the default of 10.
    pub timeout_secs: u64,
}

/// Review pipeline state of an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KycStatus {
    /// The applicant is queued or under review.
    Pending,
    /// The review has finished.
    Reviewed,
    /// Any state this SDK does not recognize.
    Unknown,
}

impl KycStatus {
    /// Map a provider review-status string onto the closed status set.
    ///
    /// Unrecognized values degrade to [`Self::Unknown`] so new provider
    /// states never break callers.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "completed" | "reviewed" => Self::Reviewed,
            "pending" => Self::Pending,
            _ => Self::Unknown,
        }
    }
}

/// Verdict of a completed review.
///
/// Deserializes from the provider's `GREEN`/`RED`/`YELLOW` wire values;
/// anything else degrades to [`Self::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycResult {
    /// Verification passed.
    Green,
    /// Verification failed.
    Red,
    /// Manual follow-up required.
    Yellow,
    /// No verdict yet, or a verdict this SDK does not recognize.
    #[default]
    #[serde(other)]
    None,
}

/// An applicant record mapped from the provider's wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantInfo {
    /// The caller-supplied external user id.
    pub user_id: String,
    /// The provider-assigned applicant id.
    pub applicant_id: String,
    /// Review pipeline state.
    pub status: KycStatus,
    /// Review verdict.
    pub result: KycResult,
    /// Name of the provider that produced this record.
    pub provider: String,
}

/// Request to mint a hosted verification link.
///
/// `user_id` and `level_name` are mandatory; everything else is optional.
/// Construct with struct-update syntax:
///
/// ```
/// use kyc_provider::GenerateLinkRequest;
///
/// let req = GenerateLinkRequest {
///     user_id: "user-123".into(),
///     level_name: "id-and-liveness".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct GenerateLinkRequest {
    /// External user id the link is minted for.
    pub user_id: String,
    /// Name of the verification level configured on the provider side.
    pub level_name: String,
    /// Link validity in seconds; zero or negative selects the default of 1800.
    pub ttl_secs: i64,
    /// Email hint pre-filled into the verification flow.
    pub email: Option<String>,
    /// Phone hint pre-filled into the verification flow.
    pub phone: Option<String>,
    /// Redirect target after a successful verification.
    pub success_url: Option<String>,
    /// Redirect target after a rejected verification.
    pub reject_url: Option<String>,
}

// ---- wire DTOs ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateApplicantRequest<'a> {
    pub external_user_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicantDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub external_user_id: String,
    #[serde(default)]
    pub review: ReviewDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewDto {
    #[serde(default)]
    pub review_status: String,
    #[serde(default)]
    pub review_result: ReviewResultDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResultDto {
    #[serde(default)]
    pub review_answer: KycResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WebSdkLinkRequest {
    pub level_name: String,
    pub external_user_id: String,
    pub ttl_in_secs: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_identifiers: Option<ApplicantIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicantIdentifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RedirectConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkDto {
    #[serde(default)]
    pub url: String,
}
