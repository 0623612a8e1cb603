//! Provider orchestration: the verb-level operations against the KYC API.

use std::future::Future;

use reqwest::header::HeaderMap;

use kyc_auth::RequestSigner;

use crate::client::HttpTransport;
use crate::error::KycError;
use crate::types::{
    ApplicantDto, ApplicantIdentifiers, ApplicantInfo, CreateApplicantRequest, GenerateLinkRequest,
    KycConfig, KycStatus, LinkDto, RedirectConfig, WebSdkLinkRequest,
};
use crate::webhook::{self, WebhookVerification};

const PROVIDER_NAME: &str = "sumsub";

const APPLICANTS_PATH: &str = "/resources/applicants";
const WEBSDK_LINK_PATH: &str = "/resources/sdkIntegrations/levels/-/websdkLink";

/// Hosted-link validity applied when the caller supplies no positive TTL.
const DEFAULT_LINK_TTL_SECS: i64 = 1800;

/// Capability set of a KYC provider.
///
/// There is exactly one production implementation ([`SumsubProvider`]); the
/// trait exists so [`KycClient`] can be driven by a test double.
pub trait KycProvider: Send + Sync {
    /// Register a new applicant for the given external user id.
    fn create_applicant(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<ApplicantInfo, KycError>> + Send;

    /// Fetch an applicant by its provider-assigned id.
    fn get_applicant(
        &self,
        applicant_id: &str,
    ) -> impl Future<Output = Result<ApplicantInfo, KycError>> + Send;

    /// Mint a hosted verification link.
    fn generate_link(
        &self,
        request: GenerateLinkRequest,
    ) -> impl Future<Output = Result<String, KycError>> + Send;

    /// Verify an inbound webhook's payload digest and decode its body.
    fn verify_webhook(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<WebhookVerification, KycError>;
}

/// Production KYC provider backed by the Sumsub REST API.
///
/// Immutable after construction; all per-call state is local, so a single
/// instance is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct SumsubProvider {
    transport: HttpTransport,
    signer: RequestSigner,
    webhook_secret: String,
}

impl SumsubProvider {
    /// Build a provider from configuration.
    ///
    /// All four credential fields are mandatory; a blank one fails here
    /// with [`KycError::InvalidConfig`] rather than at call time.
    pub fn new(config: KycConfig) -> Result<Self, KycError> {
        let required = [
            ("base_url", &config.base_url),
            ("app_token", &config.app_token),
            ("secret_key", &config.secret_key),
            ("webhook_secret", &config.webhook_secret),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(KycError::InvalidConfig(format!("{name} required")));
            }
        }

        Ok(Self {
            transport: HttpTransport::new(&config.base_url, config.timeout_secs)?,
            signer: RequestSigner::new(config.app_token, config.secret_key),
            webhook_secret: config.webhook_secret,
        })
    }

    /// Register a new applicant for the given external user id.
    pub async fn create_applicant(&self, user_id: &str) -> Result<ApplicantInfo, KycError> {
        let body = serde_json::to_vec(&CreateApplicantRequest {
            external_user_id: user_id,
        })
        .map_err(KycError::Serialize)?;

        let auth = self.signer.sign("POST", APPLICANTS_PATH, Some(&body));
        let dto: ApplicantDto = self
            .transport
            .post_json(APPLICANTS_PATH, body, &auth)
            .await?
            .unwrap_or_default();

        Ok(map_applicant(dto))
    }

    /// Fetch an applicant by its provider-assigned id.
    pub async fn get_applicant(&self, applicant_id: &str) -> Result<ApplicantInfo, KycError> {
        let path = format!("{APPLICANTS_PATH}/{applicant_id}");

        let auth = self.signer.sign("GET", &path, None);
        let dto: ApplicantDto = self
            .transport
            .get_json(&path, &auth)
            .await?
            .unwrap_or_default();

        Ok(map_applicant(dto))
    }

    /// Mint a hosted verification link for the given user and level.
    ///
    /// Fails with [`KycError::Validation`] before any network activity when
    /// `user_id` or `level_name` is blank. A non-positive `ttl_secs` selects
    /// the 1800-second default.
    pub async fn generate_link(&self, request: GenerateLinkRequest) -> Result<String, KycError> {
        let user_id = request.user_id.trim();
        if user_id.is_empty() {
            return Err(KycError::Validation("missing user id".into()));
        }
        let level_name = request.level_name.trim();
        if level_name.is_empty() {
            return Err(KycError::Validation("missing level name".into()));
        }

        let ttl_in_secs = if request.ttl_secs <= 0 {
            DEFAULT_LINK_TTL_SECS
        } else {
            request.ttl_secs
        };

        let email = non_blank(request.email);
        let phone = non_blank(request.phone);
        let applicant_identifiers = if email.is_some() || phone.is_some() {
            Some(ApplicantIdentifiers { email, phone })
        } else {
            None
        };

        let success_url = non_blank(request.success_url);
        let reject_url = non_blank(request.reject_url);
        let redirect = if success_url.is_some() || reject_url.is_some() {
            Some(RedirectConfig {
                success_url,
                reject_url,
            })
        } else {
            None
        };

        let body = serde_json::to_vec(&WebSdkLinkRequest {
            level_name: level_name.to_string(),
            external_user_id: user_id.to_string(),
            ttl_in_secs,
            applicant_identifiers,
            redirect,
        })
        .map_err(KycError::Serialize)?;

        let auth = self.signer.sign("POST", WEBSDK_LINK_PATH, Some(&body));
        let link: LinkDto = self
            .transport
            .post_json(WEBSDK_LINK_PATH, body, &auth)
            .await?
            .unwrap_or_default();

        let url = link.url.trim();
        if url.is_empty() {
            return Err(KycError::EmptyLink);
        }
        Ok(url.to_string())
    }

    /// Verify an inbound webhook's payload digest and decode its body.
    pub fn verify_webhook(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<WebhookVerification, KycError> {
        webhook::verify_and_parse(self.webhook_secret.as_bytes(), headers, raw_body)
    }
}

impl KycProvider for SumsubProvider {
    async fn create_applicant(&self, user_id: &str) -> Result<ApplicantInfo, KycError> {
        SumsubProvider::create_applicant(self, user_id).await
    }

    async fn get_applicant(&self, applicant_id: &str) -> Result<ApplicantInfo, KycError> {
        SumsubProvider::get_applicant(self, applicant_id).await
    }

    async fn generate_link(&self, request: GenerateLinkRequest) -> Result<String, KycError> {
        SumsubProvider::generate_link(self, request).await
    }

    fn verify_webhook(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<WebhookVerification, KycError> {
        SumsubProvider::verify_webhook(self, headers, raw_body)
    }
}

/// Client facade over a [`KycProvider`].
///
/// Production callers use [`KycClient::new`]; tests substitute a double via
/// [`KycClient::with_provider`].
pub struct KycClient<P = SumsubProvider> {
    provider: P,
}

impl KycClient {
    /// Build a client backed by the production provider.
    pub fn new(config: KycConfig) -> Result<Self, KycError> {
        Ok(Self {
            provider: SumsubProvider::new(config)?,
        })
    }
}

impl<P: KycProvider> KycClient<P> {
    /// Wrap an existing provider implementation.
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Register a new applicant for the given external user id.
    pub async fn create_applicant(&self, user_id: &str) -> Result<ApplicantInfo, KycError> {
        self.provider.create_applicant(user_id).await
    }

    /// Fetch an applicant by its provider-assigned id.
    pub async fn get_applicant(&self, applicant_id: &str) -> Result<ApplicantInfo, KycError> {
        self.provider.get_applicant(applicant_id).await
    }

    /// Mint a hosted verification link.
    pub async fn generate_link(&self, request: GenerateLinkRequest) -> Result<String, KycError> {
        self.provider.generate_link(request).await
    }

    /// Verify an inbound webhook's payload digest and decode its body.
    pub fn verify_webhook(
        &self,
        headers: &HeaderMap,
        raw_body: &[u8],
    ) -> Result<WebhookVerification, KycError> {
        self.provider.verify_webhook(headers, raw_body)
    }
}

fn map_applicant(dto: ApplicantDto) -> ApplicantInfo {
    ApplicantInfo {
        user_id: dto.external_user_id,
        applicant_id: dto.id,
        status: KycStatus::from_wire(&dto.review.review_status),
        result: dto.review.review_result.review_answer,
        provider: PROVIDER_NAME.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
