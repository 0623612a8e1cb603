#![deny(missing_docs)]

//! # kyc-provider
//!
//! Signed REST client for a hosted identity-verification (KYC) provider:
//! creates and fetches applicant records, mints hosted verification links,
//! and authenticates inbound webhook callbacks.
//!
//! Every outbound request carries a time-boxed HMAC-SHA256 signature
//! (see [`kyc_auth`]); every inbound webhook carries a payload digest that
//! is recomputed and compared in constant time before the event is trusted.
//!
//! # Example
//!
//! ```no_run
//! use kyc_provider::{GenerateLinkRequest, KycClient, KycConfig};
//!
//! # async fn example() -> Result<(), kyc_provider::KycError> {
//! let client = KycClient::new(KycConfig {
//!     base_url: "https://api.sumsub.com".into(),
//!     app_token: "sbx:token".into(),
//!     secret_key: "signing-secret".into(),
//!     webhook_secret: "webhook-secret".into(),
//!     ..Default::default()
//! })?;
//!
//! let url = client
//!     .generate_link(GenerateLinkRequest {
//!         user_id: "user-123".into(),
//!         level_name: "id-and-liveness".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("verification link: {url}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod error;
pub mod provider;
pub mod types;
pub mod webhook;

#[cfg(test)]
mod tests;

pub use error::{HttpErrorKind, KycError};
pub use provider::{KycClient, KycProvider, SumsubProvider};
pub use types::{ApplicantInfo, GenerateLinkRequest, KycConfig, KycResult, KycStatus};
pub use webhook::{
    DigestStatus, WebhookPayload, WebhookReviewResult, WebhookVerification, PAYLOAD_DIGEST_HEADER,
};
