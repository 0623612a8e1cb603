#![deny(missing_docs)]

//! KYC SDK - Complete SDK.
//!
//! Re-exports all KYC SDK components for convenient single-crate usage.

pub use kyc_auth as auth;
pub use kyc_provider as provider;

pub use kyc_provider::{
    ApplicantInfo, GenerateLinkRequest, KycClient, KycConfig, KycError, KycResult, KycStatus,
    WebhookVerification,
};
