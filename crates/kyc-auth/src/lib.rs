#![deny(missing_docs)]

//! # kyc-auth
//!
//! Authentication primitives for the KYC SDK: HMAC-SHA256 request signing
//! for outbound API calls and keyed digest verification for inbound
//! webhook payloads.
//!
//! Both directions share the same keyed-hash primitive but use independent
//! secrets: the request-signing secret authenticates calls *to* the
//! provider, the webhook secret authenticates callbacks *from* it.
//!
//! # Example
//!
//! ```
//! use kyc_auth::RequestSigner;
//!
//! let signer = RequestSigner::with_clock("app", "secret", || 1);
//! let headers = signer.sign("GET", "/resources/applicants/abc", None);
//! assert_eq!(headers.timestamp, "1");
//! ```

pub mod digest;
pub mod signer;

pub use digest::{hex_digest, sha256_hmac, verify_hex_digest};
pub use signer::{AuthHeaders, RequestSigner, APP_TOKEN_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
