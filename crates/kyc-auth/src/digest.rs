//! Keyed digest primitives shared by request signing and webhook
//! verification.
//!
//! Provides HMAC-SHA256 over raw bytes, lowercase-hex encoding, and a
//! constant-time check of a hex digest against a message.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of the input data with the given key.
///
/// # Arguments
/// * `key` - The HMAC key bytes.
/// * `data` - The message bytes to authenticate.
///
/// # Returns
/// A 32-byte HMAC-SHA256 tag.
pub fn sha256_hmac(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    let result = mac.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result.into_bytes());
    output
}

/// Compute the lowercase hex encoding of HMAC-SHA256(key, data).
///
/// This is the wire representation used both for the request signature
/// header and for the webhook payload digest header.
pub fn hex_digest(key: &[u8], data: &[u8]) -> String {
    hex::encode(sha256_hmac(key, data))
}

/// Check a claimed hex digest against the HMAC-SHA256 of `data`.
///
/// The comparison is constant-time with respect to the digest contents
/// ([`Mac::verify_slice`]), so a forged webhook cannot learn the expected
/// digest byte-by-byte from response timing. A claim that is not valid hex,
/// or decodes to the wrong length, is a mismatch rather than an error.
pub fn verify_hex_digest(key: &[u8], data: &[u8], digest_hex: &str) -> bool {
    let claimed = match hex::decode(digest_hex) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.verify_slice(&claimed).is_ok()
}
