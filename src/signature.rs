//! Webhook signature verification.
//!
//! Deliveries carry a lowercase hex HMAC-SHA256 of the raw body, keyed by the
//! webhook secret. Verification must run on the bytes exactly as received.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{ClickUpError, ClickUpResult};

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `body` keyed by `secret`.
pub fn sign(body: &[u8], secret: &str) -> String {
    // HMAC accepts keys of any length, so this never takes the `Err` arm.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Checks `signature` against the HMAC of `body`.
pub fn verify(signature: &str, body: &[u8], secret: &str) -> ClickUpResult<()> {
    let expected = sign(body, secret);
    if !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        Ok(())
    } else {
        Err(ClickUpError::SignatureMismatch)
    }
}
