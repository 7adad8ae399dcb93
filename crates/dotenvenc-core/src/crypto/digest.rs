//! Keyed digests for the readable companion file.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::key::Password;
use crate::error::{DotenvencError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA-256 of `value` keyed by the raw password bytes, hex-encoded.
///
/// Equal values under the same password give equal digests, so two versions
/// of the readable file can be diffed without revealing the secrets.
pub fn readable_digest(password: &Password, value: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(password.as_bytes())
        .map_err(|e| DotenvencError::Crypto(format!("Failed to create HMAC: {}", e)))?;
    mac.update(value.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
