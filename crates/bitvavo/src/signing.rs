//! HMAC-SHA256 request signing.
//!
//! Bitvavo authenticates private calls with four headers. The signature is
//! the lowercase hex HMAC-SHA256 of `timestamp + METHOD + path + body`, keyed
//! by the API secret, where `path` includes the `/v2` prefix and any query.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::BitvavoError;

type HmacSha256 = Hmac<Sha256>;

pub const HEADER_ACCESS_KEY: &str = "bitvavo-access-key";
pub const HEADER_SIGNATURE: &str = "bitvavo-access-signature";
pub const HEADER_TIMESTAMP: &str = "bitvavo-access-timestamp";
pub const HEADER_WINDOW: &str = "bitvavo-access-window";

pub fn create_signature(
    api_secret: &str,
    timestamp: &str,
    method: &str,
    path: &str,
    body: &str,
) -> Result<String, BitvavoError> {
    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .map_err(|e| BitvavoError::Signing(e.to_string()))?;
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Current Unix time in milliseconds, as sent in the timestamp header.
pub fn timestamp_millis() -> Result<String, BitvavoError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .map_err(|e| BitvavoError::Signing(format!("system clock before Unix epoch: {e}")))
}
