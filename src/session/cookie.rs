//! Signed cookie helpers.
//!
//! Uses HMAC-SHA256 over the encoded session payload, making the cookie
//! tamper-proof.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::secret::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Signs an encoded payload with HMAC-SHA256.
///
/// Returns a string in the format `{payload}.{signature}`.
pub fn sign_value(payload: &str, secret: &SecretString) -> String {
    let signature = compute_hmac(payload.as_bytes(), secret.expose_secret().as_bytes());
    format!("{}.{}", payload, hex::encode(signature))
}

/// Verifies a signed cookie value and extracts the payload.
///
/// Returns `None` if the value is malformed or the signature does not
/// match (tampered).
pub fn verify_signed_value(cookie_value: &str, secret: &SecretString) -> Option<String> {
    let (payload, signature_hex) = cookie_value.rsplit_once('.')?;

    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(payload.as_bytes(), secret.expose_secret().as_bytes());

    if constant_time_eq(&expected_sig, &actual_sig) {
        Some(payload.to_owned())
    } else {
        log::warn!(
            target: "gatehouse::session",
            "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"",
            &cookie_value.chars().take(8).collect::<String>()
        );
        None
    }
}

/// Computes HMAC-SHA256.
///
/// # Panics
///
/// Cannot panic: HMAC-SHA256 accepts keys of any length.
fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
