//! Messenger webhook verification: subscribe challenge and body signatures.
//!
//! Facebook sends a one-time `GET` subscribe challenge (`hub.*` query
//! parameters) when the webhook is installed, then signs every event
//! delivery with HMAC-SHA256 over the raw body in the
//! `X-Hub-Signature-256` header.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use palaver_types::error::PlatformError;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Answer a `hub.mode=subscribe` challenge.
///
/// Requires `hub.mode` to be `subscribe` and `hub.verify_token` to match the
/// configured token; returns the `hub.challenge` value to echo back.
pub fn subscribe_challenge(
    params: &HashMap<String, String>,
    expected_token: &str,
) -> Result<String, PlatformError> {
    if params.get("hub.mode").map(String::as_str) != Some("subscribe") {
        return Err(PlatformError::MalformedPayload(
            "missing hub.mode=subscribe".to_string(),
        ));
    }

    match params.get("hub.verify_token") {
        Some(token) if constant_time_eq(token.as_bytes(), expected_token.as_bytes()) => params
            .get("hub.challenge")
            .cloned()
            .ok_or_else(|| PlatformError::MalformedPayload("missing hub.challenge".to_string())),
        _ => Err(PlatformError::VerifyTokenMismatch),
    }
}

/// Verify an `X-Hub-Signature-256` header against the raw request body.
///
/// The header value is `sha256=<hex>`; comparison is constant-time via the
/// hmac crate's `verify_slice`.
pub fn verify_signature(
    app_secret: &[u8],
    body: &[u8],
    signature: Option<&str>,
) -> Result<(), PlatformError> {
    let signature = signature.ok_or(PlatformError::InvalidSignature)?;
    let hex_sig = signature.strip_prefix("sha256=").unwrap_or(signature);
    let expected = hex_decode(hex_sig).map_err(|_| PlatformError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(app_secret)
        .map_err(|e| PlatformError::Config(e.to_string()))?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| PlatformError::InvalidSignature)
}

/// Constant-time byte comparison (no early exit on mismatch).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Decode a hex string into bytes.
fn hex_decode(hex: &str) -> Result<Vec<u8>, ()> {
    if hex.len() % 2 != 0 {
        return Err(());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn subscribe_params(mode: &str, token: &str, challenge: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("hub.mode".to_string(), mode.to_string());
        params.insert("hub.verify_token".to_string(), token.to_string());
        params.insert("hub.challenge".to_string(), challenge.to_string());
        params
    }

    fn sign(secret: &[u8], body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret).unwrap();
        mac.update(body);
        let digest = mac.finalize().into_bytes();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        format!("sha256={hex}")
    }

    #[test]
    fn challenge_echoed_when_token_matches() {
        let params = subscribe_params("subscribe", "sesame", "12345");
        let challenge = subscribe_challenge(&params, "sesame").unwrap();
        assert_eq!(challenge, "12345");
    }

    #[test]
    fn challenge_rejected_on_token_mismatch() {
        let params = subscribe_params("subscribe", "wrong", "12345");
        let err = subscribe_challenge(&params, "sesame").unwrap_err();
        assert!(matches!(err, PlatformError::VerifyTokenMismatch));
    }

    #[test]
    fn challenge_rejected_on_wrong_mode() {
        let params = subscribe_params("unsubscribe", "sesame", "12345");
        let err = subscribe_challenge(&params, "sesame").unwrap_err();
        assert!(matches!(err, PlatformError::MalformedPayload(_)));
    }

    #[test]
    fn signature_verifies_round_trip() {
        let secret = b"app-secret";
        let body = br#"{"object":"page"}"#;
        let header = sign(secret, body);

        verify_signature(secret, body, Some(&header)).unwrap();
    }

    #[test]
    fn signature_accepts_unprefixed_hex() {
        let secret = b"app-secret";
        let body = b"payload";
        let header = sign(secret, body);
        let bare = header.strip_prefix("sha256=").unwrap();

        verify_signature(secret, body, Some(bare)).unwrap();
    }

    #[test]
    fn tampered_body_fails_verification() {
        let secret = b"app-secret";
        let header = sign(secret, b"original");

        let err = verify_signature(secret, b"tampered", Some(&header)).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidSignature));
    }

    #[test]
    fn missing_header_fails_verification() {
        let err = verify_signature(b"secret", b"body", None).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidSignature));
    }

    #[test]
    fn garbage_hex_fails_verification() {
        let err = verify_signature(b"secret", b"body", Some("sha256=zzzz")).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidSignature));
    }

    #[test]
    fn hex_decode_rejects_odd_length() {
        assert!(hex_decode("abc").is_err());
        assert_eq!(hex_decode("ab0f").unwrap(), vec![0xab, 0x0f]);
    }
}
