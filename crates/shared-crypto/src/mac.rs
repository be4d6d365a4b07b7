//! # Message Authentication
//!
//! HMAC-SHA256 over the raw transport payload, with constant-time
//! signature comparison.
//!
//! The message being signed is the serialized request body exactly as
//! transmitted, before any parsing or decryption, so signature coverage
//! includes framing and is independent of cipher internals.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

/// Shared signing secret, resolved per client identifier.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Create from raw bytes. HMAC accepts secrets of any length.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for SharedSecret {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

// Secret material must never reach logs.
impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Compute the HMAC-SHA256 signature of a message, hex-encoded.
pub fn sign(secret: &SharedSecret, message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a hex-encoded HMAC-SHA256 signature against a message.
///
/// Comparison is constant-time to resist timing side-channels. A
/// signature that is not valid hex, or has the wrong length, fails
/// verification; it never panics or errors.
pub fn verify(secret: &SharedSecret, message: &[u8], signature_hex: &str) -> bool {
    let supplied = match hex::decode(signature_hex) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(message);
    let computed = mac.finalize().into_bytes();

    if supplied.len() != computed.len() {
        return false;
    }
    computed.as_slice().ct_eq(supplied.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SharedSecret {
        SharedSecret::from("secret_key")
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let message = br#"{"body":"00ff:aabb"}"#;
        let signature = sign(&secret(), message);

        assert!(verify(&secret(), message, &signature));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let message = b"same message";
        assert_eq!(sign(&secret(), message), sign(&secret(), message));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let message = b"payload";
        let signature = sign(&secret(), message);

        // Flip one nibble of the hex signature.
        for i in 0..signature.len() {
            let mut tampered: Vec<char> = signature.chars().collect();
            tampered[i] = if tampered[i] == '0' { '1' } else { '0' };
            let tampered: String = tampered.into_iter().collect();
            if tampered != signature {
                assert!(!verify(&secret(), message, &tampered), "index {}", i);
            }
        }
    }

    #[test]
    fn test_tampered_message_rejected() {
        let signature = sign(&secret(), b"original");
        assert!(!verify(&secret(), b"tampered", &signature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let message = b"payload";
        let signature = sign(&secret(), message);
        assert!(!verify(&SharedSecret::from("other_key"), message, &signature));
    }

    #[test]
    fn test_invalid_hex_signature_rejected() {
        assert!(!verify(&secret(), b"payload", "not-hex-at-all"));
        assert!(!verify(&secret(), b"payload", ""));
        assert!(!verify(&secret(), b"payload", "abcd")); // wrong length
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        assert_eq!(format!("{:?}", secret()), "SharedSecret(..)");
    }
}
