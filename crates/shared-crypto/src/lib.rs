//! # Shared Crypto - Envelope Cryptography Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `symmetric` | AES-256-CBC (PKCS7) | Envelope body encryption |
//! | `mac` | HMAC-SHA256 | Transport payload authentication |
//!
//! ## Security Properties
//!
//! - **AES-256-CBC**: fresh random IV per encryption, carried on the wire
//! - **HMAC-SHA256**: constant-time verification via `subtle`
//! - **Keys/secrets**: zeroized on drop, redacted `Debug`
//!
//! All operations are pure functions of (key, input) and are safe to call
//! from concurrent requests; IV generation uses the thread-local CSPRNG.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod mac;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use mac::{sign, verify, SharedSecret};
pub use symmetric::{decrypt, decrypt_wire, encrypt, CipherText, SharedKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
