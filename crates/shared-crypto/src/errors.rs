//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Wire string is not in the `hex(iv):hex(ciphertext)` format
    #[error("Malformed cipher text: {0}")]
    MalformedWire(String),

    /// Decryption produced invalid PKCS7 padding (wrong key or corrupt data)
    #[error("Invalid padding in decrypted payload")]
    InvalidPadding,
}
