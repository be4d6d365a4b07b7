//! # Symmetric Encryption
//!
//! AES-256-CBC with PKCS7 padding and an explicit IV segment.
//!
//! The wire form of an encrypted payload is a single string,
//! `hex(iv) + ":" + hex(ciphertext)`, so independently built clients can
//! interoperate without any shared framing library. A fresh random IV is
//! generated for every encryption and is never reused.

use std::fmt;
use std::str::FromStr;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroize;

use crate::CryptoError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// IV length in bytes (AES block size).
pub const IV_LEN: usize = 16;

/// Cipher block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Delimiter between the IV and ciphertext segments of the wire string.
pub const WIRE_DELIMITER: char = ':';

/// Shared symmetric key (256-bit).
///
/// Loaded once from configuration and injected by the caller, so the same
/// transform serves both request decryption and response encryption.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SharedKey([u8; KEY_LEN]);

impl SharedKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a random key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl FromStr for SharedKey {
    type Err = CryptoError;

    /// Parse a configuration key string. The string's UTF-8 bytes must be
    /// exactly 32 bytes long.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; KEY_LEN] =
            s.as_bytes()
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: s.len(),
                })?;
        Ok(Self(bytes))
    }
}

// Key material must never reach logs.
impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedKey(..)")
    }
}

/// Structured output of encryption: IV and ciphertext segments.
///
/// `Display` produces the wire string, `FromStr` parses and validates it.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherText {
    iv: [u8; IV_LEN],
    ciphertext: Vec<u8>,
}

impl CipherText {
    /// The initialization vector segment.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        &self.iv
    }

    /// The ciphertext segment.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl fmt::Display for CipherText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.iv),
            WIRE_DELIMITER,
            hex::encode(&self.ciphertext)
        )
    }
}

impl fmt::Debug for CipherText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherText")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl FromStr for CipherText {
    type Err = CryptoError;

    fn from_str(wire: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = wire.split(WIRE_DELIMITER).collect();
        if segments.len() != 2 {
            return Err(CryptoError::MalformedWire(format!(
                "expected 2 segments, got {}",
                segments.len()
            )));
        }
        if segments[0].is_empty() || segments[1].is_empty() {
            return Err(CryptoError::MalformedWire("empty segment".into()));
        }

        let iv_bytes = hex::decode(segments[0])
            .map_err(|e| CryptoError::MalformedWire(format!("invalid IV hex: {}", e)))?;
        let iv: [u8; IV_LEN] =
            iv_bytes
                .try_into()
                .map_err(|v: Vec<u8>| CryptoError::MalformedWire(format!(
                    "IV must be {} bytes, got {}",
                    IV_LEN,
                    v.len()
                )))?;

        let ciphertext = hex::decode(segments[1])
            .map_err(|e| CryptoError::MalformedWire(format!("invalid ciphertext hex: {}", e)))?;
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::MalformedWire(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_LEN
            )));
        }

        Ok(Self { iv, ciphertext })
    }
}

/// Encrypt a plaintext payload with AES-256-CBC.
///
/// Generates a fresh random IV for every call; encrypting the same
/// plaintext twice yields different wire strings.
pub fn encrypt(key: &SharedKey, plaintext: &[u8]) -> CipherText {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), (&iv).into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    CipherText { iv, ciphertext }
}

/// Decrypt a parsed cipher text.
///
/// # Errors
///
/// Returns `CryptoError::InvalidPadding` if the decrypted padding is
/// invalid, which is what a wrong key or corrupt ciphertext looks like.
pub fn decrypt(key: &SharedKey, cipher_text: &CipherText) -> Result<Vec<u8>, CryptoError> {
    Aes256CbcDec::new(key.as_bytes().into(), (&cipher_text.iv).into())
        .decrypt_padded_vec_mut::<Pkcs7>(&cipher_text.ciphertext)
        .map_err(|_| CryptoError::InvalidPadding)
}

/// Parse a wire string and decrypt it in one step.
///
/// # Errors
///
/// Returns `CryptoError::MalformedWire` for a bad wire string and
/// `CryptoError::InvalidPadding` for an undecryptable payload.
pub fn decrypt_wire(key: &SharedKey, wire: &str) -> Result<Vec<u8>, CryptoError> {
    let cipher_text: CipherText = wire.parse()?;
    decrypt(key, &cipher_text)
}
