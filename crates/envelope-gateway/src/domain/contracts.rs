//! Wire contracts for the envelope transport.
//!
//! These shapes are the interface the pipeline and its external
//! collaborators honor byte-for-byte to interoperate with independently
//! built clients. Field names on the wire are fixed (`Success`,
//! `StatusCode`, `Message`, `Data`; payload fields are camelCase).

use serde::{Deserialize, Serialize};

/// Inbound request envelope: one opaque encrypted `body` field.
///
/// `body` is an `Option` so a missing or null field is representable and
/// reported by the pipeline rather than rejected at the parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvelopeRequest {
    /// Cipher wire string (`hex(iv):hex(ciphertext)`)
    #[serde(default)]
    pub body: Option<String>,
}

/// Outbound response envelope carrying the encrypted `body`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeResponse {
    /// Cipher wire string over the serialized response fields
    pub body: String,
}

/// Generic response envelope returned by every request.
///
/// The HTTP status code mirrors `StatusCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    /// Whether the request succeeded
    #[serde(rename = "Success")]
    pub success: bool,
    /// HTTP-style status code
    #[serde(rename = "StatusCode")]
    pub status_code: u16,
    /// Human-readable outcome message
    #[serde(rename = "Message")]
    pub message: String,
    /// Payload, present on success only
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> DataResponse<T> {
    /// Build a success envelope.
    pub fn success(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope. `Data` is omitted.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            data: None,
        }
    }
}

/// Decrypted demo request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoNameRequest {
    /// First name, non-empty, markup-free
    pub first_name: String,
    /// Last name, non-empty, markup-free
    pub last_name: String,
}

/// Demo response payload, encrypted into the outgoing envelope body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoNameResponse {
    /// Echoed first name
    pub first_name: String,
    /// Echoed last name
    pub last_name: String,
}
