//! Gateway error types.
//!
//! Every expected failure is captured as a typed value at the point of
//! detection and converted into a user-facing envelope with a matching
//! HTTP status; nothing is thrown across component boundaries.

use axum::http::StatusCode;
use shared_crypto::CryptoError;
use std::fmt;

use crate::domain::contracts::DataResponse;

/// A pipeline step failure: status code plus the message surfaced to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    /// HTTP status for the failure envelope
    pub status: StatusCode,
    /// Message carried in the failure envelope
    pub message: String,
}

impl PipelineError {
    /// Create with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Request-shape or validation failure (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Unexpected failure (500). The underlying cause is logged here and
    /// a generic message crosses the trust boundary.
    pub fn internal(cause: impl fmt::Display) -> Self {
        tracing::error!(error = %cause, "unexpected pipeline failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for PipelineError {}

// Cipher failures are client errors; their message is surfaced unchanged.
impl From<CryptoError> for PipelineError {
    fn from(e: CryptoError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl<T> From<PipelineError> for DataResponse<T> {
    fn from(e: PipelineError) -> Self {
        DataResponse::error(e.status.as_u16(), e.message)
    }
}

/// Gateway lifecycle errors (not request-level, internal use).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contracts::EnvelopeResponse;

    #[test]
    fn test_crypto_error_passthrough() {
        let err: PipelineError = CryptoError::InvalidPadding.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid padding in decrypted payload");
    }

    /// Downstream errors cross the boundary unchanged, even odd ones.
    #[test]
    fn test_envelope_conversion_preserves_error() {
        let err = PipelineError::new(StatusCode::BAD_REQUEST, "null");
        let envelope: DataResponse<EnvelopeResponse> = err.into();

        assert!(!envelope.success);
        assert_eq!(envelope.status_code, 400);
        assert_eq!(envelope.message, "null");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_internal_error_is_generic() {
        let err = PipelineError::internal("secret connection string leaked");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }
}
