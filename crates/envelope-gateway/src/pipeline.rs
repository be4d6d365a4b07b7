//! Decrypt → validate → encrypt pipeline.
//!
//! Strictly sequential states, each with a distinct failure exit:
//!
//! 1. request shape checks (command, request, body present)
//! 2. decrypt the envelope body and deserialize the payload
//! 3. validate the decrypted fields
//! 4. business transform (demo: pass-through echo)
//! 5. encrypt the response payload with the same shared key
//!
//! Expected failures become failure envelopes with their message intact;
//! unexpected failures are caught once at this boundary, logged, and
//! surfaced as a generic 500.

use async_trait::async_trait;
use axum::http::StatusCode;
use shared_crypto::{symmetric, SharedKey};
use tracing::debug;

use crate::dispatch::{CommandHandler, EchoNameCommand};
use crate::domain::contracts::{
    DataResponse, EchoNameRequest, EchoNameResponse, EnvelopeResponse,
};
use crate::domain::error::PipelineError;
use crate::domain::validation::validate_echo_name;

/// Demo pipeline handler: echoes the decrypted name fields back inside a
/// freshly encrypted envelope.
pub struct EchoNameHandler {
    key: SharedKey,
}

impl EchoNameHandler {
    /// Create a handler holding the shared envelope key.
    pub fn new(key: SharedKey) -> Self {
        Self { key }
    }

    fn run(&self, command: Option<EchoNameCommand>) -> Result<DataResponse<EnvelopeResponse>, PipelineError> {
        // Request shape checks, in precedence order.
        let command = match command {
            Some(command) => command,
            None => return Err(PipelineError::bad_request("Invalid command")),
        };
        let request = match command.request {
            Some(request) => request,
            None => return Err(PipelineError::bad_request("Invalid request")),
        };
        let body = match request.body {
            Some(body) => body,
            None => return Err(PipelineError::bad_request("Invalid request body")),
        };

        // Decrypt the request.
        let payload = self.decrypt_request(&body)?;

        // Validate the request.
        validate_echo_name(&payload)?;

        // Business transform: pass-through echo.
        let response = EchoNameResponse {
            first_name: payload.first_name,
            last_name: payload.last_name,
        };

        // Encrypt the response.
        let envelope = self.encrypt_response(&response)?;

        debug!("pipeline completed");
        Ok(DataResponse::success(
            StatusCode::OK.as_u16(),
            envelope,
            "Success",
        ))
    }

    /// Decrypt the envelope body and deserialize the payload. Cipher and
    /// parser messages are surfaced unchanged as 400s.
    fn decrypt_request(&self, body: &str) -> Result<EchoNameRequest, PipelineError> {
        let plaintext = symmetric::decrypt_wire(&self.key, body)?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| PipelineError::bad_request(e.to_string()))
    }

    /// Serialize and encrypt the response payload with the shared key.
    fn encrypt_response(&self, response: &EchoNameResponse) -> Result<EnvelopeResponse, PipelineError> {
        let plaintext = serde_json::to_vec(response).map_err(PipelineError::internal)?;
        let wire = symmetric::encrypt(&self.key, &plaintext).to_string();
        Ok(EnvelopeResponse { body: wire })
    }
}

#[async_trait]
impl CommandHandler for EchoNameHandler {
    async fn handle(&self, command: Option<EchoNameCommand>) -> DataResponse<EnvelopeResponse> {
        // Single result-conversion boundary: typed failures become the
        // failure envelope here, nothing propagates past this point.
        match self.run(command) {
            Ok(envelope) => envelope,
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contracts::EnvelopeRequest;

    fn handler() -> EchoNameHandler {
        EchoNameHandler::new("0123456789abcdef0123456789abcdef".parse().unwrap())
    }

    fn key() -> SharedKey {
        "0123456789abcdef0123456789abcdef".parse().unwrap()
    }

    fn encrypted_body(payload: &serde_json::Value) -> String {
        symmetric::encrypt(&key(), payload.to_string().as_bytes()).to_string()
    }

    #[tokio::test]
    async fn test_null_command_rejected() {
        let result = handler().handle(None).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Invalid command");
    }

    #[tokio::test]
    async fn test_null_request_rejected() {
        let result = handler().handle(Some(EchoNameCommand::default())).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Invalid request");
    }

    #[tokio::test]
    async fn test_null_body_rejected() {
        let command = EchoNameCommand::new(EnvelopeRequest { body: None });
        let result = handler().handle(Some(command)).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Invalid request body");
    }

    #[tokio::test]
    async fn test_malformed_body_surfaces_cipher_error() {
        let command = EchoNameCommand::new(EnvelopeRequest {
            body: Some("not-a-wire-string".into()),
        });
        let result = handler().handle(Some(command)).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert!(result.message.starts_with("Malformed cipher text"));
    }

    #[tokio::test]
    async fn test_undecryptable_payload_rejected() {
        // Valid wire format, but encrypted under a different key.
        let other_key = SharedKey::generate();
        let wire = symmetric::encrypt(&other_key, b"{}").to_string();
        let command = EchoNameCommand::new(EnvelopeRequest { body: Some(wire) });

        let result = handler().handle(Some(command)).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Invalid padding in decrypted payload");
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let body = encrypted_body(&serde_json::json!({ "firstName": "John" }));
        let command = EchoNameCommand::new(EnvelopeRequest { body: Some(body) });

        let result = handler().handle(Some(command)).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert!(result.message.contains("lastName"));
    }

    #[tokio::test]
    async fn test_validation_failure_surfaced() {
        let body = encrypted_body(&serde_json::json!({
            "firstName": "<script>alert(1)</script>",
            "lastName": "Doe",
        }));
        let command = EchoNameCommand::new(EnvelopeRequest { body: Some(body) });

        let result = handler().handle(Some(command)).await;

        assert!(!result.success);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Name must not contain HTML or JavaScript code");
    }

    #[tokio::test]
    async fn test_happy_path_round_trip() {
        let body = encrypted_body(&serde_json::json!({
            "firstName": "John",
            "lastName": "Doe",
        }));
        let command = EchoNameCommand::new(EnvelopeRequest { body: Some(body) });

        let result = handler().handle(Some(command)).await;

        assert!(result.success);
        assert_eq!(result.status_code, 200);
        assert_eq!(result.message, "Success");

        let envelope = result.data.unwrap();
        let plaintext = symmetric::decrypt_wire(&key(), &envelope.body).unwrap();
        let echoed: EchoNameRequest = serde_json::from_slice(&plaintext).unwrap();
        assert_eq!(echoed.first_name, "John");
        assert_eq!(echoed.last_name, "Doe");
    }

    #[tokio::test]
    async fn test_response_body_differs_from_request_body() {
        // Fresh IV on the response: even an identical payload encrypts to
        // a different wire string.
        let request_body = encrypted_body(&serde_json::json!({
            "firstName": "John",
            "lastName": "Doe",
        }));
        let command = EchoNameCommand::new(EnvelopeRequest {
            body: Some(request_body.clone()),
        });

        let result = handler().handle(Some(command)).await;
        let envelope = result.data.unwrap();

        assert_ne!(envelope.body, request_body);
    }
}
