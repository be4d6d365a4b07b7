//! HMAC transport authentication middleware.
//!
//! Verifies an HMAC-SHA256 signature over the raw request body exactly as
//! transmitted, before any JSON parsing or decryption. The signing secret
//! is resolved per client identifier from the registry; an unknown client
//! fails verification with the same response as a bad signature.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::domain::config::ClientRegistry;
use crate::domain::contracts::{DataResponse, EnvelopeResponse};

/// Header carrying the hex-encoded HMAC signature.
pub const SIGNATURE_HEADER: &str = "x-auth-signature";

/// Header carrying the client identifier used for secret lookup.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// HMAC authentication layer
#[derive(Clone)]
pub struct HmacAuthLayer {
    registry: Arc<ClientRegistry>,
    max_body_size: usize,
}

impl HmacAuthLayer {
    /// Create the layer from the client registry and body size limit.
    pub fn new(registry: Arc<ClientRegistry>, max_body_size: usize) -> Self {
        Self {
            registry,
            max_body_size,
        }
    }
}

impl<S> Layer<S> for HmacAuthLayer {
    type Service = HmacAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HmacAuthService {
            inner,
            registry: Arc::clone(&self.registry),
            max_body_size: self.max_body_size,
        }
    }
}

/// HMAC authentication service
#[derive(Clone)]
pub struct HmacAuthService<S> {
    inner: S,
    registry: Arc<ClientRegistry>,
    max_body_size: usize,
}

impl<S> Service<Request<Body>> for HmacAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let registry = Arc::clone(&self.registry);
        let max_body_size = self.max_body_size;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let signature = match header_str(&req, SIGNATURE_HEADER) {
                Some(value) => value,
                None => {
                    warn!(header = SIGNATURE_HEADER, "Missing authentication header");
                    return Ok(unauthorized_response("Missing authentication headers"));
                }
            };
            let client_id = match header_str(&req, CLIENT_ID_HEADER) {
                Some(value) => value,
                None => {
                    warn!(header = CLIENT_ID_HEADER, "Missing authentication header");
                    return Ok(unauthorized_response("Missing authentication headers"));
                }
            };

            let secret = match registry.secret_for(&client_id) {
                Some(secret) => secret.clone(),
                None => {
                    warn!(client_id = %client_id, "Unknown client identifier");
                    return Ok(unauthorized_response("Invalid signature"));
                }
            };

            // The signature covers the serialized payload as transmitted,
            // so the body must be buffered before verification.
            let (parts, body) = req.into_parts();
            let body_bytes = match to_bytes(body, max_body_size).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, "Failed to read request body");
                    return Ok(unauthorized_response("Unreadable request body"));
                }
            };

            if !shared_crypto::mac::verify(&secret, &body_bytes, &signature) {
                warn!(client_id = %client_id, "HMAC verification failed");
                return Ok(unauthorized_response("Invalid signature"));
            }

            debug!(client_id = %client_id, "HMAC verification passed");

            // Authenticated - reconstruct the request and proceed.
            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

/// Read a header as a string, if present and valid.
fn header_str<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// Build the 401 failure envelope. Identical for every rejection cause a
/// caller could probe (bad signature, unknown client).
fn unauthorized_response(message: &str) -> Response {
    let envelope: DataResponse<EnvelopeResponse> =
        DataResponse::error(StatusCode::UNAUTHORIZED.as_u16(), message);

    let mut response = Response::new(Body::from(
        serde_json::to_vec(&envelope).unwrap_or_default(),
    ));
    *response.status_mut() = StatusCode::UNAUTHORIZED;
    response
        .headers_mut()
        .insert("Content-Type", "application/json".parse().unwrap());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::SharedSecret;

    #[test]
    fn test_header_str() {
        let req = Request::builder()
            .header(SIGNATURE_HEADER, "abcdef")
            .body(Body::empty())
            .unwrap();

        assert_eq!(header_str(&req, SIGNATURE_HEADER).as_deref(), Some("abcdef"));
        assert!(header_str(&req, CLIENT_ID_HEADER).is_none());
    }

    #[test]
    fn test_unauthorized_response_shape() {
        let response = unauthorized_response("Invalid signature");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_registry_secret_resolution() {
        let mut registry = ClientRegistry::new();
        registry.insert("client-a", SharedSecret::from("secret_key"));

        let payload = br#"{"body":"00:11"}"#;
        let signature =
            shared_crypto::mac::sign(registry.secret_for("client-a").unwrap(), payload);

        assert!(shared_crypto::mac::verify(
            registry.secret_for("client-a").unwrap(),
            payload,
            &signature
        ));
        assert!(registry.secret_for("client-b").is_none());
    }
}
