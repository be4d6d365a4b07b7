//! HTTP router: routes, state, and the middleware stack.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::dispatch::{CommandHandler, EchoNameCommand};
use crate::domain::config::GatewayConfig;
use crate::domain::contracts::EnvelopeRequest;
use crate::middleware::{create_cors_layer, HmacAuthLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The registered command handler for the demo endpoint
    pub handler: Arc<dyn CommandHandler>,
}

/// Build the gateway router.
///
/// The demo endpoint sits behind the HMAC authentication layer; the
/// health probe does not. CORS and tracing wrap everything.
pub fn build_router(config: &GatewayConfig, handler: Arc<dyn CommandHandler>) -> Router {
    let state = AppState { handler };

    let auth = HmacAuthLayer::new(
        Arc::new(config.clients.clone()),
        config.limits.max_request_size,
    );

    Router::new()
        .route("/api/v1/demo", post(demo_endpoint))
        .layer(auth)
        .route("/health", get(health))
        .layer(create_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /api/v1/demo` — the envelope pipeline endpoint.
///
/// The HTTP status mirrors the envelope's `StatusCode`. A JSON `null`
/// body is an absent request; a present object with a missing `body`
/// field is reported by the pipeline's shape checks.
async fn demo_endpoint(
    State(state): State<AppState>,
    Json(request): Json<Option<EnvelopeRequest>>,
) -> impl IntoResponse {
    let command = EchoNameCommand { request };
    let response = state.handler.handle(Some(command)).await;

    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

/// `GET /health` — liveness probe.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
