//! Envelope Gateway - HTTP interface for authenticated, encrypted envelopes.
//!
//! This crate provides the demo endpoint of the Cipher-Gate backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ENVELOPE GATEWAY                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /api/v1/demo                                           │
//! │         │                                                    │
//! │  ┌──────┴───────────────────────────────────┐                │
//! │  │            Middleware Stack              │                │
//! │  │   CORS → Trace → HMAC Authentication     │                │
//! │  └──────┬───────────────────────────────────┘                │
//! │         │  (signature verified over the raw payload)         │
//! │  ┌──────┴───────────────────────────────────┐                │
//! │  │     Decrypt → Validate → Encrypt         │                │
//! │  │              Pipeline                    │                │
//! │  └──────────────────────────────────────────┘                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Security
//!
//! - HMAC-SHA256 check over the raw request body before any parsing
//! - Per-client signing secrets resolved from the client registry
//! - AES-256-CBC envelope bodies with a fresh IV per response
//! - Unexpected failures logged internally, never echoed to the caller

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dispatch;
pub mod domain;
pub mod middleware;
pub mod pipeline;
pub mod router;
pub mod service;

// Re-exports for public API
pub use dispatch::{CommandHandler, EchoNameCommand};
pub use domain::config::{ClientRegistry, GatewayConfig};
pub use domain::contracts::{DataResponse, EnvelopeRequest, EnvelopeResponse};
pub use domain::error::{GatewayError, PipelineError};
pub use pipeline::EchoNameHandler;
pub use router::build_router;
pub use service::EnvelopeGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
