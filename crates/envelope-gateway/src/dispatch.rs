//! Command dispatch seam.
//!
//! The gateway hands decrypted-and-validated work to a handler behind a
//! trait object: plain data in, a response envelope out. Registering a
//! different `CommandHandler` swaps the business transform without
//! touching the transport or crypto layers.

use async_trait::async_trait;

use crate::domain::contracts::{DataResponse, EnvelopeRequest, EnvelopeResponse};

/// The demo command: an envelope request wrapped for dispatch.
///
/// `request` is an `Option` so an absent request is representable and
/// reported by the pipeline's shape checks.
#[derive(Debug, Clone, Default)]
pub struct EchoNameCommand {
    /// The inbound envelope, if one was supplied
    pub request: Option<EnvelopeRequest>,
}

impl EchoNameCommand {
    /// Wrap an envelope request for dispatch.
    pub fn new(request: EnvelopeRequest) -> Self {
        Self {
            request: Some(request),
        }
    }
}

/// Handler invoked with a plain data object, returning a response
/// envelope. Never panics across this boundary; every failure is a
/// failure envelope.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Process one command end to end.
    async fn handle(&self, command: Option<EchoNameCommand>) -> DataResponse<EnvelopeResponse>;
}
