//! Envelope gateway service - main entry point.
//!
//! Owns the HTTP server lifecycle: validate configuration, bind, serve,
//! and shut down gracefully on signal.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::dispatch::CommandHandler;
use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::pipeline::EchoNameHandler;
use crate::router::build_router;

/// Envelope gateway service state
pub struct EnvelopeGatewayService {
    config: GatewayConfig,
    handler: Arc<dyn CommandHandler>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    serve_handle: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl EnvelopeGatewayService {
    /// Create a new gateway service.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if the configuration is invalid.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let handler: Arc<dyn CommandHandler> =
            Arc::new(EchoNameHandler::new(config.encryption_key.clone()));

        Ok(Self {
            config,
            handler,
            shutdown_tx: None,
            serve_handle: None,
        })
    }

    /// Start the HTTP server.
    ///
    /// Binds the listener, then serves on a background task until
    /// `shutdown` is called.
    pub async fn start(&mut self) -> Result<(), GatewayError> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let router = build_router(&self.config, Arc::clone(&self.handler));
        let addr = self.config.http_addr();

        info!(addr = %addr, clients = self.config.clients.len(), "Starting envelope gateway");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        self.serve_handle = Some(tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        }));

        info!("Envelope gateway started");
        Ok(())
    }

    /// Signal shutdown and wait for the server task to drain.
    pub async fn shutdown(&mut self) {
        info!("Shutting down envelope gateway");

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.serve_handle.take() {
            match handle.await {
                Ok(Ok(())) => info!("Envelope gateway stopped"),
                Ok(Err(e)) => error!(error = %e, "Server error during shutdown"),
                Err(e) => error!(error = %e, "Server task panicked"),
            }
        }
    }
}
