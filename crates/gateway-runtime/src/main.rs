//! # Cipher-Gate Gateway Runtime
//!
//! The main entry point for the envelope gateway node.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG` controls the filter)
//! 2. Load configuration from the environment
//! 3. Validate and start the HTTP service
//! 4. Run until Ctrl+C, then shut down gracefully
//!
//! ## Configuration
//!
//! - `CG_ENCRYPTION_KEY` — 32-byte shared symmetric key (required)
//! - `CG_CLIENT_SECRETS` — `client-id=secret` comma list (required)
//! - `CG_HTTP_HOST` / `CG_HTTP_PORT` — bind address (default 0.0.0.0:8080)

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use envelope_gateway::{EnvelopeGatewayService, GatewayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Creating Cipher-Gate envelope gateway");

    // Load configuration
    let config = GatewayConfig::from_env().context("loading gateway configuration")?;

    // Create and start the service
    let mut service =
        EnvelopeGatewayService::new(config).context("creating gateway service")?;
    service.start().await.context("starting gateway service")?;

    // Keep the gateway running
    info!("Gateway is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    service.shutdown().await;

    Ok(())
}
