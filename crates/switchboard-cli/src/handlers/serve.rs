//! Serve command handler.
//!
//! Binds the listen address and runs the gateway until Ctrl+C.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use switchboard_core::{BackendRegistry, GatewayConfig};

/// Execute the serve command.
///
/// Command-line `host` and `port` take precedence over the configuration
/// file. The server runs until a shutdown signal arrives, then drains
/// in-flight requests before returning.
pub async fn execute(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let config = GatewayConfig::load(config_path)?;
    let registry = Arc::new(BackendRegistry::from_config(&config)?);

    let host = host.unwrap_or_else(|| config.listen.host.clone());
    let port = port.unwrap_or(config.listen.port);

    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;

    println!("Routing to {} backend(s):", registry.entries().len());
    for entry in registry.entries() {
        println!("  {} -> {}", entry.key, entry.descriptor.base_url);
    }
    println!("Gateway listening on http://{host}:{port} (Press Ctrl+C to stop)");

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown signal received");
                shutdown.cancel();
            }
            Err(error) => tracing::error!(%error, "failed to listen for shutdown signal"),
        }
    });

    switchboard_gateway::server::serve(listener, registry, static_dir, cancel).await
}
