//! mcphub binary
//!
//! Startup sequence: load the server configuration, connect to every
//! configured MCP server (failures are logged and skipped; zero connections
//! is fatal), then serve the HTTP API until ctrl-c.

use mcphub::config::{self, GatewayConfig};
use mcphub::error::{BackendError, GatewayError};
use mcphub::http::{self, AppState};
use mcphub::mcp::{BackendRegistry, McpStdioClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    mcphub::logging::init();

    if let Err(err) = run().await {
        error!(error = %err, "gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), GatewayError> {
    let (config, path) = GatewayConfig::discover()?;
    info!(
        path = %path.display(),
        servers = config.servers.len(),
        "loaded MCP server configuration"
    );

    let registry = connect_all(&config).await?;
    let state = AppState::new(Arc::new(registry));

    let addr = SocketAddr::from(([0, 0, 0, 0], config::listen_port()));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gateway listening");

    axum::serve(listener, http::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Connect to every configured server concurrently and register the
/// successes. One failed server never blocks the others; only a complete
/// connection failure is fatal.
async fn connect_all(config: &GatewayConfig) -> Result<BackendRegistry, GatewayError> {
    let connections =
        futures::future::join_all(config.servers.iter().map(|(id, spec)| async move {
            (id.clone(), McpStdioClient::connect(id.clone(), spec).await)
        }))
        .await;

    let mut registry = BackendRegistry::new();
    for (id, result) in connections {
        match result {
            Ok(client) => {
                registry.register(&id, Arc::new(client))?;
                info!(server = %id, "connected to MCP server");
            }
            Err(err) => {
                warn!(server = %id, error = %err, "failed to connect to MCP server");
            }
        }
    }

    if registry.is_empty() {
        return Err(BackendError::NoServers.into());
    }
    info!(connected = registry.len(), "MCP servers ready");

    Ok(registry)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
    }
    info!("shutting down");
}
