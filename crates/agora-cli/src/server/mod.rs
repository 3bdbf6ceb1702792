//! HTTP server startup with graceful shutdown.

mod shutdown;

use std::io;

use axum::Router;
use shutdown::shutdown_signal;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP};

/// Starts the HTTP server and runs it until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if the listener cannot bind to the configured address or
/// the server encounters a fatal error while running.
pub async fn serve(app: Router, server_config: ServerConfig) -> io::Result<()> {
    let server_addr = server_config.server_addr();

    let listener = match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                "successfully bound to address"
            );
            listener
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET_STARTUP,
                addr = %server_addr,
                error = %error,
                "failed to bind to address"
            );
            return Err(error);
        }
    };

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "server is bound to all interfaces; ensure firewall rules are configured"
        );
    }

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        addr = %server_addr,
        "server is ready and listening for connections"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.shutdown_timeout()))
        .await
        .inspect_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_SHUTDOWN,
                error = %error,
                "server encountered an error"
            );
        })?;

    tracing::info!(target: TRACING_TARGET_SHUTDOWN, "server shut down gracefully");
    Ok(())
}
