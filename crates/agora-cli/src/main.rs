#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use agora_server::handler::create_app_router;
use agora_server::middleware::{
    RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
};
use agora_server::service::ServiceState;
use anyhow::Context;
use axum::Router;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "agora_cli::server::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "agora_cli::server::shutdown";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log_startup_info();

    cli.service
        .validate()
        .context("invalid service configuration")?;
    cli.server
        .validate()
        .context("invalid server configuration")?;

    let state = ServiceState::from_config(&cli.service)
        .context("failed to create service state")?;

    apply_migrations(&state).await?;

    let router = create_router(state, &cli.middleware);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Applies pending database migrations before accepting traffic.
async fn apply_migrations(state: &ServiceState) -> anyhow::Result<()> {
    let versions = state
        .pg_client()
        .run_pending_migrations()
        .await
        .context("failed to apply database migrations")?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        applied = versions.len(),
        "database schema is up to date"
    );

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS and security headers
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    create_app_router(state)
        .with_security(middleware.cors_config())
        .with_observability()
        .with_recovery(middleware.recovery_config())
}
