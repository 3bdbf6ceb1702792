//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── service: ServiceConfig       # Database, OpenRouter, civic APIs
//! ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! └── server: ServerConfig         # Host, port, shutdown
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod middleware;
mod server;

use agora_server::service::ServiceConfig;
use clap::Parser;
pub use middleware::MiddlewareConfig;
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
///
/// Combines all configuration groups for the agora server:
/// - [`ServiceConfig`]: External service connections (Postgres, OpenRouter, civic APIs)
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, recovery)
/// - [`ServerConfig`]: Network binding and lifecycle
#[derive(Debug, Clone, Parser)]
#[command(name = "agora")]
#[command(about = "Agora stakeholder-consultation and public-engagement server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// External service configuration (database, AI, civic APIs).
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env (if enabled) and parses CLI
    /// arguments.
    ///
    /// This is the preferred way to initialize the CLI configuration as it
    /// ensures .env files are loaded before clap parses arguments, allowing
    /// environment variables from .env to be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs effective startup configuration at info level.
    pub fn log_startup_info(&self) {
        tracing::info!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            host = %self.server.host,
            port = self.server.port,
            "starting agora server"
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
