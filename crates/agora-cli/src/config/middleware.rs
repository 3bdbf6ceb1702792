//! HTTP middleware configuration.

use agora_server::middleware::{CorsConfig, RecoveryConfig};
use clap::Args;
use serde::{Deserialize, Serialize};

/// HTTP middleware configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Origins allowed to call the API (comma-separated). Empty allows any
    /// origin, which the public embed endpoints rely on.
    #[arg(
        long = "cors-allowed-origins",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Per-request timeout in seconds.
    #[arg(
        long = "request-timeout-secs",
        env = "REQUEST_TIMEOUT_SECS",
        default_value = "30"
    )]
    pub request_timeout_secs: u64,
}

impl MiddlewareConfig {
    /// Builds the CORS layer configuration.
    pub fn cors_config(&self) -> CorsConfig {
        CorsConfig {
            allowed_origins: self.cors_allowed_origins.clone(),
        }
    }

    /// Builds the recovery layer configuration.
    pub fn recovery_config(&self) -> RecoveryConfig {
        RecoveryConfig {
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: Vec::new(),
            request_timeout_secs: 30,
        }
    }
}
