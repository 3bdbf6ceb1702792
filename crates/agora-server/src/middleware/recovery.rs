//! Recovery middleware: panic capture and request timeouts.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use super::TRACING_TARGET_RECOVERY;
use crate::handler::ErrorKind;

/// Configuration for the recovery layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl RecoveryConfig {
    /// Returns the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt {
    /// Layers panic capture and request timeout middleware.
    ///
    /// A panicking handler produces a 500 with the platform's JSON error
    /// shape instead of tearing down the connection.
    fn with_recovery(self, config: RecoveryConfig) -> Self;
}

impl RouterRecoveryExt for Router {
    fn with_recovery(self, config: RecoveryConfig) -> Self {
        self.layer(CatchPanicLayer::custom(panic_response))
            .layer(TimeoutLayer::new(config.request_timeout()))
    }
}

/// Converts a captured panic into the standard 500 response.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "unknown panic payload".to_owned()
    };

    tracing::error!(
        target: TRACING_TARGET_RECOVERY,
        panic = %detail,
        "handler panicked"
    );

    ErrorKind::InternalServerError.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = RecoveryConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_panic_response_is_500() {
        let response = panic_response(Box::new("boom".to_owned()));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
