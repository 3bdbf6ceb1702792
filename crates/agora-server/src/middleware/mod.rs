//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides router extension traits for:
//! - Observability (request IDs, tracing spans, sensitive-header redaction)
//! - Recovery (panic capture, request timeouts)
//! - Security (CORS, security headers)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use agora_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};

// Tracing target constants for consistent logging.
pub const TRACING_TARGET_RECOVERY: &str = "agora_server::middleware::recovery";
pub const TRACING_TARGET_SECURITY: &str = "agora_server::middleware::security";
