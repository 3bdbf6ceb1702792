//! Observability middleware for request tracing.

use axum::Router;
use axum::http::header;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates unique request IDs, adds structured logging spans for each
    /// request, propagates request IDs to responses, and marks sensitive
    /// headers for redaction in logs.
    fn with_observability(self) -> Self;
}

impl RouterObservabilityExt for Router {
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
    }
}
