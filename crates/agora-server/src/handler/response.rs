//! The JSON error body every failed request serializes to.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Validation error details for field-specific errors.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationErrorDetail {
    /// Field name that failed validation
    pub field: String,
    /// Error code for the validation failure
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional parameters related to the validation error
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub params: Option<HashMap<String, serde_json::Value>>,
}

/// HTTP error response representation.
///
/// Contains everything needed to serialize an error response: the stable
/// error name, a client-safe message, optional resource/suggestion/validation
/// detail, and the status code (not serialized).
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// The error name/type identifier
    #[schema(value_type = String)]
    pub name: Cow<'static, str>,
    /// User-friendly error message safe for client display
    #[schema(value_type = String)]
    pub message: Cow<'static, str>,
    /// The resource that the error relates to (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub resource: Option<Cow<'static, str>>,
    /// Validation error details for field-specific errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<ValidationErrorDetail>>,

    /// Internal context for debugging (not exposed to the client)
    #[serde(skip)]
    pub context: Option<Cow<'static, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self =
        Self::new("conflict", "Resource state conflict.", StatusCode::CONFLICT);
    pub const FORBIDDEN: Self = Self::new("forbidden", "Access denied.", StatusCode::FORBIDDEN);
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Missing path parameter.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const NOT_IMPLEMENTED: Self = Self::new(
        "not_implemented",
        "Not implemented.",
        StatusCode::NOT_IMPLEMENTED,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "Payload too large.",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Upstream service unavailable.",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const TOO_MANY_REQUESTS: Self = Self::new(
        "too_many_requests",
        "Rate limit exceeded.",
        StatusCode::TOO_MANY_REQUESTS,
    );
    pub const UNPROCESSABLE_ENTITY: Self = Self::new(
        "unprocessable_entity",
        "Request could not be processed.",
        StatusCode::UNPROCESSABLE_ENTITY,
    );

    /// Creates a new [`ErrorResponse`].
    const fn new(name: &'static str, message: &'static str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            validation: None,
            context: None,
            status,
        }
    }

    /// Replaces the client-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the resource the error relates to.
    pub fn with_resource(mut self, resource: impl Into<Cow<'static, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Attaches internal context (logged, never serialized).
    pub fn with_context(mut self, context: impl Into<Cow<'static, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attaches field-level validation details.
    pub fn with_validation(mut self, validation: Vec<ValidationErrorDetail>) -> Self {
        self.validation = Some(validation);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        if let Some(context) = &self.context {
            tracing::debug!(
                name = %self.name,
                status = self.status.as_u16(),
                context = %context,
                "error response context"
            );
        }

        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_not_serialized() {
        let response = ErrorResponse::BAD_REQUEST.with_context("secret internals");
        let body = serde_json::to_string(&response).unwrap();
        assert!(!body.contains("secret internals"));
        assert!(body.contains("bad_request"));
    }

    #[test]
    fn test_resource_is_serialized() {
        let response = ErrorResponse::NOT_FOUND.with_resource("project");
        let body = serde_json::to_string(&response).unwrap();
        assert!(body.contains("\"resource\":\"project\""));
    }
}
