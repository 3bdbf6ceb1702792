//! LLM error to HTTP error conversion.

use agora_openrouter::Error as LlmError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for LLM error conversion.
const TRACING_TARGET: &str = "agora_server::handler::llm_error";

impl From<LlmError> for Error {
    fn from(error: LlmError) -> Self {
        match &error {
            LlmError::Api { status, .. }
                if *status == axum::http::StatusCode::TOO_MANY_REQUESTS =>
            {
                ErrorKind::TooManyRequests
                    .with_message("The analysis service is rate limited; try again shortly.")
            }
            LlmError::Api { .. } | LlmError::Transport(_) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "analysis model unavailable"
                );
                ErrorKind::ServiceUnavailable
                    .with_message("The analysis service is currently unavailable.")
                    .with_context(error.to_string())
            }
            LlmError::EmptyResponse | LlmError::MalformedOutput(_) | LlmError::Decode(_) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "analysis model returned unusable output"
                );
                ErrorKind::InternalServerError
                    .with_message("The analysis could not be completed.")
                    .with_context(error.to_string())
            }
            LlmError::Config(_) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "analysis client misconfigured"
                );
                ErrorKind::InternalServerError.with_context(error.to_string())
            }
        }
    }
}
