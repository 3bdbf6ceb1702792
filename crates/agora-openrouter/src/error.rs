//! Error types for the OpenRouter integration.

use agora_core::ErrorKind;

/// A specialized [`Result`] type for OpenRouter operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for OpenRouter operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors do nothing unless handled"]
pub enum Error {
    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API.
        status: reqwest::StatusCode,
        /// Error body, as far as it could be read.
        message: String,
    },

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The completion response could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The model returned no choices.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The model's output did not match the format the prompt asked for.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

impl Error {
    /// Returns whether this failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(source) => source.is_timeout() || source.is_connect(),
            Error::Api { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl From<Error> for agora_core::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::Config(_) => ErrorKind::Configuration,
            Error::Api { status, .. } if *status == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                ErrorKind::RateLimited
            }
            Error::Api { .. } => ErrorKind::External,
            Error::Transport(source) if source.is_timeout() => ErrorKind::Timeout,
            Error::Transport(_) => ErrorKind::Network,
            Error::Decode(_) | Error::MalformedOutput(_) => ErrorKind::Serialization,
            Error::EmptyResponse => ErrorKind::External,
        };

        agora_core::Error::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}
