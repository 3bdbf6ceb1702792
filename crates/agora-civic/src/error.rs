//! Error types for civic-data lookups.

use agora_core::ErrorKind;

/// A specialized [`Result`] type for civic-data operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for civic-data lookups.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors do nothing unless handled"]
pub enum Error {
    /// The supplied postcode failed basic shape validation.
    #[error("invalid postcode: {0}")]
    InvalidPostcode(String),

    /// The upstream API does not know the requested resource.
    #[error("{service}: not found: {resource}")]
    NotFound {
        /// Which upstream API answered.
        service: &'static str,
        /// What was asked for.
        resource: String,
    },

    /// The upstream API answered with an unexpected status code.
    #[error("{service}: unexpected status {status}")]
    UnexpectedStatus {
        /// Which upstream API answered.
        service: &'static str,
        /// The HTTP status received.
        status: reqwest::StatusCode,
    },

    /// The upstream response could not be decoded.
    #[error("{service}: decode error: {source}")]
    Decode {
        /// Which upstream API answered.
        service: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Client construction or configuration failure.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns whether this failure is worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(source) => source.is_timeout() || source.is_connect(),
            Error::UnexpectedStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

impl From<Error> for agora_core::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::InvalidPostcode(_) => ErrorKind::InvalidInput,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::UnexpectedStatus { .. } => ErrorKind::External,
            Error::Decode { .. } => ErrorKind::Serialization,
            Error::Transport(source) if source.is_timeout() => ErrorKind::Timeout,
            Error::Transport(_) => ErrorKind::Network,
            Error::Config(_) => ErrorKind::Configuration,
        };

        agora_core::Error::new(kind)
            .with_message(error.to_string())
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_transient() {
        let error = Error::UnexpectedStatus {
            service: "mapit",
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert!(error.is_transient());

        let error = Error::UnexpectedStatus {
            service: "mapit",
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert!(!error.is_transient());
    }

    #[test]
    fn test_core_error_kind_mapping() {
        let error = Error::InvalidPostcode("xyz".into());
        let core: agora_core::Error = error.into();
        assert_eq!(core.kind, ErrorKind::InvalidInput);
    }
}
