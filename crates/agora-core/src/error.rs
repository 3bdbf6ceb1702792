//! Common error type definitions.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error as ThisError;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Commonly used as the source error in structured error types, wrapping any
/// error that implements the standard `Error` trait while keeping the Send and
/// Sync bounds required in async contexts.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur when talking to external services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// Network-related error occurred.
    Network,
    /// Rate limit exceeded.
    RateLimited,
    /// Service temporarily unavailable.
    ServiceUnavailable,
    /// External service returned an error.
    External,
    /// Configuration error.
    Configuration,
    /// Resource not found.
    NotFound,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Unknown error occurred.
    Unknown,
}

/// A structured error type shared by the platform's service clients.
#[derive(Debug, ThisError)]
#[error("{kind:?}{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network() -> Self {
        Self::new(ErrorKind::Network)
    }

    /// Creates a new rate limited error.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited)
    }

    /// Creates a new service unavailable error.
    pub fn service_unavailable() -> Self {
        Self::new(ErrorKind::ServiceUnavailable)
    }

    /// Creates a new external service error.
    pub fn external() -> Self {
        Self::new(ErrorKind::External)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Returns whether this error indicates a transient failure that might
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Network
                | ErrorKind::RateLimited
                | ErrorKind::ServiceUnavailable
                | ErrorKind::Timeout
        )
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_with_message() {
        let error = Error::not_found().with_message("no such postcode");
        assert_eq!(error.to_string(), "NotFound: no such postcode");
    }

    #[test]
    fn test_error_display_without_message() {
        let error = Error::timeout();
        assert_eq!(error.to_string(), "Timeout");
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::rate_limited().is_transient());
        assert!(Error::timeout().is_transient());
        assert!(!Error::invalid_input().is_transient());
        assert!(!Error::configuration().is_transient());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(ErrorKind::ServiceUnavailable.as_ref(), "service_unavailable");
        assert_eq!(ErrorKind::NotFound.as_ref(), "not_found");
    }
}
