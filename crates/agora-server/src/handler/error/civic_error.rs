//! Civic-data error to HTTP error conversion.

use agora_civic::Error as CivicError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for civic error conversion.
const TRACING_TARGET: &str = "agora_server::handler::civic_error";

impl From<CivicError> for Error {
    fn from(error: CivicError) -> Self {
        match &error {
            CivicError::InvalidPostcode(postcode) => ErrorKind::BadRequest
                .with_message("That does not look like a UK postcode.")
                .with_context(format!("invalid postcode: {postcode}")),
            CivicError::NotFound { resource, .. } => ErrorKind::NotFound
                .with_message("Postcode not found.")
                .with_resource("postcode")
                .with_context(format!("unknown postcode: {resource}")),
            CivicError::UnexpectedStatus { service, status } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    service = %service,
                    status = status.as_u16(),
                    "civic API answered with unexpected status"
                );
                ErrorKind::ServiceUnavailable
                    .with_message("A civic data service is currently unavailable.")
                    .with_context(error.to_string())
            }
            CivicError::Decode { service, .. } => {
                tracing::error!(
                    target: TRACING_TARGET,
                    service = %service,
                    error = %error,
                    "civic API response could not be decoded"
                );
                ErrorKind::InternalServerError.with_context(error.to_string())
            }
            CivicError::Transport(_) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "civic API transport failure"
                );
                ErrorKind::ServiceUnavailable
                    .with_message("A civic data service is currently unreachable.")
                    .with_context(error.to_string())
            }
            CivicError::Config(_) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "civic client misconfigured"
                );
                ErrorKind::InternalServerError.with_context(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_postcode_maps_to_404() {
        let error: Error = CivicError::NotFound {
            service: "postcodes.io",
            resource: "ZZ1 1ZZ".into(),
        }
        .into();

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.resource(), Some("postcode"));
    }

    #[test]
    fn test_invalid_postcode_maps_to_400() {
        let error: Error = CivicError::InvalidPostcode("garbage".into()).into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}
