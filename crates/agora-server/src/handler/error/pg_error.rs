//! Database error to HTTP error conversion.

use agora_postgres::PgError;
use agora_postgres::error::DieselError;
use agora_postgres::types::{
    ConstraintViolation, ProjectConstraints, SubscriberConstraints, TourStopConstraints,
};

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversion.
const TRACING_TARGET: &str = "agora_server::handler::pg_error";

impl From<ConstraintViolation> for Error {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Project(ProjectConstraints::SlugUnique) => ErrorKind::Conflict
                .with_message("A project with this slug already exists.")
                .with_resource("project"),
            ConstraintViolation::Project(_) => ErrorKind::BadRequest
                .with_message("Project data failed a database check.")
                .with_resource("project"),
            ConstraintViolation::Subscriber(SubscriberConstraints::ProjectEmailUnique) => {
                ErrorKind::Conflict
                    .with_message("This address is already on the mailing list.")
                    .with_resource("subscriber")
            }
            ConstraintViolation::Subscriber(_) => ErrorKind::BadRequest
                .with_message("Subscriber data failed a database check.")
                .with_resource("subscriber"),
            ConstraintViolation::TourStop(TourStopConstraints::TourPositionUnique) => {
                ErrorKind::Conflict
                    .with_message("A stop already occupies this position.")
                    .with_resource("tour_stop")
            }
            ConstraintViolation::TourStop(_) => ErrorKind::BadRequest
                .with_message("Tour stop data failed a database check.")
                .with_resource("tour_stop"),
            ConstraintViolation::PublicPin(_) => ErrorKind::BadRequest
                .with_message("Pin data failed a database check.")
                .with_resource("pin"),
            ConstraintViolation::Councillor(_) => ErrorKind::Conflict
                .with_message("Duplicate councillor directory entry.")
                .with_resource("councillor"),
        }
    }
}

impl From<PgError> for Error {
    fn from(error: PgError) -> Self {
        if let Some(constraint) = error.constraint_violation() {
            tracing::debug!(
                target: TRACING_TARGET,
                constraint = %constraint,
                "constraint violation"
            );
            return constraint.into();
        }

        match error {
            PgError::Query(DieselError::NotFound) => ErrorKind::NotFound.into_error(),
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout"
                );
                ErrorKind::ServiceUnavailable.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::ServiceUnavailable.into_error()
            }
            other => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %other,
                    "database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error: Error = PgError::Query(DieselError::NotFound).into();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_slug_conflict_maps_to_409() {
        let violation = ConstraintViolation::new("projects_slug_unique_idx").unwrap();
        let error: Error = violation.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("project"));
    }
}
