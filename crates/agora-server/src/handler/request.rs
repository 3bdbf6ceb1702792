//! Request types shared across handlers.

use agora_postgres::query::Pagination as QueryPagination;
use agora_postgres::types::PinKind;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::handler::{Error, ErrorKind, Result};

/// Represents pagination parameters commonly used in API queries.
///
/// `PaginationRequest` allows clients to retrieve data in chunks by
/// specifying how many records to skip and how many to fetch.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationRequest {
    /// The number of records to skip before starting to return results.
    pub offset: Option<u32>,

    /// The maximum number of records to return.
    pub limit: Option<u32>,
}

impl PaginationRequest {
    /// Default pagination limit.
    const DEFAULT_LIMIT: u32 = 25;
    /// Default pagination offset.
    const DEFAULT_OFFSET: u32 = 0;

    /// Returns the pagination offset.
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    /// Returns the pagination limit.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<PaginationRequest> for QueryPagination {
    fn from(pagination: PaginationRequest) -> Self {
        Self::new(pagination.limit() as i64, pagination.offset() as i64)
    }
}

/// Validates a pin geometry payload against its kind.
///
/// Checks the coordinate count allowed by the kind and that every pair is a
/// plausible WGS84 coordinate.
pub fn validate_geometry(kind: PinKind, coordinates: &[[f64; 2]]) -> Result<()> {
    let count = coordinates.len();

    if count < kind.min_coordinates() || count > kind.max_coordinates() {
        return Err(ErrorKind::BadRequest.with_message(format!(
            "A {kind_name} requires between {min} and {max} coordinate pairs, got {count}.",
            kind_name = geometry_name(kind),
            min = kind.min_coordinates(),
            max = kind.max_coordinates(),
        )));
    }

    for &[lng, lat] in coordinates {
        if !lng.is_finite() || !lat.is_finite() || !(-180.0..=180.0).contains(&lng)
            || !(-90.0..=90.0).contains(&lat)
        {
            return Err(ErrorKind::BadRequest
                .with_message(format!("({lng}, {lat}) is not a valid WGS84 coordinate.")));
        }
    }

    Ok(())
}

/// Validates a project slug: lowercase alphanumeric words joined by single
/// hyphens. Mirrors the database's `projects_slug_format` check so bad slugs
/// fail before they reach a transaction.
pub fn validate_slug(slug: &str) -> Result<(), Error> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(ErrorKind::BadRequest.with_message(
            "Slug must be lowercase words joined by single hyphens (e.g. 'high-street-scheme').",
        ))
    }
}

fn geometry_name(kind: PinKind) -> &'static str {
    match kind {
        PinKind::Point => "point",
        PinKind::Line => "line",
        PinKind::Polygon => "polygon",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_requires_exactly_one_pair() {
        assert!(validate_geometry(PinKind::Point, &[[0.0, 51.5]]).is_ok());
        assert!(validate_geometry(PinKind::Point, &[]).is_err());
        assert!(validate_geometry(PinKind::Point, &[[0.0, 51.5], [0.1, 51.6]]).is_err());
    }

    #[test]
    fn test_line_requires_two_pairs() {
        assert!(validate_geometry(PinKind::Line, &[[0.0, 51.5]]).is_err());
        assert!(validate_geometry(PinKind::Line, &[[0.0, 51.5], [0.1, 51.6]]).is_ok());
    }

    #[test]
    fn test_polygon_requires_three_pairs() {
        let triangle = [[0.0, 51.5], [0.1, 51.6], [0.2, 51.5]];
        assert!(validate_geometry(PinKind::Polygon, &triangle).is_ok());
        assert!(validate_geometry(PinKind::Polygon, &triangle[..2]).is_err());
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        assert!(validate_geometry(PinKind::Point, &[[200.0, 51.5]]).is_err());
        assert!(validate_geometry(PinKind::Point, &[[0.0, 95.0]]).is_err());
        assert!(validate_geometry(PinKind::Point, &[[f64::NAN, 51.5]]).is_err());
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("high-street-scheme").is_ok());
        assert!(validate_slug("a1").is_ok());
        assert!(validate_slug("High-Street").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = PaginationRequest::default();
        assert_eq!(pagination.limit(), 25);
        assert_eq!(pagination.offset(), 0);
    }
}
