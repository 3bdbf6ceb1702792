//! Database constraint violations organized by table.
//!
//! Constraint names are matched against the names declared in the migrations
//! so handlers can turn a raw database error into a precise HTTP response.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

/// Projects table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ProjectConstraints {
    #[strum(serialize = "projects_slug_unique_idx")]
    SlugUnique,
    #[strum(serialize = "projects_slug_format")]
    SlugFormat,
    #[strum(serialize = "projects_display_name_length")]
    DisplayNameLength,
    #[strum(serialize = "projects_updated_after_created")]
    UpdatedAfterCreated,
}

/// Public pins table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum PublicPinConstraints {
    #[strum(serialize = "public_pins_comment_length")]
    CommentLength,
    #[strum(serialize = "public_pins_reactions_nonnegative")]
    ReactionsNonNegative,
}

/// Subscribers table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum SubscriberConstraints {
    #[strum(serialize = "subscribers_project_email_unique_idx")]
    ProjectEmailUnique,
    #[strum(serialize = "subscribers_email_length")]
    EmailLength,
}

/// Tour stops table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TourStopConstraints {
    #[strum(serialize = "tour_stops_tour_position_unique_idx")]
    TourPositionUnique,
    #[strum(serialize = "tour_stops_position_nonnegative")]
    PositionNonNegative,
}

/// Councillors table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CouncillorConstraints {
    #[strum(serialize = "councillors_directory_unique_idx")]
    DirectoryUnique,
}

macro_rules! impl_constraint_conversions {
    ($($t:ty),+ $(,)?) => {$(
        impl $t {
            /// Creates a new constraint from the raw constraint name.
            pub fn new(constraint: &str) -> Option<Self> {
                constraint.parse().ok()
            }
        }

        impl From<$t> for String {
            #[inline]
            fn from(val: $t) -> Self {
                val.to_string()
            }
        }

        impl TryFrom<String> for $t {
            type Error = strum::ParseError;

            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    )+};
}

impl_constraint_conversions!(
    ProjectConstraints,
    PublicPinConstraints,
    SubscriberConstraints,
    TourStopConstraints,
    CouncillorConstraints,
);

impl ProjectConstraints {
    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ProjectConstraints::SlugUnique => ConstraintCategory::Uniqueness,
            ProjectConstraints::SlugFormat | ProjectConstraints::DisplayNameLength => {
                ConstraintCategory::Validation
            }
            ProjectConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

/// Unified constraint violation enum that can represent any database constraint.
///
/// Wraps the per-table constraint types, providing a single interface for
/// handling any constraint violation while keeping the per-table names typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Project(ProjectConstraints),
    PublicPin(PublicPinConstraints),
    Subscriber(SubscriberConstraints),
    TourStop(TourStopConstraints),
    Councillor(CouncillorConstraints),
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use agora_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("projects_slug_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if let Some(c) = ProjectConstraints::new(constraint) {
            return Some(Self::Project(c));
        }
        if let Some(c) = PublicPinConstraints::new(constraint) {
            return Some(Self::PublicPin(c));
        }
        if let Some(c) = SubscriberConstraints::new(constraint) {
            return Some(Self::Subscriber(c));
        }
        if let Some(c) = TourStopConstraints::new(constraint) {
            return Some(Self::TourStop(c));
        }
        if let Some(c) = CouncillorConstraints::new(constraint) {
            return Some(Self::Councillor(c));
        }
        None
    }

    /// Returns whether this violation is a uniqueness conflict.
    pub fn is_uniqueness(&self) -> bool {
        matches!(
            self,
            ConstraintViolation::Project(ProjectConstraints::SlugUnique)
                | ConstraintViolation::Subscriber(SubscriberConstraints::ProjectEmailUnique)
                | ConstraintViolation::TourStop(TourStopConstraints::TourPositionUnique)
                | ConstraintViolation::Councillor(CouncillorConstraints::DirectoryUnique)
        )
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Project(c) => c.fmt(f),
            ConstraintViolation::PublicPin(c) => c.fmt(f),
            ConstraintViolation::Subscriber(c) => c.fmt(f),
            ConstraintViolation::TourStop(c) => c.fmt(f),
            ConstraintViolation::Councillor(c) => c.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_constraints() {
        assert_eq!(
            ConstraintViolation::new("projects_slug_unique_idx"),
            Some(ConstraintViolation::Project(ProjectConstraints::SlugUnique))
        );
        assert_eq!(
            ConstraintViolation::new("subscribers_project_email_unique_idx"),
            Some(ConstraintViolation::Subscriber(
                SubscriberConstraints::ProjectEmailUnique
            ))
        );
        assert!(ConstraintViolation::new("no_such_constraint").is_none());
    }

    #[test]
    fn test_uniqueness_classification() {
        let slug = ConstraintViolation::new("projects_slug_unique_idx").unwrap();
        assert!(slug.is_uniqueness());

        let reactions = ConstraintViolation::new("public_pins_reactions_nonnegative").unwrap();
        assert!(!reactions.is_uniqueness());
    }

    #[test]
    fn test_display_round_trip() {
        let violation = ConstraintViolation::new("tour_stops_tour_position_unique_idx").unwrap();
        assert_eq!(violation.to_string(), "tour_stops_tour_position_unique_idx");
    }
}
