//! Tour model for guided site walkthroughs.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::tours;

/// A guided walkthrough of a project site.
///
/// A tour is an ordered sequence of [`TourStop`]s played back in the
/// embeddable map widget.
///
/// [`TourStop`]: crate::model::TourStop
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tour {
    /// Unique tour identifier
    pub id: Uuid,
    /// Project the tour belongs to
    pub project_id: Uuid,
    /// Tour title
    pub title: String,
    /// Tour description shown before playback
    pub description: String,
    /// Whether the tour is served to the public widget
    pub is_published: bool,
    /// Timestamp when the tour was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the tour was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new tour.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = tours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTour {
    /// Project the tour belongs to
    pub project_id: Uuid,
    /// Tour title
    pub title: String,
    /// Tour description
    pub description: Option<String>,
    /// Published state
    pub is_published: Option<bool>,
}

/// Data for updating a tour.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTour {
    /// Tour title
    pub title: Option<String>,
    /// Tour description
    pub description: Option<String>,
    /// Published state
    pub is_published: Option<bool>,
}
