//! Tour stop model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::tour_stops;

/// A single viewpoint in a guided tour.
///
/// Stops within a tour are ordered by `position`, which stays unique and
/// dense (0..n) across reorders.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tour_stops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TourStop {
    /// Unique stop identifier
    pub id: Uuid,
    /// Tour the stop belongs to
    pub tour_id: Uuid,
    /// Zero-based playback position
    pub position: i32,
    /// Stop title
    pub title: String,
    /// Narrative shown while the camera rests on this viewpoint
    pub narrative: String,
    /// Camera center longitude
    pub center_lng: f64,
    /// Camera center latitude
    pub center_lat: f64,
    /// Camera zoom level
    pub zoom: f64,
    /// Camera bearing in degrees
    pub bearing: f64,
    /// Camera pitch in degrees
    pub pitch: f64,
    /// Timestamp when the stop was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the stop was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new tour stop.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = tour_stops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTourStop {
    /// Tour the stop belongs to
    pub tour_id: Uuid,
    /// Playback position
    pub position: i32,
    /// Stop title
    pub title: String,
    /// Narrative content
    pub narrative: Option<String>,
    /// Camera center longitude
    pub center_lng: f64,
    /// Camera center latitude
    pub center_lat: f64,
    /// Camera zoom level
    pub zoom: f64,
    /// Camera bearing in degrees
    pub bearing: Option<f64>,
    /// Camera pitch in degrees
    pub pitch: Option<f64>,
}

/// Data for updating a tour stop.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tour_stops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTourStop {
    /// Stop title
    pub title: Option<String>,
    /// Narrative content
    pub narrative: Option<String>,
    /// Camera center longitude
    pub center_lng: Option<f64>,
    /// Camera center latitude
    pub center_lat: Option<f64>,
    /// Camera zoom level
    pub zoom: Option<f64>,
    /// Camera bearing in degrees
    pub bearing: Option<f64>,
    /// Camera pitch in degrees
    pub pitch: Option<f64>,
}
