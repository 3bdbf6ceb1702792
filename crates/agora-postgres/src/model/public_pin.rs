//! Public pin model for map-anchored feedback.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::public_pins;
use crate::types::{PinKind, PinStatus};

/// A map-anchored feedback item submitted by a site visitor.
///
/// The coordinate payload is stored as JSONB: an array of `[lng, lat]` pairs
/// whose valid length depends on [`PinKind`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = public_pins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicPin {
    /// Unique pin identifier
    pub id: Uuid,
    /// Project the pin belongs to
    pub project_id: Uuid,
    /// Geometry kind (point, line, polygon)
    pub kind: PinKind,
    /// Coordinate pairs as JSONB
    pub coordinates: serde_json::Value,
    /// Visitor comment attached to the geometry
    pub comment: String,
    /// Optional visitor name
    pub author_name: Option<String>,
    /// Moderation status
    pub status: PinStatus,
    /// Number of agreement reactions from other visitors
    pub reactions: i32,
    /// Timestamp when the pin was submitted
    pub created_at: OffsetDateTime,
    /// Timestamp when the pin was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new public pin.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = public_pins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPublicPin {
    /// Project the pin belongs to
    pub project_id: Uuid,
    /// Geometry kind
    pub kind: PinKind,
    /// Coordinate pairs as JSONB
    pub coordinates: serde_json::Value,
    /// Visitor comment
    pub comment: String,
    /// Optional visitor name
    pub author_name: Option<String>,
    /// Moderation status
    pub status: Option<PinStatus>,
}

/// Data for updating a public pin.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = public_pins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdatePublicPin {
    /// Moderation status
    pub status: Option<PinStatus>,
    /// Comment (moderation edits)
    pub comment: Option<String>,
}

impl PublicPin {
    /// Returns whether the pin is visible to site visitors.
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    /// Decodes the JSONB coordinate payload into `[lng, lat]` pairs.
    pub fn coordinate_pairs(&self) -> Option<Vec<[f64; 2]>> {
        serde_json::from_value(self.coordinates.clone()).ok()
    }
}
