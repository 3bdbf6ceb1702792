//! Main project model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::projects;
use crate::types::{ProjectStatus, ProjectVisibility};

/// Main project model representing a consultation project.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    /// Unique project identifier
    pub id: Uuid,
    /// URL-safe identifier used by the public site and the embed widget
    pub slug: String,
    /// Human-readable project name (2-100 characters)
    pub display_name: String,
    /// Detailed description of the scheme under consultation
    pub description: String,
    /// Current status of the project (draft, active, archived)
    pub status: ProjectStatus,
    /// Project visibility level (public, private)
    pub visibility: ProjectVisibility,
    /// Default map center longitude
    pub center_lng: f64,
    /// Default map center latitude
    pub center_lat: f64,
    /// Default map zoom level
    pub default_zoom: f64,
    /// Additional project metadata
    pub metadata: serde_json::Value,
    /// Timestamp when the project was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the project was last updated
    pub updated_at: OffsetDateTime,
    /// Timestamp when the project was archived
    pub archived_at: Option<OffsetDateTime>,
    /// Timestamp when the project was soft-deleted
    pub deleted_at: Option<OffsetDateTime>,
}

/// Data for creating a new project.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProject {
    /// URL-safe identifier
    pub slug: String,
    /// Project display name
    pub display_name: String,
    /// Project description
    pub description: Option<String>,
    /// Project status
    pub status: Option<ProjectStatus>,
    /// Project visibility
    pub visibility: Option<ProjectVisibility>,
    /// Default map center longitude
    pub center_lng: Option<f64>,
    /// Default map center latitude
    pub center_lat: Option<f64>,
    /// Default map zoom level
    pub default_zoom: Option<f64>,
    /// Metadata
    pub metadata: Option<serde_json::Value>,
}

/// Data for updating a project.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateProject {
    /// Display name
    pub display_name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Status
    pub status: Option<ProjectStatus>,
    /// Visibility
    pub visibility: Option<ProjectVisibility>,
    /// Default map center longitude
    pub center_lng: Option<f64>,
    /// Default map center latitude
    pub center_lat: Option<f64>,
    /// Default map zoom level
    pub default_zoom: Option<f64>,
    /// Metadata
    pub metadata: Option<serde_json::Value>,
    /// Archived at
    pub archived_at: Option<Option<OffsetDateTime>>,
}

impl Project {
    /// Returns whether the project is currently active.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
            && self.archived_at.is_none()
            && self.status == ProjectStatus::Active
    }

    /// Returns whether the project is archived.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some() || self.status == ProjectStatus::Archived
    }

    /// Returns whether the project is deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns whether site visitors can see this project.
    pub fn is_publicly_visible(&self) -> bool {
        !self.is_deleted() && self.visibility.is_public() && self.status.is_visible()
    }

    /// Returns whether the project accepts new public feedback.
    pub fn accepts_feedback(&self) -> bool {
        !self.is_deleted() && self.status.accepts_feedback()
    }

    /// Returns whether the project can be archived.
    pub fn can_be_archived(&self) -> bool {
        self.is_active()
    }

    /// Returns whether the project can be restored from archive.
    pub fn can_be_restored(&self) -> bool {
        self.is_archived() && !self.is_deleted()
    }
}
