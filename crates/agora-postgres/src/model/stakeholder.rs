//! Stakeholder model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::stakeholders;
use crate::types::{StakeholderRole, StakeholderSource};

/// A person or organization relevant to a consultation project.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = stakeholders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stakeholder {
    /// Unique stakeholder identifier
    pub id: Uuid,
    /// Project this stakeholder belongs to
    pub project_id: Uuid,
    /// Person or organization name
    pub display_name: String,
    /// Organization, council, or party they represent
    pub organization: Option<String>,
    /// Contact email address
    pub contact_email: Option<String>,
    /// Capacity in which they relate to the project
    pub role: StakeholderRole,
    /// Whether the record was added manually or auto-detected
    pub source: StakeholderSource,
    /// Parliamentary constituency, when detected
    pub constituency: Option<String>,
    /// Ward name, when detected or known
    pub ward_name: Option<String>,
    /// Free-form team notes
    pub notes: Option<String>,
    /// Additional stakeholder metadata
    pub metadata: serde_json::Value,
    /// Timestamp when the stakeholder was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the stakeholder was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new stakeholder.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = stakeholders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStakeholder {
    /// Project this stakeholder belongs to
    pub project_id: Uuid,
    /// Person or organization name
    pub display_name: String,
    /// Organization
    pub organization: Option<String>,
    /// Contact email
    pub contact_email: Option<String>,
    /// Role
    pub role: Option<StakeholderRole>,
    /// Source
    pub source: Option<StakeholderSource>,
    /// Constituency
    pub constituency: Option<String>,
    /// Ward name
    pub ward_name: Option<String>,
    /// Notes
    pub notes: Option<String>,
    /// Metadata
    pub metadata: Option<serde_json::Value>,
}

/// Data for updating a stakeholder.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = stakeholders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateStakeholder {
    /// Display name
    pub display_name: Option<String>,
    /// Organization
    pub organization: Option<Option<String>>,
    /// Contact email
    pub contact_email: Option<Option<String>>,
    /// Role
    pub role: Option<StakeholderRole>,
    /// Notes
    pub notes: Option<Option<String>>,
    /// Metadata
    pub metadata: Option<serde_json::Value>,
}

impl Stakeholder {
    /// Returns whether this record came from the auto-detection chain.
    pub fn is_detected(&self) -> bool {
        self.source == StakeholderSource::Detected
    }

    /// Returns whether this stakeholder is an elected representative.
    pub fn is_political(&self) -> bool {
        self.role.is_political()
    }
}
