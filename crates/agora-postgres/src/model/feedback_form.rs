//! Feedback form model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::feedback_forms;

/// A structured feedback form attached to a project.
///
/// The question list is stored as JSONB; the platform treats it as an opaque
/// ordered document that the form renderer interprets.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = feedback_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackForm {
    /// Unique form identifier
    pub id: Uuid,
    /// Project the form belongs to
    pub project_id: Uuid,
    /// Form title shown to visitors
    pub title: String,
    /// Ordered question definitions as JSONB
    pub questions: serde_json::Value,
    /// Whether the form currently accepts responses
    pub is_open: bool,
    /// Timestamp when the form was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the form was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new feedback form.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = feedback_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFeedbackForm {
    /// Project the form belongs to
    pub project_id: Uuid,
    /// Form title
    pub title: String,
    /// Question definitions
    pub questions: serde_json::Value,
    /// Whether the form opens immediately
    pub is_open: Option<bool>,
}

/// Data for updating a feedback form.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = feedback_forms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateFeedbackForm {
    /// Form title
    pub title: Option<String>,
    /// Question definitions
    pub questions: Option<serde_json::Value>,
    /// Open/closed state
    pub is_open: Option<bool>,
}
