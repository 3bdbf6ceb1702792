//! Feedback response model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::feedback_responses;

/// A visitor's answers to a feedback form.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = feedback_responses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FeedbackResponse {
    /// Unique response identifier
    pub id: Uuid,
    /// Form the response answers
    pub form_id: Uuid,
    /// Answers keyed by question id, as JSONB
    pub answers: serde_json::Value,
    /// Optional respondent email
    pub respondent_email: Option<String>,
    /// Timestamp when the response was submitted
    pub created_at: OffsetDateTime,
}

/// Data for creating a new feedback response.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = feedback_responses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFeedbackResponse {
    /// Form the response answers
    pub form_id: Uuid,
    /// Answers as JSONB
    pub answers: serde_json::Value,
    /// Optional respondent email
    pub respondent_email: Option<String>,
}
