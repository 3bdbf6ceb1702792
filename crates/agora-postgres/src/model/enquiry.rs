//! Enquiry model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::enquiries;
use crate::types::{EnquirySource, EnquiryStatus};

/// A public-submitted message routed to a project's team inbox.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = enquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Enquiry {
    /// Unique enquiry identifier
    pub id: Uuid,
    /// Project the enquiry is addressed to
    pub project_id: Uuid,
    /// Name the sender gave
    pub author_name: String,
    /// Reply address
    pub author_email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Triage status
    pub status: EnquiryStatus,
    /// Channel the enquiry arrived through
    pub source: EnquirySource,
    /// Timestamp when the enquiry was resolved
    pub resolved_at: Option<OffsetDateTime>,
    /// Timestamp when the enquiry was received
    pub created_at: OffsetDateTime,
    /// Timestamp when the enquiry was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new enquiry.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = enquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewEnquiry {
    /// Project the enquiry is addressed to
    pub project_id: Uuid,
    /// Sender name
    pub author_name: String,
    /// Reply address
    pub author_email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Source channel
    pub source: Option<EnquirySource>,
}

/// Data for updating an enquiry.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = enquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateEnquiry {
    /// Triage status
    pub status: Option<EnquiryStatus>,
    /// Resolved at
    pub resolved_at: Option<Option<OffsetDateTime>>,
}

impl Enquiry {
    /// Returns whether the enquiry still needs attention.
    pub fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }

    /// Returns whether the enquiry arrived via the inbound-email webhook.
    pub fn arrived_by_email(&self) -> bool {
        self.source == EnquirySource::Email
    }
}
