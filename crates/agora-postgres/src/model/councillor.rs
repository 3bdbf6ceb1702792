//! Councillor directory model.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::councillors;

/// A council member in the imported directory.
///
/// The directory is populated through the bulk-import endpoint and consulted
/// by the stakeholder auto-detection chain when matching wards.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = councillors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Councillor {
    /// Unique councillor identifier
    pub id: Uuid,
    /// Council the member sits on
    pub council_name: String,
    /// Ward the member represents
    pub ward_name: String,
    /// Councillor name
    pub display_name: String,
    /// Political party, when known
    pub party: Option<String>,
    /// Contact email address, when known
    pub contact_email: Option<String>,
    /// Timestamp when the record was imported
    pub created_at: OffsetDateTime,
    /// Timestamp when the record was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new councillor record.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = councillors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCouncillor {
    /// Council name
    pub council_name: String,
    /// Ward name
    pub ward_name: String,
    /// Councillor name
    pub display_name: String,
    /// Party
    pub party: Option<String>,
    /// Contact email
    pub contact_email: Option<String>,
}

/// Data for updating a councillor record.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = councillors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateCouncillor {
    /// Party
    pub party: Option<Option<String>>,
    /// Contact email
    pub contact_email: Option<Option<String>>,
}
