//! Enquiry repository for the project team inbox.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Pagination;
use crate::model::{Enquiry, NewEnquiry, UpdateEnquiry};
use crate::types::EnquiryStatus;
use crate::{PgError, PgResult, schema};

/// Repository for enquiry database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnquiryRepository;

impl EnquiryRepository {
    /// Creates a new enquiry repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a new enquiry in a project's inbox.
    ///
    /// Both the public contact form and the inbound-email webhook land here;
    /// the source column records which channel it was.
    pub async fn create_enquiry(
        conn: &mut AsyncPgConnection,
        enquiry: NewEnquiry,
    ) -> PgResult<Enquiry> {
        use schema::enquiries;

        let enquiry = diesel::insert_into(enquiries::table)
            .values(&enquiry)
            .returning(Enquiry::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(enquiry)
    }

    /// Finds an enquiry by its unique identifier.
    pub async fn find_enquiry_by_id(
        conn: &mut AsyncPgConnection,
        enquiry_id: Uuid,
    ) -> PgResult<Option<Enquiry>> {
        use schema::enquiries::dsl::*;

        let enquiry = enquiries
            .filter(id.eq(enquiry_id))
            .select(Enquiry::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(enquiry)
    }

    /// Lists a project's enquiries, optionally filtered by status, newest first.
    pub async fn list_project_enquiries(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        status_filter: Option<EnquiryStatus>,
        pagination: Pagination,
    ) -> PgResult<Vec<Enquiry>> {
        use schema::enquiries::dsl::*;

        let mut query = enquiries
            .filter(project_id.eq(target_project_id))
            .select(Enquiry::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .into_boxed();

        if let Some(wanted) = status_filter {
            query = query.filter(status.eq(wanted));
        }

        let enquiry_list = query.load(conn).await.map_err(PgError::from)?;

        Ok(enquiry_list)
    }

    /// Moves an enquiry to a new triage status.
    ///
    /// Entering a terminal status stamps `resolved_at`; re-opening clears it.
    pub async fn set_enquiry_status(
        conn: &mut AsyncPgConnection,
        enquiry_id: Uuid,
        new_status: EnquiryStatus,
    ) -> PgResult<Option<Enquiry>> {
        let resolved = if new_status.is_terminal() {
            Some(Some(OffsetDateTime::now_utc()))
        } else {
            Some(None)
        };

        let update = UpdateEnquiry {
            status: Some(new_status),
            resolved_at: resolved,
        };

        Self::update_enquiry(conn, enquiry_id, update).await
    }

    /// Updates an enquiry and returns the updated record.
    pub async fn update_enquiry(
        conn: &mut AsyncPgConnection,
        enquiry_id: Uuid,
        update: UpdateEnquiry,
    ) -> PgResult<Option<Enquiry>> {
        use schema::enquiries::dsl::*;

        let enquiry = diesel::update(enquiries)
            .filter(id.eq(enquiry_id))
            .set(&update)
            .returning(Enquiry::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(enquiry)
    }

    /// Counts a project's enquiries.
    pub async fn count_project_enquiries(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<i64> {
        use schema::enquiries::dsl::*;

        let count = enquiries
            .filter(project_id.eq(target_project_id))
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }

    /// Returns the message bodies that feed the analysis corpus.
    ///
    /// Spam is excluded; everything else a member of the public wrote counts.
    pub async fn list_enquiry_messages(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<Vec<String>> {
        use schema::enquiries::dsl::*;

        let messages = enquiries
            .filter(project_id.eq(target_project_id))
            .filter(status.ne(EnquiryStatus::Spam))
            .order(created_at.asc())
            .select(message)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(messages)
    }
}
