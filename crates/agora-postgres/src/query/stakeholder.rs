//! Stakeholder repository.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewStakeholder, Stakeholder, UpdateStakeholder};
use crate::{PgError, PgResult, schema};

/// Repository for stakeholder database operations.
///
/// Stakeholders are created manually by the project team or in bulk by the
/// geographic auto-detection chain; both paths land here.
#[derive(Debug, Default, Clone, Copy)]
pub struct StakeholderRepository;

impl StakeholderRepository {
    /// Creates a new stakeholder repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a single stakeholder.
    pub async fn create_stakeholder(
        conn: &mut AsyncPgConnection,
        stakeholder: NewStakeholder,
    ) -> PgResult<Stakeholder> {
        use schema::stakeholders;

        let stakeholder = diesel::insert_into(stakeholders::table)
            .values(&stakeholder)
            .returning(Stakeholder::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(stakeholder)
    }

    /// Creates several stakeholders in one statement.
    ///
    /// Used by the detection endpoint to persist a whole detection result
    /// (MP, councils, parish, councillors) atomically.
    pub async fn create_stakeholders(
        conn: &mut AsyncPgConnection,
        stakeholders: Vec<NewStakeholder>,
    ) -> PgResult<Vec<Stakeholder>> {
        use schema::stakeholders as table;

        if stakeholders.is_empty() {
            return Ok(Vec::new());
        }

        let created = diesel::insert_into(table::table)
            .values(&stakeholders)
            .returning(Stakeholder::as_returning())
            .get_results(conn)
            .await
            .map_err(PgError::from)?;

        Ok(created)
    }

    /// Finds a stakeholder by its unique identifier.
    pub async fn find_stakeholder_by_id(
        conn: &mut AsyncPgConnection,
        stakeholder_id: Uuid,
    ) -> PgResult<Option<Stakeholder>> {
        use schema::stakeholders::dsl::*;

        let stakeholder = stakeholders
            .filter(id.eq(stakeholder_id))
            .select(Stakeholder::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(stakeholder)
    }

    /// Lists a project's stakeholders with pagination, newest first.
    pub async fn list_project_stakeholders(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Stakeholder>> {
        use schema::stakeholders::dsl::*;

        let stakeholder_list = stakeholders
            .filter(project_id.eq(target_project_id))
            .select(Stakeholder::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(stakeholder_list)
    }

    /// Updates a stakeholder and returns the updated record.
    pub async fn update_stakeholder(
        conn: &mut AsyncPgConnection,
        stakeholder_id: Uuid,
        update: UpdateStakeholder,
    ) -> PgResult<Option<Stakeholder>> {
        use schema::stakeholders::dsl::*;

        let stakeholder = diesel::update(stakeholders)
            .filter(id.eq(stakeholder_id))
            .set(&update)
            .returning(Stakeholder::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(stakeholder)
    }

    /// Deletes a stakeholder permanently.
    pub async fn delete_stakeholder(
        conn: &mut AsyncPgConnection,
        stakeholder_id: Uuid,
    ) -> PgResult<bool> {
        use schema::stakeholders::dsl::*;

        let deleted = diesel::delete(stakeholders.filter(id.eq(stakeholder_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    /// Counts a project's stakeholders.
    pub async fn count_project_stakeholders(
        conn: &mut AsyncPgConnection,
        target_project_id: Uuid,
    ) -> PgResult<i64> {
        use schema::stakeholders::dsl::*;

        let count = stakeholders
            .filter(project_id.eq(target_project_id))
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
