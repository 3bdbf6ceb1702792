//! Project repository for managing consultation project operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewProject, Project, UpdateProject};
use crate::types::ProjectStatus;
use crate::{PgError, PgResult, schema};

/// Per-project feedback counts used by the team dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProjectFeedbackCounts {
    /// Number of public pins (any moderation status).
    pub pins: i64,
    /// Number of enquiries.
    pub enquiries: i64,
    /// Number of mailing-list subscribers.
    pub subscribers: i64,
    /// Number of stakeholders.
    pub stakeholders: i64,
}

/// Repository for comprehensive project database operations.
///
/// Provides database operations for managing consultation projects throughout
/// their lifecycle: creation, updates, status management, archiving, and the
/// lookups used by public routes (slug resolution) and the team dashboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectRepository;

impl ProjectRepository {
    /// Creates a new project repository instance.
    pub fn new() -> Self {
        Self
    }

    /// Creates a new project in the database.
    ///
    /// # Arguments
    ///
    /// * `conn` - Active database connection for the operation
    /// * `project` - Complete project data including slug, name, and map defaults
    ///
    /// # Returns
    ///
    /// The created `Project` with database-generated ID and timestamps,
    /// or a database error if the operation fails.
    pub async fn create_project(
        conn: &mut AsyncPgConnection,
        project: NewProject,
    ) -> PgResult<Project> {
        use schema::projects;

        let project = diesel::insert_into(projects::table)
            .values(&project)
            .returning(Project::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(project)
    }

    /// Finds a project by its unique identifier.
    ///
    /// Soft-deleted projects are excluded.
    pub async fn find_project_by_id(
        conn: &mut AsyncPgConnection,
        project_id: Uuid,
    ) -> PgResult<Option<Project>> {
        use schema::projects::dsl::*;

        let project = projects
            .filter(id.eq(project_id))
            .filter(deleted_at.is_null())
            .select(Project::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(project)
    }

    /// Finds a project by its public slug.
    ///
    /// This is the lookup used by visitor-facing routes and the embeddable
    /// widget, which address projects by slug rather than UUID.
    pub async fn find_project_by_slug(
        conn: &mut AsyncPgConnection,
        project_slug: &str,
    ) -> PgResult<Option<Project>> {
        use schema::projects::dsl::*;

        let project = projects
            .filter(slug.eq(project_slug))
            .filter(deleted_at.is_null())
            .select(Project::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(project)
    }

    /// Lists projects with pagination, newest first.
    pub async fn list_projects(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<Project>> {
        use schema::projects::dsl::*;

        let project_list = projects
            .filter(deleted_at.is_null())
            .select(Project::as_select())
            .order(created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(conn)
            .await
            .map_err(PgError::from)?;

        Ok(project_list)
    }

    /// Updates a project and returns the updated record.
    pub async fn update_project(
        conn: &mut AsyncPgConnection,
        project_id: Uuid,
        update: UpdateProject,
    ) -> PgResult<Option<Project>> {
        use schema::projects::dsl::*;

        let project = diesel::update(projects)
            .filter(id.eq(project_id))
            .filter(deleted_at.is_null())
            .set(&update)
            .returning(Project::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(project)
    }

    /// Archives an active project.
    ///
    /// Sets the archived status together with the archive timestamp so the
    /// consultation record stays readable but closed.
    pub async fn archive_project(
        conn: &mut AsyncPgConnection,
        project_id: Uuid,
    ) -> PgResult<Option<Project>> {
        let update = UpdateProject {
            status: Some(ProjectStatus::Archived),
            archived_at: Some(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        };

        Self::update_project(conn, project_id, update).await
    }

    /// Restores an archived project back to active.
    pub async fn restore_project(
        conn: &mut AsyncPgConnection,
        project_id: Uuid,
    ) -> PgResult<Option<Project>> {
        let update = UpdateProject {
            status: Some(ProjectStatus::Active),
            archived_at: Some(None),
            ..Default::default()
        };

        Self::update_project(conn, project_id, update).await
    }

    /// Soft-deletes a project.
    ///
    /// The record is retained for audit purposes but disappears from every
    /// query in this repository.
    pub async fn delete_project(
        conn: &mut AsyncPgConnection,
        project_id: Uuid,
    ) -> PgResult<Option<Project>> {
        use schema::projects::dsl::*;

        let project = diesel::update(projects)
            .filter(id.eq(project_id))
            .filter(deleted_at.is_null())
            .set(deleted_at.eq(Some(OffsetDateTime::now_utc())))
            .returning(Project::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(project)
    }

    /// Counts all non-deleted projects.
    pub async fn count_projects(conn: &mut AsyncPgConnection) -> PgResult<i64> {
        use schema::projects::dsl::*;

        let count = projects
            .filter(deleted_at.is_null())
            .count()
            .get_result(conn)
            .await
            .map_err(PgError::from)?;

        Ok(count)
    }
}
