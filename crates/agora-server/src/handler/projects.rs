//! Consultation project handlers.

use agora_postgres::model::{NewProject, Project, UpdateProject};
use agora_postgres::query::{
    EnquiryRepository, ProjectFeedbackCounts, ProjectRepository, PublicPinRepository,
    StakeholderRepository, SubscriberRepository,
};
use agora_postgres::types::{ProjectStatus, ProjectVisibility};
use agora_postgres::PgClient;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;
use validator::Validate;

use crate::extract::{Json, Path, Query, ValidateJson};
use crate::handler::request::{self, PaginationRequest};
use crate::handler::{Error, ErrorKind, ErrorResponse, Result};
use crate::service::ServiceState;

/// Tracing target for project operations.
const TRACING_TARGET: &str = "agora_server::handler::projects";

/// `Path` param for `{projectId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPathParams {
    /// Unique identifier of the project.
    pub project_id: Uuid,
}

/// Request payload for creating a new project.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateProjectRequest {
    #[validate(length(min = 2, max = 64))]
    pub slug: String,
    #[validate(length(min = 2, max = 100))]
    pub display_name: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub visibility: Option<ProjectVisibility>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub center_lng: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub center_lat: Option<f64>,
    #[validate(range(min = 0.0, max = 22.0))]
    pub default_zoom: Option<f64>,
}

/// Describes a project.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    pub project_id: Uuid,
    pub slug: String,
    pub display_name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub status: ProjectStatus,
    #[schema(value_type = String)]
    pub visibility: ProjectVisibility,
    pub center_lng: f64,
    pub center_lat: f64,
    pub default_zoom: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<OffsetDateTime>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            project_id: project.id,
            slug: project.slug,
            display_name: project.display_name,
            description: project.description,
            status: project.status,
            visibility: project.visibility,
            center_lng: project.center_lng,
            center_lat: project.center_lat,
            default_zoom: project.default_zoom,
            created_at: project.created_at,
            updated_at: project.updated_at,
            archived_at: project.archived_at,
        }
    }
}

/// Response for listing projects.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListProjectsResponse {
    pub projects: Vec<ProjectResponse>,
}

/// Creates a new project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects", tag = "projects",
    request_body(
        content = CreateProjectRequest,
        description = "New project",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Bad request", body = ErrorResponse),
        (status = CONFLICT, description = "Slug already taken", body = ErrorResponse),
        (status = CREATED, description = "Project created", body = ProjectResponse),
    ),
)]
async fn create_project(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    request::validate_slug(&request.slug)?;

    tracing::info!(
        target: TRACING_TARGET,
        slug = %request.slug,
        display_name = %request.display_name,
        "creating new project",
    );

    let mut conn = pg_client.get_connection().await?;

    let new_project = NewProject {
        slug: request.slug,
        display_name: request.display_name,
        description: request.description,
        visibility: request.visibility,
        center_lng: request.center_lng,
        center_lat: request.center_lat,
        default_zoom: request.default_zoom,
        ..Default::default()
    };

    let project = ProjectRepository::create_project(&mut conn, new_project).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        "new project created successfully",
    );

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// Lists projects, newest first.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects", tag = "projects",
    params(PaginationRequest),
    responses(
        (status = OK, description = "Projects", body = ListProjectsResponse),
    ),
)]
async fn list_projects(
    State(pg_client): State<PgClient>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListProjectsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let projects = ProjectRepository::list_projects(&mut conn, pagination.into()).await?;

    Ok(Json(ListProjectsResponse {
        projects: projects.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a single project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}", tag = "projects",
    params(ProjectPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = OK, description = "Project", body = ProjectResponse),
    ),
)]
async fn read_project(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    Ok(Json(project.into()))
}

/// Request payload for updating a project.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectRequest {
    #[validate(length(min = 2, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub status: Option<ProjectStatus>,
    #[schema(value_type = Option<String>)]
    pub visibility: Option<ProjectVisibility>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub center_lng: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub center_lat: Option<f64>,
    #[validate(range(min = 0.0, max = 22.0))]
    pub default_zoom: Option<f64>,
}

/// Updates a project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/projects/{projectId}", tag = "projects",
    params(ProjectPathParams),
    request_body(
        content = UpdateProjectRequest,
        description = "Fields to update",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = OK, description = "Updated project", body = ProjectResponse),
    ),
)]
async fn update_project(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdateProject {
        display_name: request.display_name,
        description: request.description,
        status: request.status,
        visibility: request.visibility,
        center_lng: request.center_lng,
        center_lat: request.center_lat,
        default_zoom: request.default_zoom,
        ..Default::default()
    };

    let project = ProjectRepository::update_project(&mut conn, params.project_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    Ok(Json(project.into()))
}

/// Soft-deletes a project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/projects/{projectId}", tag = "projects",
    params(ProjectPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = NO_CONTENT, description = "Project deleted"),
    ),
)]
async fn delete_project(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    ProjectRepository::delete_project(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = params.project_id.to_string(),
        "project deleted",
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Archives an active project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/archive", tag = "projects",
    params(ProjectPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CONFLICT, description = "Project cannot be archived", body = ErrorResponse),
        (status = OK, description = "Archived project", body = ProjectResponse),
    ),
)]
async fn archive_project(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    if !project.can_be_archived() {
        return Err(ErrorKind::Conflict
            .with_message("Only active projects can be archived.")
            .with_resource("project"));
    }

    let project = ProjectRepository::archive_project(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    Ok(Json(project.into()))
}

/// Restores an archived project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/restore", tag = "projects",
    params(ProjectPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CONFLICT, description = "Project is not archived", body = ErrorResponse),
        (status = OK, description = "Restored project", body = ProjectResponse),
    ),
)]
async fn restore_project(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
) -> Result<Json<ProjectResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    if !project.can_be_restored() {
        return Err(ErrorKind::Conflict
            .with_message("Only archived projects can be restored.")
            .with_resource("project"));
    }

    let project = ProjectRepository::restore_project(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    Ok(Json(project.into()))
}

/// Response for the project dashboard.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ProjectDashboardResponse {
    pub pins: i64,
    pub enquiries: i64,
    pub subscribers: i64,
    pub stakeholders: i64,
}

impl From<ProjectFeedbackCounts> for ProjectDashboardResponse {
    fn from(counts: ProjectFeedbackCounts) -> Self {
        Self {
            pins: counts.pins,
            enquiries: counts.enquiries,
            subscribers: counts.subscribers,
            stakeholders: counts.stakeholders,
        }
    }
}

/// Returns feedback counts for the team dashboard.
///
/// The four counts are independent reads, fetched concurrently on separate
/// pooled connections; no ordering between them is assumed.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/dashboard", tag = "projects",
    params(ProjectPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = OK, description = "Dashboard counts", body = ProjectDashboardResponse),
    ),
)]
async fn project_dashboard(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
) -> Result<Json<ProjectDashboardResponse>> {
    let project_id = params.project_id;

    {
        let mut conn = pg_client.get_connection().await?;
        ProjectRepository::find_project_by_id(&mut conn, project_id)
            .await?
            .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;
    }

    let pins = async {
        let mut conn = pg_client.get_connection().await?;
        let count = PublicPinRepository::count_project_pins(&mut conn, project_id).await?;
        Ok::<i64, Error>(count)
    };
    let enquiries = async {
        let mut conn = pg_client.get_connection().await?;
        let count = EnquiryRepository::count_project_enquiries(&mut conn, project_id).await?;
        Ok::<i64, Error>(count)
    };
    let subscribers = async {
        let mut conn = pg_client.get_connection().await?;
        let count =
            SubscriberRepository::count_project_subscribers(&mut conn, project_id, None).await?;
        Ok::<i64, Error>(count)
    };
    let stakeholders = async {
        let mut conn = pg_client.get_connection().await?;
        let count =
            StakeholderRepository::count_project_stakeholders(&mut conn, project_id).await?;
        Ok::<i64, Error>(count)
    };

    let (pins, enquiries, subscribers, stakeholders) =
        tokio::try_join!(pins, enquiries, subscribers, stakeholders)?;

    let counts = ProjectFeedbackCounts {
        pins,
        enquiries,
        subscribers,
        stakeholders,
    };

    Ok(Json(counts.into()))
}

/// Returns a [`Router`] with all project routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(create_project, list_projects))
        .routes(routes!(read_project, update_project, delete_project))
        .routes(routes!(archive_project))
        .routes(routes!(restore_project))
        .routes(routes!(project_dashboard))
}
