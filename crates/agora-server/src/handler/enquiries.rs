//! Enquiry inbox handlers.

use agora_postgres::model::{Enquiry, NewEnquiry};
use agora_postgres::query::{EnquiryRepository, ProjectRepository};
use agora_postgres::types::{EnquirySource, EnquiryStatus};
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
use crate::handler::projects::ProjectPathParams;
use crate::handler::request::PaginationRequest;
use crate::handler::{ErrorKind, ErrorResponse, Result};
use crate::service::ServiceState;

/// Tracing target for enquiry operations.
const TRACING_TARGET: &str = "agora_server::handler::enquiries";

/// `Path` param for `{enquiryId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryPathParams {
    /// Unique identifier of the enquiry.
    pub enquiry_id: Uuid,
}

/// Request payload for submitting an enquiry.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateEnquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(email)]
    pub author_email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

/// Describes an enquiry.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct EnquiryResponse {
    pub enquiry_id: Uuid,
    pub project_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub subject: String,
    pub message: String,
    #[schema(value_type = String)]
    pub status: EnquiryStatus,
    #[schema(value_type = String)]
    pub source: EnquirySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl From<Enquiry> for EnquiryResponse {
    fn from(enquiry: Enquiry) -> Self {
        Self {
            enquiry_id: enquiry.id,
            project_id: enquiry.project_id,
            author_name: enquiry.author_name,
            author_email: enquiry.author_email,
            subject: enquiry.subject,
            message: enquiry.message,
            status: enquiry.status,
            source: enquiry.source,
            resolved_at: enquiry.resolved_at,
            created_at: enquiry.created_at,
        }
    }
}

/// Response for listing enquiries.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListEnquiriesResponse {
    pub enquiries: Vec<EnquiryResponse>,
}

/// Submits an enquiry to a project's team inbox.
///
/// Public endpoint backing the contact form.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/enquiries", tag = "enquiries",
    params(ProjectPathParams),
    request_body(
        content = CreateEnquiryRequest,
        description = "New enquiry",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Bad request", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CREATED, description = "Enquiry received", body = EnquiryResponse),
    ),
)]
async fn create_enquiry(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<CreateEnquiryRequest>,
) -> Result<(StatusCode, Json<EnquiryResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let new_enquiry = NewEnquiry {
        project_id: project.id,
        author_name: request.author_name,
        author_email: request.author_email,
        subject: request.subject,
        message: request.message,
        source: Some(EnquirySource::WebForm),
    };

    let enquiry = EnquiryRepository::create_enquiry(&mut conn, new_enquiry).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        enquiry_id = enquiry.id.to_string(),
        "enquiry received",
    );

    Ok((StatusCode::CREATED, Json(enquiry.into())))
}

/// `Query` params for the inbox listing.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct ListEnquiriesQueryParams {
    /// Restrict to one triage status.
    #[param(value_type = Option<String>)]
    pub status: Option<EnquiryStatus>,
}

/// Lists a project's enquiries, newest first.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/enquiries", tag = "enquiries",
    params(ProjectPathParams, ListEnquiriesQueryParams, PaginationRequest),
    responses(
        (status = OK, description = "Enquiries", body = ListEnquiriesResponse),
    ),
)]
async fn list_enquiries(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(filter): Query<ListEnquiriesQueryParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListEnquiriesResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let enquiries = EnquiryRepository::list_project_enquiries(
        &mut conn,
        params.project_id,
        filter.status,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListEnquiriesResponse {
        enquiries: enquiries.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a single enquiry.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/enquiries/{enquiryId}", tag = "enquiries",
    params(EnquiryPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown enquiry", body = ErrorResponse),
        (status = OK, description = "Enquiry", body = EnquiryResponse),
    ),
)]
async fn read_enquiry(
    State(pg_client): State<PgClient>,
    Path(params): Path<EnquiryPathParams>,
) -> Result<Json<EnquiryResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let enquiry = EnquiryRepository::find_enquiry_by_id(&mut conn, params.enquiry_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("enquiry"))?;

    Ok(Json(enquiry.into()))
}

/// Request payload for changing an enquiry's triage status.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct UpdateEnquiryStatusRequest {
    #[schema(value_type = String)]
    pub status: EnquiryStatus,
}

/// Moves an enquiry to a new triage status.
///
/// Entering a terminal status (resolved, spam) stamps the resolution time;
/// re-opening clears it.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/enquiries/{enquiryId}/status", tag = "enquiries",
    params(EnquiryPathParams),
    request_body(
        content = UpdateEnquiryStatusRequest,
        description = "New triage status",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown enquiry", body = ErrorResponse),
        (status = OK, description = "Updated enquiry", body = EnquiryResponse),
    ),
)]
async fn update_enquiry_status(
    State(pg_client): State<PgClient>,
    Path(params): Path<EnquiryPathParams>,
    Json(request): Json<UpdateEnquiryStatusRequest>,
) -> Result<Json<EnquiryResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let enquiry =
        EnquiryRepository::set_enquiry_status(&mut conn, params.enquiry_id, request.status)
            .await?
            .ok_or_else(|| ErrorKind::NotFound.with_resource("enquiry"))?;

    tracing::info!(
        target: TRACING_TARGET,
        enquiry_id = enquiry.id.to_string(),
        status = %enquiry.status,
        "enquiry status changed",
    );

    Ok(Json(enquiry.into()))
}

/// Returns a [`Router`] with the visitor-facing enquiry routes.
///
/// [`Router`]: axum::routing::Router
pub fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new().routes(routes!(create_enquiry))
}

/// Returns a [`Router`] with the team-facing enquiry routes.
///
/// [`Router`]: axum::routing::Router
pub fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(list_enquiries))
        .routes(routes!(read_enquiry))
        .routes(routes!(update_enquiry_status))
}
