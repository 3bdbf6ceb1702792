//! Feedback form and response handlers.

use agora_postgres::model::{
    FeedbackForm, FeedbackResponse, NewFeedbackForm, NewFeedbackResponse, UpdateFeedbackForm,
};
use agora_postgres::query::{FeedbackFormRepository, ProjectRepository};
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

/// Tracing target for feedback form operations.
const TRACING_TARGET: &str = "agora_server::handler::forms";

/// `Path` param for `{formId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FormPathParams {
    /// Unique identifier of the form.
    pub form_id: Uuid,
}

/// Request payload for creating a feedback form.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Ordered question definitions, interpreted by the form renderer.
    #[schema(value_type = Vec<Object>)]
    pub questions: Vec<serde_json::Value>,
    pub is_open: Option<bool>,
}

/// Request payload for updating a feedback form.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateFormRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub questions: Option<Vec<serde_json::Value>>,
    pub is_open: Option<bool>,
}

/// Describes a feedback form.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct FormResponse {
    pub form_id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    #[schema(value_type = Vec<Object>)]
    pub questions: serde_json::Value,
    pub is_open: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<FeedbackForm> for FormResponse {
    fn from(form: FeedbackForm) -> Self {
        Self {
            form_id: form.id,
            project_id: form.project_id,
            title: form.title,
            questions: form.questions,
            is_open: form.is_open,
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

/// Response for listing forms.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListFormsResponse {
    pub forms: Vec<FormResponse>,
}

/// Describes a form response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct FormResponseResponse {
    pub response_id: Uuid,
    pub form_id: Uuid,
    #[schema(value_type = Object)]
    pub answers: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_email: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<FeedbackResponse> for FormResponseResponse {
    fn from(response: FeedbackResponse) -> Self {
        Self {
            response_id: response.id,
            form_id: response.form_id,
            answers: response.answers,
            respondent_email: response.respondent_email,
            created_at: response.created_at,
        }
    }
}

/// Response for listing form responses.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListFormResponsesResponse {
    pub responses: Vec<FormResponseResponse>,
}

/// Creates a feedback form on a project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/forms", tag = "forms",
    params(ProjectPathParams),
    request_body(
        content = CreateFormRequest,
        description = "New feedback form",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CREATED, description = "Form created", body = FormResponse),
    ),
)]
async fn create_form(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<CreateFormRequest>,
) -> Result<(StatusCode, Json<FormResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let new_form = NewFeedbackForm {
        project_id: project.id,
        title: request.title,
        questions: serde_json::Value::Array(request.questions),
        is_open: request.is_open,
    };

    let form = FeedbackFormRepository::create_form(&mut conn, new_form).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        form_id = form.id.to_string(),
        "feedback form created",
    );

    Ok((StatusCode::CREATED, Json(form.into())))
}

/// Lists a project's forms.
///
/// Team endpoint: returns open and closed forms alike.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/forms", tag = "forms",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Forms", body = ListFormsResponse),
    ),
)]
async fn list_forms(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListFormsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let forms = FeedbackFormRepository::list_project_forms(
        &mut conn,
        params.project_id,
        false,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListFormsResponse {
        forms: forms.into_iter().map(Into::into).collect(),
    }))
}

/// Lists a project's open forms.
///
/// Public endpoint backing the visitor-facing feedback page.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/forms/open", tag = "forms",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Open forms", body = ListFormsResponse),
    ),
)]
async fn list_open_forms(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListFormsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let forms = FeedbackFormRepository::list_project_forms(
        &mut conn,
        params.project_id,
        true,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListFormsResponse {
        forms: forms.into_iter().map(Into::into).collect(),
    }))
}

/// Updates a feedback form.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/forms/{formId}", tag = "forms",
    params(FormPathParams),
    request_body(
        content = UpdateFormRequest,
        description = "Fields to update",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown form", body = ErrorResponse),
        (status = OK, description = "Updated form", body = FormResponse),
    ),
)]
async fn update_form(
    State(pg_client): State<PgClient>,
    Path(params): Path<FormPathParams>,
    ValidateJson(request): ValidateJson<UpdateFormRequest>,
) -> Result<Json<FormResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdateFeedbackForm {
        title: request.title,
        questions: request.questions.map(serde_json::Value::Array),
        is_open: request.is_open,
    };

    let form = FeedbackFormRepository::update_form(&mut conn, params.form_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("form"))?;

    Ok(Json(form.into()))
}

/// Deletes a feedback form and its responses.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/forms/{formId}", tag = "forms",
    params(FormPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown form", body = ErrorResponse),
        (status = NO_CONTENT, description = "Form deleted"),
    ),
)]
async fn delete_form(
    State(pg_client): State<PgClient>,
    Path(params): Path<FormPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    let deleted = FeedbackFormRepository::delete_form(&mut conn, params.form_id).await?;
    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("form"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Request payload for submitting a form response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateFormResponseRequest {
    /// Answers keyed by question id.
    #[schema(value_type = Object)]
    pub answers: serde_json::Value,
    #[validate(email)]
    pub respondent_email: Option<String>,
}

/// Submits a response to an open form.
///
/// Public endpoint. Responses to closed forms are rejected with 409.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/forms/{formId}/responses", tag = "forms",
    params(FormPathParams),
    request_body(
        content = CreateFormResponseRequest,
        description = "Form answers",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown form", body = ErrorResponse),
        (status = CONFLICT, description = "Form is closed", body = ErrorResponse),
        (status = CREATED, description = "Response recorded", body = FormResponseResponse),
    ),
)]
async fn create_form_response(
    State(pg_client): State<PgClient>,
    Path(params): Path<FormPathParams>,
    ValidateJson(request): ValidateJson<CreateFormResponseRequest>,
) -> Result<(StatusCode, Json<FormResponseResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let form = FeedbackFormRepository::find_form_by_id(&mut conn, params.form_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("form"))?;

    if !form.is_open {
        return Err(ErrorKind::Conflict
            .with_message("This form is no longer accepting responses.")
            .with_resource("form"));
    }

    let new_response = NewFeedbackResponse {
        form_id: form.id,
        answers: request.answers,
        respondent_email: request.respondent_email,
    };

    let response = FeedbackFormRepository::create_response(&mut conn, new_response).await?;

    tracing::info!(
        target: TRACING_TARGET,
        form_id = form.id.to_string(),
        response_id = response.id.to_string(),
        "form response recorded",
    );

    Ok((StatusCode::CREATED, Json(response.into())))
}

/// Lists a form's responses, newest first.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/forms/{formId}/responses", tag = "forms",
    params(FormPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Responses", body = ListFormResponsesResponse),
    ),
)]
async fn list_form_responses(
    State(pg_client): State<PgClient>,
    Path(params): Path<FormPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListFormResponsesResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let responses =
        FeedbackFormRepository::list_form_responses(&mut conn, params.form_id, pagination.into())
            .await?;

    Ok(Json(ListFormResponsesResponse {
        responses: responses.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a [`Router`] with the visitor-facing form routes.
///
/// [`Router`]: axum::routing::Router
pub fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(list_open_forms))
        .routes(routes!(create_form_response))
}

/// Returns a [`Router`] with the team-facing form routes.
///
/// [`Router`]: axum::routing::Router
pub fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(create_form, list_forms))
        .routes(routes!(update_form, delete_form))
        .routes(routes!(list_form_responses))
}
