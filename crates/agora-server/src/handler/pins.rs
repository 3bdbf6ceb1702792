//! Map-anchored public feedback handlers.
//!
//! Visitors drop points, lines and polygons on the project map; the team
//! moderates them. Only published pins are served back to visitors.

use agora_postgres::model::{NewPublicPin, PublicPin, UpdatePublicPin};
use agora_postgres::query::{ProjectRepository, PublicPinRepository};
use agora_postgres::types::{PinKind, PinStatus};
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
use crate::handler::request::{self, PaginationRequest};
use crate::handler::{ErrorKind, ErrorResponse, Result};
use crate::service::ServiceState;

/// Tracing target for pin operations.
const TRACING_TARGET: &str = "agora_server::handler::pins";

/// `Path` param for `{pinId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PinPathParams {
    /// Unique identifier of the pin.
    pub pin_id: Uuid,
}

/// Request payload for submitting a pin.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreatePinRequest {
    #[schema(value_type = String)]
    pub kind: PinKind,
    /// Coordinate pairs as `[lng, lat]`.
    #[schema(value_type = Vec<Vec<f64>>)]
    pub coordinates: Vec<[f64; 2]>,
    #[validate(length(min = 1, max = 4000))]
    pub comment: String,
    #[validate(length(max = 100))]
    pub author_name: Option<String>,
}

/// Describes a pin.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct PinResponse {
    pub pin_id: Uuid,
    pub project_id: Uuid,
    #[schema(value_type = String)]
    pub kind: PinKind,
    #[schema(value_type = Vec<Vec<f64>>)]
    pub coordinates: serde_json::Value,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[schema(value_type = String)]
    pub status: PinStatus,
    pub reactions: i32,
    pub created_at: OffsetDateTime,
}

impl From<PublicPin> for PinResponse {
    fn from(pin: PublicPin) -> Self {
        Self {
            pin_id: pin.id,
            project_id: pin.project_id,
            kind: pin.kind,
            coordinates: pin.coordinates,
            comment: pin.comment,
            author_name: pin.author_name,
            status: pin.status,
            reactions: pin.reactions,
            created_at: pin.created_at,
        }
    }
}

/// Response for listing pins.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListPinsResponse {
    pub pins: Vec<PinResponse>,
}

/// Submits a pin to a project's map.
///
/// Public endpoint. The geometry is validated against the declared kind and
/// the pin starts in the pending moderation state.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/pins", tag = "pins",
    params(ProjectPathParams),
    request_body(
        content = CreatePinRequest,
        description = "New map feedback",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Invalid geometry", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CONFLICT, description = "Project is not accepting feedback", body = ErrorResponse),
        (status = CREATED, description = "Pin submitted", body = PinResponse),
    ),
)]
async fn create_pin(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<CreatePinRequest>,
) -> Result<(StatusCode, Json<PinResponse>)> {
    request::validate_geometry(request.kind, &request.coordinates)?;

    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    if !project.accepts_feedback() {
        return Err(ErrorKind::Conflict
            .with_message("This consultation is not currently accepting feedback.")
            .with_resource("project"));
    }

    let new_pin = NewPublicPin {
        project_id: project.id,
        kind: request.kind,
        coordinates: serde_json::to_value(&request.coordinates)
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
        comment: request.comment,
        author_name: request.author_name,
        status: None,
    };

    let pin = PublicPinRepository::create_pin(&mut conn, new_pin).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        pin_id = pin.id.to_string(),
        kind = %pin.kind,
        "pin submitted",
    );

    Ok((StatusCode::CREATED, Json(pin.into())))
}

/// Lists a project's published pins.
///
/// Public endpoint; pending and hidden pins are never returned here.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/pins", tag = "pins",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Published pins", body = ListPinsResponse),
    ),
)]
async fn list_published_pins(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListPinsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let pins = PublicPinRepository::list_project_pins(
        &mut conn,
        params.project_id,
        Some(PinStatus::Published),
        pagination.into(),
    )
    .await?;

    Ok(Json(ListPinsResponse {
        pins: pins.into_iter().map(Into::into).collect(),
    }))
}

/// `Query` params for the moderation listing.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct ModeratePinsQueryParams {
    /// Restrict to one moderation status.
    #[param(value_type = Option<String>)]
    pub status: Option<PinStatus>,
}

/// Lists a project's pins for moderation, any status.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/pins/moderation", tag = "pins",
    params(ProjectPathParams, ModeratePinsQueryParams, PaginationRequest),
    responses(
        (status = OK, description = "Pins", body = ListPinsResponse),
    ),
)]
async fn list_pins_for_moderation(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(filter): Query<ModeratePinsQueryParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListPinsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let pins = PublicPinRepository::list_project_pins(
        &mut conn,
        params.project_id,
        filter.status,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListPinsResponse {
        pins: pins.into_iter().map(Into::into).collect(),
    }))
}

/// Request payload for moderating a pin.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ModeratePinRequest {
    #[schema(value_type = String)]
    pub status: PinStatus,
}

/// Sets a pin's moderation status.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/pins/{pinId}", tag = "pins",
    params(PinPathParams),
    request_body(
        content = ModeratePinRequest,
        description = "New moderation status",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown pin", body = ErrorResponse),
        (status = OK, description = "Moderated pin", body = PinResponse),
    ),
)]
async fn moderate_pin(
    State(pg_client): State<PgClient>,
    Path(params): Path<PinPathParams>,
    Json(request): Json<ModeratePinRequest>,
) -> Result<Json<PinResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdatePublicPin {
        status: Some(request.status),
        comment: None,
    };

    let pin = PublicPinRepository::update_pin(&mut conn, params.pin_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("pin"))?;

    tracing::info!(
        target: TRACING_TARGET,
        pin_id = pin.id.to_string(),
        status = %pin.status,
        "pin moderated",
    );

    Ok(Json(pin.into()))
}

/// Deletes a pin permanently.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/pins/{pinId}", tag = "pins",
    params(PinPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown pin", body = ErrorResponse),
        (status = NO_CONTENT, description = "Pin deleted"),
    ),
)]
async fn delete_pin(
    State(pg_client): State<PgClient>,
    Path(params): Path<PinPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    let deleted = PublicPinRepository::delete_pin(&mut conn, params.pin_id).await?;
    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("pin"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Adds an agreement reaction to a published pin.
///
/// Public endpoint. Reactions on unpublished pins return 404 so moderation
/// state does not leak.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/pins/{pinId}/reactions", tag = "pins",
    params(PinPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown or unpublished pin", body = ErrorResponse),
        (status = OK, description = "Updated pin", body = PinResponse),
    ),
)]
async fn react_to_pin(
    State(pg_client): State<PgClient>,
    Path(params): Path<PinPathParams>,
) -> Result<Json<PinResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let pin = PublicPinRepository::add_reaction(&mut conn, params.pin_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("pin"))?;

    Ok(Json(pin.into()))
}

/// Returns a [`Router`] with the visitor-facing pin routes.
///
/// [`Router`]: axum::routing::Router
pub fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(create_pin, list_published_pins))
        .routes(routes!(react_to_pin))
}

/// Returns a [`Router`] with the team-facing pin routes.
///
/// [`Router`]: axum::routing::Router
pub fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(list_pins_for_moderation))
        .routes(routes!(moderate_pin, delete_pin))
}
