//! Guided tour handlers.
//!
//! A tour is an ordered sequence of map viewpoints with narrative content,
//! played back by the embeddable widget. Stop positions stay unique and
//! dense; the reorder endpoint takes a full permutation of stop ids.

use agora_postgres::model::{NewTour, NewTourStop, Tour, TourStop, UpdateTour, UpdateTourStop};
use agora_postgres::query::{ProjectRepository, TourRepository};
use agora_postgres::{PgClient, PgError};
use axum::extract::State;
use axum::http::StatusCode;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncConnection;
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

/// Tracing target for tour operations.
const TRACING_TARGET: &str = "agora_server::handler::tours";

/// `Path` param for `{tourId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TourPathParams {
    /// Unique identifier of the tour.
    pub tour_id: Uuid,
}

/// `Path` param for `{stopId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TourStopPathParams {
    /// Unique identifier of the tour stop.
    pub stop_id: Uuid,
}

/// Request payload for creating a tour.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateTourRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    pub is_published: Option<bool>,
}

/// Request payload for updating a tour.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateTourRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    pub is_published: Option<bool>,
}

/// A camera viewpoint.
#[must_use]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct Viewpoint {
    #[validate(range(min = -180.0, max = 180.0))]
    pub center_lng: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub center_lat: f64,
    #[validate(range(min = 0.0, max = 22.0))]
    pub zoom: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub bearing: Option<f64>,
    #[validate(range(min = 0.0, max = 85.0))]
    pub pitch: Option<f64>,
}

/// Request payload for adding a stop to a tour.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateTourStopRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub narrative: Option<String>,
    #[validate(nested)]
    pub viewpoint: Viewpoint,
}

/// Request payload for updating a stop.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateTourStopRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub narrative: Option<String>,
    #[validate(nested)]
    pub viewpoint: Option<Viewpoint>,
}

/// Request payload for reordering a tour's stops.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ReorderStopsRequest {
    /// Every stop id of the tour, in the desired playback order.
    pub stop_ids: Vec<Uuid>,
}

/// Describes a tour stop.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct TourStopResponse {
    pub stop_id: Uuid,
    pub tour_id: Uuid,
    pub position: i32,
    pub title: String,
    pub narrative: String,
    pub center_lng: f64,
    pub center_lat: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
}

impl From<TourStop> for TourStopResponse {
    fn from(stop: TourStop) -> Self {
        Self {
            stop_id: stop.id,
            tour_id: stop.tour_id,
            position: stop.position,
            title: stop.title,
            narrative: stop.narrative,
            center_lng: stop.center_lng,
            center_lat: stop.center_lat,
            zoom: stop.zoom,
            bearing: stop.bearing,
            pitch: stop.pitch,
        }
    }
}

/// Describes a tour, optionally with its stops.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct TourResponse {
    pub tour_id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<TourStopResponse>>,
}

impl TourResponse {
    fn new(tour: Tour, stops: Option<Vec<TourStop>>) -> Self {
        Self {
            tour_id: tour.id,
            project_id: tour.project_id,
            title: tour.title,
            description: tour.description,
            is_published: tour.is_published,
            created_at: tour.created_at,
            updated_at: tour.updated_at,
            stops: stops.map(|stops| stops.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        Self::new(tour, None)
    }
}

/// Response for listing tours.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListToursResponse {
    pub tours: Vec<TourResponse>,
}

/// Creates a tour on a project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/tours", tag = "tours",
    params(ProjectPathParams),
    request_body(
        content = CreateTourRequest,
        description = "New tour",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CREATED, description = "Tour created", body = TourResponse),
    ),
)]
async fn create_tour(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<CreateTourRequest>,
) -> Result<(StatusCode, Json<TourResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let new_tour = NewTour {
        project_id: project.id,
        title: request.title,
        description: request.description,
        is_published: request.is_published,
    };

    let tour = TourRepository::create_tour(&mut conn, new_tour).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        tour_id = tour.id.to_string(),
        "tour created",
    );

    Ok((StatusCode::CREATED, Json(tour.into())))
}

/// Lists a project's tours for the team, without stops.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/tours", tag = "tours",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Tours", body = ListToursResponse),
    ),
)]
async fn list_tours(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListToursResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let tours =
        TourRepository::list_project_tours(&mut conn, params.project_id, false, pagination.into())
            .await?;

    Ok(Json(ListToursResponse {
        tours: tours.into_iter().map(Into::into).collect(),
    }))
}

/// Lists a project's published tours with their stops in playback order.
///
/// Public endpoint consumed by the embeddable tour player.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/tours/published", tag = "tours",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Published tours with stops", body = ListToursResponse),
    ),
)]
async fn list_published_tours(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListToursResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let tours =
        TourRepository::list_project_tours(&mut conn, params.project_id, true, pagination.into())
            .await?;

    let mut responses = Vec::with_capacity(tours.len());
    for tour in tours {
        let stops = TourRepository::list_tour_stops(&mut conn, tour.id).await?;
        responses.push(TourResponse::new(tour, Some(stops)));
    }

    Ok(Json(ListToursResponse { tours: responses }))
}

/// Returns a single tour with its stops.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/tours/{tourId}", tag = "tours",
    params(TourPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown tour", body = ErrorResponse),
        (status = OK, description = "Tour with stops", body = TourResponse),
    ),
)]
async fn read_tour(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourPathParams>,
) -> Result<Json<TourResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let tour = TourRepository::find_tour_by_id(&mut conn, params.tour_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("tour"))?;

    let stops = TourRepository::list_tour_stops(&mut conn, tour.id).await?;

    Ok(Json(TourResponse::new(tour, Some(stops))))
}

/// Updates a tour.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/tours/{tourId}", tag = "tours",
    params(TourPathParams),
    request_body(
        content = UpdateTourRequest,
        description = "Fields to update",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown tour", body = ErrorResponse),
        (status = OK, description = "Updated tour", body = TourResponse),
    ),
)]
async fn update_tour(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourPathParams>,
    ValidateJson(request): ValidateJson<UpdateTourRequest>,
) -> Result<Json<TourResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdateTour {
        title: request.title,
        description: request.description,
        is_published: request.is_published,
    };

    let tour = TourRepository::update_tour(&mut conn, params.tour_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("tour"))?;

    Ok(Json(tour.into()))
}

/// Deletes a tour and its stops.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/tours/{tourId}", tag = "tours",
    params(TourPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown tour", body = ErrorResponse),
        (status = NO_CONTENT, description = "Tour deleted"),
    ),
)]
async fn delete_tour(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    let deleted = TourRepository::delete_tour(&mut conn, params.tour_id).await?;
    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("tour"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Appends a stop to a tour.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/tours/{tourId}/stops", tag = "tours",
    params(TourPathParams),
    request_body(
        content = CreateTourStopRequest,
        description = "New tour stop",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown tour", body = ErrorResponse),
        (status = CREATED, description = "Stop appended", body = TourStopResponse),
    ),
)]
async fn create_tour_stop(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourPathParams>,
    ValidateJson(request): ValidateJson<CreateTourStopRequest>,
) -> Result<(StatusCode, Json<TourStopResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let tour = TourRepository::find_tour_by_id(&mut conn, params.tour_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("tour"))?;

    let stop = conn
        .transaction(|conn| {
            async move {
                let position = TourRepository::next_stop_position(conn, tour.id).await?;
                let new_stop = NewTourStop {
                    tour_id: tour.id,
                    position,
                    title: request.title,
                    narrative: request.narrative,
                    center_lng: request.viewpoint.center_lng,
                    center_lat: request.viewpoint.center_lat,
                    zoom: request.viewpoint.zoom,
                    bearing: request.viewpoint.bearing,
                    pitch: request.viewpoint.pitch,
                };
                TourRepository::create_stop(conn, new_stop).await
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        tour_id = stop.tour_id.to_string(),
        stop_id = stop.id.to_string(),
        position = stop.position,
        "tour stop appended",
    );

    Ok((StatusCode::CREATED, Json(stop.into())))
}

/// Updates a tour stop.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/tour-stops/{stopId}", tag = "tours",
    params(TourStopPathParams),
    request_body(
        content = UpdateTourStopRequest,
        description = "Fields to update",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown stop", body = ErrorResponse),
        (status = OK, description = "Updated stop", body = TourStopResponse),
    ),
)]
async fn update_tour_stop(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourStopPathParams>,
    ValidateJson(request): ValidateJson<UpdateTourStopRequest>,
) -> Result<Json<TourStopResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdateTourStop {
        title: request.title,
        narrative: request.narrative,
        center_lng: request.viewpoint.map(|v| v.center_lng),
        center_lat: request.viewpoint.map(|v| v.center_lat),
        zoom: request.viewpoint.map(|v| v.zoom),
        bearing: request.viewpoint.and_then(|v| v.bearing),
        pitch: request.viewpoint.and_then(|v| v.pitch),
    };

    let stop = TourRepository::update_stop(&mut conn, params.stop_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("tour_stop"))?;

    Ok(Json(stop.into()))
}

/// Removes a stop and compacts the remaining positions.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/tour-stops/{stopId}", tag = "tours",
    params(TourStopPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown stop", body = ErrorResponse),
        (status = NO_CONTENT, description = "Stop removed"),
    ),
)]
async fn delete_tour_stop(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourStopPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    let deleted = conn
        .transaction(|conn| TourRepository::delete_stop(conn, params.stop_id).scope_boxed())
        .await?;

    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("tour_stop"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Applies a full reordering of a tour's stops.
///
/// The payload must list every stop id of the tour exactly once.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    put, path = "/tours/{tourId}/stops/order", tag = "tours",
    params(TourPathParams),
    request_body(
        content = ReorderStopsRequest,
        description = "Complete stop order",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown tour", body = ErrorResponse),
        (status = BAD_REQUEST, description = "Not a permutation of the tour's stops", body = ErrorResponse),
        (status = OK, description = "Stops in new order", body = ListTourStopsResponse),
    ),
)]
async fn reorder_tour_stops(
    State(pg_client): State<PgClient>,
    Path(params): Path<TourPathParams>,
    Json(request): Json<ReorderStopsRequest>,
) -> Result<Json<ListTourStopsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let tour = TourRepository::find_tour_by_id(&mut conn, params.tour_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("tour"))?;

    let stops = conn
        .transaction(|conn| {
            TourRepository::reorder_stops(conn, tour.id, &request.stop_ids).scope_boxed()
        })
        .await
        .map_err(|error| match error {
            PgError::Unexpected(message) => ErrorKind::BadRequest.with_message(message),
            other => other.into(),
        })?;

    tracing::info!(
        target: TRACING_TARGET,
        tour_id = tour.id.to_string(),
        stops = stops.len(),
        "tour stops reordered",
    );

    Ok(Json(ListTourStopsResponse {
        stops: stops.into_iter().map(Into::into).collect(),
    }))
}

/// Response for listing tour stops.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListTourStopsResponse {
    pub stops: Vec<TourStopResponse>,
}

/// Returns a [`Router`] with the visitor-facing tour routes.
///
/// [`Router`]: axum::routing::Router
pub fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new().routes(routes!(list_published_tours))
}

/// Returns a [`Router`] with the team-facing tour routes.
///
/// [`Router`]: axum::routing::Router
pub fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(create_tour, list_tours))
        .routes(routes!(read_tour, update_tour, delete_tour))
        .routes(routes!(create_tour_stop))
        .routes(routes!(update_tour_stop, delete_tour_stop))
        .routes(routes!(reorder_tour_stops))
}
