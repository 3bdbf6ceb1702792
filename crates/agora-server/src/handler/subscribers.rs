//! Mailing-list handlers.
//!
//! Double opt-in: signup stores a pending record, the confirm token promotes
//! it, the unsubscribe token retires it. Delivering the confirmation emails
//! themselves is the mail system's job, not this API's.

use agora_postgres::model::Subscriber;
use agora_postgres::query::{ProjectRepository, SubscriberRepository};
use agora_postgres::types::SubscriberStatus;
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

/// Tracing target for mailing-list operations.
const TRACING_TARGET: &str = "agora_server::handler::subscribers";

/// Request payload for joining a project's mailing list.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
}

/// Request payload for redeeming a token.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct TokenRequest {
    pub token: Uuid,
}

/// Describes a subscriber.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct SubscriberResponse {
    pub subscriber_id: Uuid,
    pub project_id: Uuid,
    pub email: String,
    #[schema(value_type = String)]
    pub status: SubscriberStatus,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed_at: Option<OffsetDateTime>,
}

impl From<Subscriber> for SubscriberResponse {
    fn from(subscriber: Subscriber) -> Self {
        Self {
            subscriber_id: subscriber.id,
            project_id: subscriber.project_id,
            email: subscriber.email,
            status: subscriber.status,
            created_at: subscriber.created_at,
            confirmed_at: subscriber.confirmed_at,
            unsubscribed_at: subscriber.unsubscribed_at,
        }
    }
}

/// Response for listing subscribers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListSubscribersResponse {
    pub subscribers: Vec<SubscriberResponse>,
}

/// Signs an email address up to a project's mailing list.
///
/// Public endpoint. Idempotent: repeat signups of a live subscription return
/// the existing record; an unsubscribed address is revived as pending with a
/// fresh confirm token.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/subscribers", tag = "subscribers",
    params(ProjectPathParams),
    request_body(
        content = SubscribeRequest,
        description = "Signup",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Invalid email", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CREATED, description = "Subscription pending confirmation", body = SubscriberResponse),
    ),
)]
async fn subscribe(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscriberResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let email = request.email.trim().to_lowercase();
    let subscriber = SubscriberRepository::subscribe(&mut conn, project.id, &email).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        subscriber_id = subscriber.id.to_string(),
        status = %subscriber.status,
        "mailing list signup",
    );

    Ok((StatusCode::CREATED, Json(subscriber.into())))
}

/// Redeems a confirm token.
///
/// Public endpoint, linked from the confirmation email.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/subscribers/confirm", tag = "subscribers",
    request_body(
        content = TokenRequest,
        description = "Confirm token",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown or already-used token", body = ErrorResponse),
        (status = OK, description = "Subscription confirmed", body = SubscriberResponse),
    ),
)]
async fn confirm_subscription(
    State(pg_client): State<PgClient>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<SubscriberResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let subscriber = SubscriberRepository::confirm_by_token(&mut conn, request.token)
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("This confirmation link is invalid or has already been used.")
                .with_resource("subscriber")
        })?;

    tracing::info!(
        target: TRACING_TARGET,
        subscriber_id = subscriber.id.to_string(),
        "subscription confirmed",
    );

    Ok(Json(subscriber.into()))
}

/// Redeems an unsubscribe token.
///
/// Public endpoint, linked from every mailing. Succeeds with 200 even when
/// the address was already unsubscribed, since the desired end state holds.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/subscribers/unsubscribe", tag = "subscribers",
    request_body(
        content = TokenRequest,
        description = "Unsubscribe token",
        content_type = "application/json",
    ),
    responses(
        (status = OK, description = "Unsubscribed", body = SubscriberResponse),
        (status = NOT_FOUND, description = "Unknown token", body = ErrorResponse),
    ),
)]
async fn unsubscribe(
    State(pg_client): State<PgClient>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<SubscriberResponse>> {
    let mut conn = pg_client.get_connection().await?;

    if let Some(subscriber) =
        SubscriberRepository::unsubscribe_by_token(&mut conn, request.token).await?
    {
        tracing::info!(
            target: TRACING_TARGET,
            subscriber_id = subscriber.id.to_string(),
            "subscriber opted out",
        );
        return Ok(Json(subscriber.into()));
    }

    // The guarded update misses both unknown tokens and already-unsubscribed
    // records; only the former is an error.
    let existing =
        SubscriberRepository::find_subscriber_by_unsubscribe_token(&mut conn, request.token)
            .await?;

    existing
        .map(|subscriber| Json(subscriber.into()))
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("This unsubscribe link is invalid.")
                .with_resource("subscriber")
        })
}

/// `Query` params for the subscriber listing.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct ListSubscribersQueryParams {
    /// Restrict to one subscription status.
    #[param(value_type = Option<String>)]
    pub status: Option<SubscriberStatus>,
}

/// Lists a project's subscribers, newest first.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/subscribers", tag = "subscribers",
    params(ProjectPathParams, ListSubscribersQueryParams, PaginationRequest),
    responses(
        (status = OK, description = "Subscribers", body = ListSubscribersResponse),
    ),
)]
async fn list_subscribers(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(filter): Query<ListSubscribersQueryParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListSubscribersResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let subscribers = SubscriberRepository::list_project_subscribers(
        &mut conn,
        params.project_id,
        filter.status,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListSubscribersResponse {
        subscribers: subscribers.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a [`Router`] with the visitor-facing mailing-list routes.
///
/// [`Router`]: axum::routing::Router
pub fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(subscribe))
        .routes(routes!(confirm_subscription))
        .routes(routes!(unsubscribe))
}

/// Returns a [`Router`] with the team-facing mailing-list routes.
///
/// [`Router`]: axum::routing::Router
pub fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new().routes(routes!(list_subscribers))
}
