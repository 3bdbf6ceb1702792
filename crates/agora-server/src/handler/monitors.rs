//! System health monitoring and status check handlers.

use agora_openrouter::LlmClient;
use agora_postgres::PgClient;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::extract::{Json, Query};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "agora_server::handler::monitors";

/// `Query` params for the health endpoint.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthQueryParams {
    /// Whether to probe dependencies instead of reporting liveness only.
    pub detailed: Option<bool>,
}

/// Health of a single dependency.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct DependencyHealth {
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the health endpoint.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    pub is_healthy: bool,
    #[schema(value_type = String, format = DateTime)]
    pub checked_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<DependencyHealth>,
}

/// Returns the service health.
///
/// Without `detailed=true` this is a liveness probe that never touches
/// dependencies; with it, the database and the analysis model are probed and
/// an unhealthy dependency turns the response into a 503.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/health", tag = "monitors",
    params(HealthQueryParams),
    responses(
        (
            status = OK,
            description = "Service is healthy",
            body = HealthResponse,
        ),
        (
            status = SERVICE_UNAVAILABLE,
            description = "A dependency is unhealthy",
            body = HealthResponse,
        ),
    ),
)]
async fn health_status(
    State(pg_client): State<PgClient>,
    State(llm_client): State<LlmClient>,
    Query(params): Query<HealthQueryParams>,
) -> Result<(StatusCode, Json<HealthResponse>)> {
    let detailed = params.detailed.unwrap_or(false);

    let mut dependencies = Vec::new();
    if detailed {
        let postgres_healthy = match pg_client.ping().await {
            Ok(()) => DependencyHealth {
                name: "postgres".to_owned(),
                healthy: true,
                message: None,
            },
            Err(error) => DependencyHealth {
                name: "postgres".to_owned(),
                healthy: false,
                message: Some(error.to_string()),
            },
        };
        dependencies.push(postgres_healthy);

        let llm_health = llm_client.health_check().await;
        dependencies.push(DependencyHealth {
            name: "openrouter".to_owned(),
            healthy: llm_health.status.is_operational(),
            message: llm_health.message,
        });
    }

    let is_healthy = dependencies.iter().all(|dependency| dependency.healthy);
    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        detailed,
        is_healthy,
        "health status checked"
    );

    let response = HealthResponse {
        is_healthy,
        checked_at: OffsetDateTime::now_utc(),
        dependencies,
    };

    Ok((status_code, Json(response)))
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new().routes(routes!(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn test_health_basic_check_is_offline() -> anyhow::Result<()> {
        let server = create_test_server_with_router(routes()).await?;

        let response = server.get("/health").await;
        response.assert_status_success();

        let health = response.json::<serde_json::Value>();
        assert_eq!(health["isHealthy"], serde_json::json!(true));

        Ok(())
    }
}
