//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Routes are grouped per feature module. Each module exposes `routes()` (or
//! a `public_routes()`/`team_routes()` pair when it serves both audiences);
//! [`routes`] assembles everything and [`create_app_router`] adds the
//! generated OpenAPI document and the Scalar UI at `/docs`.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod analytics;
mod enquiries;
mod error;
mod forms;
mod monitors;
mod pins;
pub mod projects;
pub mod request;
mod response;
mod stakeholders;
mod subscribers;
mod tours;
mod webhooks;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, ValidationErrorDetail};
use crate::service::ServiceState;

/// Returns an [`OpenApiRouter`] with the visitor-facing routes.
fn public_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .merge(monitors::routes())
        .merge(webhooks::routes())
        .merge(pins::public_routes())
        .merge(enquiries::public_routes())
        .merge(forms::public_routes())
        .merge(tours::public_routes())
        .merge(subscribers::public_routes())
}

/// Returns an [`OpenApiRouter`] with the team-facing routes.
///
/// Deployments front these with an authenticating proxy; the API itself does
/// not manage sessions.
fn team_routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .merge(projects::routes())
        .merge(stakeholders::routes())
        .merge(analytics::routes())
        .merge(pins::team_routes())
        .merge(enquiries::team_routes())
        .merge(forms::team_routes())
        .merge(tours::team_routes())
        .merge(subscribers::team_routes())
}

/// Returns an [`OpenApiRouter`] with all routes.
pub fn routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .merge(public_routes())
        .merge(team_routes())
}

/// Creates the application router.
///
/// Nests the API under `/api/v1`, generates the OpenAPI document from the
/// annotated handlers, and serves it through Scalar at `/docs`.
pub fn create_app_router(state: ServiceState) -> Router {
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "monitors", description = "Health and status checks"),
            (name = "projects", description = "Consultation project management"),
            (name = "pins", description = "Map-anchored public feedback"),
            (name = "enquiries", description = "Public enquiry inbox"),
            (name = "webhooks", description = "Inbound integration callbacks"),
            (name = "forms", description = "Structured feedback forms"),
            (name = "tours", description = "Guided site tours"),
            (name = "subscribers", description = "Project mailing lists"),
            (name = "stakeholders", description = "Stakeholder management and auto-detection"),
            (name = "analytics", description = "AI feedback analysis"),
        ),
    )]
    struct ApiDoc;

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routes())
        .split_for_parts();

    router
        .with_state(state)
        .merge(Scalar::with_url("/docs", api))
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;
    use utoipa_axum::router::OpenApiRouter;

    use crate::handler::create_app_router;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] with the given router.
    pub async fn create_test_server_with_router(
        router: OpenApiRouter<ServiceState>,
    ) -> anyhow::Result<TestServer> {
        let config = ServiceConfig::default();
        let state = ServiceState::from_config(&config)?;
        let (app, _) = router.with_state(state).split_for_parts();
        Ok(TestServer::new(app)?)
    }

    /// Returns a new [`TestServer`] with the full application router.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        let config = ServiceConfig::default();
        let state = ServiceState::from_config(&config)?;
        Ok(TestServer::new(create_app_router(state))?)
    }

    #[tokio::test]
    async fn test_app_router_builds() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        let response = server.get("/api/v1/no-such-route").await;
        response.assert_status_not_found();
        Ok(())
    }
}
