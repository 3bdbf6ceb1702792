//! Stakeholder handlers, including geographic auto-detection.

use agora_civic::{matching, DetectionOutcome, StakeholderDetector};
use agora_postgres::model::{Councillor, NewCouncillor, NewStakeholder, Stakeholder, UpdateStakeholder};
use agora_postgres::query::{CouncillorRepository, ProjectRepository, StakeholderRepository};
use agora_postgres::types::{StakeholderRole, StakeholderSource};
use agora_postgres::PgClient;
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

/// Tracing target for stakeholder operations.
const TRACING_TARGET: &str = "agora_server::handler::stakeholders";

/// `Path` param for `{stakeholderId}` handlers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderPathParams {
    /// Unique identifier of the stakeholder.
    pub stakeholder_id: Uuid,
}

/// Request payload for creating a stakeholder manually.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CreateStakeholderRequest {
    #[validate(length(min = 1, max = 200))]
    pub display_name: String,
    #[validate(length(max = 200))]
    pub organization: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<StakeholderRole>,
    #[validate(length(max = 4000))]
    pub notes: Option<String>,
}

/// Request payload for updating a stakeholder.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct UpdateStakeholderRequest {
    #[validate(length(min = 1, max = 200))]
    pub display_name: Option<String>,
    #[validate(length(max = 200))]
    pub organization: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<StakeholderRole>,
    #[validate(length(max = 4000))]
    pub notes: Option<String>,
}

/// Describes a stakeholder.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct StakeholderResponse {
    pub stakeholder_id: Uuid,
    pub project_id: Uuid,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[schema(value_type = String)]
    pub role: StakeholderRole,
    #[schema(value_type = String)]
    pub source: StakeholderSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<Stakeholder> for StakeholderResponse {
    fn from(stakeholder: Stakeholder) -> Self {
        Self {
            stakeholder_id: stakeholder.id,
            project_id: stakeholder.project_id,
            display_name: stakeholder.display_name,
            organization: stakeholder.organization,
            contact_email: stakeholder.contact_email,
            role: stakeholder.role,
            source: stakeholder.source,
            constituency: stakeholder.constituency,
            ward_name: stakeholder.ward_name,
            notes: stakeholder.notes,
            created_at: stakeholder.created_at,
        }
    }
}

/// Response for listing stakeholders.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListStakeholdersResponse {
    pub stakeholders: Vec<StakeholderResponse>,
}

/// Creates a stakeholder on a project.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/stakeholders", tag = "stakeholders",
    params(ProjectPathParams),
    request_body(
        content = CreateStakeholderRequest,
        description = "New stakeholder",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown project", body = ErrorResponse),
        (status = CREATED, description = "Stakeholder created", body = StakeholderResponse),
    ),
)]
async fn create_stakeholder(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<CreateStakeholderRequest>,
) -> Result<(StatusCode, Json<StakeholderResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let new_stakeholder = NewStakeholder {
        project_id: project.id,
        display_name: request.display_name,
        organization: request.organization,
        contact_email: request.contact_email,
        role: request.role,
        source: Some(StakeholderSource::Manual),
        notes: request.notes,
        ..Default::default()
    };

    let stakeholder = StakeholderRepository::create_stakeholder(&mut conn, new_stakeholder).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        stakeholder_id = stakeholder.id.to_string(),
        "stakeholder created",
    );

    Ok((StatusCode::CREATED, Json(stakeholder.into())))
}

/// Lists a project's stakeholders, newest first.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/projects/{projectId}/stakeholders", tag = "stakeholders",
    params(ProjectPathParams, PaginationRequest),
    responses(
        (status = OK, description = "Stakeholders", body = ListStakeholdersResponse),
    ),
)]
async fn list_stakeholders(
    State(pg_client): State<PgClient>,
    Path(params): Path<ProjectPathParams>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListStakeholdersResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let stakeholders = StakeholderRepository::list_project_stakeholders(
        &mut conn,
        params.project_id,
        pagination.into(),
    )
    .await?;

    Ok(Json(ListStakeholdersResponse {
        stakeholders: stakeholders.into_iter().map(Into::into).collect(),
    }))
}

/// Updates a stakeholder.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    patch, path = "/stakeholders/{stakeholderId}", tag = "stakeholders",
    params(StakeholderPathParams),
    request_body(
        content = UpdateStakeholderRequest,
        description = "Fields to update",
        content_type = "application/json",
    ),
    responses(
        (status = NOT_FOUND, description = "Unknown stakeholder", body = ErrorResponse),
        (status = OK, description = "Updated stakeholder", body = StakeholderResponse),
    ),
)]
async fn update_stakeholder(
    State(pg_client): State<PgClient>,
    Path(params): Path<StakeholderPathParams>,
    ValidateJson(request): ValidateJson<UpdateStakeholderRequest>,
) -> Result<Json<StakeholderResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let update = UpdateStakeholder {
        display_name: request.display_name,
        organization: request.organization.map(Some),
        contact_email: request.contact_email.map(Some),
        role: request.role,
        notes: request.notes.map(Some),
        ..Default::default()
    };

    let stakeholder = StakeholderRepository::update_stakeholder(&mut conn, params.stakeholder_id, update)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("stakeholder"))?;

    Ok(Json(stakeholder.into()))
}

/// Deletes a stakeholder.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    delete, path = "/stakeholders/{stakeholderId}", tag = "stakeholders",
    params(StakeholderPathParams),
    responses(
        (status = NOT_FOUND, description = "Unknown stakeholder", body = ErrorResponse),
        (status = NO_CONTENT, description = "Stakeholder deleted"),
    ),
)]
async fn delete_stakeholder(
    State(pg_client): State<PgClient>,
    Path(params): Path<StakeholderPathParams>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;

    let deleted =
        StakeholderRepository::delete_stakeholder(&mut conn, params.stakeholder_id).await?;
    if !deleted {
        return Err(ErrorKind::NotFound.with_resource("stakeholder"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Request payload for stakeholder auto-detection.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct DetectStakeholdersRequest {
    /// Postcode of the project site.
    #[validate(length(min = 5, max = 10))]
    pub postcode: String,
}

/// Response for stakeholder auto-detection.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct DetectStakeholdersResponse {
    /// Stakeholder records persisted by this detection run.
    pub created: Vec<StakeholderResponse>,
    /// Ward names used for councillor matching.
    pub wards: Vec<String>,
    /// Warnings from best-effort detection stages that failed.
    pub warnings: Vec<String>,
}

/// Builds the stakeholder rows a detection outcome maps to.
fn stakeholders_from_outcome(
    project_id: Uuid,
    outcome: &DetectionOutcome,
    councillors: &[Councillor],
) -> Vec<NewStakeholder> {
    let constituency = outcome.postcode.parliamentary_constituency.clone();
    let mut rows = Vec::new();

    if let Some(mp) = &outcome.mp {
        rows.push(NewStakeholder {
            project_id,
            display_name: mp.name.clone(),
            organization: mp.party.clone(),
            role: Some(StakeholderRole::Mp),
            source: Some(StakeholderSource::Detected),
            constituency: mp.constituency.clone().or_else(|| constituency.clone()),
            ..Default::default()
        });
    }

    for parish in &outcome.parishes {
        rows.push(NewStakeholder {
            project_id,
            display_name: parish.name.clone(),
            role: Some(StakeholderRole::ParishCouncil),
            source: Some(StakeholderSource::Detected),
            ..Default::default()
        });
    }

    for councillor in councillors {
        rows.push(NewStakeholder {
            project_id,
            display_name: councillor.display_name.clone(),
            organization: Some(councillor.council_name.clone()),
            contact_email: councillor.contact_email.clone(),
            role: Some(StakeholderRole::Councillor),
            source: Some(StakeholderSource::Detected),
            ward_name: Some(councillor.ward_name.clone()),
            ..Default::default()
        });
    }

    rows
}

/// Detects political stakeholders for a project site from its postcode.
///
/// Chains the postcode, MP and boundary lookups, matches councillors from
/// the imported directory by ward name, and persists everything found with
/// `source = detected`. Only a failed postcode lookup is fatal; later stages
/// degrade to warnings in the response.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/projects/{projectId}/stakeholders/detect", tag = "stakeholders",
    params(ProjectPathParams),
    request_body(
        content = DetectStakeholdersRequest,
        description = "Site postcode",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Invalid postcode", body = ErrorResponse),
        (status = NOT_FOUND, description = "Unknown project or postcode", body = ErrorResponse),
        (status = SERVICE_UNAVAILABLE, description = "Civic data services unavailable", body = ErrorResponse),
        (status = CREATED, description = "Detected stakeholders", body = DetectStakeholdersResponse),
    ),
)]
async fn detect_stakeholders(
    State(pg_client): State<PgClient>,
    State(detector): State<StakeholderDetector>,
    Path(params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<DetectStakeholdersRequest>,
) -> Result<(StatusCode, Json<DetectStakeholdersResponse>)> {
    let mut conn = pg_client.get_connection().await?;

    let project = ProjectRepository::find_project_by_id(&mut conn, params.project_id)
        .await?
        .ok_or_else(|| ErrorKind::NotFound.with_resource("project"))?;

    let outcome = detector.detect(&request.postcode).await?;

    // Ward matching runs against the imported directory, filtered to the
    // councils that cover the coordinate.
    let directory =
        CouncillorRepository::find_councillors_for_councils(&mut conn, &outcome.council_names())
            .await?;

    let matched: Vec<Councillor> = matching::match_by_ward(
        &outcome.wards,
        directory
            .iter()
            .map(|councillor| (councillor.ward_name.as_str(), councillor.clone())),
    );

    let rows = stakeholders_from_outcome(project.id, &outcome, &matched);

    let created = conn
        .transaction(|conn| StakeholderRepository::create_stakeholders(conn, rows).scope_boxed())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        postcode = %outcome.postcode.postcode,
        created = created.len(),
        warnings = outcome.warnings.len(),
        "stakeholder detection persisted",
    );

    Ok((StatusCode::CREATED, Json(DetectStakeholdersResponse {
        created: created.into_iter().map(Into::into).collect(),
        wards: outcome.wards,
        warnings: outcome.warnings,
    })))
}

/// One councillor directory entry in a bulk import.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct CouncillorImportEntry {
    #[validate(length(min = 1, max = 200))]
    pub council_name: String,
    #[validate(length(min = 1, max = 200))]
    pub ward_name: String,
    #[validate(length(min = 1, max = 200))]
    pub display_name: String,
    #[validate(length(max = 100))]
    pub party: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
}

/// Request payload for importing the councillor directory.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
struct ImportCouncillorsRequest {
    #[validate(length(min = 1, max = 5000), nested)]
    pub councillors: Vec<CouncillorImportEntry>,
}

/// Describes a councillor directory entry.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct CouncillorResponse {
    pub councillor_id: Uuid,
    pub council_name: String,
    pub ward_name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl From<Councillor> for CouncillorResponse {
    fn from(councillor: Councillor) -> Self {
        Self {
            councillor_id: councillor.id,
            council_name: councillor.council_name,
            ward_name: councillor.ward_name,
            display_name: councillor.display_name,
            party: councillor.party,
            contact_email: councillor.contact_email,
        }
    }
}

/// Response for listing or importing councillors.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ListCouncillorsResponse {
    pub councillors: Vec<CouncillorResponse>,
}

/// Bulk-imports the councillor directory.
///
/// Upserts on `(council, ward, name)`: re-importing a refreshed directory
/// updates party and contact details in place.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/councillors/import", tag = "stakeholders",
    request_body(
        content = ImportCouncillorsRequest,
        description = "Councillor directory",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Bad request", body = ErrorResponse),
        (status = OK, description = "Imported directory entries", body = ListCouncillorsResponse),
    ),
)]
async fn import_councillors(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<ImportCouncillorsRequest>,
) -> Result<Json<ListCouncillorsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let records: Vec<NewCouncillor> = request
        .councillors
        .into_iter()
        .map(|entry| NewCouncillor {
            council_name: entry.council_name,
            ward_name: entry.ward_name,
            display_name: entry.display_name,
            party: entry.party,
            contact_email: entry.contact_email,
        })
        .collect();

    let imported = conn
        .transaction(|conn| CouncillorRepository::upsert_councillors(conn, records).scope_boxed())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        imported = imported.len(),
        "councillor directory imported",
    );

    Ok(Json(ListCouncillorsResponse {
        councillors: imported.into_iter().map(Into::into).collect(),
    }))
}

/// Lists the councillor directory.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    get, path = "/councillors", tag = "stakeholders",
    params(PaginationRequest),
    responses(
        (status = OK, description = "Directory entries", body = ListCouncillorsResponse),
    ),
)]
async fn list_councillors(
    State(pg_client): State<PgClient>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<ListCouncillorsResponse>> {
    let mut conn = pg_client.get_connection().await?;

    let councillors = CouncillorRepository::list_councillors(&mut conn, pagination.into()).await?;

    Ok(Json(ListCouncillorsResponse {
        councillors: councillors.into_iter().map(Into::into).collect(),
    }))
}

/// Returns a [`Router`] with all stakeholder routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new()
        .routes(routes!(create_stakeholder, list_stakeholders))
        .routes(routes!(update_stakeholder, delete_stakeholder))
        .routes(routes!(detect_stakeholders))
        .routes(routes!(import_councillors))
        .routes(routes!(list_councillors))
}

#[cfg(test)]
mod tests {
    use agora_civic::{DetectedArea, MemberSummary, PostcodeInfo};
    use time::OffsetDateTime;

    use super::*;

    fn sample_outcome() -> DetectionOutcome {
        DetectionOutcome {
            postcode: PostcodeInfo {
                postcode: "N1 9GU".into(),
                longitude: -0.1204,
                latitude: 51.5353,
                parliamentary_constituency: Some("Islington South and Finsbury".into()),
                admin_district: Some("Islington".into()),
                admin_ward: Some("Caledonian".into()),
                parish: None,
            },
            mp: Some(MemberSummary {
                id: 1536,
                name: "Emily Thornberry".into(),
                party: Some("Labour".into()),
                constituency: Some("Islington South and Finsbury".into()),
            }),
            councils: vec![DetectedArea {
                mapit_id: Some(2507),
                name: "Islington Borough Council".into(),
            }],
            parishes: Vec::new(),
            wards: vec!["Caledonian".into()],
            warnings: Vec::new(),
        }
    }

    fn sample_councillor(ward: &str) -> Councillor {
        let now = OffsetDateTime::UNIX_EPOCH;
        Councillor {
            id: Uuid::new_v4(),
            council_name: "Islington Borough Council".into(),
            ward_name: ward.into(),
            display_name: "Cllr Example".into(),
            party: Some("Labour".into()),
            contact_email: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_outcome_maps_mp_and_councillors() {
        let outcome = sample_outcome();
        let councillors = vec![sample_councillor("Caledonian Ward")];

        let rows = stakeholders_from_outcome(Uuid::new_v4(), &outcome, &councillors);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].role, Some(StakeholderRole::Mp));
        assert_eq!(rows[0].display_name, "Emily Thornberry");
        assert_eq!(rows[1].role, Some(StakeholderRole::Councillor));
        assert_eq!(rows[1].ward_name.as_deref(), Some("Caledonian Ward"));
        assert!(rows
            .iter()
            .all(|row| row.source == Some(StakeholderSource::Detected)));
    }

    #[test]
    fn test_outcome_without_mp_maps_parishes() {
        let mut outcome = sample_outcome();
        outcome.mp = None;
        outcome.parishes.push(DetectedArea {
            mapit_id: None,
            name: "Example Parish Council".into(),
        });

        let rows = stakeholders_from_outcome(Uuid::new_v4(), &outcome, &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role, Some(StakeholderRole::ParishCouncil));
    }

    #[test]
    fn test_ward_matching_selects_directory_entries() {
        let outcome = sample_outcome();
        let directory = vec![
            sample_councillor("Caledonian Ward"),
            sample_councillor("Highbury"),
        ];

        let matched: Vec<Councillor> = matching::match_by_ward(
            &outcome.wards,
            directory
                .iter()
                .map(|councillor| (councillor.ward_name.as_str(), councillor.clone())),
        );

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].ward_name, "Caledonian Ward");
    }
}
