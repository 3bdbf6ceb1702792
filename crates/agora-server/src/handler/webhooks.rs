//! Inbound-email webhook handler.
//!
//! The mail provider POSTs parsed messages here. The recipient mailbox
//! (`<project-slug>@<inbound domain>`) routes the message to a project's
//! enquiry inbox. The provider retries on 5xx, so anything that is wrong
//! with the message itself (unknown mailbox, wrong domain, missing fields)
//! is acknowledged with 202 and dropped after logging.

use agora_postgres::model::NewEnquiry;
use agora_postgres::query::{EnquiryRepository, ProjectRepository};
use agora_postgres::types::EnquirySource;
use agora_postgres::PgClient;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::extract::Json;
use crate::handler::{ErrorResponse, Result};
use crate::service::{MailDomain, ServiceState};

/// Tracing target for webhook operations.
const TRACING_TARGET: &str = "agora_server::handler::webhooks";

/// Parsed inbound email as delivered by the mail provider.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct InboundEmailPayload {
    /// Recipient mailbox, `<project-slug>@<inbound domain>`
    pub recipient: String,
    /// Sender address
    pub sender: String,
    /// Sender display name, when the provider parsed one
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Subject line
    #[serde(default)]
    pub subject: Option<String>,
    /// Plain-text body
    #[serde(default)]
    pub body_plain: Option<String>,
}

/// Acknowledgement returned to the mail provider.
#[must_use]
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct InboundEmailResponse {
    /// Whether the message was routed to a project inbox
    pub routed: bool,
    /// The created enquiry, when routed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enquiry_id: Option<Uuid>,
}

/// Splits a recipient address into mailbox and domain.
fn split_recipient(recipient: &str) -> Option<(&str, &str)> {
    let (mailbox, domain) = recipient.trim().rsplit_once('@')?;
    if mailbox.is_empty() || domain.is_empty() {
        return None;
    }
    Some((mailbox, domain))
}

/// Receives a parsed inbound email and routes it to a project inbox.
#[tracing::instrument(skip_all)]
#[utoipa::path(
    post, path = "/webhooks/inbound-email", tag = "webhooks",
    request_body(
        content = InboundEmailPayload,
        description = "Parsed inbound email",
        content_type = "application/json",
    ),
    responses(
        (status = BAD_REQUEST, description = "Malformed payload", body = ErrorResponse),
        (status = ACCEPTED, description = "Message processed", body = InboundEmailResponse),
    ),
)]
async fn inbound_email(
    State(pg_client): State<PgClient>,
    State(MailDomain(mail_domain)): State<MailDomain>,
    Json(payload): Json<InboundEmailPayload>,
) -> Result<(StatusCode, Json<InboundEmailResponse>)> {
    let dropped = (StatusCode::ACCEPTED, Json(InboundEmailResponse {
        routed: false,
        enquiry_id: None,
    }));

    let Some((mailbox, domain)) = split_recipient(&payload.recipient) else {
        tracing::warn!(
            target: TRACING_TARGET,
            recipient = %payload.recipient,
            "dropping message with malformed recipient"
        );
        return Ok(dropped);
    };

    if !domain.eq_ignore_ascii_case(&mail_domain) {
        tracing::warn!(
            target: TRACING_TARGET,
            domain = %domain,
            "dropping message for foreign mail domain"
        );
        return Ok(dropped);
    }

    let mut conn = pg_client.get_connection().await?;

    let Some(project) = ProjectRepository::find_project_by_slug(&mut conn, mailbox).await? else {
        tracing::warn!(
            target: TRACING_TARGET,
            mailbox = %mailbox,
            "dropping message for unknown project mailbox"
        );
        return Ok(dropped);
    };

    let new_enquiry = NewEnquiry {
        project_id: project.id,
        author_name: payload
            .sender_name
            .unwrap_or_else(|| payload.sender.clone()),
        author_email: payload.sender,
        subject: payload.subject.unwrap_or_else(|| "(no subject)".to_owned()),
        message: payload.body_plain.unwrap_or_default(),
        source: Some(EnquirySource::Email),
    };

    let enquiry = EnquiryRepository::create_enquiry(&mut conn, new_enquiry).await?;

    tracing::info!(
        target: TRACING_TARGET,
        project_id = project.id.to_string(),
        enquiry_id = enquiry.id.to_string(),
        "inbound email routed to project inbox",
    );

    Ok((StatusCode::ACCEPTED, Json(InboundEmailResponse {
        routed: true,
        enquiry_id: Some(enquiry.id),
    })))
}

/// Returns a [`Router`] with all webhook routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> OpenApiRouter<ServiceState> {
    OpenApiRouter::new().routes(routes!(inbound_email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_recipient() {
        assert_eq!(
            split_recipient("high-street@mail.agora.local"),
            Some(("high-street", "mail.agora.local"))
        );
        assert_eq!(split_recipient(" a@b "), Some(("a", "b")));
        assert_eq!(split_recipient("not-an-address"), None);
        assert_eq!(split_recipient("@mail.agora.local"), None);
        assert_eq!(split_recipient("mailbox@"), None);
    }
}
