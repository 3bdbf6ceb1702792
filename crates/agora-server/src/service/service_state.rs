//! Application state and dependency injection.

use agora_civic::StakeholderDetector;
use agora_openrouter::{AnalysisService, LlmClient};
use agora_postgres::PgClient;

use crate::service::{Result, ServiceConfig, ServiceError};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). Cloning is
/// cheap; every member is a shared handle.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    pg_client: PgClient,
    analysis_service: AnalysisService,
    stakeholder_detector: StakeholderDetector,
    mail_domain: MailDomain,
}

/// The mail domain served by the inbound-email webhook.
///
/// Newtype so it can be injected via `FromRef` like every other dependency.
#[derive(Debug, Clone)]
pub struct MailDomain(pub String);

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Builds every client. Nothing connects eagerly: the database pool
    /// creates connections on first checkout and the HTTP clients are
    /// connectionless, so this succeeds without any dependency reachable.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let pg_client = PgClient::new(config.postgres.clone())
            .map_err(|e| ServiceError::database("failed to create database client").with_source(e))?;

        let llm_client = LlmClient::new(config.llm_config()).map_err(|e| {
            ServiceError::external("openrouter", "failed to create client").with_source(e)
        })?;

        let stakeholder_detector = StakeholderDetector::new(&config.civic_config())
            .map_err(|e| {
                ServiceError::external("civic", "failed to create clients").with_source(e)
            })?;

        Ok(Self {
            pg_client,
            analysis_service: AnalysisService::new(llm_client),
            stakeholder_detector,
            mail_domain: MailDomain(config.inbound_mail_domain.clone()),
        })
    }

    /// Returns the database client.
    pub fn pg_client(&self) -> &PgClient {
        &self.pg_client
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+ $(,)?) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
impl_di!(analysis_service: AnalysisService);
impl_di!(stakeholder_detector: StakeholderDetector);
impl_di!(mail_domain: MailDomain);

impl axum::extract::FromRef<ServiceState> for LlmClient {
    fn from_ref(state: &ServiceState) -> Self {
        state.analysis_service.client().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_builds_offline() {
        let config = ServiceConfig::default();
        let state = ServiceState::from_config(&config);
        assert!(state.is_ok());
    }
}
