//! App [`state`] configuration.
//!
//! [`state`]: crate::service::ServiceState

use agora_civic::CivicConfig;
use agora_openrouter::LlmConfig;
use agora_postgres::PgConfig;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::service::{Result, ServiceError};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Postgres connection and pool settings.
    #[cfg_attr(feature = "config", clap(flatten))]
    #[serde(flatten)]
    pub postgres: PgConfig,

    /// OpenRouter API key.
    #[cfg_attr(
        feature = "config",
        arg(long = "openrouter-api-key", env = "OPENROUTER_API_KEY")
    )]
    pub openrouter_api_key: String,

    /// OpenRouter base URL override.
    #[cfg_attr(
        feature = "config",
        arg(long = "openrouter-base-url", env = "OPENROUTER_BASE_URL")
    )]
    pub openrouter_base_url: Option<String>,

    /// Model used for feedback analysis.
    #[cfg_attr(
        feature = "config",
        arg(long = "openrouter-model", env = "OPENROUTER_MODEL")
    )]
    pub openrouter_model: Option<String>,

    /// postcodes.io base URL override.
    #[cfg_attr(
        feature = "config",
        arg(long = "postcodes-base-url", env = "POSTCODES_BASE_URL")
    )]
    pub postcodes_base_url: Option<String>,

    /// UK Parliament Members API base URL override.
    #[cfg_attr(
        feature = "config",
        arg(long = "parliament-base-url", env = "PARLIAMENT_BASE_URL")
    )]
    pub parliament_base_url: Option<String>,

    /// MapIt base URL override.
    #[cfg_attr(
        feature = "config",
        arg(long = "mapit-base-url", env = "MAPIT_BASE_URL")
    )]
    pub mapit_base_url: Option<String>,

    /// Mail domain accepted by the inbound-email webhook.
    ///
    /// An enquiry mailbox is `<project-slug>@<this domain>`.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "inbound-mail-domain",
            env = "INBOUND_MAIL_DOMAIN",
            default_value = "mail.agora.local"
        )
    )]
    pub inbound_mail_domain: String,
}

impl ServiceConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        self.postgres
            .validate()
            .map_err(|e| ServiceError::config("invalid postgres configuration").with_source(e))?;

        if self.openrouter_api_key.is_empty() {
            return Err(ServiceError::config("OpenRouter API key cannot be empty"));
        }

        if self.inbound_mail_domain.is_empty() {
            return Err(ServiceError::config("inbound mail domain cannot be empty"));
        }

        self.civic_config()
            .validate()
            .map_err(|e| ServiceError::config("invalid civic API configuration").with_source(e))?;

        Ok(())
    }

    /// Builds the civic-data client configuration.
    pub fn civic_config(&self) -> CivicConfig {
        let mut config = CivicConfig::default();

        if let Some(base_url) = &self.postcodes_base_url {
            config.postcodes_base_url = base_url.clone();
        }
        if let Some(base_url) = &self.parliament_base_url {
            config.parliament_base_url = base_url.clone();
        }
        if let Some(base_url) = &self.mapit_base_url {
            config.mapit_base_url = base_url.clone();
        }

        config
    }

    /// Builds the OpenRouter client configuration.
    pub fn llm_config(&self) -> LlmConfig {
        let mut config = LlmConfig::new(self.openrouter_api_key.clone());

        if let Some(base_url) = &self.openrouter_base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(model) = &self.openrouter_model {
            config = config.with_model(model.clone());
        }

        config
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            postgres: PgConfig::default(),
            // Placeholder key for local development and offline tests; real
            // deployments set OPENROUTER_API_KEY.
            openrouter_api_key: "sk-or-dev-placeholder".to_owned(),
            openrouter_base_url: None,
            openrouter_model: None,
            postcodes_base_url: None,
            parliament_base_url: None,
            mapit_base_url: None,
            inbound_mail_domain: "mail.agora.local".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ServiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = ServiceConfig::default();
        config.openrouter_api_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_flow_into_llm_config() {
        let mut config = ServiceConfig::default();
        config.openrouter_model = Some("openai/gpt-4o-mini".into());

        assert_eq!(config.llm_config().model, "openai/gpt-4o-mini");
    }

    #[test]
    fn test_overrides_flow_into_civic_config() {
        let mut config = ServiceConfig::default();
        config.mapit_base_url = Some("http://localhost:9001".into());

        assert_eq!(config.civic_config().mapit_base_url, "http://localhost:9001");
    }
}
