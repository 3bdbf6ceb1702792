//! Configuration for the OpenRouter client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default OpenRouter API endpoint.
const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model used for analysis when none is configured.
const DEFAULT_MODEL: &str = "anthropic/claude-3.5-haiku";

/// Default per-request timeout. Completion calls over a large corpus are
/// slow, so this is deliberately generous.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default requests-per-second budget.
const DEFAULT_RATE_LIMIT: u32 = 5;

/// Configuration for [`LlmClient`].
///
/// [`LlmClient`]: crate::LlmClient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct LlmConfig {
    /// OpenRouter API key.
    pub api_key: String,
    /// API base URL.
    pub base_url: String,
    /// Model identifier (e.g. `anthropic/claude-3.5-haiku`).
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Requests-per-second budget enforced client-side.
    pub rate_limit: u32,
    /// Sampling temperature; analysis wants deterministic output.
    pub temperature: f32,
}

impl LlmConfig {
    /// Creates a configuration with the given API key and defaults otherwise.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit: DEFAULT_RATE_LIMIT,
            temperature: 0.0,
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the requests-per-second budget.
    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key cannot be empty".into()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config("base URL must be an http(s) URL".into()));
        }

        if self.model.is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        if self.rate_limit == 0 {
            return Err(Error::Config("rate limit must be at least 1".into()));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout cannot be zero".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_validates() {
        assert!(LlmConfig::new("sk-or-test").validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(LlmConfig::new("").validate().is_err());
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        let config = LlmConfig::new("sk-or-test").with_rate_limit(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let config = LlmConfig::new("sk-or-test")
            .with_model("openai/gpt-4o-mini")
            .with_base_url("https://llm.internal/api/v1");

        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.base_url, "https://llm.internal/api/v1");
    }
}
