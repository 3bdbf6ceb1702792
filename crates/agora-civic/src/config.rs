//! Configuration for the civic-data clients.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default request timeout for civic-data lookups.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent sent to the civic APIs.
///
/// The public APIs ask callers to identify themselves; keep this descriptive.
const DEFAULT_USER_AGENT: &str = concat!("agora-civic/", env!("CARGO_PKG_VERSION"));

/// Configuration shared by the civic-data clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct CivicConfig {
    /// Base URL for the postcodes.io API.
    pub postcodes_base_url: String,
    /// Base URL for the UK Parliament Members API.
    pub parliament_base_url: String,
    /// Base URL for the MapIt API.
    pub mapit_base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl CivicConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("postcodes base URL", &self.postcodes_base_url),
            ("parliament base URL", &self.parliament_base_url),
            ("mapit base URL", &self.mapit_base_url),
        ] {
            if value.is_empty() {
                return Err(Error::Config(format!("{name} cannot be empty")));
            }
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(Error::Config(format!("{name} must be an http(s) URL")));
            }
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout cannot be zero".into()));
        }

        Ok(())
    }

    /// Builds the shared reqwest client used by all three integrations.
    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(Error::Transport)
    }
}

impl Default for CivicConfig {
    fn default() -> Self {
        Self {
            postcodes_base_url: "https://api.postcodes.io".to_owned(),
            parliament_base_url: "https://members-api.parliament.uk".to_owned(),
            mapit_base_url: "https://mapit.mysociety.org".to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(CivicConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut config = CivicConfig::default();
        config.mapit_base_url = "ftp://mapit.mysociety.org".into();
        assert!(config.validate().is_err());
    }
}
