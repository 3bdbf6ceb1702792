//! Health reporting for external service clients.
//!
//! Every client in the platform (database, civic-data APIs, LLM) reports its
//! availability through [`ServiceHealth`], which the server's health endpoint
//! aggregates.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Represents the operational status of a service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// Service is operating normally
    #[default]
    Healthy,
    /// Service is operating with some issues but still functional
    Degraded,
    /// Service is not operational
    Unhealthy,
}

impl ServiceStatus {
    /// Returns whether the service can serve requests at all.
    #[inline]
    pub fn is_operational(self) -> bool {
        !matches!(self, ServiceStatus::Unhealthy)
    }
}

/// Health information for a single service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Current service status
    pub status: ServiceStatus,
    /// Response time for the health check
    pub response: Option<Duration>,
    /// Optional message describing the current state
    pub message: Option<String>,
    /// Timestamp when the health check was performed
    pub checked_at: OffsetDateTime,
    /// Additional metrics about the service
    pub metrics: HashMap<String, Value>,
}

impl ServiceHealth {
    /// Creates a new healthy service health report.
    pub fn healthy() -> Self {
        Self {
            status: ServiceStatus::Healthy,
            response: None,
            message: None,
            checked_at: OffsetDateTime::now_utc(),
            metrics: HashMap::new(),
        }
    }

    /// Creates a new degraded service health report.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Degraded,
            message: Some(message.into()),
            ..Self::healthy()
        }
    }

    /// Creates a new unhealthy service health report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            message: Some(message.into()),
            ..Self::healthy()
        }
    }

    /// Sets the response time for this health check.
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response = Some(response_time);
        self
    }

    /// Adds a metric to the health report.
    pub fn with_metric(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }
}

impl Default for ServiceHealth {
    fn default() -> Self {
        Self::healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_report() {
        let health = ServiceHealth::healthy();
        assert_eq!(health.status, ServiceStatus::Healthy);
        assert!(health.message.is_none());
        assert!(health.status.is_operational());
    }

    #[test]
    fn test_unhealthy_report() {
        let health = ServiceHealth::unhealthy("connection refused");
        assert_eq!(health.status, ServiceStatus::Unhealthy);
        assert_eq!(health.message.as_deref(), Some("connection refused"));
        assert!(!health.status.is_operational());
    }

    #[test]
    fn test_with_metric() {
        let health = ServiceHealth::degraded("slow responses")
            .with_metric("p99_ms", serde_json::json!(840));
        assert_eq!(health.metrics.len(), 1);
        assert_eq!(health.metrics["p99_ms"], serde_json::json!(840));
    }
}
