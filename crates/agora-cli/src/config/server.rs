//! Server network and lifecycle configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Args;
use serde::{Deserialize, Serialize};

/// Server network and lifecycle configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[arg(long = "host", env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to bind the server to.
    #[arg(long = "port", env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Maximum time to wait for in-flight requests on shutdown, in seconds.
    #[arg(
        long = "shutdown-timeout-secs",
        env = "SHUTDOWN_TIMEOUT_SECS",
        default_value = "20"
    )]
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Returns the socket address to bind.
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the shutdown timeout as a Duration.
    pub fn shutdown_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Returns whether the server binds to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            anyhow::bail!("port 0 is not supported; pick a fixed port");
        }

        if self.shutdown_timeout_secs == 0 || self.shutdown_timeout_secs > 600 {
            anyhow::bail!("shutdown timeout must be between 1 and 600 seconds");
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            shutdown_timeout_secs: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_port_zero() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:8080");
        assert!(!config.binds_to_all_interfaces());
    }
}
