//! Application state and configuration.

mod service_config;
mod service_state;

pub use service_config::ServiceConfig;
pub use service_state::{MailDomain, ServiceState};

pub use crate::error::{Error as ServiceError, Result};
