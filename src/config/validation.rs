//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs, and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config value
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {value:?} is not a socket address")]
    InvalidBindAddress { value: String },

    #[error("database.url must be set")]
    MissingDatabaseUrl,

    #[error("database.url {value:?} is not a postgres:// URL")]
    InvalidDatabaseUrl { value: String },

    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("observability.metrics_address {value:?} is not a socket address")]
    InvalidMetricsAddress { value: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            value: config.listener.bind_address.clone(),
        });
    }

    if config.database.url.is_empty() {
        errors.push(ValidationError::MissingDatabaseUrl);
    } else if !config.database.url.starts_with("postgres://")
        && !config.database.url.starts_with("postgresql://")
    {
        errors.push(ValidationError::InvalidDatabaseUrl {
            value: config.database.url.clone(),
        });
    }

    if config.database.max_connections == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "database.max_connections",
        });
    }
    if config.database.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "database.connect_timeout_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue {
            field: "timeouts.request_secs",
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress {
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
