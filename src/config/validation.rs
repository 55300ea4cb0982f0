//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the bind address and upstream URL parse
//! - Validate value ranges (timeouts, window, cap all nonzero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BadgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::BadgeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic violation found in a config.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address: {0}")]
    BindAddress(String),

    #[error("invalid upstream base URL: {0}")]
    BaseUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("unknown log level: {0}")]
    LogLevel(String),
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &BadgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Url::parse(&config.upstream.base_url).is_err() {
        errors.push(ValidationError::BaseUrl(config.upstream.base_url.clone()));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroValue("upstream.timeout_secs"));
    }

    if config.cache.refresh_secs == 0 {
        errors.push(ValidationError::ZeroValue("cache.refresh_secs"));
    }

    if config.cache.max_ids == 0 {
        errors.push(ValidationError::ZeroValue("cache.max_ids"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
