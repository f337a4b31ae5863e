//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the URI root and archive directory
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{DoccConfig, ServerConfig};
use crate::observability::logging;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("docc.uri_root must not be empty")]
    EmptyUriRoot,
    #[error("docc.uri_root must start with '/': {0}")]
    RelativeUriRoot(String),
    #[error("docc.uri_root must not contain '..': {0}")]
    TraversingUriRoot(String),
    #[error("docc.archive_root must not be empty")]
    EmptyArchiveRoot,
    #[error("listener.hostname must not be empty")]
    EmptyHostname,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate the middleware section on its own.
pub fn validate_docc(config: &DoccConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_docc(config, &mut errors);
    into_result(errors)
}

/// Validate a full server configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_docc(&config.docc, &mut errors);

    if config.listener.hostname.trim().is_empty() {
        errors.push(ValidationError::EmptyHostname);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if !logging::is_valid_level(&config.observability.log_level) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    into_result(errors)
}

fn check_docc(config: &DoccConfig, errors: &mut Vec<ValidationError>) {
    let uri_root = &config.uri_root;
    if uri_root.is_empty() {
        errors.push(ValidationError::EmptyUriRoot);
    } else if !uri_root.starts_with('/') {
        errors.push(ValidationError::RelativeUriRoot(uri_root.clone()));
    }
    if uri_root.contains("..") {
        errors.push(ValidationError::TraversingUriRoot(uri_root.clone()));
    }
    if config.archive_root.trim().is_empty() {
        errors.push(ValidationError::EmptyArchiveRoot);
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
