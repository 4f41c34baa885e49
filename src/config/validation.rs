//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, limits ordered)
//! - Check host labels are usable DNS labels and do not collide
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// Paths the application serves itself. The preview route may not be one of
/// them or sit beneath one.
const RESERVED_ROUTES: &[&str] = &["/health", "/api"];

/// A single semantic problem in the service configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("`{}` is not a socket address", config.listener.bind_address),
        ));
    }

    let hosts = &config.hosts;
    for (field, label) in [
        ("hosts.preview_label", &hosts.preview_label),
        ("hosts.ops_label", &hosts.ops_label),
    ] {
        if !is_dns_label(label) {
            errors.push(ValidationError::new(
                field,
                format!("`{}` is not a lowercase DNS label", label),
            ));
        }
    }
    if hosts.preview_label == hosts.ops_label {
        errors.push(ValidationError::new(
            "hosts.ops_label",
            "must differ from hosts.preview_label",
        ));
    }

    if !hosts.preview_route.starts_with('/') || hosts.preview_route.len() < 2 {
        errors.push(ValidationError::new(
            "hosts.preview_route",
            "must be an absolute path other than `/`",
        ));
    } else if hosts.preview_route.ends_with('/') {
        errors.push(ValidationError::new(
            "hosts.preview_route",
            "must not end with `/`",
        ));
    } else if !is_plain_path(&hosts.preview_route) {
        errors.push(ValidationError::new(
            "hosts.preview_route",
            format!(
                "`{}` may only contain letters, digits, `-`, `_` and single `/` separators",
                hosts.preview_route
            ),
        ));
    } else if let Some(reserved) = RESERVED_ROUTES
        .iter()
        .find(|r| is_at_or_under(&hosts.preview_route, r))
    {
        errors.push(ValidationError::new(
            "hosts.preview_route",
            format!("`{}` collides with the built-in `{}` route", hosts.preview_route, reserved),
        ));
    }

    for prefix in &hosts.bypass_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::new(
                "hosts.bypass_prefixes",
                format!("`{}` must start with `/`", prefix),
            ));
        }
    }

    for ext in &hosts.bypass_extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            errors.push(ValidationError::new(
                "hosts.bypass_extensions",
                format!("`{}` must be a bare extension such as `css`", ext),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be greater than zero",
        ));
    }

    if config.listing.max_limit == 0 {
        errors.push(ValidationError::new(
            "listing.max_limit",
            "must be greater than zero",
        ));
    }
    if let Some(default_limit) = config.listing.default_limit {
        if default_limit > config.listing.max_limit {
            errors.push(ValidationError::new(
                "listing.default_limit",
                "must not exceed listing.max_limit",
            ));
        }
    }

    if let Some(key) = &config.admin.api_key {
        if key.trim().is_empty() {
            errors.push(ValidationError::new("admin.api_key", "must not be blank"));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "`{}` is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Literal path segments only; no route parameters or wildcards.
fn is_plain_path(path: &str) -> bool {
    path.split('/').skip(1).all(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}

fn is_at_or_under(path: &str, base: &str) -> bool {
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}
