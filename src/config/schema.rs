//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the preview host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the preview host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Host-based routing (preview and operations subdomains).
    pub hosts: HostsConfig,

    /// Preview record store.
    pub store: StoreConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Preview listing endpoint limits.
    pub listing: ListingConfig,

    /// Administrative API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Host routing configuration.
///
/// A request whose host starts with `"{preview_label}."` is served from the
/// internal preview route; `"{ops_label}."` hosts use ordinary routing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostsConfig {
    /// Leading DNS label of the preview subdomain.
    pub preview_label: String,

    /// Leading DNS label of the operations subdomain.
    pub ops_label: String,

    /// Internal route preview requests are rewritten onto.
    pub preview_route: String,

    /// Path prefixes that are never rewritten (static assets, API).
    pub bypass_prefixes: Vec<String>,

    /// File extensions that are never rewritten.
    pub bypass_extensions: Vec<String>,
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            preview_label: "p".to_string(),
            ops_label: "ops".to_string(),
            preview_route: "/p".to_string(),
            bypass_prefixes: vec![
                "/api/".to_string(),
                "/assets/".to_string(),
                "/static/".to_string(),
                "/_internal/".to_string(),
            ],
            bypass_extensions: vec![
                "css", "js", "map", "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "txt",
                "xml", "woff", "woff2",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Preview record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON record file. The store starts empty when unset.
    pub path: Option<String>,

    /// Reload the record file when it changes on disk.
    pub watch: bool,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Limits for `GET /api/previews/list`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Limit applied when the request has none. `None` returns every match.
    pub default_limit: Option<usize>,

    /// Upper bound for any requested limit.
    pub max_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_limit: 500,
        }
    }
}

/// Administrative API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required on `/api/*` when set.
    pub api_key: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.hosts.preview_label, "p");
        assert_eq!(config.hosts.ops_label, "ops");
        assert_eq!(config.hosts.preview_route, "/p");
        assert!(config.store.path.is_none());
        assert_eq!(config.listing.default_limit, None);
    }

    #[test]
    fn test_partial_sections() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [hosts]
            preview_label = "preview"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.hosts.preview_label, "preview");
        assert_eq!(config.hosts.ops_label, "ops");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }
}
