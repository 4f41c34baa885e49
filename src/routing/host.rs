//! Host-based routing decisions.
//!
//! # Responsibilities
//! - Classify the request host (preview subdomain, operations subdomain, default)
//! - Decide whether a preview-host path is rewritten onto the internal preview route
//! - Let static assets and API paths through untouched on every host
//!
//! # Design Decisions
//! - Host matching is case-insensitive and ignores any port
//! - Path matching is case-sensitive
//! - Pure: the decision depends only on (host, path, query)
//! - Unknown hosts fall through to default routing, never an error

use crate::config::HostsConfig;

/// Which family of hostnames a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Preview,
    Ops,
    Default,
}

/// Outcome of routing a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the request from this path-and-query instead.
    Rewrite(String),
    /// Route the request as it arrived.
    PassThrough,
}

/// Compiled host routing rules. Immutable after construction.
#[derive(Debug, Clone)]
pub struct HostRouter {
    preview_prefix: String,
    ops_prefix: String,
    preview_route: String,
    bypass_prefixes: Vec<String>,
    bypass_extensions: Vec<String>,
}

impl HostRouter {
    pub fn new(config: &HostsConfig) -> Self {
        Self {
            preview_prefix: format!("{}.", config.preview_label.to_lowercase()),
            ops_prefix: format!("{}.", config.ops_label.to_lowercase()),
            preview_route: config.preview_route.trim_end_matches('/').to_string(),
            bypass_prefixes: config.bypass_prefixes.clone(),
            bypass_extensions: config
                .bypass_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// Internal route preview pages are served from.
    pub fn preview_route(&self) -> &str {
        &self.preview_route
    }

    pub fn classify(&self, host: &str) -> HostKind {
        let host = strip_port(host).to_lowercase();
        if host.starts_with(&self.preview_prefix) {
            HostKind::Preview
        } else if host.starts_with(&self.ops_prefix) {
            HostKind::Ops
        } else {
            HostKind::Default
        }
    }

    /// Decide how a request for `host` + `path` (+ optional `query`) is routed.
    pub fn route(&self, host: &str, path: &str, query: Option<&str>) -> RouteDecision {
        if self.is_bypassed(path) {
            return RouteDecision::PassThrough;
        }

        match self.classify(host) {
            HostKind::Preview => {
                // Some clients send the query inline with the path.
                let path = path.split('?').next().unwrap_or_default();
                let rest = path.trim_start_matches('/');
                let rest = rest.strip_suffix('/').unwrap_or(rest);
                let mut target = if rest.is_empty() {
                    self.preview_route.clone()
                } else {
                    format!("{}/{}", self.preview_route, rest)
                };
                if let Some(q) = query.filter(|q| !q.is_empty()) {
                    target.push('?');
                    target.push_str(q);
                }
                RouteDecision::Rewrite(target)
            }
            HostKind::Ops | HostKind::Default => RouteDecision::PassThrough,
        }
    }

    fn is_bypassed(&self, path: &str) -> bool {
        if self.bypass_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return true;
        }
        let last = path.rsplit('/').next().unwrap_or_default();
        match last.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_lowercase();
                self.bypass_extensions.iter().any(|e| *e == ext)
            }
            _ => false,
        }
    }
}

fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals keep their colons.
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or(host)
}
