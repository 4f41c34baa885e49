//! Request rewriting middleware.
//!
//! Applies [`HostRouter`] decisions to live requests. Must wrap the whole
//! application router so the rewritten URI is what route matching sees.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::HOST, Request, Uri},
    middleware::Next,
    response::Response,
};

use crate::routing::host::{HostRouter, RouteDecision};

/// Host the client addressed: the `Host` header, else the URI authority (HTTP/2).
pub fn request_host(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| req.uri().host())
}

pub async fn rewrite_host_middleware(
    State(router): State<Arc<HostRouter>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let decision = match request_host(&req) {
        Some(host) => router.route(host, req.uri().path(), req.uri().query()),
        None => RouteDecision::PassThrough,
    };

    if let RouteDecision::Rewrite(target) = decision {
        match target.parse::<Uri>() {
            Ok(uri) => {
                tracing::debug!(from = %req.uri(), to = %uri, "Rewriting preview host request");
                *req.uri_mut() = uri;
            }
            Err(e) => {
                // Left as-is; the ordinary routing table answers with 404.
                tracing::debug!(target = %target, error = %e, "Unparseable rewrite target");
            }
        }
    }

    next.run(req).await
}
