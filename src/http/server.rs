//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the axum application from configuration and shared state
//! - Rewrite preview-host requests before route matching
//! - Wire up middleware (tracing, request id, timeout, security headers)
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::{ListingConfig, ServiceConfig};
use crate::http::pages;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response;
use crate::preview::PreviewResolver;
use crate::routing::{rewrite_host_middleware, HostRouter};
use crate::store::PreviewStore;
use crate::templates::{Dispatcher, TemplateRegistry};

const X_ROBOTS_TAG: &str = "x-robots-tag";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: PreviewResolver,
    pub listing: ListingConfig,
    pub admin_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: &ServiceConfig, resolver: PreviewResolver) -> Self {
        Self {
            resolver,
            listing: config.listing.clone(),
            admin_key: config.admin.api_key.as_deref().map(Arc::from),
        }
    }
}

/// HTTP server for the preview host.
pub struct PreviewServer {
    app: Router,
    config: ServiceConfig,
}

impl PreviewServer {
    /// Wire the store and template registry into a ready-to-serve application.
    pub fn new(
        config: ServiceConfig,
        store: Arc<dyn PreviewStore>,
        registry: Arc<TemplateRegistry>,
    ) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(registry));
        let resolver = PreviewResolver::new(store, dispatcher);
        let state = AppState::new(&config, resolver);
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the application with all middleware layers.
    ///
    /// The host rewrite sits on an outer router whose only job is to hand
    /// every request to the inner one, so the inner routing table matches the
    /// rewritten path.
    #[allow(deprecated)]
    pub fn build_app(config: &ServiceConfig, state: AppState) -> Router {
        let host_router = Arc::new(HostRouter::new(&config.hosts));
        let preview_route = host_router.preview_route().to_string();

        let previews = Router::new()
            .route(&preview_route, get(pages::preview_index))
            .route(&format!("{preview_route}/{{slug}}"), get(pages::preview_page))
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(X_ROBOTS_TAG),
                HeaderValue::from_static("noindex"),
            ));

        let inner = Router::new()
            .route("/", get(pages::agency_home))
            .route("/health", get(pages::health))
            .merge(previews)
            .merge(admin::setup_admin_router(state.clone()))
            .fallback(response::fallback)
            .with_state(state);

        let observability = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id = %request_id(req.headers()),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id());

        Router::new()
            .fallback_service(inner)
            .layer(middleware::from_fn_with_state(
                host_router,
                rewrite_host_middleware,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(observability)
    }

    /// The application router, for in-process use.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            preview_label = %self.config.hosts.preview_label,
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
