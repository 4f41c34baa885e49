//! Administrative read API under `/api`.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::{list_previews, list_templates};
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/previews/list", get(list_previews))
        .route("/api/templates", get(list_templates))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
