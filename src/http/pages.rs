//! Page handlers.

use axum::{
    extract::{Path, State},
    http::header::CACHE_CONTROL,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;

const AGENCY_HOME: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Local Service Websites</title>
</head>
<body>
  <main>
    <h1>Websites for local service businesses</h1>
    <p>We design, build and host landing pages for cleaning and landscaping companies.</p>
  </main>
</body>
</html>
"#;

const PREVIEW_INDEX: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="noindex">
  <title>Website previews</title>
</head>
<body>
  <main>
    <h1>Website previews</h1>
    <p>This address hosts private previews of websites we are preparing for our clients.
       If you received a preview link, open it directly to see your page.</p>
  </main>
</body>
</html>
"#;

pub async fn agency_home() -> Html<&'static str> {
    Html(AGENCY_HOME)
}

pub async fn preview_index() -> Html<&'static str> {
    Html(PREVIEW_INDEX)
}

/// Rendered on every request; previews are drafts and must not be cached.
pub async fn preview_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.resolver.resolve(&slug) {
        Ok(page) => ([(CACHE_CONTROL, "no-store")], Html(page.html)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub records: usize,
    pub templates: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        records: state.resolver.store().len(),
        templates: state.resolver.dispatcher().registry().len(),
    })
}
