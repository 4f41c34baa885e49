//! Shared responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const NOT_FOUND_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="robots" content="noindex">
  <title>Page not found</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 0; min-height: 100vh; display: grid; place-items: center; color: #1f2937; }
    main { text-align: center; padding: 2rem; }
    a { color: #0e7490; }
  </style>
</head>
<body>
  <main>
    <h1>Page not found</h1>
    <p>The page you are looking for does not exist or is no longer available.</p>
  </main>
</body>
</html>
"#;

/// The one not-found response. Identical for every cause.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

pub async fn fallback() -> Response {
    not_found()
}
