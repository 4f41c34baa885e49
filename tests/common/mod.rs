//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tower::ServiceExt;

use preview_host::store::memory::parse_records;
use preview_host::{MemoryStore, PreviewServer, ServiceConfig, TemplateRegistry};

pub const PREVIEW_HOST: &str = "p.example.com";
pub const OPS_HOST: &str = "ops.example.com";
pub const MAIN_HOST: &str = "example.com";

/// A store holding `records`, a JSON array in record-file shape.
pub fn store(records: Value) -> Arc<MemoryStore> {
    let records = parse_records(&records.to_string()).expect("records parse");
    Arc::new(MemoryStore::from_records(records))
}

pub fn app_with(config: ServiceConfig, records: Value) -> Router {
    let registry = Arc::new(TemplateRegistry::builtin().expect("builtin registry"));
    PreviewServer::new(config, store(records), registry).app()
}

pub fn app(records: Value) -> Router {
    app_with(ServiceConfig::default(), records)
}

/// Write `records` to a temporary record file.
pub fn records_file(records: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{}", records).expect("write records");
    file.flush().expect("flush records");
    file
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("json body")
    }
}

/// Send one request through the app in-process.
pub async fn send(app: Router, host: &str, uri: &str, auth: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().uri(uri).header("host", host);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: Router, host: &str, uri: &str) -> TestResponse {
    send(app, host, uri, None).await
}

/// Serve `app` on an ephemeral local port.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
