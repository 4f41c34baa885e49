//! Over-the-wire tests against a real listener.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use preview_host::{MemoryStore, PreviewServer, ServiceConfig, Shutdown, TemplateRegistry};

mod common;
use common::{records_file, spawn, PREVIEW_HOST};

#[tokio::test]
async fn test_serves_preview_over_http() {
    let file = records_file(&json!([
        {"slug": "acme-cleaning-tx", "rawConfig": {"templateId": "cleaning-v2"}}
    ]));
    let store = Arc::new(MemoryStore::load_from_file(file.path()).unwrap());
    let registry = Arc::new(TemplateRegistry::builtin().unwrap());
    let app = PreviewServer::new(ServiceConfig::default(), store, registry).app();
    let addr = spawn(app).await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("http://{}/acme-cleaning-tx", addr))
        .header("host", PREVIEW_HOST)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body = res.text().await.unwrap();
    assert!(body.contains("template cleaning-v2"));

    let missing = client
        .get(format!("http://{}/someone-else", addr))
        .header("host", PREVIEW_HOST)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reload_is_visible_to_requests() {
    let file = records_file(&json!([]));
    let store = Arc::new(MemoryStore::load_from_file(file.path()).unwrap());
    let registry = Arc::new(TemplateRegistry::builtin().unwrap());
    let app = PreviewServer::new(ServiceConfig::default(), store.clone(), registry).app();

    let before = common::get(app.clone(), PREVIEW_HOST, "/late-arrival").await;
    assert_eq!(before.status, axum::http::StatusCode::NOT_FOUND);

    std::fs::write(
        file.path(),
        json!([{"slug": "late-arrival", "config": {"templateId": "cleaning-v3"}}]).to_string(),
    )
    .unwrap();
    store.reload().unwrap();

    let after = common::get(app, PREVIEW_HOST, "/late-arrival").await;
    assert_eq!(after.status, axum::http::StatusCode::OK);
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = PreviewServer::new(
        ServiceConfig::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(TemplateRegistry::builtin().unwrap()),
    );

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let res = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    drop(res);

    shutdown.trigger();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server stops after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
