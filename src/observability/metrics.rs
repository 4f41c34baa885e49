//! Metrics collection and exposition.
//!
//! # Metrics
//! - `preview_requests_total` (counter): preview resolutions by outcome
//! - `preview_render_duration_seconds` (histogram): renderer time by template
//! - `preview_renderer_loads_total` (counter): first-use renderer loads by template
//! - `preview_store_records` (gauge): records in the current store snapshot
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

pub fn record_preview(outcome: &'static str) {
    counter!("preview_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_render(template_id: &str, start: Instant) {
    histogram!("preview_render_duration_seconds", "template_id" => template_id.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_renderer_load(template_id: &'static str) {
    counter!("preview_renderer_loads_total", "template_id" => template_id).increment(1);
}

pub fn record_store_size(records: usize) {
    gauge!("preview_store_records").set(records as f64);
}
