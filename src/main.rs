//! Preview host server.
//!
//! ```text
//!   Host: p.example.com  GET /acme-cleaning-tx
//!        │
//!        ▼
//!   routing (rewrite to /p/acme-cleaning-tx)
//!        │
//!        ▼
//!   preview resolver ──▶ store ──▶ normalize ──▶ validate ──▶ dispatcher ──▶ renderer
//!        │
//!        ▼
//!   page, or the shared 404
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use preview_host::config::validation::validate_config;
use preview_host::config::{load_config, ConfigError};
use preview_host::lifecycle::{wait_for_signal, Shutdown};
use preview_host::observability::{logging, metrics};
use preview_host::store::{MemoryStore, StoreWatcher};
use preview_host::{PreviewServer, ServiceConfig, TemplateRegistry};

#[derive(Parser)]
#[command(name = "preview-host")]
#[command(about = "Serves tenant website previews on the preview subdomain", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(args: &Args) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load(&args)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "preview-host starting");

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let registry = Arc::new(TemplateRegistry::builtin()?);
    tracing::info!(templates = registry.len(), "Template registry ready");

    let store = Arc::new(match &config.store.path {
        Some(path) => MemoryStore::load_from_file(Path::new(path))?,
        None => {
            tracing::warn!("No store.path configured; serving an empty preview store");
            MemoryStore::new()
        }
    });

    let shutdown = Shutdown::new();

    if config.store.watch {
        if let Some(path) = store.path() {
            let watcher = StoreWatcher::new(path, store.clone()).run()?;
            let mut stop = shutdown.subscribe();
            tokio::spawn(async move {
                let _ = stop.recv().await;
                drop(watcher);
                tracing::info!("Record watcher stopped");
            });
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = PreviewServer::new(config, store, registry);
    let server_shutdown = shutdown.subscribe();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
