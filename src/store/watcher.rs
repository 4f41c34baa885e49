//! Record file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::store::MemoryStore;

/// Watches the record file and swaps a fresh snapshot into the store on change.
pub struct StoreWatcher {
    path: PathBuf,
    store: Arc<MemoryStore>,
}

impl StoreWatcher {
    pub fn new(path: &Path, store: Arc<MemoryStore>) -> Self {
        Self {
            path: path.to_path_buf(),
            store,
        }
    }

    /// Start watching. The returned watcher must be kept alive.
    ///
    /// The parent directory is watched so that editors which replace the file
    /// by rename are still picked up.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = self.store;
        let file_name = self.path.file_name().map(|name| name.to_os_string());
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_file = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if !touches_file {
                        return;
                    }
                    tracing::info!("Record file change detected, reloading");
                    if let Err(e) = store.reload() {
                        tracing::error!(error = %e, "Failed to reload records; keeping current snapshot");
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Record watcher started");
        Ok(watcher)
    }
}
