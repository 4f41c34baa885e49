//! Config Store Gateway.
//!
//! Maps a slug to its stored record. Absence is a normal outcome, not an
//! error. The only backend is [`MemoryStore`], optionally fed from a JSON
//! record file and reloaded when that file changes.

pub mod memory;
pub mod record;
pub mod watcher;

use std::path::PathBuf;
use std::sync::Arc;

use crate::site::Slug;

pub use memory::MemoryStore;
pub use record::{PreviewRecord, PreviewSummary};
pub use watcher::StoreWatcher;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Listing filter. `limit` is applied after filtering; `None` means all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// Read access to stored previews.
pub trait PreviewStore: Send + Sync {
    fn fetch_by_slug(&self, slug: &Slug) -> Option<Arc<PreviewRecord>>;

    /// Summaries ordered by slug.
    fn list(&self, query: &ListQuery) -> Vec<PreviewSummary>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
