//! Snapshot-based in-memory preview store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use crate::observability::metrics;
use crate::site::Slug;
use crate::store::record::{PreviewRecord, PreviewSummary};
use crate::store::{ListQuery, PreviewStore, StoreError};

type Snapshot = BTreeMap<Slug, Arc<PreviewRecord>>;

/// Read-mostly store holding every record in memory.
///
/// Readers load the current snapshot without locking; writers build a new
/// snapshot and swap it in whole, so a reload is never observed half-done.
#[derive(Debug)]
pub struct MemoryStore {
    snapshot: ArcSwap<Snapshot>,
    path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::new()),
            path: None,
        }
    }

    pub fn from_records(records: impl IntoIterator<Item = PreviewRecord>) -> Self {
        let store = Self::new();
        store.replace(records);
        store
    }

    /// Load from a JSON record file. The file is remembered for [`reload`](Self::reload).
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let records = read_records(path)?;
        let mut store = Self::from_records(records);
        store.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), records = store.len(), "Loaded preview records");
        Ok(store)
    }

    /// Re-read the backing file. On error the current snapshot is kept.
    pub fn reload(&self) -> Result<usize, StoreError> {
        let Some(path) = &self.path else {
            return Ok(self.len());
        };
        let records = read_records(path)?;
        self.replace(records);
        let count = self.len();
        tracing::info!(path = %path.display(), records = count, "Reloaded preview records");
        Ok(count)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Swap in a new snapshot built from `records`. Later duplicates win.
    pub fn replace(&self, records: impl IntoIterator<Item = PreviewRecord>) {
        let mut snapshot = Snapshot::new();
        for record in records {
            if let Some(previous) = snapshot.insert(record.slug.clone(), Arc::new(record)) {
                tracing::warn!(slug = %previous.slug, "Duplicate preview slug; keeping the later record");
            }
        }
        metrics::record_store_size(snapshot.len());
        self.snapshot.store(Arc::new(snapshot));
    }

    /// Add or replace a single record.
    pub fn insert(&self, record: PreviewRecord) {
        let record = Arc::new(record);
        self.snapshot.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.insert(record.slug.clone(), record.clone());
            next
        });
        metrics::record_store_size(self.len());
    }
}

impl PreviewStore for MemoryStore {
    fn fetch_by_slug(&self, slug: &Slug) -> Option<Arc<PreviewRecord>> {
        self.snapshot.load().get(slug).cloned()
    }

    fn list(&self, query: &ListQuery) -> Vec<PreviewSummary> {
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let limit = query.limit.unwrap_or(usize::MAX);

        self.snapshot
            .load()
            .values()
            .map(|record| record.summary())
            .filter(|summary| summary.matches(&needle))
            .take(limit)
            .collect()
    }

    fn len(&self) -> usize {
        self.snapshot.load().len()
    }
}

/// Parse a record file: a JSON array of records.
///
/// Entries that are not valid records (bad slug, not an object) are skipped
/// and logged; only an unreadable or non-array file is an error.
pub fn read_records(path: &Path) -> Result<Vec<PreviewRecord>, StoreError> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_records(content: &str) -> Result<Vec<PreviewRecord>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(content)?;
    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed preview record");
                None
            }
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn record(slug: &str, config: Value) -> PreviewRecord {
        PreviewRecord::new(Slug::parse(slug).unwrap(), config)
    }

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    #[test]
    fn test_fetch() {
        let store = MemoryStore::from_records([record("acme", json!({"templateId": "cleaning-v1"}))]);
        assert!(store.fetch_by_slug(&slug("acme")).is_some());
        assert!(store.fetch_by_slug(&slug("other")).is_none());
    }

    #[test]
    fn test_replace_and_insert() {
        let store = MemoryStore::new();
        store.insert(record("a", json!({})));
        store.insert(record("b", json!({})));
        assert_eq!(store.len(), 2);

        store.replace([record("c", json!({}))]);
        assert_eq!(store.len(), 1);
        assert!(store.fetch_by_slug(&slug("a")).is_none());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let store = MemoryStore::from_records([
            record("acme", json!({"templateId": "cleaning-v1"})),
            record("acme", json!({"templateId": "cleaning-v2"})),
        ]);
        let found = store.fetch_by_slug(&slug("acme")).unwrap();
        assert_eq!(found.config["templateId"], "cleaning-v2");
    }

    #[test]
    fn test_list_search_and_limit() {
        let store = MemoryStore::from_records([
            record("zeta-lawns", json!({"businessName": "Zeta Lawns"})),
            record("acme-cleaning-tx", json!({"businessName": "Acme Cleaning"})),
            record("bright-maids", json!({"businessName": "Bright CLEANING Crew"})),
        ]);

        let all = store.list(&ListQuery::default());
        let slugs: Vec<&str> = all.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["acme-cleaning-tx", "bright-maids", "zeta-lawns"]);

        let cleaning = store.list(&ListQuery {
            search: Some("Cleaning".into()),
            limit: None,
        });
        assert_eq!(cleaning.len(), 2);

        let limited = store.list(&ListQuery {
            search: Some("cleaning".into()),
            limit: Some(1),
        });
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].slug.as_str(), "acme-cleaning-tx");

        let none = store.list(&ListQuery {
            search: None,
            limit: Some(0),
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_parse_skips_bad_entries() {
        let records = parse_records(
            r#"[
                {"slug": "good-one", "config": {"templateId": "cleaning-v1"}},
                {"slug": "Bad Slug", "config": {}},
                "not a record",
                {"slug": "no-config"}
            ]"#,
        )
        .unwrap();
        let slugs: Vec<&str> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good-one", "no-config"]);
        assert_eq!(records[1].config, Value::Null);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_records(r#"{"slug": "acme"}"#).is_err());
    }

    #[test]
    fn test_load_and_reload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"slug": "acme", "config": {{}}}}]"#).unwrap();
        file.flush().unwrap();

        let store = MemoryStore::load_from_file(file.path()).unwrap();
        assert_eq!(store.len(), 1);

        std::fs::write(
            file.path(),
            r#"[{"slug": "acme", "config": {}}, {"slug": "beta", "config": {}}]"#,
        )
        .unwrap();
        assert_eq!(store.reload().unwrap(), 2);

        std::fs::write(file.path(), "not json").unwrap();
        assert!(matches!(store.reload(), Err(StoreError::Parse { .. })));
        assert_eq!(store.len(), 2, "failed reload keeps the previous snapshot");
    }

    #[test]
    fn test_missing_file() {
        let err = MemoryStore::load_from_file(Path::new("/no/such/previews.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
