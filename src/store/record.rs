//! Stored preview records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::site::{RawSiteConfig, Slug};

/// One tenant's preview as written by the authoring workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRecord {
    pub slug: Slug,
    /// Untrusted configuration blob; only the normalizer interprets it.
    #[serde(default, alias = "rawConfig")]
    pub config: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PreviewRecord {
    pub fn new(slug: Slug, config: Value) -> Self {
        Self {
            slug,
            config,
            updated_at: None,
        }
    }

    pub fn summary(&self) -> PreviewSummary {
        let raw = RawSiteConfig::from_value(&self.config);
        PreviewSummary {
            slug: self.slug.clone(),
            business_name: raw.business_name,
            template_id: raw.template_id,
            niche: raw.niche,
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Listing view of a record. Fields come straight from the stored config and
/// are absent when it lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSummary {
    pub slug: Slug,
    pub business_name: Option<String>,
    pub template_id: Option<String>,
    pub niche: Option<String>,
    pub updated_at: Option<String>,
}

impl PreviewSummary {
    /// Case-insensitive substring match on slug or business name.
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.slug.as_str().contains(needle_lower)
            || self
                .business_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(needle_lower))
    }
}
