use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::config::ListingConfig;
use crate::http::server::AppState;
use crate::site::Niche;
use crate::store::{ListQuery, PreviewSummary};
use crate::templates::TemplateInfo;

/// Query string of the listing endpoint. Both parameters may be empty.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Resolve against listing settings. An empty or unparseable `limit` is
    /// treated as absent.
    pub fn to_query(&self, listing: &ListingConfig) -> ListQuery {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let requested = self
            .limit
            .as_deref()
            .and_then(|l| l.trim().parse::<usize>().ok());
        let limit = requested
            .or(listing.default_limit)
            .map(|l| l.min(listing.max_limit));
        ListQuery { search, limit }
    }
}

pub async fn list_previews(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<PreviewSummary>> {
    let query = params.to_query(&state.listing);
    let previews = state.resolver.store().list(&query);
    tracing::debug!(
        search = query.search.as_deref().unwrap_or(""),
        limit = ?query.limit,
        returned = previews.len(),
        "Listed previews"
    );
    Json(previews)
}

pub async fn list_templates(
    State(state): State<AppState>,
) -> Json<BTreeMap<Niche, Vec<TemplateInfo>>> {
    let registry = state.resolver.dispatcher().registry();
    let catalogue: BTreeMap<Niche, Vec<TemplateInfo>> = registry
        .list_niches()
        .into_iter()
        .map(|niche| {
            let templates: Vec<TemplateInfo> = registry
                .list_by_niche(niche)
                .iter()
                .map(|t| t.info())
                .collect();
            (niche, templates)
        })
        .collect();
    Json(catalogue)
}
