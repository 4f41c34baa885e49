//! Slug to rendered page.
//!
//! ```text
//! Requested ──parse──▶ Fetched ──normalize──▶ Normalized ──validate──▶ Validated
//!     │                  │                                     │            │
//!     └─ bad slug        └─ absent                             └─ invalid   └─ dispatch
//!        NotFoundSlug       NotFoundSlug                  InvalidConfig   UnknownTemplate
//!                                                                         RenderFailure
//!                                                                         Rendered
//! ```

use std::sync::Arc;

use crate::observability::metrics;
use crate::preview::error::PreviewError;
use crate::site::{normalize, validate, Slug};
use crate::store::{ListQuery, PreviewStore};
use crate::templates::{DispatchError, Dispatcher, RenderedPage};

/// Runs the preview pipeline for one request. Stateless between calls; safe
/// to share across request tasks.
#[derive(Clone)]
pub struct PreviewResolver {
    store: Arc<dyn PreviewStore>,
    dispatcher: Arc<Dispatcher>,
}

impl PreviewResolver {
    pub fn new(store: Arc<dyn PreviewStore>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub fn store(&self) -> &Arc<dyn PreviewStore> {
        &self.store
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn resolve(&self, requested: &str) -> Result<RenderedPage, PreviewError> {
        let not_found = || PreviewError::NotFoundSlug {
            slug: requested.to_string(),
        };

        let slug = Slug::parse(requested).map_err(|e| {
            tracing::debug!(slug = requested, error = %e, "Malformed slug");
            not_found()
        })?;
        let record = self.store.fetch_by_slug(&slug).ok_or_else(not_found)?;

        let config = normalize(&record.config);
        let template_id = config.template_id.clone();

        validate(&config).map_err(|errors| PreviewError::InvalidConfig {
            slug: slug.to_string(),
            template_id: template_id.clone(),
            errors,
        })?;

        let page = self
            .dispatcher
            .render(&template_id, &config)
            .map_err(|e| match e {
                DispatchError::UnknownTemplate(template_id) => PreviewError::UnknownTemplate {
                    slug: slug.to_string(),
                    template_id,
                },
                DispatchError::RenderFailure {
                    template_id,
                    source,
                } => PreviewError::RenderFailure {
                    slug: slug.to_string(),
                    template_id,
                    source,
                },
            })?;

        tracing::debug!(slug = %slug, template_id = %page.template_id, "Rendered preview");
        metrics::record_preview("rendered");
        Ok(page)
    }

    /// Resolve every stored slug, in store order.
    pub fn resolve_all(&self) -> Vec<(Slug, Result<RenderedPage, PreviewError>)> {
        self.store
            .list(&ListQuery::default())
            .into_iter()
            .map(|summary| {
                let outcome = self.resolve(summary.slug.as_str());
                (summary.slug, outcome)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Niche;
    use crate::store::{MemoryStore, PreviewRecord};
    use crate::templates::catalogue::Template;
    use crate::templates::{RenderError, TemplateRegistry};
    use serde_json::{json, Value};

    fn resolver_with(records: Vec<(&str, Value)>) -> PreviewResolver {
        let store = MemoryStore::from_records(
            records
                .into_iter()
                .map(|(slug, config)| PreviewRecord::new(Slug::parse(slug).unwrap(), config)),
        );
        let registry = Arc::new(TemplateRegistry::builtin().unwrap());
        PreviewResolver::new(Arc::new(store), Arc::new(Dispatcher::new(registry)))
    }

    #[test]
    fn test_minimal_config_renders_with_defaults() {
        let resolver = resolver_with(vec![("acme-cleaning-tx", json!({"templateId": "cleaning-v1"}))]);
        let page = resolver.resolve("acme-cleaning-tx").unwrap();
        assert_eq!(page.template_id, "cleaning-v1");
        assert!(page.html.contains("cleaning-v1"));
        assert!(page.html.contains("Deep Clean"));
    }

    #[test]
    fn test_absent_slug() {
        let resolver = resolver_with(vec![]);
        let err = resolver.resolve("nobody").unwrap_err();
        assert_eq!(err.kind(), "not_found_slug");
    }

    #[test]
    fn test_malformed_slug_is_not_found() {
        let resolver = resolver_with(vec![("acme", json!({"templateId": "cleaning-v1"}))]);
        let err = resolver.resolve("ACME/../etc").unwrap_err();
        assert!(matches!(err, PreviewError::NotFoundSlug { .. }));
    }

    #[test]
    fn test_unknown_template() {
        let resolver = resolver_with(vec![("acme", json!({"templateId": "does-not-exist"}))]);
        let err = resolver.resolve("acme").unwrap_err();
        match err {
            PreviewError::UnknownTemplate { slug, template_id } => {
                assert_eq!(slug, "acme");
                assert_eq!(template_id, "does-not-exist");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_template_id_is_invalid() {
        let resolver = resolver_with(vec![("acme", json!({"businessName": "Acme"}))]);
        let err = resolver.resolve("acme").unwrap_err();
        assert_eq!(err.kind(), "invalid_config");
    }

    #[test]
    fn test_non_object_config_is_invalid_not_a_crash() {
        let resolver = resolver_with(vec![("acme", json!("garbage"))]);
        assert_eq!(resolver.resolve("acme").unwrap_err().kind(), "invalid_config");
    }

    #[test]
    fn test_resolve_all_reports_each_record() {
        let resolver = resolver_with(vec![
            ("acme-cleaning-tx", json!({"templateId": "cleaning-v1"})),
            ("bad-template", json!({"templateId": "does-not-exist"})),
            ("no-template", json!({"businessName": "Nameless"})),
        ]);
        let outcomes: Vec<(String, Result<String, &'static str>)> = resolver
            .resolve_all()
            .into_iter()
            .map(|(slug, outcome)| {
                (
                    slug.to_string(),
                    outcome.map(|page| page.template_id).map_err(|e| e.kind()),
                )
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("acme-cleaning-tx".to_string(), Ok("cleaning-v1".to_string())),
                ("bad-template".to_string(), Err("unknown_template")),
                ("no-template".to_string(), Err("invalid_config")),
            ]
        );
    }

    fn failing_loader() -> Result<Arc<dyn crate::templates::Renderer>, RenderError> {
        Err(RenderError::Context(tera::Error::msg("missing asset")))
    }

    #[test]
    fn test_render_failure() {
        let registry = TemplateRegistry::from_templates(&[Template {
            id: "broken-v1",
            niche: Niche::Cleaning,
            name: "Broken",
            description: "Always fails to load",
            loader: failing_loader,
        }])
        .unwrap();
        let store = MemoryStore::from_records([PreviewRecord::new(
            Slug::parse("acme").unwrap(),
            json!({"templateId": "broken-v1"}),
        )]);
        let resolver = PreviewResolver::new(
            Arc::new(store),
            Arc::new(Dispatcher::new(Arc::new(registry))),
        );
        let err = resolver.resolve("acme").unwrap_err();
        assert_eq!(err.kind(), "render_failure");
        assert_eq!(err.template_id(), Some("broken-v1"));

        // One failure does not poison the resolver.
        assert_eq!(resolver.resolve("other").unwrap_err().kind(), "not_found_slug");
    }
}
