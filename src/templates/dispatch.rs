//! Template dispatch.
//!
//! Looks up the renderer bound to a template id, loads it on first use and
//! invokes it. Loaded renderers are cached per id for the process lifetime.

use std::sync::Arc;
use std::time::Instant;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::observability::metrics;
use crate::site::SiteConfig;
use crate::templates::registry::TemplateRegistry;
use crate::templates::renderer::{RenderError, Renderer};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("template `{template_id}` failed: {source}")]
    RenderFailure {
        template_id: String,
        #[source]
        source: RenderError,
    },
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub template_id: String,
    pub html: String,
}

pub struct Dispatcher {
    registry: Arc<TemplateRegistry>,
    loaded: DashMap<&'static str, Arc<dyn Renderer>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<TemplateRegistry>) -> Self {
        Self {
            registry,
            loaded: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Render `config` with the template registered as `template_id`.
    pub fn render(
        &self,
        template_id: &str,
        config: &SiteConfig,
    ) -> Result<RenderedPage, DispatchError> {
        let renderer = self.load(template_id)?;

        let start = Instant::now();
        let html = renderer
            .render(config)
            .map_err(|source| DispatchError::RenderFailure {
                template_id: template_id.to_string(),
                source,
            })?;
        metrics::record_render(template_id, start);

        Ok(RenderedPage {
            template_id: template_id.to_string(),
            html,
        })
    }

    /// Renderer for `template_id`, loading it if this is the first use.
    ///
    /// The map entry stays locked while loading, so concurrent first uses of
    /// one id load it once. A failed load caches nothing. Loaders run under
    /// the shard lock on a request task, so they must only compile embedded
    /// sources; a loader that reads files belongs in `spawn_blocking`.
    fn load(&self, template_id: &str) -> Result<Arc<dyn Renderer>, DispatchError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| DispatchError::UnknownTemplate(template_id.to_string()))?;

        match self.loaded.entry(template.id) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let renderer =
                    (template.loader)().map_err(|source| DispatchError::RenderFailure {
                        template_id: template.id.to_string(),
                        source,
                    })?;
                tracing::debug!(template_id = template.id, "Loaded renderer");
                metrics::record_renderer_load(template.id);
                entry.insert(renderer.clone());
                Ok(renderer)
            }
        }
    }

    /// Number of renderers loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
