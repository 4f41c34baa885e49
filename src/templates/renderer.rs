//! Renderer implementations.

use std::fmt;

use tera::{Context, Tera};

use crate::site::SiteConfig;

/// Error raised while loading or invoking a renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to compile template `{id}`: {source}")]
    Compile {
        id: String,
        #[source]
        source: tera::Error,
    },
    #[error("failed to build render context: {0}")]
    Context(#[source] tera::Error),
    #[error("failed to render template `{id}`: {source}")]
    Render {
        id: String,
        #[source]
        source: tera::Error,
    },
}

/// Turns a validated [`SiteConfig`] into a page.
///
/// Implementations may assume the validator's guarantees hold and must not
/// substitute defaults of their own.
pub trait Renderer: Send + Sync + fmt::Debug {
    fn render(&self, config: &SiteConfig) -> Result<String, RenderError>;
}

/// A renderer backed by a compiled Tera template set.
///
/// HTML auto-escaping is on for every template name ending in `.html`.
pub struct TeraRenderer {
    id: String,
    entry: String,
    tera: Tera,
}

impl TeraRenderer {
    /// Compile `sources` (name, text) and render through `entry`.
    pub fn compile(id: &str, entry: &str, sources: &[(&str, &str)]) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.iter().copied())
            .map_err(|source| RenderError::Compile {
                id: id.to_string(),
                source,
            })?;

        if !tera.get_template_names().any(|name| name == entry) {
            return Err(RenderError::Compile {
                id: id.to_string(),
                source: tera::Error::msg(format!("template `{}` not found", entry)),
            });
        }

        Ok(Self {
            id: id.to_string(),
            entry: entry.to_string(),
            tera,
        })
    }
}

impl fmt::Debug for TeraRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeraRenderer")
            .field("id", &self.id)
            .field("entry", &self.entry)
            .finish()
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, config: &SiteConfig) -> Result<String, RenderError> {
        let context = Context::from_serialize(config).map_err(RenderError::Context)?;
        self.tera
            .render(&self.entry, &context)
            .map_err(|source| RenderError::Render {
                id: self.id.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::normalize;
    use serde_json::json;

    #[test]
    fn test_render_escapes_html() {
        let renderer = TeraRenderer::compile(
            "t",
            "page.html",
            &[("page.html", "<h1>{{ businessName }}</h1>")],
        )
        .unwrap();
        let config = normalize(&json!({"businessName": "<b>Acme</b> & Co"}));
        let html = renderer.render(&config).unwrap();
        assert_eq!(html, "<h1>&lt;b&gt;Acme&lt;&#x2F;b&gt; &amp; Co</h1>");
    }

    #[test]
    fn test_compile_error() {
        let err = TeraRenderer::compile("broken", "page.html", &[("page.html", "{% if %}")])
            .unwrap_err();
        assert!(matches!(err, RenderError::Compile { ref id, .. } if id == "broken"));
    }

    #[test]
    fn test_missing_entry() {
        let err = TeraRenderer::compile("t", "missing.html", &[("page.html", "ok")]).unwrap_err();
        assert!(matches!(err, RenderError::Compile { .. }));
    }

    #[test]
    fn test_render_error_on_unknown_variable() {
        let renderer =
            TeraRenderer::compile("t", "page.html", &[("page.html", "{{ nope.deeper }}")]).unwrap();
        let err = renderer.render(&normalize(&json!({}))).unwrap_err();
        assert!(matches!(err, RenderError::Render { .. }));
    }
}
