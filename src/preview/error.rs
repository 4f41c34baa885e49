//! Preview failure taxonomy and the not-found policy.

use axum::response::{IntoResponse, Response};

use crate::http::response::not_found;
use crate::observability::metrics;
use crate::site::ValidationErrors;
use crate::templates::RenderError;

/// Why a preview request did not produce a page.
///
/// Every variant leaves the service as the same 404; the detail exists for
/// operators and only reaches the logs.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("no preview stored for slug `{slug}`")]
    NotFoundSlug { slug: String },

    #[error("preview `{slug}` has an invalid config: {errors}")]
    InvalidConfig {
        slug: String,
        template_id: String,
        errors: ValidationErrors,
    },

    #[error("preview `{slug}` names unknown template `{template_id}`")]
    UnknownTemplate { slug: String, template_id: String },

    #[error("preview `{slug}` failed to render with `{template_id}`: {source}")]
    RenderFailure {
        slug: String,
        template_id: String,
        #[source]
        source: RenderError,
    },
}

impl PreviewError {
    /// Stable name of the failure kind, used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            PreviewError::NotFoundSlug { .. } => "not_found_slug",
            PreviewError::InvalidConfig { .. } => "invalid_config",
            PreviewError::UnknownTemplate { .. } => "unknown_template",
            PreviewError::RenderFailure { .. } => "render_failure",
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            PreviewError::NotFoundSlug { slug }
            | PreviewError::InvalidConfig { slug, .. }
            | PreviewError::UnknownTemplate { slug, .. }
            | PreviewError::RenderFailure { slug, .. } => slug,
        }
    }

    /// Log level for the failure. Only a render failure is an error; the rest
    /// are data problems in a tenant's record or a mistyped URL.
    pub fn level(&self) -> tracing::Level {
        match self {
            PreviewError::RenderFailure { .. } => tracing::Level::ERROR,
            _ => tracing::Level::WARN,
        }
    }

    pub fn template_id(&self) -> Option<&str> {
        match self {
            PreviewError::NotFoundSlug { .. } => None,
            PreviewError::InvalidConfig { template_id, .. }
            | PreviewError::UnknownTemplate { template_id, .. }
            | PreviewError::RenderFailure { template_id, .. } => Some(template_id),
        }
    }
}

/// Log a preview failure and produce the one response every failure maps to.
pub fn not_found_policy(error: &PreviewError) -> Response {
    let kind = error.kind();
    let slug = error.slug();
    let template_id = error.template_id().unwrap_or("");

    if error.level() == tracing::Level::ERROR {
        tracing::error!(slug, template_id, kind, error = %error, "Preview render failed");
    } else {
        tracing::warn!(slug, template_id, kind, error = %error, "Preview rejected");
    }
    metrics::record_preview(kind);

    not_found()
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        not_found_policy(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::site::FieldError;

    fn all_kinds() -> Vec<PreviewError> {
        vec![
            PreviewError::NotFoundSlug { slug: "a".into() },
            PreviewError::InvalidConfig {
                slug: "b".into(),
                template_id: String::new(),
                errors: ValidationErrors(vec![FieldError {
                    field: "templateId".into(),
                    message: "is required".into(),
                }]),
            },
            PreviewError::UnknownTemplate {
                slug: "c".into(),
                template_id: "does-not-exist".into(),
            },
            PreviewError::RenderFailure {
                slug: "d".into(),
                template_id: "cleaning-v1".into(),
                source: RenderError::Context(tera::Error::msg("boom")),
            },
        ]
    }

    #[tokio::test]
    async fn test_every_kind_is_the_same_404() {
        let mut bodies = Vec::new();
        for error in all_kinds() {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            bodies.push(body);
        }
        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        let text = String::from_utf8(bodies[0].to_vec()).unwrap();
        assert!(!text.contains("does-not-exist"));
        assert!(!text.contains("templateId"));
    }

    #[test]
    fn test_kind_names() {
        let kinds: Vec<&str> = all_kinds().iter().map(PreviewError::kind).collect();
        assert_eq!(
            kinds,
            vec!["not_found_slug", "invalid_config", "unknown_template", "render_failure"]
        );
    }

    #[test]
    fn test_log_levels() {
        let levels: Vec<tracing::Level> = all_kinds().iter().map(PreviewError::level).collect();
        assert_eq!(
            levels,
            vec![
                tracing::Level::WARN,
                tracing::Level::WARN,
                tracing::Level::WARN,
                tracing::Level::ERROR,
            ]
        );
    }
}
