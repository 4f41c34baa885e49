//! Template registry.
//!
//! # Responsibilities
//! - Index the catalogue by template id and by niche
//! - Reject duplicate ids at startup
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards (shared via Arc without locks)
//! - Niche listings keep catalogue order

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::site::Niche;
use crate::templates::catalogue::{RendererLoader, Template, CATALOGUE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("template id `{0}` is registered more than once")]
    DuplicateTemplate(String),
}

#[derive(Debug)]
pub struct TemplateRegistry {
    by_id: HashMap<&'static str, Template>,
    by_niche: BTreeMap<Niche, Vec<Template>>,
}

impl TemplateRegistry {
    /// Registry over the built-in catalogue.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_templates(CATALOGUE)
    }

    pub fn from_templates(templates: &[Template]) -> Result<Self, RegistryError> {
        let mut by_id = HashMap::with_capacity(templates.len());
        let mut by_niche: BTreeMap<Niche, Vec<Template>> = BTreeMap::new();

        for template in templates {
            if by_id.insert(template.id, *template).is_some() {
                return Err(RegistryError::DuplicateTemplate(template.id.to_string()));
            }
            by_niche.entry(template.niche).or_default().push(*template);
        }

        Ok(Self { by_id, by_niche })
    }

    /// Loader bound to `template_id`.
    pub fn lookup(&self, template_id: &str) -> Option<RendererLoader> {
        self.by_id.get(template_id).map(|t| t.loader)
    }

    /// Full catalogue entry for `template_id`.
    pub fn get(&self, template_id: &str) -> Option<&Template> {
        self.by_id.get(template_id)
    }

    /// Templates for `niche`, in catalogue order.
    pub fn list_by_niche(&self, niche: Niche) -> &[Template] {
        self.by_niche.get(&niche).map(Vec::as_slice).unwrap_or_default()
    }

    /// Niches with at least one template.
    pub fn list_niches(&self) -> BTreeSet<Niche> {
        self.by_niche.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
