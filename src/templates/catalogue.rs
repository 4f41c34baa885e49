//! The fixed template catalogue.
//!
//! Binding an id to a renderer happens here, at build time. Adding a template
//! means adding a row; dispatch code does not change.

use std::sync::Arc;

use serde::Serialize;

use crate::site::Niche;
use crate::templates::renderer::{RenderError, Renderer, TeraRenderer};

/// Builds the renderer bound to a catalogue entry.
pub type RendererLoader = fn() -> Result<Arc<dyn Renderer>, RenderError>;

/// A registry entry.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Wire-level value expected in a stored config's `templateId`.
    pub id: &'static str,
    pub niche: Niche,
    pub name: &'static str,
    pub description: &'static str,
    pub loader: RendererLoader,
}

/// Public view of a catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub niche: Niche,
    pub name: &'static str,
    pub description: &'static str,
}

impl Template {
    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id,
            niche: self.niche,
            name: self.name,
            description: self.description,
        }
    }
}

const BASE: &str = include_str!("html/base.html");
const CLEANING_V1: &str = include_str!("html/cleaning-v1.html");
const CLEANING_V2: &str = include_str!("html/cleaning-v2.html");
const CLEANING_V3: &str = include_str!("html/cleaning-v3.html");
const LANDSCAPING_V1: &str = include_str!("html/landscaping-v1.html");

pub static CATALOGUE: &[Template] = &[
    Template {
        id: "cleaning-v1",
        niche: Niche::Cleaning,
        name: "Fresh Start",
        description: "Classic single-page layout with a photo hero and service cards.",
        loader: load_cleaning_v1,
    },
    Template {
        id: "cleaning-v2",
        niche: Niche::Cleaning,
        name: "Bold Sweep",
        description: "High-contrast layout with a full-width colour hero and numbered services.",
        loader: load_cleaning_v2,
    },
    Template {
        id: "cleaning-v3",
        niche: Niche::Cleaning,
        name: "Minimal",
        description: "Text-first layout for businesses without photography.",
        loader: load_cleaning_v3,
    },
    Template {
        id: "landscaping-v1",
        niche: Niche::Landscaping,
        name: "Evergreen",
        description: "Photo-led layout with service grid and service-area list.",
        loader: load_landscaping_v1,
    },
];

/// Niche of the catalogue entry named `id`, if any.
pub fn niche_of(id: &str) -> Option<Niche> {
    CATALOGUE.iter().find(|t| t.id == id).map(|t| t.niche)
}

fn tera_page(id: &str, page: &str) -> Result<Arc<dyn Renderer>, RenderError> {
    let entry = format!("{}.html", id);
    let renderer =
        TeraRenderer::compile(id, &entry, &[("base.html", BASE), (entry.as_str(), page)])?;
    Ok(Arc::new(renderer))
}

fn load_cleaning_v1() -> Result<Arc<dyn Renderer>, RenderError> {
    tera_page("cleaning-v1", CLEANING_V1)
}

fn load_cleaning_v2() -> Result<Arc<dyn Renderer>, RenderError> {
    tera_page("cleaning-v2", CLEANING_V2)
}

fn load_cleaning_v3() -> Result<Arc<dyn Renderer>, RenderError> {
    tera_page("cleaning-v3", CLEANING_V3)
}

fn load_landscaping_v1() -> Result<Arc<dyn Renderer>, RenderError> {
    tera_page("landscaping-v1", LANDSCAPING_V1)
}
