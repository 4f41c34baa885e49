//! Template subsystem.
//!
//! # Data Flow
//! ```text
//! SiteConfig (validated) + templateId
//!     → dispatch.rs (registry lookup, load renderer once, invoke)
//!     → registry.rs (id → catalogue entry, niche listings)
//!     → catalogue.rs (fixed table: id, niche, name, description, loader)
//!     → renderer.rs (Renderer trait, Tera-backed implementation)
//!     → RenderedPage
//! ```
//!
//! # Design Decisions
//! - Catalogue is a closed table compiled into the binary
//! - Renderer loading is deferred to first use and cached per id
//! - Renderers trust the validated config; no defaulting here

pub mod catalogue;
pub mod dispatch;
pub mod registry;
pub mod renderer;

pub use catalogue::{Template, TemplateInfo};
pub use dispatch::{DispatchError, Dispatcher, RenderedPage};
pub use registry::{RegistryError, TemplateRegistry};
pub use renderer::{RenderError, Renderer};
