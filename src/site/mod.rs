//! Preview site configuration.
//!
//! # Data Flow
//! ```text
//! stored config (serde_json::Value, untrusted)
//!     → raw.rs (partial view; wrong types read as absent)
//!     → normalize.rs (backfill from defaults.rs by niche)
//!     → SiteConfig (model.rs, every field owned and present)
//!     → validate.rs (shape check before any renderer sees it)
//! ```
//!
//! # Design Decisions
//! - The normalizer is the only place partial data becomes a SiteConfig
//! - Renderers never default anything themselves
//! - Validation reports every bad field, not just the first

pub mod defaults;
pub mod model;
pub mod niche;
pub mod normalize;
pub mod raw;
pub mod slug;
pub mod validate;

pub use model::SiteConfig;
pub use niche::Niche;
pub use normalize::normalize;
pub use raw::RawSiteConfig;
pub use slug::{Slug, SlugError};
pub use validate::{validate, FieldError, ValidationErrors};
