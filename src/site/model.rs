//! Normalized site configuration.
//!
//! Every field a renderer reads is owned and non-optional. Instances are only
//! produced by the normalizer and live for a single request.

use serde::{Deserialize, Serialize};

use crate::site::niche::Niche;

/// A complete configuration ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Registry key of the template to render. Not backfilled: empty when the
    /// stored record names none, which the validator rejects.
    pub template_id: String,
    pub niche: Niche,
    #[serde(flatten)]
    pub content: SiteContent,
}

/// Niche-specific page content. The default tables in `defaults.rs` have
/// exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub business_name: String,
    pub tagline: String,
    pub hero: Hero,
    pub services: Vec<Service>,
    pub nav: Vec<NavItem>,
    pub about: String,
    pub service_areas: Vec<String>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Contact,
    pub theme: Theme,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta_label: String,
    pub cta_href: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Stable identifier used to match overrides against the default catalogue.
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub hours: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub accent_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
}
