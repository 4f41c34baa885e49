//! Config validation.
//!
//! Second line of defence after normalization: checks that a [`SiteConfig`]
//! has the shape renderers rely on. Catalogue membership of `templateId` is
//! not checked here; the dispatcher owns that.

use std::collections::HashSet;
use std::fmt;

use crate::site::model::SiteConfig;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the offending field, e.g. `services[2].title`.
    pub field: String,
    pub message: String,
}

/// Every problem found in one config, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    fn link(&mut self, field: &str, value: &str) {
        if !is_safe_link(value) {
            self.push(field, format!("`{}` is not a relative, anchor, http(s), tel or mailto link", value));
        }
    }

    fn color(&mut self, field: &str, value: &str) {
        if !is_hex_color(value) {
            self.push(field, format!("`{}` is not a #rgb or #rrggbb colour", value));
        }
    }
}

pub fn validate(config: &SiteConfig) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    let c = &config.content;

    // Catalogue membership is the dispatcher's call, not ours.
    errors.require("templateId", &config.template_id);

    errors.require("businessName", &c.business_name);
    errors.require("tagline", &c.tagline);
    errors.require("about", &c.about);

    errors.require("hero.headline", &c.hero.headline);
    errors.require("hero.ctaLabel", &c.hero.cta_label);
    errors.link("hero.ctaHref", &c.hero.cta_href);
    if !is_image_url(&c.hero.image_url) {
        errors.push(
            "hero.imageUrl",
            format!("`{}` is not a relative or http(s) URL", c.hero.image_url),
        );
    }

    if c.services.is_empty() {
        errors.push("services", "must list at least one service");
    }
    let mut keys = HashSet::new();
    for (i, s) in c.services.iter().enumerate() {
        errors.require(&format!("services[{i}].key"), &s.key);
        errors.require(&format!("services[{i}].title"), &s.title);
        if !keys.insert(s.key.as_str()) {
            errors.push(format!("services[{i}].key"), format!("duplicate key `{}`", s.key));
        }
    }

    if c.nav.is_empty() {
        errors.push("nav", "must list at least one item");
    }
    for (i, item) in c.nav.iter().enumerate() {
        errors.require(&format!("nav[{i}].label"), &item.label);
        errors.link(&format!("nav[{i}].href"), &item.href);
    }

    for (i, t) in c.testimonials.iter().enumerate() {
        errors.require(&format!("testimonials[{i}].quote"), &t.quote);
        errors.require(&format!("testimonials[{i}].author"), &t.author);
    }

    if !has_phone_digits(&c.contact.phone) {
        errors.push("contact.phone", "must contain at least 7 digits");
    }
    if !is_email(&c.contact.email) {
        errors.push(
            "contact.email",
            format!("`{}` is not an email address", c.contact.email),
        );
    }

    errors.color("theme.primaryColor", &c.theme.primary_color);
    errors.color("theme.accentColor", &c.theme.accent_color);

    errors.require("seo.title", &c.seo.title);

    if errors.0.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors.0))
    }
}

pub(crate) fn has_phone_digits(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() >= 7
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

fn is_relative(value: &str) -> bool {
    value.starts_with('/') && !value.starts_with("//")
}

pub(crate) fn is_image_url(value: &str) -> bool {
    is_relative(value) || is_http_url(value)
}

pub(crate) fn is_safe_link(value: &str) -> bool {
    if is_relative(value) || is_http_url(value) {
        return true;
    }
    if let Some(anchor) = value.strip_prefix('#') {
        return !anchor.is_empty() && !anchor.contains(char::is_whitespace);
    }
    if let Some(number) = value.strip_prefix("tel:") {
        return number.chars().any(|c| c.is_ascii_digit());
    }
    if let Some(address) = value.strip_prefix("mailto:") {
        return is_email(address);
    }
    false
}

pub(crate) fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

pub(crate) fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
