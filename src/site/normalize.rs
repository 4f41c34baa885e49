//! Config normalization.
//!
//! Turns an untrusted stored config into a [`SiteConfig`] by backfilling every
//! missing, empty, wrongly-typed or malformed field from the niche's default
//! table. Links, colours, email and phone count as present only when they are
//! in a form the validator accepts.
//! Total and deterministic: any JSON value yields a fully populated config.

use serde_json::Value;

use crate::site::defaults;
use crate::site::model::{
    Contact, Hero, NavItem, Seo, Service, SiteConfig, SiteContent, Testimonial, Theme,
};
use crate::site::niche::Niche;
use crate::site::raw::{
    RawContact, RawHero, RawNavItem, RawSeo, RawService, RawSiteConfig, RawTestimonial, RawTheme,
};
use crate::site::validate::{has_phone_digits, is_email, is_hex_color, is_image_url, is_safe_link};
use crate::templates::catalogue;

/// Normalize a stored config value.
pub fn normalize(raw: &Value) -> SiteConfig {
    normalize_raw(RawSiteConfig::from_value(raw))
}

pub fn normalize_raw(raw: RawSiteConfig) -> SiteConfig {
    let template_id = present(raw.template_id).unwrap_or_default();
    let niche = resolve_niche(raw.niche.as_deref(), &template_id);
    let d = defaults::content_for(niche);

    let content = SiteContent {
        business_name: pick(raw.business_name, d.business_name),
        tagline: pick(raw.tagline, d.tagline),
        hero: merge_hero(raw.hero.unwrap_or_default(), d.hero),
        services: merge_services(raw.services, d.services),
        nav: non_empty_or(
            raw.nav
                .unwrap_or_default()
                .into_iter()
                .filter_map(nav_item)
                .collect(),
            d.nav,
        ),
        about: pick(raw.about, d.about),
        service_areas: non_empty_or(
            raw.service_areas
                .unwrap_or_default()
                .into_iter()
                .filter_map(|a| present(Some(a)))
                .collect(),
            d.service_areas,
        ),
        testimonials: non_empty_or(
            raw.testimonials
                .unwrap_or_default()
                .into_iter()
                .filter_map(testimonial)
                .collect(),
            d.testimonials,
        ),
        contact: merge_contact(raw.contact.unwrap_or_default(), d.contact),
        theme: merge_theme(raw.theme.unwrap_or_default(), d.theme),
        seo: merge_seo(raw.seo.unwrap_or_default(), d.seo),
    };

    SiteConfig {
        template_id,
        niche,
        content,
    }
}

/// Explicit niche if known, else the niche of the named template, else the fallback.
fn resolve_niche(niche: Option<&str>, template_id: &str) -> Niche {
    niche
        .and_then(|n| n.parse().ok())
        .or_else(|| catalogue::niche_of(template_id))
        .unwrap_or(Niche::FALLBACK)
}

/// Trimmed value, if any text remains.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn pick(value: Option<String>, default: String) -> String {
    present(value).unwrap_or(default)
}

/// Like [`pick`], but a value failing `accept` is treated as absent.
fn pick_valid(value: Option<String>, default: String, accept: fn(&str) -> bool) -> String {
    present(value).filter(|v| accept(v)).unwrap_or(default)
}

fn non_empty_or<T>(items: Vec<T>, default: Vec<T>) -> Vec<T> {
    if items.is_empty() {
        default
    } else {
        items
    }
}

fn merge_hero(raw: RawHero, d: Hero) -> Hero {
    Hero {
        headline: pick(raw.headline, d.headline),
        subheadline: pick(raw.subheadline, d.subheadline),
        cta_label: pick(raw.cta_label, d.cta_label),
        cta_href: pick_valid(raw.cta_href, d.cta_href, is_safe_link),
        image_url: pick_valid(raw.image_url, d.image_url, is_image_url),
    }
}

/// The default catalogue fixes which services appear and in what order; an
/// override only replaces fields of the entry with the same key.
fn merge_services(
    overrides: Option<std::collections::BTreeMap<String, RawService>>,
    defaults: Vec<Service>,
) -> Vec<Service> {
    let mut overrides = overrides.unwrap_or_default();
    defaults
        .into_iter()
        .map(|d| match overrides.remove(&d.key) {
            Some(raw) => Service {
                title: pick(raw.title, d.title),
                description: pick(raw.description, d.description),
                icon: pick(raw.icon, d.icon),
                key: d.key,
            },
            None => d,
        })
        .collect()
}

fn nav_item(raw: RawNavItem) -> Option<NavItem> {
    Some(NavItem {
        label: present(raw.label)?,
        href: present(raw.href).filter(|h| is_safe_link(h))?,
    })
}

fn testimonial(raw: RawTestimonial) -> Option<Testimonial> {
    Some(Testimonial {
        quote: present(raw.quote)?,
        author: present(raw.author)?,
    })
}

fn merge_contact(raw: RawContact, d: Contact) -> Contact {
    Contact {
        phone: pick_valid(raw.phone, d.phone, has_phone_digits),
        email: pick_valid(raw.email, d.email, is_email),
        address: pick(raw.address, d.address),
        hours: pick(raw.hours, d.hours),
    }
}

fn merge_theme(raw: RawTheme, d: Theme) -> Theme {
    Theme {
        primary_color: pick_valid(raw.primary_color, d.primary_color, is_hex_color),
        accent_color: pick_valid(raw.accent_color, d.accent_color, is_hex_color),
    }
}

fn merge_seo(raw: RawSeo, d: Seo) -> Seo {
    Seo {
        title: pick(raw.title, d.title),
        description: pick(raw.description, d.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_populated(config: &SiteConfig) {
        let c = &config.content;
        for text in [
            &c.business_name,
            &c.tagline,
            &c.hero.headline,
            &c.hero.subheadline,
            &c.hero.cta_label,
            &c.hero.cta_href,
            &c.hero.image_url,
            &c.about,
            &c.contact.phone,
            &c.contact.email,
            &c.contact.address,
            &c.contact.hours,
            &c.theme.primary_color,
            &c.theme.accent_color,
            &c.seo.title,
            &c.seo.description,
        ] {
            assert!(!text.is_empty());
        }
        assert!(!c.services.is_empty());
        assert!(!c.nav.is_empty());
        assert!(!c.service_areas.is_empty());
        assert!(!c.testimonials.is_empty());
        for s in &c.services {
            assert!(!s.key.is_empty() && !s.title.is_empty() && !s.description.is_empty());
        }
    }

    #[test]
    fn test_empty_object_gets_cleaning_defaults() {
        let config = normalize(&json!({}));
        assert_eq!(config.template_id, "");
        assert_eq!(config.niche, Niche::Cleaning);
        assert_eq!(config.content, defaults::content_for(Niche::Cleaning));
        assert_populated(&config);
    }

    #[test]
    fn test_any_shape_is_fully_populated() {
        let inputs = [
            json!(null),
            json!(true),
            json!("x"),
            json!([]),
            json!({"hero": null, "services": 1, "nav": [], "contact": [], "theme": {"primaryColor": 3}}),
            json!({"businessName": "   ", "serviceAreas": ["", "  "], "testimonials": [{"quote": "hi"}]}),
            json!({"niche": "landscaping", "templateId": ["cleaning-v1"]}),
        ];
        for input in &inputs {
            assert_populated(&normalize(input));
        }
    }

    #[test]
    fn test_template_only_config() {
        let config = normalize(&json!({"templateId": "cleaning-v1"}));
        assert_eq!(config.template_id, "cleaning-v1");
        assert_eq!(config.niche, Niche::Cleaning);
        assert_eq!(config.content, defaults::content_for(Niche::Cleaning));
    }

    #[test]
    fn test_niche_resolution_order() {
        assert_eq!(
            normalize(&json!({"templateId": "landscaping-v1"})).niche,
            Niche::Landscaping
        );
        assert_eq!(
            normalize(&json!({"templateId": "landscaping-v1", "niche": "cleaning"})).niche,
            Niche::Cleaning
        );
        assert_eq!(
            normalize(&json!({"templateId": "does-not-exist", "niche": "plumbing"})).niche,
            Niche::FALLBACK
        );
    }

    #[test]
    fn test_supplied_values_win_and_are_trimmed() {
        let config = normalize(&json!({
            "templateId": "  cleaning-v2 ",
            "businessName": " Acme Cleaning ",
            "hero": {"headline": "Clean!"},
            "contact": {"phone": "512-555-0100"},
        }));
        let d = defaults::content_for(Niche::Cleaning);
        assert_eq!(config.template_id, "cleaning-v2");
        assert_eq!(config.content.business_name, "Acme Cleaning");
        assert_eq!(config.content.hero.headline, "Clean!");
        assert_eq!(config.content.hero.subheadline, d.hero.subheadline);
        assert_eq!(config.content.contact.phone, "512-555-0100");
        assert_eq!(config.content.contact.email, d.contact.email);
    }

    #[test]
    fn test_services_follow_default_catalogue() {
        let config = normalize(&json!({
            "services": {
                "deep-clean": {"title": "Top-to-Bottom Clean", "icon": ""},
                "window-washing": {"title": "Windows"}
            }
        }));
        let d = defaults::content_for(Niche::Cleaning);
        let keys: Vec<&str> = config.content.services.iter().map(|s| s.key.as_str()).collect();
        let default_keys: Vec<&str> = d.services.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, default_keys);

        let deep = &config.content.services[1];
        assert_eq!(deep.title, "Top-to-Bottom Clean");
        assert_eq!(deep.icon, d.services[1].icon);
        assert_eq!(deep.description, d.services[1].description);
    }

    #[test]
    fn test_lists_drop_incomplete_entries() {
        let config = normalize(&json!({
            "nav": [{"label": "Home", "href": "/"}, {"label": "Broken"}],
            "testimonials": [{"quote": "no author"}],
        }));
        assert_eq!(
            config.content.nav,
            vec![NavItem { label: "Home".into(), href: "/".into() }]
        );
        assert_eq!(
            config.content.testimonials,
            defaults::content_for(Niche::Cleaning).testimonials
        );
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let config = normalize(&json!({
            "templateId": "cleaning-v1",
            "hero": {"ctaHref": "contact", "imageUrl": "//evil.example/x.png"},
            "nav": [{"label": "Home", "href": "javascript:alert(1)"}],
            "contact": {"phone": "call us", "email": "info at acme"},
            "theme": {"primaryColor": "teal", "accentColor": "#0f766e"},
        }));
        let d = defaults::content_for(Niche::Cleaning);
        assert_eq!(config.content.hero.cta_href, d.hero.cta_href);
        assert_eq!(config.content.hero.image_url, d.hero.image_url);
        assert_eq!(config.content.nav, d.nav);
        assert_eq!(config.content.contact.phone, d.contact.phone);
        assert_eq!(config.content.contact.email, d.contact.email);
        assert_eq!(config.content.theme.primary_color, d.theme.primary_color);
        assert_eq!(config.content.theme.accent_color, "#0f766e");
    }

    #[test]
    fn test_idempotent_on_normalized_output() {
        let inputs = [
            json!({}),
            json!({"templateId": "cleaning-v3", "businessName": "Acme", "nav": [{"label": "A", "href": "/a"}]}),
            json!({"templateId": "landscaping-v1", "services": {"design": {"title": "Plans"}}}),
        ];
        for input in &inputs {
            let once = normalize(input);
            let twice = normalize(&serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_deterministic() {
        let input = json!({"templateId": "cleaning-v1", "tagline": "Fresh"});
        assert_eq!(normalize(&input), normalize(&input));
    }
}
