//! Raw (stored) site configuration.
//!
//! Stored configs are written by an external authoring workflow and are
//! untrusted. Every field here is optional, and a field holding the wrong JSON
//! type reads as absent instead of failing the whole document, so any JSON
//! value can be turned into a `RawSiteConfig`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSiteConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub niche: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero: Option<RawHero>,
    /// Overrides keyed by service key. Accepts either a map of key → service
    /// or a list of services each carrying a `key`.
    #[serde(default, deserialize_with = "lenient_services")]
    pub services: Option<BTreeMap<String, RawService>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub nav: Option<Vec<RawNavItem>>,
    #[serde(default, deserialize_with = "lenient")]
    pub about: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub service_areas: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub testimonials: Option<Vec<RawTestimonial>>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<RawContact>,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: Option<RawTheme>,
    #[serde(default, deserialize_with = "lenient")]
    pub seo: Option<RawSeo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHero {
    #[serde(default, deserialize_with = "lenient")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subheadline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cta_label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cta_href: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawService {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNavItem {
    #[serde(default, deserialize_with = "lenient")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestimonial {
    #[serde(default, deserialize_with = "lenient")]
    pub quote: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTheme {
    #[serde(default, deserialize_with = "lenient")]
    pub primary_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

impl RawSiteConfig {
    /// Read a stored config. Never fails: anything but a JSON object yields an
    /// empty config.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

/// A value of the wrong type reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Items of the wrong type are dropped; a non-array reads as absent.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn lenient_services<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, RawService>>, D::Error>
where
    D: Deserializer<'de>,
{
    let parse = |v: Value| -> Option<RawService> {
        if v.is_object() {
            serde_json::from_value(v).ok()
        } else {
            None
        }
    };

    let services = match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, v)| parse(v).map(|s| (key.trim().to_string(), s)))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(parse)
            .filter_map(|s| {
                let key = s.key.as_deref()?.trim().to_string();
                Some((key, s))
            })
            .collect(),
        _ => return Ok(None),
    };
    Ok(Some(services))
}
