//! Listing description loading and defaulting.
//!
//! `listing.json` is read once per build into a raw [`ListingRecord`] where
//! every field is optional, checked against the selected [`ValidationMode`],
//! and then resolved into a [`Listing`] with every default applied. Nothing
//! downstream looks up a default again.
//!
//! ## Defaults
//!
//! | Field | Default |
//! |---|---|
//! | `title` | `"Property Listing"` |
//! | `address` | `""` |
//! | `details.{price,beds,baths,sqft}` | `0` |
//! | `seo.title` | the listing title |
//! | `seo.description` | `"Real estate listing"` |
//! | `theme.scheme` | `"classic-light"` |
//! | `hero.style` | `"single"` |
//! | `gallery.organization` | `"merged"` |
//!
//! In strict mode `title`, `address`, `details`, and `details.price`,
//! `details.beds`, `details.baths`, `details.sqft` must be present.

use crate::config::ValidationMode;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Property Listing";
pub const DEFAULT_SEO_DESCRIPTION: &str = "Real estate listing";
pub const DEFAULT_THEME_SCHEME: &str = "classic-light";
pub const DEFAULT_HERO_STYLE: &str = "single";

const REQUIRED_FIELDS: &[&str] = &["title", "address", "details"];
const REQUIRED_DETAILS: &[&str] = &["price", "beds", "baths", "sqft"];

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("listing.json not found in {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed listing.json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("listing.json must contain a JSON object")]
    NotAnObject,
    #[error("Required field '{0}' missing in listing.json")]
    MissingField(String),
}

// ============================================================================
// Raw record, as written in listing.json
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    pub title: Option<String>,
    pub address: Option<String>,
    pub details: Option<DetailsRecord>,
    pub agent: Option<Agent>,
    pub media: Option<Media>,
    pub seo: Option<SeoRecord>,
    pub theme: Option<ThemeRecord>,
    pub hero: Option<HeroRecord>,
    pub gallery: Option<GalleryRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailsRecord {
    pub price: Option<Number>,
    pub beds: Option<Number>,
    pub baths: Option<Number>,
    pub sqft: Option<Number>,
    pub year_built: Option<Scalar>,
    pub property_type: Option<Scalar>,
    pub mls: Option<Scalar>,
}

/// A free-form detail that listing authors write as either a string or a
/// number (`"mls": 123456`, `"year_built": "1924"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeoRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Keywords>,
}

/// Keywords may be written as a list or as one comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    List(Vec<String>),
    Text(String),
}

impl Keywords {
    fn into_vec(self) -> Vec<String> {
        let raw = match self {
            Keywords::List(list) => list,
            Keywords::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeRecord {
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeroRecord {
    pub style: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryRecord {
    pub organization: Option<GalleryOrganization>,
    pub categories: Option<Vec<String>>,
}

// ============================================================================
// Resolved listing
// ============================================================================

/// A listing with every default applied. Immutable for the rest of the build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub address: String,
    pub details: Details,
    pub agent: Option<Agent>,
    pub media: Media,
    pub seo: Seo,
    pub theme: Theme,
    pub hero: Hero,
    pub gallery: Gallery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    pub price: Number,
    pub beds: Number,
    pub baths: Number,
    pub sqft: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mls: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    pub name: String,
    /// Path of the agent photo, relative to the property folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matterport_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub scheme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hero {
    pub style: String,
    /// Explicit hero reference: `"hero.jpg"` or a path under `photos/`.
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gallery {
    pub organization: GalleryOrganization,
    /// Declared category order. Only meaningful for [`GalleryOrganization::Filtered`].
    pub categories: Vec<String>,
}

/// How the gallery presents categorized photos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryOrganization {
    /// One grid, categories ignored.
    #[default]
    Merged,
    /// One grid with category filter buttons.
    Filtered,
}

impl GalleryOrganization {
    pub fn as_str(self) -> &'static str {
        match self {
            GalleryOrganization::Merged => "merged",
            GalleryOrganization::Filtered => "filtered",
        }
    }
}

impl Listing {
    /// Apply every documented default to a raw record.
    pub fn from_record(record: ListingRecord) -> Self {
        let title = record.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let details = record.details.unwrap_or_default();
        let seo = record.seo.unwrap_or_default();
        let hero = record.hero.unwrap_or_default();
        let gallery = record.gallery.unwrap_or_default();

        let seo = Seo {
            title: non_empty(seo.title).unwrap_or_else(|| title.clone()),
            description: non_empty(seo.description)
                .unwrap_or_else(|| DEFAULT_SEO_DESCRIPTION.to_string()),
            keywords: seo.keywords.map(Keywords::into_vec).unwrap_or_default(),
        };

        Self {
            address: record.address.unwrap_or_default(),
            details: Details {
                price: details.price.unwrap_or_else(zero),
                beds: details.beds.unwrap_or_else(zero),
                baths: details.baths.unwrap_or_else(zero),
                sqft: details.sqft.unwrap_or_else(zero),
                year_built: details.year_built.map(Scalar::into_text),
                property_type: details.property_type.map(Scalar::into_text),
                mls: details.mls.map(Scalar::into_text),
            },
            agent: record.agent,
            media: record.media.unwrap_or_default(),
            seo,
            theme: Theme {
                scheme: record
                    .theme
                    .and_then(|t| non_empty(t.scheme))
                    .unwrap_or_else(|| DEFAULT_THEME_SCHEME.to_string()),
            },
            hero: Hero {
                style: non_empty(hero.style).unwrap_or_else(|| DEFAULT_HERO_STYLE.to_string()),
                image: non_empty(hero.image),
            },
            gallery: Gallery {
                organization: gallery.organization.unwrap_or_default(),
                categories: gallery.categories.unwrap_or_default(),
            },
            title,
        }
    }
}

fn zero() -> Number {
    Number::from(0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ============================================================================
// Loading
// ============================================================================

/// Load `listing.json` from a property folder.
pub fn load_listing(input_dir: &Path, mode: ValidationMode) -> Result<Listing, ListingError> {
    let path = input_dir.join("listing.json");
    if !path.is_file() {
        return Err(ListingError::Missing(input_dir.to_path_buf()));
    }
    let content = fs::read_to_string(&path)?;
    parse_listing(&content, mode)
}

/// Parse and resolve a listing document.
pub fn parse_listing(json: &str, mode: ValidationMode) -> Result<Listing, ListingError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(ListingError::NotAnObject);
    }
    if mode == ValidationMode::Strict {
        check_required(&value)?;
    }
    let record: ListingRecord = serde_json::from_value(value)?;
    Ok(Listing::from_record(record))
}

/// Strict-mode presence check for top-level and detail fields.
fn check_required(value: &Value) -> Result<(), ListingError> {
    for field in REQUIRED_FIELDS {
        if value.get(field).is_none_or(Value::is_null) {
            return Err(ListingError::MissingField(field.to_string()));
        }
    }
    let details = &value["details"];
    for field in REQUIRED_DETAILS {
        if details.get(field).is_none_or(Value::is_null) {
            return Err(ListingError::MissingField(format!("details.{field}")));
        }
    }
    Ok(())
}
