//! Rendering context assembly.
//!
//! [`ContextBuilder`] merges the resolved [`Listing`], the [`PhotoCatalog`],
//! the hero selection, and the agent photo reference into one flat
//! [`BuildContext`]. The context is built once and handed to the renderer by
//! reference; nothing mutates it afterwards.
//!
//! Listing defaults have already been applied at load time, so the builder
//! only derives values: the formatted price, photo references, and the
//! filtered category list.

use crate::catalog::PhotoCatalog;
use crate::hero::HeroImage;
use crate::listing::{Agent, Details, GalleryOrganization, Listing};
use serde::Serialize;
use serde_json::Number;

/// Everything the renderer gets to see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildContext {
    pub title: String,
    pub address: String,
    pub details: Details,
    /// `$`-prefixed, thousands-grouped. Absent when the price is not positive.
    pub price_formatted: Option<String>,
    pub agent: Option<Agent>,
    /// `agent/<file name>`, present only when the photo exists on disk.
    pub agent_photo_path: Option<String>,
    pub photos: Vec<PhotoContext>,
    /// Distinct photo categories in catalog order.
    pub categories: Vec<String>,
    pub hero_image: Option<String>,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: Vec<String>,
    pub theme_scheme: String,
    pub hero_style: String,
    pub gallery_organization: GalleryOrganization,
    /// Filter button order. Only set for a filtered gallery.
    pub gallery_categories: Option<Vec<String>>,
    pub matterport_url: Option<String>,
    pub video_url: Option<String>,
}

/// One gallery photo as seen by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoContext {
    /// Path relative to the photo root.
    pub path: String,
    /// `photos/<path>`, relative to the output root.
    pub src: String,
    pub category: Option<String>,
    /// `thumbs/<path>` when thumbnails are generated.
    pub thumb: Option<String>,
}

/// Builds a [`BuildContext`] from the pieces resolved earlier in the build.
pub struct ContextBuilder<'a> {
    listing: &'a Listing,
    catalog: &'a PhotoCatalog,
    hero: Option<&'a HeroImage>,
    agent_photo_path: Option<String>,
    thumbnails: bool,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(listing: &'a Listing, catalog: &'a PhotoCatalog) -> Self {
        Self {
            listing,
            catalog,
            hero: None,
            agent_photo_path: None,
            thumbnails: false,
        }
    }

    pub fn hero(mut self, hero: Option<&'a HeroImage>) -> Self {
        self.hero = hero;
        self
    }

    /// Output-relative reference of the processed agent photo.
    pub fn agent_photo(mut self, path: Option<String>) -> Self {
        self.agent_photo_path = path;
        self
    }

    pub fn thumbnails(mut self, enabled: bool) -> Self {
        self.thumbnails = enabled;
        self
    }

    pub fn build(self) -> BuildContext {
        let listing = self.listing;
        let categories = self.catalog.categories();

        let photos = self
            .catalog
            .entries()
            .iter()
            .map(|entry| PhotoContext {
                src: format!("photos/{}", entry.path),
                thumb: self.thumbnails.then(|| format!("thumbs/{}", entry.path)),
                path: entry.path.clone(),
                category: entry.category.clone(),
            })
            .collect();

        let gallery_categories = match listing.gallery.organization {
            GalleryOrganization::Filtered if listing.gallery.categories.is_empty() => {
                Some(categories.clone())
            }
            GalleryOrganization::Filtered => Some(listing.gallery.categories.clone()),
            GalleryOrganization::Merged => None,
        };

        BuildContext {
            title: listing.title.clone(),
            address: listing.address.clone(),
            details: listing.details.clone(),
            price_formatted: format_price(&listing.details.price),
            agent: listing.agent.clone(),
            agent_photo_path: self.agent_photo_path,
            photos,
            categories,
            hero_image: self.hero.map(HeroImage::href),
            seo_title: listing.seo.title.clone(),
            seo_description: listing.seo.description.clone(),
            seo_keywords: listing.seo.keywords.clone(),
            theme_scheme: listing.theme.scheme.clone(),
            hero_style: listing.hero.style.clone(),
            gallery_organization: listing.gallery.organization,
            gallery_categories,
            matterport_url: listing.media.matterport_url.clone(),
            video_url: listing.media.video_url.clone(),
        }
    }
}

/// Format a price as `$` plus thousands-grouped digits.
///
/// Returns `None` unless the price is greater than zero.
///
/// ```
/// use listing_site::context::format_price;
/// use serde_json::Number;
///
/// assert_eq!(format_price(&Number::from(450000)).as_deref(), Some("$450,000"));
/// assert_eq!(format_price(&Number::from(0)), None);
/// ```
pub fn format_price(price: &Number) -> Option<String> {
    if !price.as_f64().is_some_and(|p| p > 0.0) {
        return None;
    }
    let digits = match (price.as_u64(), price.as_f64()) {
        (Some(whole), _) => whole.to_string(),
        (None, Some(value)) => value.to_string(),
        (None, None) => return None,
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };
    let mut out = format!("${}", group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
