//! Hero banner selection.
//!
//! First match wins:
//!
//! 1. `hero.image == "hero.jpg"` and `<property>/hero.jpg` exists: the root hero.
//! 2. `hero.image` is any other value: `photos/<value>`, not checked for existence.
//! 3. `<property>/hero.jpg` exists: the root hero.
//! 4. The first catalog photo.
//! 5. No hero.
//!
//! A `"hero.jpg"` reference without the file on disk falls through to 3–5.

use crate::catalog::PhotoEntry;
use crate::listing::Hero;
use serde::Serialize;
use std::path::Path;

pub const ROOT_HERO: &str = "hero.jpg";

/// Where the hero banner comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum HeroImage {
    /// `hero.jpg` at the property root, written to the output root.
    Root,
    /// A photo named explicitly by the listing, relative to `photos/`.
    Explicit(String),
    /// The first photo of the catalog.
    FirstPhoto(String),
}

impl HeroImage {
    /// Reference to use in the page, relative to the output root.
    pub fn href(&self) -> String {
        match self {
            HeroImage::Root => ROOT_HERO.to_string(),
            HeroImage::Explicit(path) | HeroImage::FirstPhoto(path) => format!("photos/{path}"),
        }
    }

    /// Whether the reference needs `hero.jpg` copied to the output root.
    pub fn is_root(&self) -> bool {
        matches!(self, HeroImage::Root)
    }
}

/// Pick the hero image for a listing.
pub fn resolve(hero: &Hero, photos: &[PhotoEntry], property_root: &Path) -> Option<HeroImage> {
    let root_hero_exists = property_root.join(ROOT_HERO).is_file();

    match hero.image.as_deref() {
        Some(ROOT_HERO) if root_hero_exists => return Some(HeroImage::Root),
        Some(ROOT_HERO) => {
            tracing::debug!("hero.image names hero.jpg but none exists, using fallbacks");
        }
        Some(explicit) => return Some(HeroImage::Explicit(explicit.to_string())),
        None => {}
    }

    if root_hero_exists {
        return Some(HeroImage::Root);
    }
    photos.first().map(|p| HeroImage::FirstPhoto(p.path.clone()))
}

/// An explicit hero reference that names no file under the photo root.
///
/// Resolution never fails on this; callers decide how loudly to report it.
pub fn is_dangling(hero: &HeroImage, photo_root: &Path) -> bool {
    match hero {
        HeroImage::Explicit(path) => !photo_root.join(path).is_file(),
        _ => false,
    }
}
