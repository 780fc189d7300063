//! Shared test utilities for the listing-site test suite.
//!
//! Builds throwaway property folders in a temp directory and writes small
//! real images so the optimizing processor has something to decode.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let property = PropertyFixture::new()
//!     .listing(MINIMAL_LISTING)
//!     .photo("exterior/front.jpg")
//!     .photo("kitchen/island.jpg")
//!     .root_hero();
//!
//! let catalog = scan(&property.photos_dir()).unwrap();
//! assert_eq!(paths(&catalog), vec!["exterior/front.jpg", "kitchen/island.jpg"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::PhotoCatalog;

pub const MINIMAL_LISTING: &str = r#"{
    "title": "Maple Cottage",
    "address": "4 Maple Ln",
    "details": {"price": 450000, "beds": 3, "baths": 2, "sqft": 1400}
}"#;

// =========================================================================
// Image writers
// =========================================================================

/// Write a solid-color baseline JPEG of the given size.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 140, 160]));
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

/// Write a solid-color RGBA PNG, whatever the extension of `path`.
pub fn write_png_rgba(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Property folder fixture
// =========================================================================

/// A property folder in a temp directory, built up one file at a time.
pub struct PropertyFixture {
    tmp: TempDir,
}

impl PropertyFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("property/photos")).unwrap();
        Self { tmp }
    }

    /// The property folder (contains `listing.json` and `photos/`).
    pub fn root(&self) -> PathBuf {
        self.tmp.path().join("property")
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.root().join("photos")
    }

    /// A sibling of the property folder to build into.
    pub fn output_dir(&self) -> PathBuf {
        self.tmp.path().join("site")
    }

    pub fn listing(self, json: &str) -> Self {
        fs::write(self.root().join("listing.json"), json).unwrap();
        self
    }

    /// Add a small JPEG under `photos/`.
    pub fn photo(self, rel: &str) -> Self {
        write_jpeg(&self.photos_dir().join(rel), 8, 6);
        self
    }

    /// Add an arbitrary file under `photos/` (non-images, corrupt JPEGs).
    pub fn raw_photo(self, rel: &str, bytes: &[u8]) -> Self {
        let path = self.photos_dir().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
        self
    }

    /// Add `hero.jpg` at the property root.
    pub fn root_hero(self) -> Self {
        write_jpeg(&self.root().join("hero.jpg"), 8, 6);
        self
    }

    /// Add a file at an arbitrary path relative to the property root.
    pub fn file(self, rel: &str, bytes: &[u8]) -> Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
        self
    }
}

// =========================================================================
// Catalog extractors
// =========================================================================

/// Relative paths of every catalog entry, in catalog order.
pub fn paths(catalog: &PhotoCatalog) -> Vec<String> {
    catalog.entries().iter().map(|e| e.path.clone()).collect()
}

/// Category of every catalog entry, in catalog order.
pub fn categories_of(catalog: &PhotoCatalog) -> Vec<Option<String>> {
    catalog
        .entries()
        .iter()
        .map(|e| e.category.clone())
        .collect()
}
