//! Photo discovery and categorization.
//!
//! Scans the `photos/` folder of a property and produces an ordered
//! [`PhotoCatalog`]. Only two levels are considered:
//!
//! ```text
//! photos/
//! ├── front.jpg              # root photo: "uncategorized" or no category
//! ├── exterior/              # category "exterior"
//! │   ├── porch.JPG
//! │   └── yard.jpeg
//! └── kitchen/
//!     ├── island.jpg
//!     └── drafts/            # deeper folders are ignored
//!         └── old.jpg
//! ```
//!
//! ## Rules
//!
//! - Extensions `.jpg` and `.jpeg`, case-insensitive. Hidden files are skipped.
//! - `hero.jpg` and `agent.jpg` directly under the photo root are never photos
//!   (exact, case-sensitive names).
//! - A subdirectory is a category only if it contributes at least one photo.
//! - Root photos are labeled `"uncategorized"` when at least one category
//!   exists, otherwise they carry no category.
//! - Entries are sorted by their relative path string (always `/`-separated),
//!   ties broken by the full path. Directory iteration order never leaks out.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const UNCATEGORIZED: &str = "uncategorized";

/// Root file names that belong to the listing, not the gallery.
const RESERVED_ROOT_NAMES: &[&str] = &["hero.jpg", "agent.jpg"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk photo directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Photo directory not found: {0}")]
    DirectoryMissing(PathBuf),
    #[error("No photos (.jpg/.jpeg) found in {0}")]
    NoPhotosFound(PathBuf),
}

/// One discovered photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoEntry {
    /// Path relative to the photo root, `/`-separated.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Ordered, non-empty list of photos.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PhotoCatalog {
    entries: Vec<PhotoEntry>,
}

impl PhotoCatalog {
    pub fn entries(&self) -> &[PhotoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a catalog returned by [`scan`].
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first photo after sorting.
    pub fn first(&self) -> Option<&PhotoEntry> {
        self.entries.first()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for category in self.entries.iter().filter_map(|e| e.category.as_ref()) {
            if !seen.contains(category) {
                seen.push(category.clone());
            }
        }
        seen
    }
}

/// Scan a photo root into a catalog.
pub fn scan(photo_root: &Path) -> Result<PhotoCatalog, ScanError> {
    if !photo_root.is_dir() {
        return Err(ScanError::DirectoryMissing(photo_root.to_path_buf()));
    }

    // (relative path, full path, category)
    let mut found: Vec<(String, PathBuf, Option<String>)> = Vec::new();

    for entry in WalkDir::new(photo_root)
        .follow_links(true)
        .min_depth(1)
        .max_depth(2)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.io_error().is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound) => {
                tracing::warn!(error = %e, "skipping dangling link");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !is_photo_name(name) {
            continue;
        }

        if entry.depth() == 1 {
            if RESERVED_ROOT_NAMES.contains(&name) {
                continue;
            }
            found.push((name.to_string(), entry.path().to_path_buf(), None));
        } else {
            let Some(dir) = entry
                .path()
                .parent()
                .and_then(Path::file_name)
                .and_then(|d| d.to_str())
            else {
                continue;
            };
            if dir.starts_with('.') {
                continue;
            }
            found.push((
                format!("{dir}/{name}"),
                entry.path().to_path_buf(),
                Some(dir.to_string()),
            ));
        }
    }

    if found.is_empty() {
        return Err(ScanError::NoPhotosFound(photo_root.to_path_buf()));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let has_categories = found.iter().any(|(_, _, category)| category.is_some());
    let entries = found
        .into_iter()
        .map(|(path, _, category)| PhotoEntry {
            path,
            category: category.or_else(|| has_categories.then(|| UNCATEGORIZED.to_string())),
        })
        .collect();

    Ok(PhotoCatalog { entries })
}

fn is_photo_name(name: &str) -> bool {
    !name.starts_with('.') && is_jpeg_name(name)
}

/// `jpg` or `jpeg` extension, any case.
pub(crate) fn is_jpeg_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
