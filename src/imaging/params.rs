//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline (which decides which file gets which
//! treatment) and the [`processor`](super::processor) implementations (which do
//! the pixel work, or just copy bytes when no codec is available).
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1-100, default 85). Clamped on construction.
//! - [`Profile`]: Named target transformation: full-size optimized or thumbnail.
//! - [`ProfileSpec`]: Concrete size and quality limits for one profile.
//! - [`ProfileSet`]: The two limits side by side, built from config.

use crate::config::SiteConfig;
use std::fmt;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// A named target transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Full-size gallery image: width capped, aspect preserved.
    Full,
    /// Small preview: fit inside a bounding box, never upscaled.
    Thumbnail,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => f.write_str("full"),
            Profile::Thumbnail => f.write_str("thumbnail"),
        }
    }
}

/// Size and quality limits for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSpec {
    pub max_width: u32,
    /// `None` means only the width is capped (Full profile).
    pub max_height: Option<u32>,
    pub quality: Quality,
}

impl ProfileSpec {
    pub fn full() -> Self {
        Self {
            max_width: 1920,
            max_height: None,
            quality: Quality::new(85),
        }
    }

    pub fn thumbnail() -> Self {
        Self {
            max_width: 400,
            max_height: Some(300),
            quality: Quality::new(80),
        }
    }
}

/// Full and thumbnail specs resolved from the site config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSet {
    pub full: ProfileSpec,
    pub thumbnail: ProfileSpec,
}

impl ProfileSet {
    pub fn from_site_config(config: &SiteConfig) -> Self {
        Self {
            full: ProfileSpec {
                max_width: config.images.max_width,
                max_height: None,
                quality: Quality::new(config.images.quality),
            },
            thumbnail: ProfileSpec {
                max_width: config.thumbnails.max_width,
                max_height: Some(config.thumbnails.max_height),
                quality: Quality::new(config.thumbnails.quality),
            },
        }
    }

    pub fn spec(&self, profile: Profile) -> ProfileSpec {
        match profile {
            Profile::Full => self.full,
            Profile::Thumbnail => self.thumbnail,
        }
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self {
            full: ProfileSpec::full(),
            thumbnail: ProfileSpec::thumbnail(),
        }
    }
}
