//! # Listing Site
//!
//! A static site generator for real estate listings. A property folder holds
//! a `listing.json`, an optional `hero.jpg`, and a `photos/` tree; the build
//! turns it into one `index.html`, optimized images, and support assets.
//!
//! # Architecture: One Linear Build
//!
//! ```text
//! listing.json ─┐
//!               ├─→ Listing ──────────────┐
//! photos/ ──────┴─→ PhotoCatalog → Hero ──┴─→ BuildContext → Renderer → index.html
//!                       │
//!                       └─→ ImageProcessor → photos/, thumbs/, hero.jpg, agent/
//! ```
//!
//! Each piece is computed once and passed forward by reference. The output
//! directory is wiped and rebuilt on every run, so the same input always
//! yields the same tree and the same page bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Discovers photos, assigns categories from subfolder names, sorts by path |
//! | [`imaging`] | Resize, thumbnail, and JPEG normalization, with verbatim-copy fallback |
//! | [`hero`] | Picks the hero banner by fixed precedence |
//! | [`listing`] | Loads `listing.json`, strict or lenient, and applies defaults once |
//! | [`context`] | Merges listing, catalog, and hero into the flat rendering context |
//! | [`render`] | Renderer trait and the built-in Maud page |
//! | [`assets`] | Built-in or directory-sourced stylesheet and lightbox script |
//! | [`pipeline`] | Stage-by-stage build orchestration and reports |
//! | [`config`] | `config.toml` loading, validation, and merging over stock defaults |
//! | [`output`] | CLI summaries for `build` and `check` |
//!
//! # Design Decisions
//!
//! ## Image Optimization Is Optional
//!
//! The [`imaging::ImageProcessor`] trait has an optimizing implementation,
//! compiled with the default `optimize` feature, and a copy-only one.
//! [`imaging::select_processor`] probes the codecs once at startup and the
//! rest of the build never asks again. A photo that fails to decode is
//! copied as-is: the page always has a file to point at.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a compile error, listing text is escaped by default, and there is no
//! template directory to ship. Custom renderers plug in through
//! [`render::Renderer`].
//!
//! ## Single-Threaded
//!
//! A listing has tens of photos, not thousands. Photos are processed one by
//! one in catalog order, which keeps logs and fallback warnings in a
//! predictable order.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod context;
pub mod hero;
pub mod imaging;
pub mod listing;
pub mod output;
pub mod pipeline;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
