//! Page rendering.
//!
//! The pipeline hands a finished [`BuildContext`] to a [`Renderer`] and gets
//! back the page text. [`MaudRenderer`] is the built-in implementation; it
//! produces a single `index.html` with:
//!
//! - **Hero banner**: `hero_image` with title, address, and price overlay
//! - **Facts**: beds, baths, square feet, optional year/type/MLS
//! - **Gallery**: one grid of all photos, with category filter buttons for a
//!   filtered gallery; each photo opens in the lightbox
//! - **Media**: Matterport tour and video, when present
//! - **Agent card**: name, photo, and contact details
//!
//! The page references `static/style.css` and `static/lightbox.js`. It never
//! contains timestamps, so identical contexts render identical bytes.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolation is escaped.

use crate::context::{BuildContext, PhotoContext};
use crate::listing::{Agent, Details, GalleryOrganization};
use maud::{DOCTYPE, Markup, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    Failed(String),
}

/// Turns a build context into page text.
pub trait Renderer {
    fn render(&self, ctx: &BuildContext) -> Result<String, RenderError>;
}

/// Built-in single-page renderer.
#[derive(Debug, Default)]
pub struct MaudRenderer;

impl MaudRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for MaudRenderer {
    fn render(&self, ctx: &BuildContext) -> Result<String, RenderError> {
        Ok(render_listing_page(ctx).into_string())
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(ctx: &BuildContext, content: Markup) -> Markup {
    let keywords = ctx.seo_keywords.join(", ");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (ctx.seo_title) }
                meta name="description" content=(ctx.seo_description);
                @if !keywords.is_empty() {
                    meta name="keywords" content=(keywords);
                }
                meta property="og:title" content=(ctx.seo_title);
                meta property="og:description" content=(ctx.seo_description);
                @if let Some(hero) = &ctx.hero_image {
                    meta property="og:image" content=(hero);
                }
                link rel="stylesheet" href="static/style.css";
            }
            body class={ "theme-" (ctx.theme_scheme) } {
                (content)
                script src="static/lightbox.js" {}
            }
        }
    }
}

/// Renders the hero banner
fn hero_section(ctx: &BuildContext) -> Markup {
    html! {
        header class={ "hero hero-" (ctx.hero_style) } {
            @if let Some(src) = &ctx.hero_image {
                img.hero-image src=(src) alt=(ctx.title);
            }
            div.hero-text {
                h1 { (ctx.title) }
                @if !ctx.address.is_empty() {
                    p.address { (ctx.address) }
                }
                @if let Some(price) = &ctx.price_formatted {
                    p.price { (price) }
                }
            }
        }
    }
}

fn fact(label: &str, value: &str) -> Markup {
    html! {
        li.fact {
            span.fact-value { (value) }
            " "
            span.fact-label { (label) }
        }
    }
}

/// Renders the key facts list
fn details_section(details: &Details) -> Markup {
    html! {
        section.details {
            ul.facts {
                (fact("beds", &details.beds.to_string()))
                (fact("baths", &details.baths.to_string()))
                (fact("sq ft", &details.sqft.to_string()))
                @if let Some(year) = &details.year_built {
                    (fact("built", year))
                }
            }
            @if details.property_type.is_some() || details.mls.is_some() {
                dl.extra-details {
                    @if let Some(kind) = &details.property_type {
                        dt { "Type" }
                        dd { (kind) }
                    }
                    @if let Some(mls) = &details.mls {
                        dt { "MLS" }
                        dd { (mls) }
                    }
                }
            }
        }
    }
}

fn photo_tile(photo: &PhotoContext, index: usize) -> Markup {
    let preview = photo.thumb.as_deref().unwrap_or(&photo.src);
    html! {
        a.photo href=(photo.src) data-index=(index) data-category=[photo.category.as_deref()] {
            img src=(preview) alt={ "Photo " (index + 1) } loading="lazy";
        }
    }
}

/// Renders the gallery grid, with filter buttons for a filtered gallery
fn gallery_section(ctx: &BuildContext) -> Markup {
    let filters = match ctx.gallery_organization {
        GalleryOrganization::Filtered => ctx.gallery_categories.as_deref(),
        GalleryOrganization::Merged => None,
    };
    html! {
        section.gallery data-organization=(ctx.gallery_organization.as_str()) {
            @if let Some(categories) = filters {
                nav.gallery-filters {
                    button.filter.active type="button" data-filter="all" { "All" }
                    @for category in categories {
                        button.filter type="button" data-filter=(category) { (category) }
                    }
                }
            }
            div.photo-grid {
                @for (idx, photo) in ctx.photos.iter().enumerate() {
                    (photo_tile(photo, idx))
                }
            }
        }
    }
}

/// Renders the virtual tour and video embeds
fn media_section(ctx: &BuildContext) -> Markup {
    html! {
        @if ctx.matterport_url.is_some() || ctx.video_url.is_some() {
            section.media {
                @if let Some(url) = &ctx.matterport_url {
                    div.media-embed.matterport {
                        iframe src=(url) title="3D tour" allowfullscreen loading="lazy" {}
                    }
                }
                @if let Some(url) = &ctx.video_url {
                    div.media-embed.video {
                        iframe src=(url) title="Video tour" allowfullscreen loading="lazy" {}
                    }
                }
            }
        }
    }
}

/// Renders the listing agent card
fn agent_section(agent: &Agent, photo: Option<&str>) -> Markup {
    html! {
        aside.agent {
            @if let Some(src) = photo {
                img.agent-photo src=(src) alt=(agent.name);
            }
            div.agent-info {
                @if !agent.name.is_empty() {
                    p.agent-name { (agent.name) }
                }
                @if let Some(company) = &agent.company {
                    p.agent-company { (company) }
                }
                @if let Some(phone) = &agent.phone {
                    a.agent-phone href={ "tel:" (phone) } { (phone) }
                }
                @if let Some(email) = &agent.email {
                    a.agent-email href={ "mailto:" (email) } { (email) }
                }
                @if let Some(license) = &agent.license {
                    p.agent-license { "License " (license) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the complete listing page
pub fn render_listing_page(ctx: &BuildContext) -> Markup {
    let content = html! {
        (hero_section(ctx))
        main.listing {
            (details_section(&ctx.details))
            (gallery_section(ctx))
            (media_section(ctx))
            @if let Some(agent) = &ctx.agent {
                (agent_section(agent, ctx.agent_photo_path.as_deref()))
            }
        }
    };
    base_document(ctx, content)
}
