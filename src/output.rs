//! CLI output formatting for builds and checks.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Built Maple Cottage
//!     Output: site/index.html
//!     Photos: 12 (3 categories: exterior, kitchen, uncategorized)
//!     Images: 13 optimized, 1 copied (optimizing)
//!     Hero: hero.jpg
//!     Agent: agent/dana.jpg
//!     Assets: style.css
//!     Theme: classic-light
//!
//! Warnings
//!     lightbox.js not found in /props/elm/static
//! ```
//!
//! ## Check
//!
//! ```text
//! Maple Cottage (lenient)
//!     Photos: 12 (3 categories: exterior, kitchen, uncategorized)
//!     Hero: photos/a.jpg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure. Warnings are already logged when they happen; they
//! are repeated here so the summary stands on its own.

use crate::config::ValidationMode;
use crate::hero::HeroImage;
use crate::pipeline::{BuildReport, CheckReport};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `12` or `12 (3 categories: a, b, c)`.
fn photo_summary(photos: usize, categories: &[String]) -> String {
    match categories.len() {
        0 => photos.to_string(),
        1 => format!("{} (1 category: {})", photos, categories[0]),
        n => format!("{} ({} categories: {})", photos, n, categories.join(", ")),
    }
}

fn hero_line(hero: Option<&HeroImage>) -> String {
    match hero {
        Some(h) => format!("{}Hero: {}", indent(1), h.href()),
        None => format!("{}Hero: none", indent(1)),
    }
}

fn warning_block(warnings: &[String]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Warnings".to_string()];
    lines.extend(warnings.iter().map(|w| format!("{}{}", indent(1), w)));
    lines
}

fn validation_label(mode: ValidationMode) -> &'static str {
    match mode {
        ValidationMode::Strict => "strict",
        ValidationMode::Lenient => "lenient",
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![
        format!("Built {}", report.title),
        format!(
            "{}Output: {}",
            indent(1),
            report.output_dir.join("index.html").display()
        ),
        format!(
            "{}Photos: {}",
            indent(1),
            photo_summary(report.photos, &report.categories)
        ),
    ];
    if report.thumbnails > 0 {
        lines.push(format!("{}Thumbnails: {}", indent(1), report.thumbnails));
    }
    lines.push(format!(
        "{}Images: {} optimized, {} copied ({})",
        indent(1),
        report.optimized,
        report.copied,
        report.processor
    ));
    lines.push(hero_line(report.hero.as_ref()));
    if let Some(agent) = &report.agent_photo {
        lines.push(format!("{}Agent: {}", indent(1), agent));
    }
    if !report.assets.is_empty() {
        lines.push(format!("{}Assets: {}", indent(1), report.assets.join(", ")));
    }
    lines.push(format!("{}Theme: {}", indent(1), report.theme));
    lines.extend(warning_block(&report.warnings));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", report.title, validation_label(report.validation)),
        format!(
            "{}Photos: {}",
            indent(1),
            photo_summary(report.photos, &report.categories)
        ),
        hero_line(report.hero.as_ref()),
    ];
    lines.extend(warning_block(&report.warnings));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
