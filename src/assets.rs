//! Support assets for the generated page.
//!
//! Either the built-in stylesheet and lightbox script, embedded at compile
//! time from `static/`, or every file found directly inside a configured
//! static directory. Assets land in `<output>/static/`.
//!
//! A configured directory that is missing, or that has no `lightbox.js`,
//! only produces warnings. The page still builds; the gallery just loses
//! its lightbox.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LIGHTBOX_SCRIPT: &str = "lightbox.js";

const BUILTIN_CSS: &str = include_str!("../static/style.css");
const BUILTIN_JS: &str = include_str!("../static/lightbox.js");

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the support assets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Stylesheet and lightbox compiled into the binary.
    BuiltIn,
    /// Every regular file directly inside this directory.
    Directory(PathBuf),
}

impl AssetSource {
    pub fn from_static_dir(dir: Option<PathBuf>) -> Self {
        dir.map(AssetSource::Directory).unwrap_or(AssetSource::BuiltIn)
    }
}

/// Files written and problems noticed while installing assets.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AssetReport {
    /// File names written under `static/`, sorted.
    pub files: Vec<String>,
    pub warnings: Vec<String>,
}

/// Write the assets into `static_out`, which must already exist.
pub fn install(source: &AssetSource, static_out: &Path) -> Result<AssetReport, AssetError> {
    match source {
        AssetSource::BuiltIn => install_builtin(static_out),
        AssetSource::Directory(dir) => copy_static_dir(dir, static_out),
    }
}

fn install_builtin(static_out: &Path) -> Result<AssetReport, AssetError> {
    fs::write(static_out.join("style.css"), BUILTIN_CSS)?;
    fs::write(static_out.join(LIGHTBOX_SCRIPT), BUILTIN_JS)?;
    tracing::debug!("wrote built-in assets");
    Ok(AssetReport {
        files: vec![LIGHTBOX_SCRIPT.to_string(), "style.css".to_string()],
        warnings: Vec::new(),
    })
}

fn copy_static_dir(dir: &Path, static_out: &Path) -> Result<AssetReport, AssetError> {
    let mut report = AssetReport::default();

    if !dir.is_dir() {
        let msg = format!("static directory not found: {}", dir.display());
        tracing::warn!("{msg}");
        report.warnings.push(msg);
        return Ok(report);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    for path in &files {
        let Some(name) = path.file_name() else {
            continue;
        };
        fs::copy(path, static_out.join(name))?;
        tracing::debug!(file = %name.to_string_lossy(), "copied asset");
        report.files.push(name.to_string_lossy().to_string());
    }

    if !dir.join(LIGHTBOX_SCRIPT).is_file() {
        let msg = format!("{LIGHTBOX_SCRIPT} not found in {}", dir.display());
        tracing::warn!("{msg}");
        report.warnings.push(msg);
    }

    Ok(report)
}
