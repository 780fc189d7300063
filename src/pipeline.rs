//! Build orchestration.
//!
//! One build walks a fixed sequence of stages, never going back:
//!
//! ```text
//! Validate → Scan → PrepareOutput → ProcessPhotos → ResolveHero
//!   → ProcessHeroAndAgent → CopyStaticAssets → BuildContext → Render
//!   → WriteOutput → Done
//! ```
//!
//! ## Output
//!
//! ```text
//! site/
//! ├── index.html
//! ├── hero.jpg              # when the hero is the property's hero.jpg
//! ├── agent/<file>          # when the agent photo exists
//! ├── photos/<relpath>      # every catalog photo, same tree as the input
//! ├── thumbs/<relpath>      # with thumbnails enabled
//! └── static/               # stylesheet and lightbox script
//! ```
//!
//! The output directory is deleted and recreated on every build; nothing is
//! incremental. Builds assume exclusive ownership of it. An interrupted build
//! leaves a partial tree that must not be served.
//!
//! ## Failure policy
//!
//! Missing or malformed `listing.json`, a missing `photos/` folder, an empty
//! catalog, and render failures abort the build. Image problems degrade to a
//! verbatim copy, and missing assets or a dangling hero reference become
//! warnings in the [`BuildReport`].

use crate::assets::{self, AssetError, AssetSource};
use crate::catalog::{self, PhotoCatalog, ScanError};
use crate::config::{self, ConfigError, SiteConfig, ValidationMode};
use crate::context::ContextBuilder;
use crate::hero::{self, HeroImage};
use crate::imaging::{
    BackendError, CopyReason, ImageProcessor, Profile, ProcessOutcome, ProfileSet,
    select_processor,
};
use crate::listing::{self, Listing, ListingError};
use crate::render::{MaudRenderer, RenderError, Renderer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Image error: {0}")]
    Image(#[from] BackendError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("Error rendering template: {0}")]
    Render(#[from] RenderError),
    #[error("Input directory not found: {0}")]
    InputMissing(PathBuf),
    #[error("Refusing to use {0} as output: it overlaps the property's source files")]
    UnsafeOutput(PathBuf),
}

/// Build stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Scan,
    PrepareOutput,
    ProcessPhotos,
    ResolveHero,
    ProcessHeroAndAgent,
    CopyStaticAssets,
    BuildContext,
    Render,
    WriteOutput,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::Scan => "scan",
            Stage::PrepareOutput => "prepare-output",
            Stage::ProcessPhotos => "process-photos",
            Stage::ResolveHero => "resolve-hero",
            Stage::ProcessHeroAndAgent => "process-hero-and-agent",
            Stage::CopyStaticAssets => "copy-static-assets",
            Stage::BuildContext => "build-context",
            Stage::Render => "render",
            Stage::WriteOutput => "write-output",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

fn enter(stage: Stage) {
    tracing::info!(%stage, "build stage");
}

/// Command-line adjustments applied on top of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Force strict listing validation.
    pub strict: bool,
    /// Static asset directory, relative to the working directory.
    pub static_dir: Option<PathBuf>,
}

/// Load `config.toml` from the property folder and apply overrides.
pub fn load_site_config(input_dir: &Path, overrides: &Overrides) -> Result<SiteConfig, BuildError> {
    let mut config = config::load_config(input_dir)?;
    if overrides.strict {
        config.listing.validation = ValidationMode::Strict;
    }
    if let Some(dir) = &overrides.static_dir {
        config.assets.static_dir = Some(std::env::current_dir()?.join(dir));
    }
    Ok(config)
}

/// What a finished build produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub processor: &'static str,
    pub title: String,
    pub theme: String,
    pub photos: usize,
    pub categories: Vec<String>,
    pub thumbnails: usize,
    /// Images re-encoded, across photos, thumbnails, hero, and agent.
    pub optimized: usize,
    /// Images copied verbatim, for any reason.
    pub copied: usize,
    pub hero: Option<HeroImage>,
    pub agent_photo: Option<String>,
    pub assets: Vec<String>,
    pub warnings: Vec<String>,
}

/// What a dry-run check found.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub title: String,
    pub validation: ValidationMode,
    pub photos: usize,
    pub categories: Vec<String>,
    pub hero: Option<HeroImage>,
    pub warnings: Vec<String>,
}

/// Drives a build with a chosen image processor and renderer.
pub struct Pipeline {
    config: SiteConfig,
    processor: Box<dyn ImageProcessor>,
    renderer: Box<dyn Renderer>,
}

impl Pipeline {
    /// Pipeline with the processor picked by capability probe and the
    /// built-in renderer.
    pub fn new(config: SiteConfig) -> Self {
        let processor = select_processor(ProfileSet::from_site_config(&config));
        Self {
            config,
            processor,
            renderer: Box::new(MaudRenderer::new()),
        }
    }

    pub fn with_processor(mut self, processor: Box<dyn ImageProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Build the site for the property in `input_dir` into `output_dir`.
    pub fn build(&self, input_dir: &Path, output_dir: &Path) -> Result<BuildReport, BuildError> {
        enter(Stage::Validate);
        let listing = self.load_listing(input_dir)?;
        let photo_root = input_dir.join("photos");

        enter(Stage::Scan);
        let catalog = catalog::scan(&photo_root)?;
        tracing::info!(photos = catalog.len(), "catalog scanned");

        enter(Stage::PrepareOutput);
        let sources = self.source_paths(&listing, &catalog, input_dir);
        prepare_output(input_dir, output_dir, &sources, self.config.thumbnails.enabled)?;

        let mut report = BuildReport {
            output_dir: output_dir.to_path_buf(),
            processor: self.processor.name(),
            title: listing.title.clone(),
            theme: listing.theme.scheme.clone(),
            photos: catalog.len(),
            categories: catalog.categories(),
            thumbnails: 0,
            optimized: 0,
            copied: 0,
            hero: None,
            agent_photo: None,
            assets: Vec::new(),
            warnings: Vec::new(),
        };

        enter(Stage::ProcessPhotos);
        self.process_photos(&catalog, &photo_root, output_dir, &mut report)?;

        enter(Stage::ResolveHero);
        let hero = hero::resolve(&listing.hero, catalog.entries(), input_dir);
        if let Some(h) = hero.as_ref().filter(|h| hero::is_dangling(h, &photo_root)) {
            warn(&mut report, format!("hero image {} does not exist", h.href()));
        }

        enter(Stage::ProcessHeroAndAgent);
        if hero.as_ref().is_some_and(HeroImage::is_root) {
            let outcome = self.processor.process(
                &input_dir.join(hero::ROOT_HERO),
                &output_dir.join(hero::ROOT_HERO),
                Profile::Full,
            )?;
            tally(&mut report, hero::ROOT_HERO, &outcome);
        }
        let agent_photo = self.process_agent_photo(&listing, input_dir, output_dir, &mut report)?;

        enter(Stage::CopyStaticAssets);
        let source = AssetSource::from_static_dir(self.config.static_dir_in(input_dir));
        let installed = assets::install(&source, &output_dir.join("static"))?;
        report.assets = installed.files;
        report.warnings.extend(installed.warnings);

        enter(Stage::BuildContext);
        let ctx = ContextBuilder::new(&listing, &catalog)
            .hero(hero.as_ref())
            .agent_photo(agent_photo.clone())
            .thumbnails(self.config.thumbnails.enabled)
            .build();

        enter(Stage::Render);
        let page = self.renderer.render(&ctx)?;

        enter(Stage::WriteOutput);
        fs::write(output_dir.join("index.html"), page)?;

        enter(Stage::Done);
        report.hero = hero;
        report.agent_photo = agent_photo;
        Ok(report)
    }

    /// Validate the listing and scan photos without writing anything.
    pub fn check(&self, input_dir: &Path) -> Result<CheckReport, BuildError> {
        let listing = self.load_listing(input_dir)?;
        let photo_root = input_dir.join("photos");
        let catalog = catalog::scan(&photo_root)?;
        let hero = hero::resolve(&listing.hero, catalog.entries(), input_dir);

        let mut warnings = Vec::new();
        if let Some(h) = hero.as_ref().filter(|h| hero::is_dangling(h, &photo_root)) {
            warnings.push(format!("hero image {} does not exist", h.href()));
        }
        let agent_photo = listing.agent.as_ref().and_then(|a| a.photo.as_deref());
        if let Some(photo) = agent_photo.filter(|p| !input_dir.join(p).is_file()) {
            warnings.push(format!("agent photo {photo} does not exist"));
        }
        let static_dir = self.config.static_dir_in(input_dir);
        if let Some(dir) = static_dir.filter(|d| !d.join(assets::LIGHTBOX_SCRIPT).is_file()) {
            warnings.push(format!(
                "{} not found in {}",
                assets::LIGHTBOX_SCRIPT,
                dir.display()
            ));
        }

        Ok(CheckReport {
            title: listing.title,
            validation: self.config.listing.validation,
            photos: catalog.len(),
            categories: catalog.categories(),
            hero,
            warnings,
        })
    }

    fn load_listing(&self, input_dir: &Path) -> Result<Listing, BuildError> {
        if !input_dir.is_dir() {
            return Err(BuildError::InputMissing(input_dir.to_path_buf()));
        }
        Ok(listing::load_listing(
            input_dir,
            self.config.listing.validation,
        )?)
    }

    /// Every input the build reads after the output directory is purged.
    fn source_paths(
        &self,
        listing: &Listing,
        catalog: &PhotoCatalog,
        input_dir: &Path,
    ) -> Vec<PathBuf> {
        let photo_root = input_dir.join("photos");
        let mut sources = vec![photo_root.clone(), input_dir.join(hero::ROOT_HERO)];
        sources.extend(catalog.entries().iter().map(|e| photo_root.join(&e.path)));
        if let Some(photo) = listing.agent.as_ref().and_then(|a| a.photo.as_deref()) {
            sources.push(input_dir.join(photo));
        }
        sources.extend(self.config.static_dir_in(input_dir));
        sources
    }

    fn process_photos(
        &self,
        catalog: &PhotoCatalog,
        photo_root: &Path,
        output_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        for entry in catalog.entries() {
            let src = photo_root.join(&entry.path);

            let dest = output_dir.join("photos").join(&entry.path);
            ensure_parent(&dest)?;
            let outcome = self.processor.process(&src, &dest, Profile::Full)?;
            tally(report, &entry.path, &outcome);

            if self.config.thumbnails.enabled {
                let thumb = output_dir.join("thumbs").join(&entry.path);
                ensure_parent(&thumb)?;
                let outcome = self.processor.process(&src, &thumb, Profile::Thumbnail)?;
                tally(report, &entry.path, &outcome);
                report.thumbnails += 1;
            }
        }
        Ok(())
    }

    /// Process the agent photo into `agent/<file name>` when it exists.
    fn process_agent_photo(
        &self,
        listing: &Listing,
        input_dir: &Path,
        output_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<Option<String>, BuildError> {
        let Some(declared) = listing.agent.as_ref().and_then(|a| a.photo.as_deref()) else {
            return Ok(None);
        };
        let src = input_dir.join(declared);
        let file_name = match src.file_name().and_then(|n| n.to_str()) {
            Some(name) if src.is_file() => name.to_string(),
            _ => {
                warn(report, format!("agent photo {declared} does not exist"));
                return Ok(None);
            }
        };

        let agent_dir = output_dir.join("agent");
        fs::create_dir_all(&agent_dir)?;
        let dest = agent_dir.join(&file_name);
        // The processor always emits JPEG; other formats keep their bytes and name.
        let outcome = if catalog::is_jpeg_name(&file_name) {
            self.processor.process(&src, &dest, Profile::Full)?
        } else {
            fs::copy(&src, &dest)?;
            ProcessOutcome::Copied(CopyReason::KeepFormat)
        };
        tally(report, declared, &outcome);
        Ok(Some(format!("agent/{file_name}")))
    }
}

/// Delete and recreate the output directory with its fixed subfolders.
///
/// Refuses an output that is, contains, or lies inside the property folder's
/// `photos/` tree, or that contains any other source the build still reads.
fn prepare_output(
    input_dir: &Path,
    output_dir: &Path,
    sources: &[PathBuf],
    thumbnails: bool,
) -> Result<(), BuildError> {
    let output = resolve_lexically(output_dir)?;
    let input = input_dir.canonicalize()?;
    let overlaps = input.starts_with(&output)
        || output.starts_with(input.join("photos"))
        || sources
            .iter()
            .filter_map(|s| s.canonicalize().ok())
            .any(|s| s.starts_with(&output));
    if overlaps {
        return Err(BuildError::UnsafeOutput(output_dir.to_path_buf()));
    }
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir.join("photos"))?;
    fs::create_dir_all(output_dir.join("static"))?;
    if thumbnails {
        fs::create_dir_all(output_dir.join("thumbs"))?;
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet: the deepest existing
/// ancestor is canonicalized and the missing tail appended.
fn resolve_lexically(path: &Path) -> std::io::Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    loop {
        match current.canonicalize() {
            Ok(mut base) => {
                base.extend(missing.iter().rev());
                return Ok(base);
            }
            Err(e) => match (current.file_name(), current.parent()) {
                (Some(name), Some(parent)) => {
                    missing.push(name.to_os_string());
                    current = parent.to_path_buf();
                }
                _ => return Err(e),
            },
        }
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

fn tally(report: &mut BuildReport, name: &str, outcome: &ProcessOutcome) {
    match outcome {
        ProcessOutcome::Optimized { .. } => report.optimized += 1,
        ProcessOutcome::Copied(_) => {
            report.copied += 1;
            if outcome.is_fallback() {
                report
                    .warnings
                    .push(format!("{name}: could not optimize, copied original"));
            }
        }
    }
}

fn warn(report: &mut BuildReport, msg: String) {
    tracing::warn!("{msg}");
    report.warnings.push(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BuildContext;
    use crate::imaging::processor::tests::MockProcessor;
    use crate::test_helpers::*;
    use std::rc::Rc;

    /// Lets a test keep a handle on the mock after the pipeline owns it.
    struct SharedMock(Rc<MockProcessor>);

    impl ImageProcessor for SharedMock {
        fn name(&self) -> &'static str {
            self.0.name()
        }

        fn process(
            &self,
            src: &Path,
            dest: &Path,
            profile: Profile,
        ) -> Result<ProcessOutcome, BackendError> {
            self.0.process(src, dest, profile)
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, _ctx: &BuildContext) -> Result<String, RenderError> {
            Err(RenderError::Failed("template exploded".to_string()))
        }
    }

    fn mock_pipeline(config: SiteConfig) -> (Pipeline, Rc<MockProcessor>) {
        let mock = Rc::new(MockProcessor::new());
        let pipeline =
            Pipeline::new(config).with_processor(Box::new(SharedMock(Rc::clone(&mock))));
        (pipeline, mock)
    }

    fn scenario() -> PropertyFixture {
        PropertyFixture::new()
            .listing(MINIMAL_LISTING)
            .photo("a.jpg")
            .photo("exterior/b.jpg")
            .photo("interior/c.jpg")
    }

    // =========================================================================
    // Happy path
    // =========================================================================

    #[test]
    fn build_processes_every_photo_in_order() {
        let property = scenario();
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        let ops = mock.get_operations();
        let sources: Vec<&str> = ops.iter().map(|op| op.source.as_str()).collect();
        assert_eq!(sources.len(), 3);
        assert!(sources[0].ends_with("photos/a.jpg"));
        assert!(sources[1].ends_with("photos/exterior/b.jpg"));
        assert!(sources[2].ends_with("photos/interior/c.jpg"));
        assert!(ops.iter().all(|op| op.profile == Profile::Full));

        assert_eq!(report.photos, 3);
        assert_eq!(report.optimized, 3);
        assert_eq!(report.copied, 0);
        assert_eq!(report.processor, "mock");
        assert_eq!(report.hero, Some(HeroImage::FirstPhoto("a.jpg".to_string())));
        assert_eq!(report.categories, vec!["uncategorized", "exterior", "interior"]);
    }

    #[test]
    fn build_writes_expected_tree() {
        let property = scenario();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());
        let out = property.output_dir();

        pipeline.build(&property.root(), &out).unwrap();

        assert!(out.join("index.html").is_file());
        assert!(out.join("photos/a.jpg").is_file());
        assert!(out.join("photos/exterior/b.jpg").is_file());
        assert!(out.join("photos/interior/c.jpg").is_file());
        assert!(out.join("static/style.css").is_file());
        assert!(out.join("static/lightbox.js").is_file());
        assert!(!out.join("hero.jpg").exists());
        assert!(!out.join("thumbs").exists());

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("Maple Cottage"));
        assert!(html.contains("$450,000"));
    }

    #[test]
    fn root_hero_is_processed_to_output_root() {
        let property = scenario().root_hero();
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.hero, Some(HeroImage::Root));
        assert!(property.output_dir().join("hero.jpg").is_file());
        let ops = mock.get_operations();
        assert!(ops.iter().any(|op| op.dest.ends_with("site/hero.jpg")));
        assert_eq!(report.optimized, 4);
    }

    #[test]
    fn agent_photo_goes_to_agent_dir() {
        let property = PropertyFixture::new()
            .listing(r#"{"agent": {"name": "Dana", "photo": "people/dana.jpg"}}"#)
            .photo("a.jpg")
            .file("people/dana.jpg", b"jpeg-ish");
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.agent_photo.as_deref(), Some("agent/dana.jpg"));
        assert!(property.output_dir().join("agent/dana.jpg").is_file());
        let html = fs::read_to_string(property.output_dir().join("index.html")).unwrap();
        assert!(html.contains(r#"src="agent/dana.jpg""#));
    }

    #[test]
    fn missing_agent_photo_is_a_warning() {
        let property = PropertyFixture::new()
            .listing(r#"{"agent": {"name": "Dana", "photo": "agent.jpg"}}"#)
            .photo("a.jpg");
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.agent_photo, None);
        assert!(!property.output_dir().join("agent").exists());
        assert!(report.warnings.iter().any(|w| w.contains("agent.jpg")));
    }

    #[test]
    fn thumbnails_when_enabled() {
        let property = scenario();
        let mut config = SiteConfig::default();
        config.thumbnails.enabled = true;
        let (pipeline, mock) = mock_pipeline(config);

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.thumbnails, 3);
        assert!(property.output_dir().join("thumbs/exterior/b.jpg").is_file());
        let thumbs = mock
            .get_operations()
            .into_iter()
            .filter(|op| op.profile == Profile::Thumbnail)
            .count();
        assert_eq!(thumbs, 3);
        let html = fs::read_to_string(property.output_dir().join("index.html")).unwrap();
        assert!(html.contains(r#"src="thumbs/a.jpg""#));
    }

    #[test]
    fn stale_output_is_purged() {
        let property = scenario();
        let out = property.output_dir();
        fs::create_dir_all(out.join("photos/old")).unwrap();
        fs::write(out.join("photos/old/stale.jpg"), b"x").unwrap();
        fs::write(out.join("leftover.txt"), b"x").unwrap();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        pipeline.build(&property.root(), &out).unwrap();

        assert!(!out.join("leftover.txt").exists());
        assert!(!out.join("photos/old").exists());
    }

    #[test]
    fn fallback_copies_are_counted_and_warned() {
        let property = scenario();
        let pipeline =
            Pipeline::new(SiteConfig::default()).with_processor(Box::new(MockProcessor::failing()));

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.optimized, 0);
        assert_eq!(report.copied, 3);
        assert_eq!(report.warnings.len(), 3);
        assert!(property.output_dir().join("index.html").is_file());
    }

    #[test]
    fn dangling_explicit_hero_is_a_warning() {
        let property = PropertyFixture::new()
            .listing(r#"{"hero": {"image": "gone.jpg"}}"#)
            .photo("a.jpg");
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.hero, Some(HeroImage::Explicit("gone.jpg".to_string())));
        assert!(report.warnings.iter().any(|w| w.contains("photos/gone.jpg")));
        let html = fs::read_to_string(property.output_dir().join("index.html")).unwrap();
        assert!(html.contains("photos/gone.jpg"));
    }

    #[test]
    fn static_dir_without_lightbox_warns() {
        let property = scenario().file("assets/site.css", b"body{}");
        let mut config = SiteConfig::default();
        config.assets.static_dir = Some(PathBuf::from("assets"));
        let (pipeline, _mock) = mock_pipeline(config);

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.assets, vec!["site.css"]);
        assert!(report.warnings.iter().any(|w| w.contains("lightbox.js")));
        assert!(property.output_dir().join("static/site.css").is_file());
    }

    // =========================================================================
    // Fatal errors
    // =========================================================================

    #[test]
    fn render_failure_is_fatal() {
        let property = scenario();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());
        let pipeline = pipeline.with_renderer(Box::new(FailingRenderer));

        let result = pipeline.build(&property.root(), &property.output_dir());

        assert!(matches!(result, Err(BuildError::Render(_))));
        assert!(!property.output_dir().join("index.html").exists());
    }

    #[test]
    fn missing_listing_is_fatal() {
        let property = PropertyFixture::new().photo("a.jpg");
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        let result = pipeline.build(&property.root(), &property.output_dir());

        assert!(matches!(
            result,
            Err(BuildError::Listing(ListingError::Missing(_)))
        ));
        assert!(mock.get_operations().is_empty());
        assert!(!property.output_dir().exists());
    }

    #[test]
    fn empty_catalog_is_fatal() {
        let property = PropertyFixture::new().listing(MINIMAL_LISTING).root_hero();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let result = pipeline.build(&property.root(), &property.output_dir());
        assert!(matches!(
            result,
            Err(BuildError::Scan(ScanError::NoPhotosFound(_)))
        ));
    }

    #[test]
    fn missing_input_is_fatal() {
        let property = PropertyFixture::new();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let result = pipeline.build(&property.root().join("nope"), &property.output_dir());
        assert!(matches!(result, Err(BuildError::InputMissing(_))));
    }

    #[test]
    fn strict_mode_rejects_incomplete_listing() {
        let property = PropertyFixture::new()
            .listing(r#"{"title": "Only a title"}"#)
            .photo("a.jpg");
        let mut config = SiteConfig::default();
        config.listing.validation = ValidationMode::Strict;
        let (pipeline, _mock) = mock_pipeline(config);

        let result = pipeline.build(&property.root(), &property.output_dir());
        assert!(matches!(
            result,
            Err(BuildError::Listing(ListingError::MissingField(f))) if f == "address"
        ));
    }

    #[test]
    fn output_containing_input_is_refused() {
        let property = scenario();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let result = pipeline.build(&property.root(), &property.root());

        assert!(matches!(result, Err(BuildError::UnsafeOutput(_))));
        assert!(property.root().join("listing.json").is_file());
    }

    #[test]
    fn output_inside_photos_is_refused() {
        let property = scenario();
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        for output in [
            property.photos_dir(),
            property.photos_dir().join("exterior"),
            property.photos_dir().join("not-yet-created"),
        ] {
            let result = pipeline.build(&property.root(), &output);
            assert!(matches!(result, Err(BuildError::UnsafeOutput(_))));
        }

        assert!(property.photos_dir().join("a.jpg").is_file());
        assert!(property.photos_dir().join("exterior/b.jpg").is_file());
        assert!(!property.photos_dir().join("not-yet-created").exists());
        assert!(mock.get_operations().is_empty());
    }

    #[test]
    fn output_holding_agent_photo_is_refused() {
        let property = scenario()
            .listing(r#"{"agent": {"name": "Dana", "photo": "people/dana.jpg"}}"#)
            .file("people/dana.jpg", b"jpeg-ish");
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        let result = pipeline.build(&property.root(), &property.root().join("people"));

        assert!(matches!(result, Err(BuildError::UnsafeOutput(_))));
        assert!(property.root().join("people/dana.jpg").is_file());
    }

    #[test]
    fn output_next_to_photos_is_allowed() {
        let property = scenario();
        let out = property.root().join("site");
        fs::create_dir_all(&out).unwrap();
        let (pipeline, _mock) = mock_pipeline(SiteConfig::default());

        pipeline.build(&property.root(), &out).unwrap();
        pipeline.build(&property.root(), &out).unwrap();

        assert!(out.join("index.html").is_file());
        assert!(property.photos_dir().join("a.jpg").is_file());
    }

    #[test]
    fn non_jpeg_agent_photo_is_copied_as_is() {
        let property = PropertyFixture::new()
            .listing(r#"{"agent": {"name": "Dana", "photo": "people/dana.png"}}"#)
            .photo("a.jpg")
            .file("people/dana.png", b"png-bytes");
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline
            .build(&property.root(), &property.output_dir())
            .unwrap();

        assert_eq!(report.agent_photo.as_deref(), Some("agent/dana.png"));
        assert_eq!(
            fs::read(property.output_dir().join("agent/dana.png")).unwrap(),
            b"png-bytes"
        );
        assert!(
            mock.get_operations()
                .iter()
                .all(|op| !op.source.ends_with("dana.png"))
        );
        assert_eq!(report.copied, 1);
        assert!(report.warnings.is_empty());
    }

    // =========================================================================
    // Check and config
    // =========================================================================

    #[test]
    fn check_reports_without_writing() {
        let property = scenario();
        let (pipeline, mock) = mock_pipeline(SiteConfig::default());

        let report = pipeline.check(&property.root()).unwrap();

        assert_eq!(report.title, "Maple Cottage");
        assert_eq!(report.photos, 3);
        assert_eq!(report.hero, Some(HeroImage::FirstPhoto("a.jpg".to_string())));
        assert!(report.warnings.is_empty());
        assert!(mock.get_operations().is_empty());
        assert!(!property.output_dir().exists());
    }

    #[test]
    fn overrides_apply_over_config_file() {
        let property = scenario().file("config.toml", b"[images]\nquality = 70\n");

        let config = load_site_config(
            &property.root(),
            &Overrides {
                strict: true,
                static_dir: None,
            },
        )
        .unwrap();

        assert_eq!(config.images.quality, 70);
        assert_eq!(config.listing.validation, ValidationMode::Strict);
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::ProcessHeroAndAgent.to_string(), "process-hero-and-agent");
        assert_eq!(Stage::Done.to_string(), "done");
    }
}
