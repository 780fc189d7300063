//! Optimizing processor built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode | `image::ImageReader` with content sniffing |
//! | Flatten alpha | manual "over white" composite into `RgbImage` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode | `image::codecs::jpeg::JpegEncoder` at the profile's quality |
//!
//! Palette-indexed sources are expanded to RGB or RGBA by the decoder, so the
//! flatten step sees them as ordinary truecolor images with or without alpha.
//!
//! Any error in these steps is turned into a verbatim copy of the source by
//! [`OptimizingProcessor::process`].

use super::calculations::calculate_target_dimensions;
use super::params::{Profile, ProfileSet, ProfileSpec, Quality};
use super::processor::{BackendError, CopyReason, ImageProcessor, ProcessOutcome, copy_verbatim};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use std::fs;
use std::path::Path;

/// Whether JPEG can be both decoded and encoded by this build.
pub fn codec_available() -> bool {
    ImageFormat::Jpeg.reading_enabled() && ImageFormat::Jpeg.writing_enabled()
}

/// Re-encodes images as JPEG within the profile limits.
pub struct OptimizingProcessor {
    profiles: ProfileSet,
}

impl OptimizingProcessor {
    pub fn new(profiles: ProfileSet) -> Self {
        Self { profiles }
    }
}

impl Default for OptimizingProcessor {
    fn default() -> Self {
        Self::new(ProfileSet::default())
    }
}

impl ImageProcessor for OptimizingProcessor {
    fn name(&self) -> &'static str {
        "optimizing"
    }

    fn process(
        &self,
        src: &Path,
        dest: &Path,
        profile: Profile,
    ) -> Result<ProcessOutcome, BackendError> {
        let spec = self.profiles.spec(profile);
        match optimize(src, &spec) {
            Ok((bytes, width, height)) => {
                fs::write(dest, bytes)?;
                tracing::debug!(
                    source = %src.display(),
                    %profile,
                    width,
                    height,
                    "optimized"
                );
                Ok(ProcessOutcome::Optimized { width, height })
            }
            Err(e) => {
                tracing::warn!(
                    source = %src.display(),
                    %profile,
                    "optimization failed, copying original: {e}"
                );
                copy_verbatim(src, dest)?;
                Ok(ProcessOutcome::Copied(CopyReason::Fallback(e.to_string())))
            }
        }
    }
}

/// Decode, flatten, resize, and encode. Returns the JPEG bytes and final size.
fn optimize(src: &Path, spec: &ProfileSpec) -> Result<(Vec<u8>, u32, u32), BackendError> {
    let img = load_image(src)?;
    let rgb = flatten_onto_white(img);
    let resized = match calculate_target_dimensions(rgb.dimensions(), spec) {
        Some((w, h)) => image::imageops::resize(&rgb, w, h, FilterType::Lanczos3),
        None => rgb,
    };
    let (width, height) = resized.dimensions();
    let bytes = encode_jpeg(&resized, spec.quality)?;
    Ok((bytes, width, height))
}

/// Load and decode an image from disk, trusting content over extension.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Convert to opaque 8-bit RGB, compositing any alpha over white.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        image::Rgb([over(r), over(g), over(b)])
    })
}

fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.value())
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}
