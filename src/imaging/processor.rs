//! Image processor trait, outcomes, and capability selection.
//!
//! The [`ImageProcessor`] trait has two production implementations:
//!
//! | Processor | When | Behavior |
//! |---|---|---|
//! | [`OptimizingProcessor`](super::optimizing::OptimizingProcessor) | `optimize` feature on and JPEG codec usable | decode → flatten → resize → JPEG encode, copy on failure |
//! | [`CopyOnlyProcessor`] | otherwise | byte-identical copy |
//!
//! [`select_processor`] probes once at startup; callers only ever see
//! `dyn ImageProcessor` and cannot tell which one is active.
//!
//! Image problems never escape a processor. Whatever happens while decoding or
//! encoding, a file ends up at `dest`. The only error surfaced is an I/O
//! failure of the copy itself, because then no file can exist at `dest`.

use super::params::Profile;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Why a processor copied the source instead of re-encoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyReason {
    /// No codec compiled in or usable.
    NoCodec,
    /// Decode, conversion, resize, or encode failed.
    Fallback(String),
    /// The source is kept in its own format on purpose.
    KeepFormat,
}

/// What ended up at the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Re-encoded with the profile's limits.
    Optimized { width: u32, height: u32 },
    /// Byte-identical copy of the source.
    Copied(CopyReason),
}

impl ProcessOutcome {
    pub fn is_optimized(&self) -> bool {
        matches!(self, ProcessOutcome::Optimized { .. })
    }

    /// A fallback copy caused by a failure, as opposed to a deliberate copy.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ProcessOutcome::Copied(CopyReason::Fallback(_)))
    }
}

/// Turns one source image into one output file for a given profile.
pub trait ImageProcessor {
    /// Short name used in logs and the build summary.
    fn name(&self) -> &'static str;

    /// Produce `dest` from `src`. The parent directory of `dest` must exist.
    fn process(
        &self,
        src: &Path,
        dest: &Path,
        profile: Profile,
    ) -> Result<ProcessOutcome, BackendError>;
}

/// Copies the source verbatim. Used when no image codec is available.
#[derive(Debug, Default)]
pub struct CopyOnlyProcessor;

impl CopyOnlyProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl ImageProcessor for CopyOnlyProcessor {
    fn name(&self) -> &'static str {
        "copy-only"
    }

    fn process(
        &self,
        src: &Path,
        dest: &Path,
        _profile: Profile,
    ) -> Result<ProcessOutcome, BackendError> {
        copy_verbatim(src, dest)?;
        Ok(ProcessOutcome::Copied(CopyReason::NoCodec))
    }
}

/// Byte-identical copy, replacing anything already at `dest`.
pub(crate) fn copy_verbatim(src: &Path, dest: &Path) -> Result<(), BackendError> {
    fs::copy(src, dest)?;
    Ok(())
}

/// Pick the processor for this run.
///
/// Checks once whether JPEG can be both decoded and encoded with the codecs
/// compiled into this binary.
#[cfg(feature = "optimize")]
pub fn select_processor(profiles: super::params::ProfileSet) -> Box<dyn ImageProcessor> {
    if super::optimizing::codec_available() {
        Box::new(super::optimizing::OptimizingProcessor::new(profiles))
    } else {
        tracing::warn!("JPEG codec unavailable, images will be copied without optimization");
        Box::new(CopyOnlyProcessor::new())
    }
}

/// Pick the processor for this run.
///
/// Built without the `optimize` feature: images are always copied.
#[cfg(not(feature = "optimize"))]
pub fn select_processor(_profiles: super::params::ProfileSet) -> Box<dyn ImageProcessor> {
    tracing::warn!("built without image optimization, images will be copied as-is");
    Box::new(CopyOnlyProcessor::new())
}
