//! Image processing: resize, thumbnail, and format normalization only.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG) |
//! | **Flatten** | alpha composite over white |
//! | **Resize** | Lanczos3, width cap or bounding-box fit |
//! | **Encode** | `JpegEncoder` at profile quality |
//! | **Fallback** | `std::fs::copy` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Profiles and their size/quality limits
//! - **Processor**: [`ImageProcessor`] trait, [`CopyOnlyProcessor`], capability probe
//! - **Optimizing**: [`OptimizingProcessor`], compiled with the `optimize` feature

mod calculations;
#[cfg(feature = "optimize")]
pub mod optimizing;
mod params;
pub mod processor;

pub use calculations::{calculate_fit_within, calculate_target_dimensions, calculate_width_cap};
#[cfg(feature = "optimize")]
pub use optimizing::OptimizingProcessor;
pub use params::{Profile, ProfileSet, ProfileSpec, Quality};
pub use processor::{
    BackendError, CopyOnlyProcessor, CopyReason, ImageProcessor, ProcessOutcome, select_processor,
};
