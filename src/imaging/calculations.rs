//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ProfileSpec;

/// Dimensions after capping the width, preserving aspect ratio.
///
/// Returns `None` when the image is already narrow enough and must not be
/// resized. The new height is `round(height * max_width / width)`.
///
/// # Examples
/// ```
/// # use listing_site::imaging::calculate_width_cap;
/// assert_eq!(calculate_width_cap((3840, 2160), 1920), Some((1920, 1080)));
/// assert_eq!(calculate_width_cap((1920, 1080), 1920), None);
/// ```
pub fn calculate_width_cap(original: (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    let (width, height) = original;
    if width <= max_width || width == 0 {
        return None;
    }
    let new_height = (height as f64 * max_width as f64 / width as f64).round() as u32;
    Some((max_width, new_height.max(1)))
}

/// Dimensions that fit inside a bounding box, preserving aspect ratio.
///
/// Never upscales and never crops: an image already inside the box keeps its
/// size and `None` is returned.
///
/// # Examples
/// ```
/// # use listing_site::imaging::calculate_fit_within;
/// // 4:3 landscape into 400x300 → exact fit
/// assert_eq!(calculate_fit_within((1600, 1200), (400, 300)), Some((400, 300)));
/// // Portrait is limited by height
/// assert_eq!(calculate_fit_within((1200, 1600), (400, 300)), Some((225, 300)));
/// ```
pub fn calculate_fit_within(original: (u32, u32), bounds: (u32, u32)) -> Option<(u32, u32)> {
    let (width, height) = original;
    let (max_w, max_h) = bounds;
    if width == 0 || height == 0 || (width <= max_w && height <= max_h) {
        return None;
    }

    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    Some((w, h))
}

/// Target dimensions for a profile, or `None` when no resize is needed.
pub fn calculate_target_dimensions(original: (u32, u32), spec: &ProfileSpec) -> Option<(u32, u32)> {
    match spec.max_height {
        Some(max_height) => calculate_fit_within(original, (spec.max_width, max_height)),
        None => calculate_width_cap(original, spec.max_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::ProfileSpec;

    // =========================================================================
    // calculate_width_cap tests
    // =========================================================================

    #[test]
    fn width_cap_scales_wide_image() {
        // 4000x3000 → 1920 wide, 3000 * 1920 / 4000 = 1440
        assert_eq!(calculate_width_cap((4000, 3000), 1920), Some((1920, 1440)));
    }

    #[test]
    fn width_cap_rounds_height() {
        // 2500 * 1920 / 3333 = 1440.14... → 1440
        assert_eq!(calculate_width_cap((3333, 2500), 1920), Some((1920, 1440)));
        // 1001 * 1920 / 2000 = 960.96 → 961
        assert_eq!(calculate_width_cap((2000, 1001), 1920), Some((1920, 961)));
    }

    #[test]
    fn width_cap_leaves_narrow_image() {
        assert_eq!(calculate_width_cap((1200, 5000), 1920), None);
    }

    #[test]
    fn width_cap_exact_width_is_untouched() {
        assert_eq!(calculate_width_cap((1920, 1280), 1920), None);
    }

    #[test]
    fn width_cap_keeps_at_least_one_pixel() {
        assert_eq!(calculate_width_cap((100_000, 1), 1920), Some((1920, 1)));
    }

    // =========================================================================
    // calculate_fit_within tests
    // =========================================================================

    #[test]
    fn fit_landscape_limited_by_width() {
        // 2000x1000 into 400x300: width-bound, 400x200
        assert_eq!(calculate_fit_within((2000, 1000), (400, 300)), Some((400, 200)));
    }

    #[test]
    fn fit_portrait_limited_by_height() {
        // 900x1200 into 400x300: height-bound, 225x300
        assert_eq!(calculate_fit_within((900, 1200), (400, 300)), Some((225, 300)));
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(calculate_fit_within((200, 100), (400, 300)), None);
        assert_eq!(calculate_fit_within((400, 300), (400, 300)), None);
    }

    #[test]
    fn fit_one_dimension_over_bounds() {
        // 500x100 into 400x300: 400x80
        assert_eq!(calculate_fit_within((500, 100), (400, 300)), Some((400, 80)));
    }

    #[test]
    fn fit_result_stays_inside_box() {
        for &(w, h) in &[(4032, 3024), (3024, 4032), (1999, 1499), (7, 5000)] {
            let (tw, th) = calculate_fit_within((w, h), (400, 300)).unwrap();
            assert!(tw <= 400 && th <= 300, "{w}x{h} → {tw}x{th}");
            assert!(tw >= 1 && th >= 1);
        }
    }

    // =========================================================================
    // calculate_target_dimensions tests
    // =========================================================================

    #[test]
    fn target_uses_width_cap_for_full() {
        let spec = ProfileSpec::full();
        assert_eq!(
            calculate_target_dimensions((3840, 2160), &spec),
            Some((1920, 1080))
        );
        // Tall but narrow: untouched even though it is very high
        assert_eq!(calculate_target_dimensions((1000, 8000), &spec), None);
    }

    #[test]
    fn target_uses_box_for_thumbnail() {
        let spec = ProfileSpec::thumbnail();
        assert_eq!(
            calculate_target_dimensions((3840, 2160), &spec),
            Some((400, 225))
        );
        assert_eq!(
            calculate_target_dimensions((1000, 8000), &spec),
            Some((38, 300))
        );
    }
}
