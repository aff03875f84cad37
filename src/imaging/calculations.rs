//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Largest edge a resize may produce, in pixels.
pub const MAX_TARGET_EDGE: u32 = 65535;

/// Calculate the output dimensions for a resize request.
///
/// # Arguments
/// * `original` - Source image dimensions (width, height)
/// * `requested` - Requested (width, height); `0` on one edge means "derive it"
///
/// # Returns
/// * `Some((width, height))` - Final output dimensions, each at least 1px
/// * `None` - Both requested edges are zero, the source has a zero edge, or
///   an output edge would exceed [`MAX_TARGET_EDGE`]
///
/// Rules:
/// - height 0: `height = round(width × orig_h / orig_w)`
/// - width 0: `width = round(height × orig_w / orig_h)`
/// - both set: largest size that fits inside the box, aspect ratio preserved
///
/// # Examples
/// ```
/// # use photofx::imaging::calculate_target_dimensions;
/// assert_eq!(calculate_target_dimensions((400, 300), (200, 0)), Some((200, 150)));
/// assert_eq!(calculate_target_dimensions((400, 300), (200, 200)), Some((200, 150)));
/// assert_eq!(calculate_target_dimensions((400, 300), (0, 0)), None);
/// ```
pub fn calculate_target_dimensions(original: (u32, u32), requested: (u32, u32)) -> Option<(u32, u32)> {
    let (orig_w, orig_h) = original;
    let (req_w, req_h) = requested;

    if orig_w == 0 || orig_h == 0 {
        return None;
    }

    let target = match (req_w, req_h) {
        (0, 0) => return None,
        (w, 0) => (w, scale_edge(w, orig_h, orig_w)),
        (0, h) => (scale_edge(h, orig_w, orig_h), h),
        (w, h) => {
            let ratio_w = w as f64 / orig_w as f64;
            let ratio_h = h as f64 / orig_h as f64;
            if ratio_w <= ratio_h {
                // Width is the binding edge
                (w, scale_edge(w, orig_h, orig_w).min(h))
            } else {
                (scale_edge(h, orig_w, orig_h).min(w), h)
            }
        }
    };

    (target.0 <= MAX_TARGET_EDGE && target.1 <= MAX_TARGET_EDGE).then_some(target)
}

/// `round(known × numerator / denominator)`, never below 1.
fn scale_edge(known: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (known as f64 * numerator as f64 / denominator as f64).round() as u32;
    scaled.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_height_from_width() {
        // 400x300 at width 200 → 200x150
        assert_eq!(calculate_target_dimensions((400, 300), (200, 0)), Some((200, 150)));
    }

    #[test]
    fn derives_width_from_height() {
        // 400x300 at height 150 → 200x150
        assert_eq!(calculate_target_dimensions((400, 300), (0, 150)), Some((200, 150)));
    }

    #[test]
    fn derived_edge_is_rounded() {
        // 1000x333 at width 100 → 33.3 → 33
        assert_eq!(calculate_target_dimensions((1000, 333), (100, 0)), Some((100, 33)));
        // 1000x335 at width 100 → 33.5 → 34
        assert_eq!(calculate_target_dimensions((1000, 335), (100, 0)), Some((100, 34)));
    }

    #[test]
    fn upscaling_is_allowed() {
        assert_eq!(calculate_target_dimensions((100, 50), (400, 0)), Some((400, 200)));
    }

    #[test]
    fn box_fit_landscape_source_in_square_box() {
        // Width binds: 400x300 into 200x200 → 200x150
        assert_eq!(calculate_target_dimensions((400, 300), (200, 200)), Some((200, 150)));
    }

    #[test]
    fn box_fit_portrait_source_in_square_box() {
        // Height binds: 300x400 into 200x200 → 150x200
        assert_eq!(calculate_target_dimensions((300, 400), (200, 200)), Some((150, 200)));
    }

    #[test]
    fn box_fit_same_aspect_is_exact() {
        assert_eq!(calculate_target_dimensions((800, 600), (400, 300)), Some((400, 300)));
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        assert_eq!(calculate_target_dimensions((10000, 10), (100, 0)), Some((100, 1)));
    }

    #[test]
    fn oversized_requested_edge_is_rejected() {
        assert_eq!(calculate_target_dimensions((40, 30), (100_000, 0)), None);
        assert_eq!(calculate_target_dimensions((40, 30), (0, MAX_TARGET_EDGE + 1)), None);
    }

    #[test]
    fn oversized_derived_edge_is_rejected() {
        // 10x1000 at width 1000 → height 100000
        assert_eq!(calculate_target_dimensions((10, 1000), (1000, 0)), None);
    }

    #[test]
    fn largest_edge_is_accepted() {
        assert_eq!(
            calculate_target_dimensions((100, 50), (MAX_TARGET_EDGE, 0)),
            Some((MAX_TARGET_EDGE, 32768))
        );
    }

    #[test]
    fn both_zero_is_rejected() {
        assert_eq!(calculate_target_dimensions((400, 300), (0, 0)), None);
    }

    #[test]
    fn degenerate_source_is_rejected() {
        assert_eq!(calculate_target_dimensions((0, 300), (200, 0)), None);
        assert_eq!(calculate_target_dimensions((400, 0), (200, 0)), None);
    }
}
