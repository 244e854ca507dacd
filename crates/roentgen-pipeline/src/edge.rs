//! Two-threshold Canny edge detection.
//!
//! Wraps [`imageproc::edges::canny`] to turn a grayscale buffer into a
//! binary edge map: 255 for edge pixels, 0 for background, nothing in
//! between. The session uses this both as a destructive transform in
//! its own right and as the first stage of abnormality highlighting.

use image::GrayImage;

/// Minimum allowed Canny threshold.
///
/// A low threshold of zero treats every pixel with any gradient as a
/// potential edge, producing a degenerate edge map dense enough to
/// swamp the contour stage of highlighting.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
///
/// Internally the detector smooths, computes Sobel gradients, thins
/// ridges by non-maximum suppression, and links edges by two-threshold
/// hysteresis. Gradient magnitudes above `high_threshold` are definite
/// edges; those between the thresholds count only when connected to a
/// definite edge.
///
/// Both thresholds are clamped to at least [`MIN_THRESHOLD`] and
/// `low_threshold` is clamped to at most `high_threshold`, so any pair
/// of caller-supplied values yields a well-formed invocation.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}
