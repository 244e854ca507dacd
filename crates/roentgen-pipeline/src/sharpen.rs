//! Sharpening via a fixed 3×3 convolution kernel.
//!
//! The kernel
//!
//! ```text
//!  0 -1  0
//! -1  5 -1
//!  0 -1  0
//! ```
//!
//! adds the image's Laplacian back onto itself, boosting local contrast
//! wherever intensity changes. Border samples are replicated and each
//! output is clamped to `[0, 255]`. Unlike brightness/contrast, this
//! transform is cumulative: the session applies it to the current
//! processed image.

use image::GrayImage;
use imageproc::filter::filter_clamped;
use imageproc::kernel::Kernel;

/// Taps of the sharpening kernel in row-major order.
const SHARPEN_TAPS: [i32; 9] = [0, -1, 0, -1, 5, -1, 0, -1, 0];

/// Sharpen the image with the fixed 3×3 kernel.
///
/// A uniform image passes through unchanged (the taps sum to 1); an
/// intensity step gains undershoot on its dark side and overshoot on
/// its bright side, which reads as added edge definition.
#[must_use = "returns the sharpened image"]
pub fn sharpen(image: &GrayImage) -> GrayImage {
    filter_clamped(image, Kernel::new(&SHARPEN_TAPS, 3, 3))
}
