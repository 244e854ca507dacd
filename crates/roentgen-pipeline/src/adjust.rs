//! Brightness and contrast adjustment.
//!
//! Remaps every sample as `clamp(round(s·contrast + brightness), 0, 255)`.
//! Since the mapping depends only on the sample value, it is evaluated
//! once per possible intensity into a 256-entry lookup table and applied
//! with a single pass over the buffer.
//!
//! The session applies this transform to its baseline image, not the
//! current processed image: fresh slider values replace the previous
//! adjustment instead of compounding it.

use image::GrayImage;

use crate::types::BrightnessContrast;

/// Apply a brightness/contrast remap to every sample.
///
/// Each output sample is `clamp(round(s·contrast + brightness), 0, 255)`.
/// The default parameters (contrast 1.0, brightness 0) reproduce the
/// input byte-identically.
#[must_use = "returns the adjusted image"]
pub fn adjust(image: &GrayImage, params: &BrightnessContrast) -> GrayImage {
    let lut = build_lut(params);
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = lut[usize::from(pixel.0[0])];
    }
    out
}

/// Precompute the sample remap table for one parameter set.
fn build_lut(params: &BrightnessContrast) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for value in 0u16..=255 {
        let mapped = f64::from(value).mul_add(params.contrast, f64::from(params.brightness));
        lut[usize::from(value)] = saturate(mapped);
    }
    lut
}

/// Round to the nearest sample value, clamped to the valid range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate(mapped: f64) -> u8 {
    mapped.round().clamp(0.0, 255.0) as u8
}
