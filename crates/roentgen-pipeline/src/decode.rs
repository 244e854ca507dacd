//! Image decoding into single-channel intensity buffers.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the
//! 8-bit grayscale buffer every transform in this crate operates on.
//!
//! This is the first step of a session: raw bytes in, `GrayImage` out.

use image::GrayImage;

use crate::types::DecodeError;

/// Decode raw image bytes into a single-channel grayscale buffer.
///
/// Supports PNG, JPEG, BMP, and WebP formats (whatever the `image` crate
/// can decode). Color sources are reduced with the standard luminance
/// weighting `0.299*R + 0.587*G + 0.114*B`; already-grayscale sources
/// pass through unchanged.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyInput`] if `bytes` is empty.
/// Returns [`DecodeError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
/// Returns [`DecodeError::ZeroDimensions`] if the container decodes to
/// an image with no pixels.
#[must_use = "returns the decoded grayscale image"]
pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let gray = image::load_from_memory(bytes)?.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(DecodeError::ZeroDimensions {
            width: gray.width(),
            height: gray.height(),
        });
    }
    Ok(gray)
}
