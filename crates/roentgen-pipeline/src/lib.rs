//! roentgen-pipeline: pure grayscale transform library (sans-IO).
//!
//! Every function here maps in-memory buffers to new in-memory buffers:
//! decode -> denoise on ingest, then the individual enhancement
//! transforms (brightness/contrast, sharpen, Canny edges, adaptive
//! equalization, abnormality highlighting) and the read-only exposure
//! check. Nothing in this crate touches the filesystem or keeps state;
//! sequencing and undo history live in `roentgen-session`.

pub mod adjust;
pub mod circle;
pub mod contour;
pub mod decode;
pub mod denoise;
pub mod edge;
pub mod equalize;
pub mod highlight;
pub mod histogram;
pub mod sharpen;
pub mod types;

pub use adjust::adjust;
pub use circle::{Circle, min_enclosing_circle};
pub use contour::{Contour, external_contours};
pub use decode::decode_grayscale;
pub use denoise::denoise;
pub use edge::canny;
pub use equalize::adaptive_equalize;
pub use highlight::{MARKER_LUMA, highlight};
pub use histogram::{AnomalyReport, check_anomaly, histogram};
pub use sharpen::sharpen;
pub use types::{
    AnomalyParams, BrightnessContrast, CannyParams, DecodeError, EqualizeParams, GrayImage,
    HighlightParams, Point,
};

/// Decode raw image bytes and apply the standard ingest denoise.
///
/// This produces the buffer every subsequent transform starts from: a
/// 5x5 median filter knocks out salt-and-pepper speckle, then a light
/// Gaussian pass smooths sensor grain. Denoising runs exactly once per
/// image, here.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyInput`] if `bytes` is empty,
/// [`DecodeError::ImageDecode`] if no decoder recognizes the data, and
/// [`DecodeError::ZeroDimensions`] if the container reports an empty
/// image.
pub fn decode_and_denoise(bytes: &[u8]) -> Result<GrayImage, DecodeError> {
    let decoded = decode::decode_grayscale(bytes)?;
    Ok(denoise::denoise(&decoded))
}
