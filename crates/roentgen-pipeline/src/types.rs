//! Shared types for the roentgen transform pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference pixel
/// buffers without depending on `image` directly.
pub use image::GrayImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Brightness/contrast remap parameters.
///
/// The session applies these to its baseline image rather than the
/// current processed image, so repeated calls with fresh slider values
/// replace one another instead of compounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrightnessContrast {
    /// Multiplicative contrast factor (1.0 leaves the image unchanged).
    pub contrast: f64,
    /// Additive brightness offset (0 leaves the image unchanged).
    pub brightness: i32,
}

impl BrightnessContrast {
    /// Identity contrast factor.
    pub const DEFAULT_CONTRAST: f64 = 1.0;
    /// Identity brightness offset.
    pub const DEFAULT_BRIGHTNESS: i32 = 0;

    /// Build parameters from host-level raw slider values, where
    /// contrast arrives as an integer percentage (raw 150 → factor 1.5).
    #[must_use]
    pub fn from_raw(brightness: i32, contrast_raw: i32) -> Self {
        Self {
            contrast: f64::from(contrast_raw) / 100.0,
            brightness,
        }
    }
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self {
            contrast: Self::DEFAULT_CONTRAST,
            brightness: Self::DEFAULT_BRIGHTNESS,
        }
    }
}

/// Two-threshold edge detector parameters.
///
/// `low` must not exceed `high`; [`crate::edge::canny`] clamps both to a
/// small positive floor and reorders them rather than rejecting
/// out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CannyParams {
    /// Low hysteresis threshold. Gradient magnitudes between `low` and
    /// `high` become edges only when connected to a strong edge.
    pub low: f32,
    /// High hysteresis threshold. Gradient magnitudes above this value
    /// are definite edges.
    pub high: f32,
}

impl CannyParams {
    /// Conventional low threshold for 8-bit radiographs.
    pub const DEFAULT_LOW: f32 = 50.0;
    /// Conventional high threshold for 8-bit radiographs.
    pub const DEFAULT_HIGH: f32 = 150.0;
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
        }
    }
}

/// Adaptive (tile-local) histogram equalization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualizeParams {
    /// Histogram clip factor: each tile bin is capped at
    /// `clip_limit × tile_area / 256` counts before the excess is
    /// redistributed. Higher values allow stronger local contrast.
    pub clip_limit: f64,
    /// Tile grid as (columns, rows).
    pub tile_grid: (u32, u32),
}

impl EqualizeParams {
    /// Default clip factor.
    pub const DEFAULT_CLIP_LIMIT: f64 = 2.0;
    /// Default tile grid.
    pub const DEFAULT_TILE_GRID: (u32, u32) = (8, 8);
}

impl Default for EqualizeParams {
    fn default() -> Self {
        Self {
            clip_limit: Self::DEFAULT_CLIP_LIMIT,
            tile_grid: Self::DEFAULT_TILE_GRID,
        }
    }
}

/// Abnormality highlighting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightParams {
    /// Low threshold for the internal edge detection pass.
    pub low: f32,
    /// High threshold for the internal edge detection pass.
    pub high: f32,
    /// Contours whose enclosed area (in square pixels) does not exceed
    /// this value are ignored.
    pub min_area: f64,
}

impl HighlightParams {
    /// Conventional minimum contour area in square pixels.
    pub const DEFAULT_MIN_AREA: f64 = 100.0;
}

impl Default for HighlightParams {
    fn default() -> Self {
        Self {
            low: CannyParams::DEFAULT_LOW,
            high: CannyParams::DEFAULT_HIGH,
            min_area: Self::DEFAULT_MIN_AREA,
        }
    }
}

/// Histogram anomaly check parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyParams {
    /// Number of equal-width intensity buckets over `[0, 256)`.
    pub bins: u32,
    /// Anomaly threshold for the darkest bucket's pixel count.
    pub dark_threshold: u64,
    /// Anomaly threshold for the brightest bucket's pixel count.
    pub bright_threshold: u64,
}

impl AnomalyParams {
    /// Default bucket count.
    pub const DEFAULT_BINS: u32 = 10;
    /// Default darkest-bucket threshold in pixels.
    pub const DEFAULT_DARK_THRESHOLD: u64 = 1000;
    /// Default brightest-bucket threshold in pixels.
    pub const DEFAULT_BRIGHT_THRESHOLD: u64 = 1000;
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self {
            bins: Self::DEFAULT_BINS,
            dark_threshold: Self::DEFAULT_DARK_THRESHOLD,
            bright_threshold: Self::DEFAULT_BRIGHT_THRESHOLD,
        }
    }
}

/// Errors that can occur while decoding source bytes into a grayscale
/// buffer.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The decoded image has a zero dimension.
    #[error("decoded image has zero dimension ({width}x{height})")]
    ZeroDimensions {
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },
}
