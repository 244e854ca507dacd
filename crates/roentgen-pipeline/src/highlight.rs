//! Abnormality highlighting: ring suspicious regions of the image.
//!
//! Edges are traced into outer contours, contours are filtered by
//! enclosed area, and each surviving region is wrapped in its minimal
//! enclosing circle, drawn as a two-pixel ring.
//!
//! # Lossy marker collapse
//!
//! Rings are drawn in [`MARKER_COLOR`] on an RGB working copy, then the
//! copy is collapsed back to the pipeline's single-channel format with a
//! fixed-point BT.601 weighting. The collapse is exact for unmarked
//! pixels (the weights sum to exactly 2^14) but not for the marker
//! itself: the red rings land at luminance [`MARKER_LUMA`] in the output
//! rather than staying red.

use image::buffer::ConvertBuffer;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;

use crate::circle::{Circle, min_enclosing_circle};
use crate::contour::external_contours;
use crate::edge;
use crate::types::HighlightParams;

/// Color of the rings drawn on the RGB working copy.
pub const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Grayscale value [`MARKER_COLOR`] collapses to in the output.
pub const MARKER_LUMA: u8 = 76;

/// Ring every sufficiently large edge-bounded region of the image.
///
/// Canny edge detection with `params.low`/`params.high` feeds outer
/// contour tracing; contours whose enclosed area is strictly greater
/// than `params.min_area` square pixels are wrapped in their minimal
/// enclosing circle and marked with a two-pixel ring. An image with no
/// qualifying region comes back unchanged.
#[must_use = "returns the highlighted image without modifying the input"]
pub fn highlight(image: &GrayImage, params: &HighlightParams) -> GrayImage {
    let edges = edge::canny(image, params.low, params.high);
    let mut canvas: RgbImage = image.convert();

    for contour in external_contours(&edges) {
        if contour.area() <= params.min_area {
            continue;
        }
        let Some(circle) = min_enclosing_circle(contour.points()) else {
            continue;
        };
        draw_ring(&mut canvas, circle);
    }

    collapse_to_gray(&canvas)
}

/// Draw a ring two pixels thick so it stays visible at typical
/// radiograph resolutions.
fn draw_ring(canvas: &mut RgbImage, circle: Circle) {
    let center = (to_pixel(circle.center.x), to_pixel(circle.center.y));
    let radius = to_pixel(circle.radius);
    draw_hollow_circle_mut(canvas, center, radius, MARKER_COLOR);
    if radius > 1 {
        draw_hollow_circle_mut(canvas, center, radius - 1, MARKER_COLOR);
    }
}

/// Nearest-integer pixel coordinate for drawing.
#[allow(clippy::cast_possible_truncation)]
fn to_pixel(v: f64) -> i32 {
    v.round() as i32
}

/// Collapse an RGB canvas back to single-channel grayscale.
fn collapse_to_gray(canvas: &RgbImage) -> GrayImage {
    GrayImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let Rgb([r, g, b]) = *canvas.get_pixel(x, y);
        Luma([luma(r, g, b)])
    })
}

/// Fixed-point BT.601 luminance: `(4899 R + 9617 G + 1868 B + 2^13) >> 14`.
///
/// The weights sum to exactly 2^14, so pixels with equal channels map
/// back to their channel value unchanged.
#[allow(clippy::cast_possible_truncation)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    const R_WEIGHT: u32 = 4899;
    const G_WEIGHT: u32 = 9617;
    const B_WEIGHT: u32 = 1868;
    const HALF: u32 = 1 << 13;

    let weighted = R_WEIGHT * u32::from(r) + G_WEIGHT * u32::from(g) + B_WEIGHT * u32::from(b);
    ((weighted + HALF) >> 14) as u8
}
