//! Contrast-limited adaptive histogram equalization (CLAHE).
//!
//! Global equalization stretches one histogram for the whole frame, but
//! radiographs put bone, soft tissue, and background into narrow,
//! different intensity bands, so the useful stretch differs by region.
//! CLAHE divides the image into a grid of tiles, builds a clip-limited
//! equalization mapping per tile, and bilinearly interpolates the four
//! surrounding tile mappings at every pixel so tile boundaries stay
//! invisible.
//!
//! Edge tiles sample outside the image by border replication, so every
//! tile histogram covers the same number of samples. All tiles of a
//! uniform image therefore share one mapping, and the output is uniform
//! again.

use image::GrayImage;

use crate::types::EqualizeParams;

/// Number of intensity levels in an 8-bit histogram.
const LEVELS: usize = 256;

/// Apply CLAHE with the given clip limit and tile grid.
///
/// Each tile histogram bin is capped at `clip_limit × tile_area / 256`
/// counts (floored, but at least 1); the clipped excess is returned to
/// the histogram as an even share per bin plus a remainder spread at a
/// fixed stride. Non-positive clip limits disable clipping, leaving
/// plain tile-local equalization. Zero grid entries are treated as 1.
#[must_use = "returns the equalized image"]
pub fn adaptive_equalize(image: &GrayImage, params: &EqualizeParams) -> GrayImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let grid_cols = params.tile_grid.0.max(1);
    let grid_rows = params.tile_grid.1.max(1);
    let tile_w = w.div_ceil(grid_cols);
    let tile_h = h.div_ceil(grid_rows);

    let luts = tile_luts(image, params.clip_limit, grid_cols, grid_rows, tile_w, tile_h);

    GrayImage::from_fn(w, h, |x, y| {
        let value = usize::from(image.get_pixel(x, y).0[0]);
        let (col0, col1, fx) = interpolation_span(x, tile_w, grid_cols);
        let (row0, row1, fy) = interpolation_span(y, tile_h, grid_rows);

        let lut_at =
            |row: u32, col: u32| f64::from(luts[tile_index(row, col, grid_cols)][value]);
        let top = (1.0 - fx) * lut_at(row0, col0) + fx * lut_at(row0, col1);
        let bottom = (1.0 - fx) * lut_at(row1, col0) + fx * lut_at(row1, col1);
        image::Luma([round_to_u8((1.0 - fy) * top + fy * bottom)])
    })
}

/// Build one clipped-equalization lookup table per tile, row-major.
fn tile_luts(
    image: &GrayImage,
    clip_limit: f64,
    grid_cols: u32,
    grid_rows: u32,
    tile_w: u32,
    tile_h: u32,
) -> Vec<[u8; LEVELS]> {
    let tile_area = u64::from(tile_w) * u64::from(tile_h);
    let mut luts = Vec::with_capacity(tile_index(grid_rows, 0, grid_cols));
    for row in 0..grid_rows {
        for col in 0..grid_cols {
            let x0 = u64::from(col) * u64::from(tile_w);
            let y0 = u64::from(row) * u64::from(tile_h);
            let mut hist = tile_histogram(image, x0, y0, tile_w, tile_h);
            if clip_limit > 0.0 {
                clip_histogram(&mut hist, clip_limit, tile_area);
            }
            luts.push(equalization_lut(&hist, tile_area));
        }
    }
    luts
}

/// Histogram of one tile, replicating border samples so the count is
/// always `tile_w × tile_h`.
fn tile_histogram(
    image: &GrayImage,
    x0: u64,
    y0: u64,
    tile_w: u32,
    tile_h: u32,
) -> [u64; LEVELS] {
    let max_x = u64::from(image.width() - 1);
    let max_y = u64::from(image.height() - 1);
    let mut hist = [0u64; LEVELS];
    for dy in 0..u64::from(tile_h) {
        let sy = (y0 + dy).min(max_y);
        for dx in 0..u64::from(tile_w) {
            let sx = (x0 + dx).min(max_x);
            let value = image.get_pixel(narrow(sx), narrow(sy)).0[0];
            hist[usize::from(value)] += 1;
        }
    }
    hist
}

/// Narrow a replicated coordinate back to the image's index width.
///
/// Coordinates are clamped against the image bounds before this is
/// called, so the value always fits.
#[allow(clippy::cast_possible_truncation)]
const fn narrow(v: u64) -> u32 {
    v as u32
}

/// Cap each bin at the clip ceiling and redistribute the excess.
///
/// The remainder after the even share is spread at stride
/// `max(256 / remainder, 1)` starting from bin 0, so at most one extra
/// count lands on any bin. Casts are safe: the remainder is < 256.
#[allow(clippy::cast_possible_truncation)]
fn clip_histogram(hist: &mut [u64; LEVELS], clip_limit: f64, tile_area: u64) {
    let ceiling = clip_ceiling(clip_limit, tile_area);
    let mut excess = 0u64;
    for bin in hist.iter_mut() {
        if *bin > ceiling {
            excess += *bin - ceiling;
            *bin = ceiling;
        }
    }
    if excess == 0 {
        return;
    }

    let share = excess / 256;
    for bin in hist.iter_mut() {
        *bin += share;
    }

    let mut remainder = (excess % 256) as usize;
    if remainder == 0 {
        return;
    }
    let stride = (LEVELS / remainder).max(1);
    let mut i = 0;
    while remainder > 0 && i < LEVELS {
        hist[i] += 1;
        remainder -= 1;
        i += stride;
    }
}

/// Per-bin ceiling: `clip_limit × tile_area / 256`, floored, at least 1.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn clip_ceiling(clip_limit: f64, tile_area: u64) -> u64 {
    ((clip_limit * tile_area as f64 / 256.0) as u64).max(1)
}

/// Cumulative mapping scaled so a full tile's mass reaches level 255.
#[allow(clippy::cast_precision_loss)]
fn equalization_lut(hist: &[u64; LEVELS], tile_area: u64) -> [u8; LEVELS] {
    let scale = 255.0 / tile_area as f64;
    let mut lut = [0u8; LEVELS];
    let mut cumulative = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        cumulative += count;
        *entry = round_to_u8(cumulative as f64 * scale);
    }
    lut
}

/// Neighboring tile indices and blend weight along one axis.
///
/// Pixels before the first tile center or past the last clamp to the
/// boundary tile with zero blend, the standard CLAHE edge treatment.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interpolation_span(coord: u32, tile_extent: u32, grid: u32) -> (u32, u32, f64) {
    let pos = (f64::from(coord) + 0.5) / f64::from(tile_extent) - 0.5;
    if pos <= 0.0 {
        return (0, 0, 0.0);
    }
    let lower = pos.floor() as u32;
    if lower + 1 >= grid {
        return (grid - 1, grid - 1, 0.0);
    }
    (lower, lower + 1, pos - pos.floor())
}

/// Row-major tile index. Safe: grids fitting in memory fit in `usize`.
#[allow(clippy::cast_possible_truncation)]
const fn tile_index(row: u32, col: u32, grid_cols: u32) -> usize {
    row as usize * grid_cols as usize + col as usize
}

/// Round a blended level to the nearest representable sample.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
