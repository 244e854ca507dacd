//! External contour extraction from a binary edge map.
//!
//! Suzuki-Abe border following reports every border it finds, outer
//! borders and hole borders alike, each linked to its enclosing border.
//! Abnormality highlighting rings whole top-level regions, so this
//! module keeps only the borders with no parent and exposes the
//! enclosed area for size filtering.

use geo::{Area, LineString, Polygon};
use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::Point;

/// A closed region boundary traced from a binary image.
///
/// Points are pixel centers in trace order. The boundary is implicitly
/// closed: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour(Vec<Point>);

impl Contour {
    /// Create a new contour from a vector of boundary points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the contour has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of boundary points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all boundary points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Enclosed area in square pixels via the shoelace formula.
    ///
    /// Fewer than three points cannot bound a region and yield `0.0`.
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.0.len() < 3 {
            return 0.0;
        }
        let ring: Vec<(f64, f64)> = self.0.iter().map(|p| (p.x, p.y)).collect();
        Polygon::new(LineString::from(ring), vec![]).unsigned_area()
    }
}

/// Trace the outermost borders of white regions in a binary edge map.
///
/// Only top-level borders survive: hole borders and regions nested
/// inside another region's hole are both dropped, as are single-point
/// contours, which cannot bound an area.
#[must_use]
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    let contours: Vec<imageproc::contours::Contour<u32>> =
        imageproc::contours::find_contours(edges);

    contours
        .into_iter()
        .filter(|c| c.parent.is_none() && c.points.len() >= 2)
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(f64::from(p.x), f64::from(p.y)))
                .collect();
            Contour::new(points)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, image::Luma([value]));
            }
        }
    }

    #[test]
    fn empty_image_produces_no_contours() {
        let img = GrayImage::new(10, 10); // all black
        assert!(external_contours(&img).is_empty());
    }

    #[test]
    fn single_pixel_is_filtered_out() {
        // A lone white pixel traces as a 1-point contour, below the
        // 2-point minimum.
        let mut img = GrayImage::new(10, 10);
        img.put_pixel(5, 5, image::Luma([255]));
        assert!(external_contours(&img).is_empty());
    }

    #[test]
    fn filled_rectangle_has_shoelace_area() {
        // White 10x10 block: the traced boundary runs through the outermost
        // pixel centers, a 9x9 square in point coordinates.
        let mut img = GrayImage::new(20, 20);
        fill_rect(&mut img, 5, 5, 15, 15, 255);

        let result = external_contours(&img);
        assert_eq!(result.len(), 1, "expected one outer contour");
        let area = result[0].area();
        assert!(
            (area - 81.0).abs() < 1e-9,
            "expected area 81 for a 10x10 block, got {area}"
        );
    }

    #[test]
    fn hole_border_is_excluded() {
        // A square annulus has an outer border and a hole border; only
        // the outer one should survive.
        let mut img = GrayImage::new(20, 20);
        fill_rect(&mut img, 4, 4, 16, 16, 255);
        fill_rect(&mut img, 8, 8, 12, 12, 0);

        let result = external_contours(&img);
        assert_eq!(result.len(), 1, "expected the hole border to be dropped");
        let area = result[0].area();
        assert!(
            (area - 121.0).abs() < 1e-9,
            "expected the outer boundary area, got {area}"
        );
    }

    #[test]
    fn region_nested_inside_a_hole_is_excluded() {
        // A blob floating in a ring's hole has an outer border of its
        // own, but the ring already encloses it; only the ring's
        // outermost border is external.
        let mut img = GrayImage::new(40, 40);
        fill_rect(&mut img, 5, 5, 35, 35, 255);
        fill_rect(&mut img, 7, 7, 33, 33, 0);
        fill_rect(&mut img, 15, 15, 25, 25, 255);

        let result = external_contours(&img);
        assert_eq!(result.len(), 1, "expected only the ring's outer border");
        let area = result[0].area();
        assert!(
            (area - 841.0).abs() < 1e-9,
            "expected the ring's outer boundary area, got {area}"
        );
    }

    #[test]
    fn separate_regions_produce_separate_contours() {
        let mut img = GrayImage::new(30, 15);
        fill_rect(&mut img, 2, 2, 8, 8, 255);
        fill_rect(&mut img, 20, 2, 26, 8, 255);

        let result = external_contours(&img);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn degenerate_contour_has_zero_area() {
        let two = Contour::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert!((two.area() - 0.0).abs() < f64::EPSILON);
        assert_eq!(two.len(), 2);
        assert!(!two.is_empty());
    }
}
