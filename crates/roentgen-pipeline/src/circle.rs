//! Exact minimal enclosing circle of a point set.
//!
//! Welzl-style incremental construction: points are taken one at a time,
//! and any point found outside the current circle becomes a boundary
//! point of the recomputed one. The minimal enclosing circle is unique,
//! so input order affects only the amount of work, never the result.
//!
//! Implemented here directly; none of the crates already in the tree
//! provide it.

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// A circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
}

impl Circle {
    /// Relative slack applied to the radius in containment tests, so that
    /// the points defining a circle still test as contained after rounding.
    const CONTAINS_SLACK: f64 = 1e-14;

    /// Circle with the segment `a`-`b` as its diameter.
    #[must_use]
    pub fn from_diameter(a: Point, b: Point) -> Self {
        let center = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        let radius = center.distance(a).max(center.distance(b));
        Self { center, radius }
    }

    /// Returns `true` if `p` lies inside or on the circle, within
    /// [`Self::CONTAINS_SLACK`] relative tolerance.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius * (1.0 + Self::CONTAINS_SLACK)
    }
}

/// Compute the exact minimal enclosing circle of a point set.
///
/// Returns `None` for an empty slice. A single point yields a circle of
/// radius zero.
#[must_use = "returns the enclosing circle"]
pub fn min_enclosing_circle(points: &[Point]) -> Option<Circle> {
    let mut circle: Option<Circle> = None;
    for (i, &p) in points.iter().enumerate() {
        match circle {
            Some(c) if c.contains(p) => {}
            _ => circle = Some(circle_through_point(&points[..=i], p)),
        }
    }
    circle
}

/// Minimal circle enclosing `points` with `p` constrained to the boundary.
fn circle_through_point(points: &[Point], p: Point) -> Circle {
    let mut circle = Circle {
        center: p,
        radius: 0.0,
    };
    for (i, &q) in points.iter().enumerate() {
        if circle.contains(q) {
            continue;
        }
        circle = if circle.radius == 0.0 {
            Circle::from_diameter(p, q)
        } else {
            circle_through_two_points(&points[..=i], p, q)
        };
    }
    circle
}

/// Minimal circle enclosing `points` with both `p` and `q` on the boundary.
///
/// Circumcircle candidates are tracked separately for the two sides of the
/// chord `p`->`q`; on each side the winner is the circle whose center sits
/// farthest out, and the smaller of the two winners encloses everything.
fn circle_through_two_points(points: &[Point], p: Point, q: Point) -> Circle {
    let chord = Circle::from_diameter(p, q);
    let mut left: Option<Circle> = None;
    let mut right: Option<Circle> = None;

    for &r in points {
        if chord.contains(r) {
            continue;
        }
        let side = cross(p, q, r);
        let Some(candidate) = circumcircle(p, q, r) else {
            continue;
        };
        let center_side = cross(p, q, candidate.center);
        if side > 0.0 {
            if left.is_none_or(|best| center_side > cross(p, q, best.center)) {
                left = Some(candidate);
            }
        } else if side < 0.0 && right.is_none_or(|best| center_side < cross(p, q, best.center)) {
            right = Some(candidate);
        }
    }

    match (left, right) {
        (None, None) => chord,
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
            if l.radius <= r.radius {
                l
            } else {
                r
            }
        }
    }
}

/// Z component of the cross product `(b - a) x (c - a)`.
///
/// The sign distinguishes the two sides of the directed line `a`->`b`;
/// zero means `c` is collinear with it.
fn cross(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x).mul_add(c.y - a.y, -((b.y - a.y) * (c.x - a.x)))
}

/// Circumcircle of three points, or `None` when they are collinear.
///
/// Coordinates are taken relative to the midpoint of the bounding box to
/// keep the determinant well conditioned.
fn circumcircle(a: Point, b: Point, c: Point) -> Option<Circle> {
    let ox = (a.x.min(b.x).min(c.x) + a.x.max(b.x).max(c.x)) / 2.0;
    let oy = (a.y.min(b.y).min(c.y) + a.y.max(b.y).max(c.y)) / 2.0;

    let (ax, ay) = (a.x - ox, a.y - oy);
    let (bx, by) = (b.x - ox, b.y - oy);
    let (cx, cy) = (c.x - ox, c.y - oy);

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d == 0.0 {
        return None;
    }

    let a_norm = ax.mul_add(ax, ay * ay);
    let b_norm = bx.mul_add(bx, by * by);
    let c_norm = cx.mul_add(cx, cy * cy);
    let x = ox + (a_norm * (by - cy) + b_norm * (cy - ay) + c_norm * (ay - by)) / d;
    let y = oy + (a_norm * (cx - bx) + b_norm * (ax - cx) + c_norm * (bx - ax)) / d;

    let center = Point::new(x, y);
    let radius = center
        .distance(a)
        .max(center.distance(b))
        .max(center.distance(c));
    Some(Circle { center, radius })
}
