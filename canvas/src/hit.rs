//! Hit-testing: does a canvas point fall inside a shape's selectable area?
//!
//! Every predicate here is pure. When several shapes match one point the
//! caller picks a winner; see `CanvasDoc::topmost_shape_id_at`.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::LINE_HIT_TOLERANCE;
use crate::geom::{Point, cross};
use crate::shape::{Geometry, Shape};

/// Test whether `pt` lies inside `shape`.
#[must_use]
pub fn is_point_in_shape_area(shape: &Shape, pt: Point) -> bool {
    match *shape.geometry() {
        Geometry::Line { from, to } => line_contains(from, to, pt, LINE_HIT_TOLERANCE),
        Geometry::Rectangle { from, to } => rect_contains(from, to, pt),
        Geometry::Circle { center, radius } => circle_contains(center, radius, pt),
        Geometry::Triangle { p1, p2, p3 } => triangle_contains(p1, p2, p3, pt),
    }
}

/// Distance from `pt` to the infinite line through `from` and `to` is within
/// `tolerance`. A zero-length line falls back to the distance to `from`.
#[must_use]
pub fn line_contains(from: Point, to: Point, pt: Point, tolerance: f64) -> bool {
    let dir = from.vector_to(to);
    let len = dir.length();
    if len <= f64::EPSILON {
        return from.distance(pt) <= tolerance;
    }
    let distance = cross(dir, pt.vector_to(from)).abs() / len;
    distance <= tolerance
}

/// Inclusive containment in the box spanned by two drag corners, whichever
/// direction the drag went.
#[must_use]
pub fn rect_contains(a: Point, b: Point, pt: Point) -> bool {
    let (top_left, bottom_right) = normalize_corners(a, b);
    pt.x >= top_left.x && pt.x <= bottom_right.x && pt.y >= top_left.y && pt.y <= bottom_right.y
}

/// Canonical (top-left, bottom-right) corners of the box spanned by `a` and `b`.
#[must_use]
pub fn normalize_corners(a: Point, b: Point) -> (Point, Point) {
    (Point::new(a.x.min(b.x), a.y.min(b.y)), Point::new(a.x.max(b.x), a.y.max(b.y)))
}

#[must_use]
pub fn circle_contains(center: Point, radius: f64, pt: Point) -> bool {
    center.distance_squared(pt) <= radius * radius
}

/// Strict interior test by edge cross-product signs. Points on an edge are
/// outside.
#[must_use]
pub fn triangle_contains(p1: Point, p2: Point, p3: Point, pt: Point) -> bool {
    let cp1 = cross(p1.vector_to(p2), p1.vector_to(pt));
    let cp2 = cross(p2.vector_to(p3), p2.vector_to(pt));
    let cp3 = cross(p3.vector_to(p1), p3.vector_to(pt));

    (cp1 > 0.0 && cp2 > 0.0 && cp3 > 0.0) || (cp1 < 0.0 && cp2 < 0.0 && cp3 < 0.0)
}
