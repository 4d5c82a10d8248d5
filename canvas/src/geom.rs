#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point (or free vector) in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `self` to `other`.
    #[must_use]
    pub fn vector_to(self, other: Point) -> Point {
        Point { x: other.x - self.x, y: other.y - self.y }
    }

    #[must_use]
    pub fn distance_squared(self, other: Point) -> f64 {
        let d = self.vector_to(other);
        d.x * d.x + d.y * d.y
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Euclidean length when the point is read as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Z component of the 2D cross product `a × b`.
#[must_use]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - b.x * a.y
}
