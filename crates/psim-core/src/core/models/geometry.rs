use crate::core::utils::geometry::{doubled_signed_area, interpolate, midpoint, squared_distance};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Weight applied to the `p3 -> midpoint(p1, p2)` segment when locating a triangle's
/// representative point for flux plots.
pub const WEIGHTED_VERTEX_FRACTION: f64 = 2.0 / 3.0;

/// A 2-D coordinate in nanometres.
///
/// Points compare and hash by their coordinate pair, with `0.0` and `-0.0` treated as the
/// same coordinate so that equality and hashing agree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn key(&self) -> (u64, u64) {
        fn canonical_bits(v: f64) -> u64 {
            if v == 0.0 { 0 } else { v.to_bits() }
        }
        (canonical_bits(self.x), canonical_bits(self.y))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn midpoint(&self) -> Point {
        midpoint(self.p1, self.p2)
    }

    pub fn squared_length(&self) -> f64 {
        squared_distance(self.p1, self.p2)
    }
}

/// A triangle with ordered vertices.
///
/// Two triangles are equal only when their vertices match in the same order, which is how
/// duplicate cells are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        Self { p1, p2, p3 }
    }

    pub fn points(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn has_distinct_points(&self) -> bool {
        self.p1 != self.p2 && self.p2 != self.p3 && self.p3 != self.p1
    }

    /// The point two thirds of the way from `p3` towards the midpoint of `p1 -> p2`.
    ///
    /// Flux plots anchor their arrows on this point, so the coefficient is fixed.
    pub fn weighted_vertex(&self) -> Point {
        let base_midpoint = Line::new(self.p1, self.p2).midpoint();
        interpolate(self.p3, base_midpoint, WEIGHTED_VERTEX_FRACTION)
    }

    pub fn area(&self) -> f64 {
        doubled_signed_area(self.p1, self.p2, self.p3).abs() / 2.0
    }

    /// Lower-left and upper-right corners of the axis-aligned bounding box.
    pub fn bounds(&self) -> (Point, Point) {
        let xs = [self.p1.x, self.p2.x, self.p3.x];
        let ys = [self.p1.y, self.p2.y, self.p3.y];
        let min = |v: [f64; 3]| v.into_iter().fold(f64::INFINITY, f64::min);
        let max = |v: [f64; 3]| v.into_iter().fold(f64::NEG_INFINITY, f64::max);
        (
            Point::new(min(xs), min(ys)),
            Point::new(max(xs), max(ys)),
        )
    }
}
