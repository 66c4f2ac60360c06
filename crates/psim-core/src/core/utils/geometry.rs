use crate::core::models::geometry::Point;
use nalgebra::{Rotation2, Vector2};

impl From<Point> for Vector2<f64> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Moves `distance` away from `anchor` along the direction rotated `angle_degrees`
/// counter-clockwise from the positive x axis.
pub fn offset_along(anchor: Point, distance: f64, angle_degrees: f64) -> Point {
    let direction = Rotation2::new(angle_degrees.to_radians()) * Vector2::x();
    (Vector2::from(anchor) + direction * distance).into()
}

/// The point `fraction` of the way from `from` towards `to`.
pub fn interpolate(from: Point, to: Point, fraction: f64) -> Point {
    let start = Vector2::from(from);
    (start + (Vector2::from(to) - start) * fraction).into()
}

/// Halfway between `a` and `b`, as `(a + b) / 2`.
pub fn midpoint(a: Point, b: Point) -> Point {
    ((Vector2::from(a) + Vector2::from(b)) / 2.0).into()
}

/// Closes the parallelogram spanned by `a -> b` and `a -> c`.
pub fn parallelogram_closure(a: Point, b: Point, c: Point) -> Point {
    (Vector2::from(b) + Vector2::from(c) - Vector2::from(a)).into()
}

pub fn squared_distance(p1: Point, p2: Point) -> f64 {
    (Vector2::from(p2) - Vector2::from(p1)).norm_squared()
}

/// Twice the signed area of the triangle `(p1, p2, p3)`; positive when counter-clockwise.
pub fn doubled_signed_area(p1: Point, p2: Point, p3: Point) -> f64 {
    let u = Vector2::from(p2) - Vector2::from(p1);
    let v = Vector2::from(p3) - Vector2::from(p1);
    u.perp(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_along_zero_degrees_moves_along_x() {
        let p = offset_along(Point::new(1.0, 2.0), 3.0, 0.0);
        assert_relative_eq!(p.x, 4.0);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn offset_along_right_angle_moves_along_y() {
        let p = offset_along(Point::new(0.0, 0.0), 2.0, 90.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0);
    }

    #[test]
    fn interpolate_returns_endpoints_at_zero_and_one() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(6.0, -3.0);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        assert_eq!(interpolate(a, b, 0.5), Point::new(3.0, -1.5));
    }

    #[test]
    fn parallelogram_closure_completes_unit_square() {
        let d = parallelogram_closure(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        );
        assert_eq!(d, Point::new(1.0, 1.0));
    }

    #[test]
    fn doubled_signed_area_reflects_orientation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(0.0, 2.0);
        assert_relative_eq!(doubled_signed_area(a, b, c), 4.0);
        assert_relative_eq!(doubled_signed_area(a, c, b), -4.0);
    }

    #[test]
    fn squared_distance_is_not_rooted() {
        assert_relative_eq!(
            squared_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
            25.0
        );
    }
}
