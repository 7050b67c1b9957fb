//! 2D point primitives shared by every resolution stage.

use nalgebra::{Point2, Vector2};
use ndarray::Array2;

/// Unlabelled 2D input point (e.g. a touch contact).
pub type Point = Point2<f64>;

/// Direction vector between two points.
pub type Direction = Vector2<f64>;

/// Convenience constructor used throughout the pipeline and its tests.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn distance_squared(a: &Point, b: &Point) -> f64 {
    (b - a).norm_squared()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (b - a).norm()
}

/// Angle at `vertex` between the edges to `prev` and `next`, in degrees.
///
/// Uses the signed `atan2(cross, dot)` form and drops the sign, so the result
/// lies in `[0, 180]`.
pub fn interior_angle_degrees(prev: &Point, vertex: &Point, next: &Point) -> f64 {
    let to_vertex_from_prev = vertex - prev;
    let to_vertex_from_next = vertex - next;
    let dot = to_vertex_from_prev.dot(&to_vertex_from_next);
    let cross = to_vertex_from_prev.perp(&to_vertex_from_next);
    cross.atan2(dot).to_degrees().abs()
}

/// Compute the symmetric matrix of squared distances between all point pairs.
///
/// Returns a matrix of shape (N, N) where N is the length of `points`.
pub fn squared_distance_table(points: &[Point]) -> Array2<f64> {
    let n = points.len();
    let mut table = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let d = distance_squared(&points[i], &points[j]);
            table[[i, j]] = d;
            table[[j, i]] = d;
        }
    }
    table
}
