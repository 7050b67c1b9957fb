//! Rotation- and scale-invariant shape features of a triangle.

use crate::resolver::point::{Point, distance, interior_angle_degrees};

/// Areas at or below this fraction of the squared longest side are treated as collinear.
const DEGENERATE_AREA_RATIO: f64 = 1e-9;

/// Three unordered vertices forming a candidate triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    #[inline]
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Side lengths |AB|, |BC|, |CA|.
    pub fn side_lengths(&self) -> [f64; 3] {
        [
            distance(&self.a, &self.b),
            distance(&self.b, &self.c),
            distance(&self.c, &self.a),
        ]
    }
}

/// Derived shape descriptor of a [`Triangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFeatures {
    /// Interior angles in degrees, sorted descending.
    pub angle_max: f64,
    pub angle_mid: f64,
    pub angle_min: f64,
    /// Heron's area.
    pub area: f64,
    /// Vertex owning the largest interior angle. Ties go to the first of A, B, C.
    pub max_angle_point: Point,
    /// Side lengths |AB|, |BC|, |CA|.
    pub sides: [f64; 3],
}

impl TriangleFeatures {
    pub fn extract(triangle: &Triangle) -> Self {
        let pts = triangle.vertices();
        let sides = triangle.side_lengths();

        let mut angles = [0.0; 3];
        let mut max_angle_point = pts[0];
        let mut max_angle = f64::NEG_INFINITY;
        for i in 0..3 {
            let prev = &pts[(i + 2) % 3];
            let next = &pts[(i + 1) % 3];
            angles[i] = interior_angle_degrees(prev, &pts[i], next);
            if angles[i] > max_angle {
                max_angle = angles[i];
                max_angle_point = pts[i];
            }
        }

        let [angle_max, angle_mid, angle_min] = sort3_desc(angles);

        Self {
            angle_max,
            angle_mid,
            angle_min,
            area: heron_area(sides),
            max_angle_point,
            sides,
        }
    }

    #[inline]
    pub fn angles(&self) -> [f64; 3] {
        [self.angle_max, self.angle_mid, self.angle_min]
    }

    /// True for near-collinear triangles whose area cannot be divided by.
    pub fn is_degenerate(&self) -> bool {
        let longest = self.sides[0].max(self.sides[1]).max(self.sides[2]);
        !(self.area > DEGENERATE_AREA_RATIO * longest * longest)
    }
}

/// A woven triangle together with its extracted features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateTriangle {
    pub triangle: Triangle,
    pub features: TriangleFeatures,
}

impl CandidateTriangle {
    pub fn new(triangle: Triangle) -> Self {
        Self {
            triangle,
            features: TriangleFeatures::extract(&triangle),
        }
    }
}

/// Three-element descending sort network.
fn sort3_desc(mut v: [f64; 3]) -> [f64; 3] {
    if v[0] < v[2] {
        v.swap(0, 2);
    }
    if v[0] < v[1] {
        v.swap(0, 1);
    }
    if v[1] < v[2] {
        v.swap(1, 2);
    }
    v
}

fn heron_area([a, b, c]: [f64; 3]) -> f64 {
    let s = (a + b + c) / 2.0;
    // Rounding can push the product slightly negative for collinear points.
    (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt()
}
