//! Matching candidate triangles against shape presets.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use ndarray::Array2;
use rayon::prelude::*;

use crate::resolver::features::{CandidateTriangle, Triangle};
use crate::resolver::point::{Direction, Point};
use crate::resolver::preset::{Label, PresetTable, ShapePreset};

/// Circumcenter determinants at or below this fraction of the squared longest
/// side are treated as collinear.
const DEGENERATE_DETERMINANT_RATIO: f64 = 4e-9;

/// Slack on the angle tolerance so rounding in the computed angles does not
/// reject a difference sitting exactly on the limit.
const ANGLE_EPSILON: f64 = 1e-9;

/// Acceptance thresholds for a (candidate, preset) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchTolerance {
    pub max_delta_angle_degree: f64,
    pub max_delta_area_ratio: f64,
    pub ignore_area: bool,
}

/// Circle through the three vertices of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumcircle {
    pub center: Point,
    pub radius: f64,
}

/// Placement of a recognized triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePose {
    pub center: Point,
    pub radius: f64,
    pub vertices: [Point; 3],
    /// Unit vector from `center` toward the largest-angle vertex.
    pub orientation: Direction,
    /// Angle of `orientation` in degrees, in `[0, 360)`.
    pub orientation_degrees: f64,
}

/// A candidate triangle recognized as one of the presets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedTriangle {
    pub label: Label,
    pub candidate: CandidateTriangle,
    pub pose: TrianglePose,
    /// Sum of the absolute per-angle differences to the preset, in degrees.
    pub angle_error: f64,
    /// `|candidate.area - preset.area| / candidate.area`, zero when area is ignored.
    pub area_error: f64,
}

impl MatchedTriangle {
    /// Vertex coordinates sorted by (x, y); identifies the physical triangle.
    pub fn vertex_key(&self) -> [f64; 6] {
        let mut v = self.candidate.triangle.vertices();
        v.sort_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));
        [v[0].x, v[0].y, v[1].x, v[1].y, v[2].x, v[2].y]
    }

    /// Total order used to pick between matches: lower error first, then vertex key.
    pub fn quality_cmp(&self, other: &Self) -> Ordering {
        self.angle_error
            .total_cmp(&other.angle_error)
            .then(self.area_error.total_cmp(&other.area_error))
            .then_with(|| {
                self.vertex_key()
                    .iter()
                    .zip(other.vertex_key().iter())
                    .map(|(a, b)| a.total_cmp(b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// Circumcenter and circumradius, or `None` for (near-)collinear vertices.
pub fn circumcircle(triangle: &Triangle, area: f64) -> Option<Circumcircle> {
    let Triangle { a, b, c } = *triangle;
    let sides = triangle.side_lengths();
    let longest = sides[0].max(sides[1]).max(sides[2]);

    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if !(d.abs() > DEGENERATE_DETERMINANT_RATIO * longest * longest) || !(area > 0.0) {
        return None;
    }

    let a_sq = a.x * a.x + a.y * a.y;
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;
    let center = Point::new(
        (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
        (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
    );
    let radius = sides[0] * sides[1] * sides[2] / (4.0 * area);

    (center.x.is_finite() && center.y.is_finite() && radius.is_finite())
        .then_some(Circumcircle { center, radius })
}

/// Unit direction from `center` to `toward` and its angle in `[0, 360)` degrees.
pub fn orientation(center: &Point, toward: &Point) -> Option<(Direction, f64)> {
    let dir = (toward - center).try_normalize(f64::EPSILON)?;
    let mut degrees = dir.y.atan2(dir.x).to_degrees().rem_euclid(360.0);
    if degrees >= 360.0 {
        degrees = 0.0;
    }
    Some((dir, degrees))
}

/// Compare one candidate against one preset.
///
/// Returns the angle and area errors when the pair is within tolerance.
fn compare(
    candidate: &CandidateTriangle,
    preset: &ShapePreset,
    tolerance: &MatchTolerance,
) -> Option<(f64, f64)> {
    let mut angle_error = 0.0;
    for (got, want) in candidate.features.angles().iter().zip(preset.features.angles()) {
        let delta = (got - want).abs();
        if delta > tolerance.max_delta_angle_degree + ANGLE_EPSILON {
            return None;
        }
        angle_error += delta;
    }

    let area_error = if tolerance.ignore_area {
        0.0
    } else {
        // Normalized by the candidate's area, not the preset's.
        let area = candidate.features.area;
        if !(area > 0.0) {
            return None;
        }
        let ratio = (area - preset.features.area).abs() / area;
        if ratio > tolerance.max_delta_area_ratio {
            return None;
        }
        ratio
    };

    Some((angle_error, area_error))
}

fn build_match(
    candidate: &CandidateTriangle,
    label: Label,
    angle_error: f64,
    area_error: f64,
) -> Option<MatchedTriangle> {
    let circle = circumcircle(&candidate.triangle, candidate.features.area)?;
    let (orientation, orientation_degrees) =
        orientation(&circle.center, &candidate.features.max_angle_point)?;

    Some(MatchedTriangle {
        label,
        candidate: *candidate,
        pose: TrianglePose {
            center: circle.center,
            radius: circle.radius,
            vertices: candidate.triangle.vertices(),
            orientation,
            orientation_degrees,
        },
        angle_error,
        area_error,
    })
}

/// Match every candidate against every preset.
///
/// A candidate may match several presets and a preset several candidates.
/// Degenerate candidates never produce a match.
pub fn match_candidates(
    candidates: &[CandidateTriangle],
    presets: &PresetTable,
    tolerance: &MatchTolerance,
) -> Vec<MatchedTriangle> {
    candidates
        .par_iter()
        .flat_map_iter(|candidate| {
            presets.presets().iter().filter_map(move |preset| {
                let (angle_error, area_error) = compare(candidate, preset, tolerance)?;
                let matched = build_match(candidate, preset.label, angle_error, area_error);
                if matched.is_none() {
                    log::trace!("dropping degenerate match for label {}", preset.label);
                }
                matched
            })
        })
        .collect()
}

/// Keep the best match for each label, ordered by label.
pub fn best_per_label(matches: impl IntoIterator<Item = MatchedTriangle>) -> Vec<MatchedTriangle> {
    let mut best: BTreeMap<Label, MatchedTriangle> = BTreeMap::new();
    for m in matches {
        best.entry(m.label)
            .and_modify(|current| {
                if m.quality_cmp(current).is_lt() {
                    *current = m;
                }
            })
            .or_insert(m);
    }
    best.into_values().collect()
}

fn exclusive_cost(m: &MatchedTriangle) -> f64 {
    m.angle_error + m.area_error
}

/// Assign labels to physical triangles one-to-one, minimizing total error.
///
/// Falls back to [`best_per_label`] if the solver fails.
pub fn assign_exclusive(matches: &[MatchedTriangle]) -> Vec<MatchedTriangle> {
    if matches.is_empty() {
        return Vec::new();
    }

    let mut labels: Vec<Label> = matches.iter().map(|m| m.label).collect();
    labels.sort_unstable();
    labels.dedup();

    let mut triangles: Vec<[f64; 6]> = matches.iter().map(|m| m.vertex_key()).collect();
    triangles.sort_by(|a, b| {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    triangles.dedup();

    let mut pairs: BTreeMap<(usize, usize), MatchedTriangle> = BTreeMap::new();
    for m in matches {
        let (Ok(row), Some(col)) = (
            labels.binary_search(&m.label),
            triangles.iter().position(|t| *t == m.vertex_key()),
        ) else {
            continue;
        };
        pairs
            .entry((row, col))
            .and_modify(|current| {
                if exclusive_cost(m) < exclusive_cost(current) {
                    *current = *m;
                }
            })
            .or_insert(*m);
    }

    // Unmatched pairs cost more than any real pair.
    let unmatched = pairs.values().map(exclusive_cost).fold(0.0, f64::max) + 1.0;
    let size = labels.len().max(triangles.len());
    let mut costs = Array2::<f64>::from_elem((size, size), unmatched);
    for (&(row, col), m) in &pairs {
        costs[[row, col]] = exclusive_cost(m);
    }

    match lapjv::lapjv(&costs) {
        Ok((row_to_col, _)) => row_to_col
            .iter()
            .enumerate()
            .filter_map(|(row, &col)| pairs.get(&(row, col)).copied())
            .collect(),
        Err(e) => {
            log::warn!("exclusive assignment failed ({e:?}); keeping best match per label");
            best_per_label(matches.iter().copied())
        }
    }
}
