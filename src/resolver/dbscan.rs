//! Density-based spatial clustering (DBSCAN) of raw input points.

use std::collections::VecDeque;

use ndarray::Array2;

use crate::resolver::point::{Point, squared_distance_table};

/// Internal marker for points not visited yet. Never returned.
const UNVISITED: i32 = 0;

/// Label of points that belong to no cluster.
pub const NOISE: i32 = -1;

/// Cluster every point in `points`.
///
/// Returns one label per input point: [`NOISE`] for noise and `1..=K` for the
/// K discovered clusters, numbered in first-discovery order. The result only
/// depends on the point order, `eps` and `min_points`.
pub fn dbscan(points: &[Point], eps: f64, min_points: usize) -> Vec<i32> {
    let mut labels = vec![UNVISITED; points.len()];
    if points.is_empty() {
        return labels;
    }

    let table = squared_distance_table(points);
    let eps_sq = eps * eps;
    let mut cluster_id = 0;

    for i in 0..points.len() {
        if labels[i] != UNVISITED {
            continue;
        }

        let neighbors = region_query(&table, i, eps_sq);
        if neighbors.len() < min_points {
            labels[i] = NOISE;
            continue;
        }

        cluster_id += 1;
        expand_cluster(&table, &mut labels, i, neighbors, cluster_id, eps_sq, min_points);
    }

    labels
}

fn expand_cluster(
    table: &Array2<f64>,
    labels: &mut [i32],
    seed: usize,
    neighbors: Vec<usize>,
    cluster_id: i32,
    eps_sq: f64,
    min_points: usize,
) {
    labels[seed] = cluster_id;

    let mut frontier: VecDeque<usize> = neighbors.into();
    while let Some(idx) = frontier.pop_front() {
        match labels[idx] {
            UNVISITED => {
                labels[idx] = cluster_id;
                let reachable = region_query(table, idx, eps_sq);
                if reachable.len() >= min_points {
                    frontier.extend(reachable);
                }
            }
            // Border point: joins the cluster but does not propagate.
            NOISE => labels[idx] = cluster_id,
            _ => {}
        }
    }
}

/// Indices of every point within `sqrt(eps_sq)` of point `idx`, itself included.
fn region_query(table: &Array2<f64>, idx: usize, eps_sq: f64) -> Vec<usize> {
    table
        .row(idx)
        .iter()
        .enumerate()
        .filter_map(|(j, &d)| (d <= eps_sq).then_some(j))
        .collect()
}

/// Split `points` into clusters according to `labels`, dropping noise.
///
/// Cluster `k` of the output holds the points labelled `k + 1`, in input order.
pub fn group_clusters(points: &[Point], labels: &[i32]) -> Vec<Vec<Point>> {
    let cluster_count = labels.iter().copied().max().unwrap_or(0).max(0) as usize;
    let mut clusters = vec![Vec::new(); cluster_count];
    for (p, &label) in points.iter().zip(labels) {
        if label > 0 {
            clusters[(label - 1) as usize].push(*p);
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::point::point;

    #[test]
    fn test_empty_input() {
        assert!(dbscan(&[], 10.0, 3).is_empty());
        assert!(group_clusters(&[], &[]).is_empty());
    }

    #[test]
    fn test_two_clusters_and_noise() {
        let pts = vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(0.0, 1.0),
            point(500.0, 500.0),
            point(100.0, 100.0),
            point(101.0, 100.0),
            point(100.0, 101.0),
        ];
        let labels = dbscan(&pts, 2.0, 3);
        assert_eq!(labels, vec![1, 1, 1, NOISE, 2, 2, 2]);

        let clusters = group_clusters(&pts, &labels);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 3);
        assert_eq!(clusters[1][0], point(100.0, 100.0));
    }

    #[test]
    fn test_noise_reclassified_as_border() {
        // Point 0 alone is not dense enough, but is reachable from the core at index 2.
        let pts = vec![
            point(-1.5, 0.0),
            point(1.0, 0.0),
            point(0.0, 0.0),
            point(0.0, 1.0),
        ];
        let labels = dbscan(&pts, 1.6, 3);
        assert_eq!(labels, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_border_point_does_not_propagate() {
        // Chain: dense core at the origin, border at x=1.5, far point at x=3.0.
        // The far point is within eps of the border but the border is not a core point.
        let pts = vec![
            point(0.0, 0.0),
            point(0.0, 0.5),
            point(0.0, -0.5),
            point(1.5, 0.0),
            point(3.0, 0.0),
        ];
        let labels = dbscan(&pts, 1.5, 4);
        assert_eq!(labels[..4], [1, 1, 1, 1]);
        assert_eq!(labels[4], NOISE);
    }

    #[test]
    fn test_deterministic() {
        let pts: Vec<Point> = (0..40)
            .map(|i| point((i % 7) as f64 * 3.0, (i / 7) as f64 * 3.0))
            .collect();
        assert_eq!(dbscan(&pts, 3.5, 3), dbscan(&pts, 3.5, 3));
    }
}
