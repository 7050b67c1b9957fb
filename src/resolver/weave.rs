//! Enumerate candidate triangles inside a cluster.

use rayon::prelude::*;

use crate::resolver::features::Triangle;
use crate::resolver::point::{Point, squared_distance_table};

/// Number of unordered point triples in a set of `n` points, C(n, 3).
pub fn triple_count(n: usize) -> usize {
    if n < 3 {
        return 0;
    }
    n * (n - 1) * (n - 2) / 6
}

/// Weave every triple of distinct points whose three sides all lie within
/// `[min_side, max_side]`.
///
/// Work is split across threads by the index of the first point, so each
/// worker owns a disjoint range of triples. Output order is not meaningful.
pub fn weave(cluster: &[Point], min_side: f64, max_side: f64) -> Vec<Triangle> {
    let n = cluster.len();
    if n < 3 {
        return Vec::new();
    }

    let table = squared_distance_table(cluster);
    let (min_sq, max_sq) = (min_side * min_side, max_side * max_side);
    let in_range = |i: usize, j: usize| {
        let d = table[[i, j]];
        d >= min_sq && d <= max_sq
    };

    (0..n - 2)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut woven = Vec::new();
            for j in (i + 1)..n {
                if !in_range(i, j) {
                    continue;
                }
                for k in (j + 1)..n {
                    if in_range(j, k) && in_range(k, i) {
                        woven.push(Triangle::new(cluster[i], cluster[j], cluster[k]));
                    }
                }
            }
            woven
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::point::{distance, point};

    fn grid(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| point((i % 5) as f64 * 10.0, (i / 5) as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_triple_count() {
        assert_eq!(triple_count(0), 0);
        assert_eq!(triple_count(2), 0);
        assert_eq!(triple_count(3), 1);
        assert_eq!(triple_count(10), 120);
    }

    #[test]
    fn test_unfiltered_enumerates_all_triples() {
        for n in [0, 1, 2, 3, 4, 9, 17] {
            let pts = grid(n);
            assert_eq!(weave(&pts, 0.0, f64::INFINITY).len(), triple_count(n));
        }
    }

    #[test]
    fn test_no_duplicates_or_repeated_vertices() {
        let pts = grid(8);
        let tris = weave(&pts, 0.0, f64::INFINITY);
        let mut keys: Vec<[usize; 3]> = tris
            .iter()
            .map(|t| {
                let idx = |p: &Point| pts.iter().position(|q| q == p).unwrap();
                let mut key = [idx(&t.a), idx(&t.b), idx(&t.c)];
                key.sort();
                assert!(key[0] < key[1] && key[1] < key[2]);
                key
            })
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), triple_count(8));
    }

    #[test]
    fn test_side_filter() {
        let pts = grid(15);
        let (min_side, max_side) = (10.0, 25.0);
        let tris = weave(&pts, min_side, max_side);
        assert!(!tris.is_empty());
        assert!(tris.len() < triple_count(15));
        for t in &tris {
            for side in t.side_lengths() {
                assert!(side >= min_side - 1e-9 && side <= max_side + 1e-9);
            }
        }
        // Spot check: a triple with a 40-unit side is excluded.
        assert!(!tris.iter().any(|t| distance(&t.a, &t.c) > 30.0));
    }
}
