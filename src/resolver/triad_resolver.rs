//! Per-cycle resolution pipeline: points in, matched triangles out.

use rayon::prelude::*;

use crate::resolver::config::{AssignmentMode, ResolverConfig};
use crate::resolver::dbscan::{dbscan, group_clusters};
use crate::resolver::error::ConfigError;
use crate::resolver::features::CandidateTriangle;
use crate::resolver::matching::{
    MatchTolerance, MatchedTriangle, assign_exclusive, best_per_label, match_candidates,
};
use crate::resolver::point::Point;
use crate::resolver::preset::{PresetSpec, PresetTable};
use crate::resolver::weave::weave;

/// Counters describing one resolution cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub points: usize,
    pub clusters: usize,
    /// Woven triangles that passed the side-length filter.
    pub candidates: usize,
    /// Candidates dropped as near-collinear.
    pub degenerate: usize,
    pub matched: usize,
}

/// Output of [`TriadResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub matched: Vec<MatchedTriangle>,
    pub stats: ResolveStats,
}

/// Stateless resolver bound to one configuration and preset table.
#[derive(Debug, Clone)]
pub struct TriadResolver {
    config: ResolverConfig,
    presets: PresetTable,
}

impl TriadResolver {
    pub fn new(config: ResolverConfig, presets: &[PresetSpec]) -> Result<Self, ConfigError> {
        config.validate()?;
        let presets = PresetTable::new(presets)?;
        Ok(Self { config, presets })
    }

    pub fn with_default_presets(config: ResolverConfig) -> Result<Self, ConfigError> {
        Self::new(config, &PresetSpec::defaults())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn tolerance(&self) -> MatchTolerance {
        MatchTolerance {
            max_delta_angle_degree: self.config.max_abs_delta_angle_degree,
            max_delta_area_ratio: self.config.max_abs_delta_area_ratio,
            ignore_area: self.config.ignore_triangle_area_matching,
        }
    }

    /// Run one full cycle over an immutable point snapshot.
    pub fn resolve(&self, points: &[Point]) -> Resolution {
        let mut stats = ResolveStats {
            points: points.len(),
            ..Default::default()
        };

        // Step 1: Clustering
        let labels = dbscan(points, self.config.eps(), self.config.min_points);
        let clusters = group_clusters(points, &labels);
        stats.clusters = clusters.len();

        // Step 2: Weave candidate triangles per cluster
        let (min_side, max_side) = (self.config.min_side(), self.config.max_side());
        let woven: Vec<_> = clusters
            .iter()
            .flat_map(|cluster| weave(cluster, min_side, max_side))
            .collect();
        stats.candidates = woven.len();

        // Step 3: Extract features, drop collinear triples
        let candidates: Vec<CandidateTriangle> = woven
            .into_par_iter()
            .map(CandidateTriangle::new)
            .filter(|c| !c.features.is_degenerate())
            .collect();
        stats.degenerate = stats.candidates - candidates.len();
        if stats.degenerate > 0 {
            log::trace!("dropped {} degenerate candidates", stats.degenerate);
        }

        // Step 4: Match against presets
        let matched = match_candidates(&candidates, &self.presets, &self.tolerance());
        let matched = match self.config.assignment {
            AssignmentMode::All => matched,
            AssignmentMode::BestPerLabel => best_per_label(matched),
            AssignmentMode::Exclusive => assign_exclusive(&matched),
        };
        stats.matched = matched.len();

        log::debug!(
            "resolved {} points: {} clusters, {} candidates, {} matched",
            stats.points,
            stats.clusters,
            stats.candidates,
            stats.matched
        );

        Resolution { matched, stats }
    }
}
