//! TriadPipeline for combining a point source with resolution and tracking.

use crate::resolver::{
    ConfigError, MatchedTriangle, Point, ResolveStats, ResolverConfig, TriadResolver,
};
use crate::tracker::{TrackerConfig, TriangleEventSink, TriangleTracker};

use super::PointSource;

/// Outcome of one [`TriadPipeline::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Whether a full resolution ran on this tick.
    pub resolved: bool,
    /// Counters of the most recent resolution.
    pub stats: ResolveStats,
    /// Identities alive after tracking.
    pub tracked: usize,
}

/// A frame-driven pipeline that bundles a point source, the resolver and
/// the tracker.
///
/// Cycles run to completion inside `tick`, and `&mut self` keeps them from
/// overlapping.
pub struct TriadPipeline<S: PointSource> {
    source: S,
    resolver: TriadResolver,
    tracker: TriangleTracker,
    snapshot: Option<Vec<Point>>,
    matched: Vec<MatchedTriangle>,
    stats: ResolveStats,
}

impl<S: PointSource> TriadPipeline<S> {
    /// Create a new pipeline with the given source and resolver.
    pub fn new(source: S, resolver: TriadResolver) -> Self {
        let tracker = TriangleTracker::new(TrackerConfig {
            expiry_threshold: resolver.config().frame_count_for_no_responds_threshold,
        });
        Self {
            source,
            resolver,
            tracker,
            snapshot: None,
            matched: Vec::new(),
            stats: ResolveStats::default(),
        }
    }

    /// Create a new pipeline with default configuration and presets.
    pub fn with_default_config(source: S) -> Result<Self, ConfigError> {
        let resolver = TriadResolver::with_default_presets(ResolverConfig::default())?;
        Ok(Self::new(source, resolver))
    }

    /// Process a single frame.
    ///
    /// Takes the newest point snapshot, re-resolves it every
    /// `analyze_cycle_frame_interval` frames, then advances the tracker with
    /// the latest match set using `frame` as the cycle counter.
    ///
    /// # Returns
    /// A `CycleReport`, or the source's error. A failed poll leaves all
    /// state untouched.
    pub fn tick<E>(&mut self, frame: u64, sink: &mut E) -> Result<CycleReport, S::Error>
    where
        E: TriangleEventSink + ?Sized,
    {
        if let Some(points) = self.source.poll_points()? {
            self.snapshot = Some(points);
        }

        let interval = u64::from(self.resolver.config().analyze_cycle_frame_interval);
        let resolved = match &self.snapshot {
            Some(points) if frame % interval == 0 => {
                let resolution = self.resolver.resolve(points);
                self.matched = resolution.matched;
                self.stats = resolution.stats;
                true
            }
            _ => false,
        };

        self.tracker.update(&self.matched, frame, sink);

        Ok(CycleReport {
            resolved,
            stats: self.stats,
            tracked: self.tracker.len(),
        })
    }

    /// Matches produced by the most recent resolution.
    pub fn latest_matches(&self) -> &[MatchedTriangle] {
        &self.matched
    }

    /// Get a reference to the underlying point source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying point source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the resolver.
    pub fn resolver(&self) -> &TriadResolver {
        &self.resolver
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &TriangleTracker {
        &self.tracker
    }
}
