//! Lifecycle tracking of matched triangles across cycles.

use std::collections::BTreeMap;

use crate::resolver::{Label, MatchedTriangle, best_per_label};
use crate::tracker::event::TriangleEventSink;
use crate::tracker::track_state::TrackState;
use crate::tracker::tracked::TrackedTriangle;

/// Configuration for the TriangleTracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// A triangle unseen for more than this many cycles is released.
    pub expiry_threshold: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            expiry_threshold: 2,
        }
    }
}

/// Turns per-cycle match sets into Down / Stay / Up events.
///
/// Identities are keyed by preset label; the table is the only state that
/// survives between cycles.
pub struct TriangleTracker {
    tracked: BTreeMap<Label, TrackedTriangle>,
    config: TrackerConfig,
}

impl TriangleTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracked: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live identities, ordered by label.
    pub fn existing(&self) -> impl Iterator<Item = &TrackedTriangle> {
        self.tracked.values()
    }

    pub fn get(&self, label: Label) -> Option<&TrackedTriangle> {
        self.tracked.get(&label)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Advance one cycle.
    ///
    /// Events are raised in this order: Down for new labels, Up for expired
    /// identities, then Stay for every identity still present (new ones included).
    pub fn update<S>(&mut self, matched: &[MatchedTriangle], cycle: u64, sink: &mut S)
    where
        S: TriangleEventSink + ?Sized,
    {
        for track in self.tracked.values_mut() {
            if track.state == TrackState::New {
                track.state = TrackState::Tracked;
            }
        }

        // Step 1: Create or refresh identities, one match per label
        let matched = best_per_label(matched.iter().copied());
        for m in &matched {
            match self.tracked.get_mut(&m.label) {
                Some(track) => track.update(m, cycle),
                None => {
                    log::debug!("triangle {} down at cycle {}", m.label, cycle);
                    self.tracked.insert(m.label, TrackedTriangle::activate(m, cycle));
                    sink.on_down(m);
                }
            }
        }

        // Step 2: Release identities unseen for too long
        let threshold = self.config.expiry_threshold;
        let expired: Vec<Label> = self
            .tracked
            .values()
            .filter(|t| t.is_expired(cycle, threshold))
            .map(|t| t.label)
            .collect();
        for label in expired {
            if let Some(mut track) = self.tracked.remove(&label) {
                track.mark_removed();
                log::debug!("triangle {} up at cycle {}", label, cycle);
                sink.on_up(&track);
            }
        }

        // Step 3: Everything left is present
        for track in self.tracked.values() {
            sink.on_stay(track);
        }
    }

    /// Drop every identity without raising events.
    pub fn clear(&mut self) {
        self.tracked.clear();
    }
}
