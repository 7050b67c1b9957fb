//! A triangle identity that persists across cycles.

use crate::resolver::{Label, MatchedTriangle, TrianglePose};
use crate::tracker::track_state::TrackState;

/// Tracked triangle owned by the [`TriangleTracker`](crate::TriangleTracker).
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedTriangle {
    /// Preset label; at most one live identity per label
    pub label: Label,
    /// Current lifecycle state
    pub state: TrackState,
    /// Most recent pose
    pub pose: TrianglePose,
    /// Cycle in which this identity was created
    pub start_cycle: u64,
    /// Last cycle in which the label was matched
    pub last_seen: u64,
}

impl TrackedTriangle {
    /// Start a new identity from its first match.
    pub fn activate(matched: &MatchedTriangle, cycle: u64) -> Self {
        Self {
            label: matched.label,
            state: TrackState::New,
            pose: matched.pose,
            start_cycle: cycle,
            last_seen: cycle,
        }
    }

    /// Refresh pose and last-seen counter from a new match of the same label.
    pub fn update(&mut self, matched: &MatchedTriangle, cycle: u64) {
        debug_assert_eq!(self.label, matched.label);
        self.pose = matched.pose;
        self.last_seen = cycle;
        self.state = TrackState::Tracked;
    }

    /// Cycles elapsed since the label was last matched.
    pub fn cycles_unseen(&self, cycle: u64) -> u64 {
        cycle.saturating_sub(self.last_seen)
    }

    pub fn is_expired(&self, cycle: u64, threshold: u64) -> bool {
        self.cycles_unseen(cycle) > threshold
    }

    pub fn mark_removed(&mut self) {
        self.state = TrackState::Removed;
    }
}
