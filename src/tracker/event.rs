//! Lifecycle events and the sink they are delivered to.

use crate::resolver::{Label, MatchedTriangle};
use crate::tracker::tracked::TrackedTriangle;

/// A lifecycle transition of one triangle identity.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangleEvent {
    /// A label appeared; carries the match that created it.
    Down(MatchedTriangle),
    /// The identity is present this cycle.
    Stay(TrackedTriangle),
    /// The identity expired; carries its final pose.
    Up(TrackedTriangle),
}

impl TriangleEvent {
    pub fn label(&self) -> Label {
        match self {
            Self::Down(m) => m.label,
            Self::Stay(t) | Self::Up(t) => t.label,
        }
    }
}

/// Receiver of tracker events, decoupling the tracker from any transport.
///
/// # Example
///
/// ```ignore
/// use triad_cluster::{MatchedTriangle, TrackedTriangle, TriangleEventSink};
///
/// struct Printer;
///
/// impl TriangleEventSink for Printer {
///     fn on_down(&mut self, m: &MatchedTriangle) {
///         println!("down {}", m.label);
///     }
///     fn on_stay(&mut self, _t: &TrackedTriangle) {}
///     fn on_up(&mut self, t: &TrackedTriangle) {
///         println!("up {}", t.label);
///     }
/// }
/// ```
pub trait TriangleEventSink {
    fn on_down(&mut self, matched: &MatchedTriangle);
    fn on_stay(&mut self, tracked: &TrackedTriangle);
    fn on_up(&mut self, tracked: &TrackedTriangle);
}

impl TriangleEventSink for Vec<TriangleEvent> {
    fn on_down(&mut self, matched: &MatchedTriangle) {
        self.push(TriangleEvent::Down(*matched));
    }

    fn on_stay(&mut self, tracked: &TrackedTriangle) {
        self.push(TriangleEvent::Stay(tracked.clone()));
    }

    fn on_up(&mut self, tracked: &TrackedTriangle) {
        self.push(TriangleEvent::Up(tracked.clone()));
    }
}

impl<S: TriangleEventSink + ?Sized> TriangleEventSink for &mut S {
    fn on_down(&mut self, matched: &MatchedTriangle) {
        (**self).on_down(matched);
    }

    fn on_stay(&mut self, tracked: &TrackedTriangle) {
        (**self).on_stay(tracked);
    }

    fn on_up(&mut self, tracked: &TrackedTriangle) {
        (**self).on_up(tracked);
    }
}
