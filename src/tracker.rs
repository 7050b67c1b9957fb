mod event;
mod track_state;
mod tracked;
mod triangle_tracker;

pub use event::{TriangleEvent, TriangleEventSink};
pub use track_state::TrackState;
pub use tracked::TrackedTriangle;
pub use triangle_tracker::{TrackerConfig, TriangleTracker};
