/// Lifecycle state of a tracked triangle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Created this cycle; a Down event has just been raised
    #[default]
    New,
    /// Seen again since creation and still within the expiry window
    Tracked,
    /// Expired and released; an Up event has been raised
    Removed,
}
