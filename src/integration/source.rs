//! Point sources feeding the pipeline.

use std::convert::Infallible;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::resolver::{Point, point};

/// Trait for collaborators that deliver input points.
///
/// Implement this trait to connect any touch or point provider.
///
/// # Example
///
/// ```ignore
/// use triad_cluster::{Point, PointSource};
///
/// struct MyTouchScreen {
///     // Device handle here
/// }
///
/// impl PointSource for MyTouchScreen {
///     type Error = std::io::Error;
///
///     fn poll_points(&mut self) -> Result<Option<Vec<Point>>, Self::Error> {
///         // Read the current contacts
///         Ok(Some(vec![]))
///     }
/// }
/// ```
pub trait PointSource {
    /// Error type for source failures.
    type Error;

    /// Fetch the latest point set.
    ///
    /// # Returns
    /// `Some` replaces the previous point set wholesale; `None` means nothing
    /// new arrived and the previous set stays current.
    fn poll_points(&mut self) -> Result<Option<Vec<Point>>, Self::Error>;
}

/// Helper trait for converting producer-specific coordinates into points.
pub trait IntoPoints {
    fn into_points(self) -> Vec<Point>;
}

impl IntoPoints for Vec<Point> {
    fn into_points(self) -> Vec<Point> {
        self
    }
}

impl IntoPoints for Vec<(f64, f64)> {
    fn into_points(self) -> Vec<Point> {
        self.into_iter().map(|(x, y)| point(x, y)).collect()
    }
}

impl IntoPoints for Vec<[f64; 2]> {
    fn into_points(self) -> Vec<Point> {
        self.into_iter().map(|[x, y]| point(x, y)).collect()
    }
}

/// Thread-safe staging slot between point producers and the pipeline.
///
/// Producers may publish at any time; the pipeline takes the most recent
/// set when a cycle starts, so a running cycle never sees later updates.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct PointInbox {
    staged: Arc<Mutex<Option<Vec<Point>>>>,
}

impl PointInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new point set, replacing anything not yet taken.
    pub fn publish(&self, points: impl IntoPoints) {
        *self.staged.lock() = Some(points.into_points());
    }

    /// Stage an empty point set.
    pub fn clear(&self) {
        *self.staged.lock() = Some(Vec::new());
    }

    /// Take the staged set, if any.
    pub fn take(&self) -> Option<Vec<Point>> {
        self.staged.lock().take()
    }
}

impl PointSource for PointInbox {
    type Error = Infallible;

    fn poll_points(&mut self) -> Result<Option<Vec<Point>>, Self::Error> {
        Ok(self.take())
    }
}
