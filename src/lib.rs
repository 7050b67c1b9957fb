//! Recognition and tracking of preset triangular arrangements of 2D points.
//!
//! Each cycle, raw points are clustered, woven into candidate triangles,
//! described by their sorted interior angles and area, and matched against a
//! table of shape presets. The tracker turns the per-cycle matches into
//! Down / Stay / Up events with a stable identity per preset label.

pub mod integration;
pub mod resolver;
pub mod tracker;

pub use integration::{
    CycleReport, IntoPoints, PointInbox, PointSource, ShapePresetBuilder, TriadPipeline,
};
pub use resolver::{
    AssignmentMode, ConfigError, Label, MatchedTriangle, Point, PresetSpec, PresetTable,
    Resolution, ResolveStats, ResolverConfig, TrianglePose, TriadResolver,
};
pub use tracker::{
    TrackState, TrackedTriangle, TrackerConfig, TriangleEvent, TriangleEventSink, TriangleTracker,
};
