//! Per-cycle geometric resolution: clustering, weaving, feature extraction
//! and preset matching.

mod config;
mod dbscan;
mod error;
mod features;
mod matching;
mod point;
mod preset;
mod triad_resolver;
mod weave;

pub use config::{AssignmentMode, ResolverConfig};
pub use dbscan::{NOISE, dbscan, group_clusters};
pub use error::ConfigError;
pub use features::{CandidateTriangle, Triangle, TriangleFeatures};
pub use matching::{
    Circumcircle, MatchTolerance, MatchedTriangle, TrianglePose, assign_exclusive, best_per_label,
    circumcircle, match_candidates, orientation,
};
pub use point::{Direction, Point, distance, distance_squared, point};
pub use preset::{Label, PresetSpec, PresetTable, ShapePreset};
pub use triad_resolver::{Resolution, ResolveStats, TriadResolver};
pub use weave::{triple_count, weave};
