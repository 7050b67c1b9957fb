//! Integration module for connecting point providers and event consumers
//! with the triangle resolver and tracker.
//!
//! This module provides traits and utilities for feeding input points in,
//! building presets, and driving resolution and tracking frame by frame.

mod builder;
mod pipeline;
mod source;

pub use builder::ShapePresetBuilder;
pub use pipeline::{CycleReport, TriadPipeline};
pub use source::{IntoPoints, PointInbox, PointSource};
