//! Builder for creating preset records.

use crate::resolver::{Label, PresetSpec};

/// Builder for creating `PresetSpec` records.
#[derive(Debug, Clone)]
pub struct ShapePresetBuilder {
    label: Label,
    radius: f64,
    angle_weights: [f64; 3],
}

impl Default for ShapePresetBuilder {
    fn default() -> Self {
        Self {
            label: 0,
            radius: 100.0,
            angle_weights: [1.0, 1.0, 1.0],
        }
    }
}

impl ShapePresetBuilder {
    /// Create a new preset builder (equilateral, radius 100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preset label.
    pub fn label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// Set the circumradius of the canonical triangle.
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the arc weights between consecutive vertices.
    pub fn angle_weights(mut self, w0: f64, w1: f64, w2: f64) -> Self {
        self.angle_weights = [w0, w1, w2];
        self
    }

    /// Set the interior angles in degrees directly.
    ///
    /// Interior angles are half the arcs they face, so weights proportional to
    /// the interior angles describe the same triangle.
    pub fn interior_angles(mut self, a: f64, b: f64, c: f64) -> Self {
        self.angle_weights = [a, b, c];
        self
    }

    /// Build the final `PresetSpec`. Validation happens when the table is built.
    pub fn build(self) -> PresetSpec {
        PresetSpec::new(self.label, self.radius, self.angle_weights)
    }
}
