//! Shape presets: the configured target triangles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::resolver::error::ConfigError;
use crate::resolver::features::{Triangle, TriangleFeatures};
use crate::resolver::point::point;

/// Identity of a preset, and of every triangle matched against it.
pub type Label = u32;

/// Preset record as supplied by an external preset provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    #[serde(rename = "id")]
    pub label: Label,
    pub radius: f64,
    /// Relative arc lengths between consecutive vertices on the circumcircle.
    #[serde(rename = "angleWeights")]
    pub angle_weights: [f64; 3],
}

impl PresetSpec {
    pub fn new(label: Label, radius: f64, angle_weights: [f64; 3]) -> Self {
        Self {
            label,
            radius,
            angle_weights,
        }
    }

    /// The three stock presets shipped with the default configuration.
    pub fn defaults() -> Vec<PresetSpec> {
        vec![
            PresetSpec::new(1, 100.0, [90.0, 60.0, 30.0]),
            PresetSpec::new(2, 100.0, [62.0, 60.0, 58.0]),
            PresetSpec::new(3, 100.0, [110.0, 50.0, 20.0]),
        ]
    }
}

/// A validated preset with its canonical triangle and descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePreset {
    pub label: Label,
    pub radius: f64,
    /// Central angles (degrees, summing to 360) between consecutive vertices.
    pub central_angles: [f64; 3],
    /// Canonical triangle inscribed in a circle of `radius` around the origin.
    pub triangle: Triangle,
    pub features: TriangleFeatures,
}

impl ShapePreset {
    pub fn from_spec(spec: &PresetSpec) -> Result<Self, ConfigError> {
        let label = spec.label;
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(ConfigError::InvalidRadius {
                label,
                radius: spec.radius,
            });
        }

        let weights = spec.angle_weights;
        let total: f64 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || !(total > 0.0) {
            return Err(ConfigError::InvalidAngleWeights { label, weights });
        }

        let central_angles = weights.map(|w| w / total * 360.0);

        let mut vertices = [point(0.0, 0.0); 3];
        let mut cumulative = 0.0;
        for (vertex, angle) in vertices.iter_mut().zip(central_angles) {
            cumulative += angle;
            let rad = cumulative.to_radians();
            *vertex = point(spec.radius * rad.cos(), spec.radius * rad.sin());
        }

        let triangle = Triangle::new(vertices[0], vertices[1], vertices[2]);
        let features = TriangleFeatures::extract(&triangle);
        if features.is_degenerate() {
            return Err(ConfigError::DegeneratePreset { label });
        }

        Ok(Self {
            label,
            radius: spec.radius,
            central_angles,
            triangle,
            features,
        })
    }
}

/// Immutable set of presets, built once per configuration.
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    presets: Vec<ShapePreset>,
}

impl PresetTable {
    /// Validate and precompute every preset. Fails on the first bad record.
    pub fn new(specs: &[PresetSpec]) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(specs.len());
        let mut presets = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.label) {
                return Err(ConfigError::DuplicateLabel(spec.label));
            }
            presets.push(ShapePreset::from_spec(spec)?);
        }

        if presets.is_empty() {
            log::warn!("preset table is empty; no triangle will ever match");
        }

        Ok(Self { presets })
    }

    pub fn presets(&self) -> &[ShapePreset] {
        &self.presets
    }

    pub fn get(&self, label: Label) -> Option<&ShapePreset> {
        self.presets.iter().find(|p| p.label == label)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::point::distance;

    #[test]
    fn test_interior_angles_are_half_the_weights() {
        let spec = PresetSpec::new(1, 100.0, [90.0, 60.0, 30.0]);
        let preset = ShapePreset::from_spec(&spec).unwrap();
        let f = preset.features;
        assert!((f.angle_max - 90.0).abs() < 1e-9);
        assert!((f.angle_mid - 60.0).abs() < 1e-9);
        assert!((f.angle_min - 30.0).abs() < 1e-9);
        for (got, want) in preset.central_angles.iter().zip([180.0, 120.0, 60.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vertices_lie_on_radius() {
        let spec = PresetSpec::new(3, 42.0, [110.0, 50.0, 20.0]);
        let preset = ShapePreset::from_spec(&spec).unwrap();
        for v in preset.triangle.vertices() {
            assert!((distance(&point(0.0, 0.0), &v) - 42.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_weights_are_normalized() {
        let a = ShapePreset::from_spec(&PresetSpec::new(1, 10.0, [3.0, 2.0, 1.0])).unwrap();
        let b = ShapePreset::from_spec(&PresetSpec::new(1, 10.0, [90.0, 60.0, 30.0])).unwrap();
        assert!((a.features.angle_max - b.features.angle_max).abs() < 1e-9);
        assert!((a.features.angle_min - b.features.angle_min).abs() < 1e-9);
    }

    #[test]
    fn test_default_table() {
        let table = PresetTable::new(&PresetSpec::defaults()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.get(2).is_some());
        assert!(table.get(4).is_none());
    }

    #[test]
    fn test_rejects_duplicate_label() {
        let specs = vec![
            PresetSpec::new(7, 100.0, [90.0, 60.0, 30.0]),
            PresetSpec::new(7, 100.0, [62.0, 60.0, 58.0]),
        ];
        assert_eq!(PresetTable::new(&specs).unwrap_err(), ConfigError::DuplicateLabel(7));
    }

    #[test]
    fn test_rejects_bad_records() {
        let bad_radius = PresetSpec::new(1, -1.0, [1.0, 1.0, 1.0]);
        assert!(matches!(
            PresetTable::new(&[bad_radius]),
            Err(ConfigError::InvalidRadius { label: 1, .. })
        ));

        let zero_weights = PresetSpec::new(2, 10.0, [0.0, 0.0, 0.0]);
        assert!(matches!(
            PresetTable::new(&[zero_weights]),
            Err(ConfigError::InvalidAngleWeights { label: 2, .. })
        ));

        let nan_weight = PresetSpec::new(3, 10.0, [f64::NAN, 1.0, 1.0]);
        assert!(matches!(
            PresetTable::new(&[nan_weight]),
            Err(ConfigError::InvalidAngleWeights { label: 3, .. })
        ));

        // One arc spans the whole circle: all three vertices coincide.
        let collapsed = PresetSpec::new(4, 10.0, [1.0, 0.0, 0.0]);
        assert_eq!(
            PresetTable::new(&[collapsed]).unwrap_err(),
            ConfigError::DegeneratePreset { label: 4 }
        );
    }
}
