//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::resolver::error::ConfigError;

/// How duplicate or overlapping matches are narrowed before tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignmentMode {
    /// Hand every (candidate, preset) match through.
    All,
    /// Keep the single best match per label.
    #[default]
    BestPerLabel,
    /// One label per physical triangle and one triangle per label, solved as a
    /// minimum-cost assignment over the angle and area errors.
    Exclusive,
}

/// Immutable configuration of a [`TriadResolver`](crate::TriadResolver).
///
/// Reloading configuration means building a new resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolverConfig {
    /// Run a full resolution every N frames; tracking runs every frame.
    #[serde(default = "defaults::analyze_cycle_frame_interval")]
    pub analyze_cycle_frame_interval: u32,

    #[serde(default = "defaults::min_triangle_circumradius")]
    pub min_triangle_circumradius: f64,

    #[serde(default = "defaults::max_triangle_circumradius")]
    pub max_triangle_circumradius: f64,

    /// Maximum per-angle difference (degrees) between a candidate and a preset.
    #[serde(default = "defaults::max_abs_delta_angle_degree")]
    pub max_abs_delta_angle_degree: f64,

    /// Maximum `|candidate.area - preset.area| / candidate.area`.
    #[serde(default = "defaults::max_abs_delta_area_ratio")]
    pub max_abs_delta_area_ratio: f64,

    /// Frames a tracked triangle may go unseen before it is released.
    #[serde(default = "defaults::frame_count_for_no_responds_threshold")]
    pub frame_count_for_no_responds_threshold: u64,

    /// Accepts `true`/`false` or an integer flag (non-zero is true).
    #[serde(
        default = "defaults::ignore_triangle_area_matching",
        deserialize_with = "deserialize_flag"
    )]
    pub ignore_triangle_area_matching: bool,

    /// DBSCAN density threshold.
    #[serde(default = "defaults::min_points")]
    pub min_points: usize,

    #[serde(default)]
    pub assignment: AssignmentMode,
}

mod defaults {
    pub fn analyze_cycle_frame_interval() -> u32 {
        1
    }
    pub fn min_triangle_circumradius() -> f64 {
        0.01
    }
    pub fn max_triangle_circumradius() -> f64 {
        500.0
    }
    pub fn max_abs_delta_angle_degree() -> f64 {
        2.0
    }
    pub fn max_abs_delta_area_ratio() -> f64 {
        0.0001
    }
    pub fn frame_count_for_no_responds_threshold() -> u64 {
        2
    }
    pub fn ignore_triangle_area_matching() -> bool {
        true
    }
    pub fn min_points() -> usize {
        3
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a boolean or an integer flag")
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            analyze_cycle_frame_interval: defaults::analyze_cycle_frame_interval(),
            min_triangle_circumradius: defaults::min_triangle_circumradius(),
            max_triangle_circumradius: defaults::max_triangle_circumradius(),
            max_abs_delta_angle_degree: defaults::max_abs_delta_angle_degree(),
            max_abs_delta_area_ratio: defaults::max_abs_delta_area_ratio(),
            frame_count_for_no_responds_threshold:
                defaults::frame_count_for_no_responds_threshold(),
            ignore_triangle_area_matching: defaults::ignore_triangle_area_matching(),
            min_points: defaults::min_points(),
            assignment: AssignmentMode::default(),
        }
    }
}

impl ResolverConfig {
    /// Clustering radius: every valid side must be reachable inside one cluster.
    pub fn eps(&self) -> f64 {
        self.max_triangle_circumradius * 2.0 + 0.0001
    }

    /// Shortest side a candidate triangle may have.
    pub fn min_side(&self) -> f64 {
        self.min_triangle_circumradius
    }

    /// Longest side a candidate triangle may have.
    pub fn max_side(&self) -> f64 {
        self.eps()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_triangle_circumradius, self.max_triangle_circumradius);
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && min < max) {
            return Err(ConfigError::InvalidCircumradiusRange { min, max });
        }
        positive("max_abs_delta_angle_degree", self.max_abs_delta_angle_degree)?;
        if !self.ignore_triangle_area_matching {
            positive("max_abs_delta_area_ratio", self.max_abs_delta_area_ratio)?;
        }
        if self.analyze_cycle_frame_interval == 0 {
            return Err(ConfigError::ZeroCycleInterval);
        }
        if self.min_points == 0 {
            return Err(ConfigError::ZeroMinPoints);
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}
