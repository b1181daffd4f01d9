use crate::domain::{Position, RegionMap};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

fn default_arc_height_ratio() -> f64 {
    0.35
}

/// Opacity strategy for the batched base layers.
///
/// Opacity falls off as reference volume grows so dense datasets do not
/// saturate into a solid band; both ends are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpacityConfig {
    /// Opacity used when the drawn set is empty (there is no count to derive
    /// a value from).
    pub zero_count_fallback: f64,
    /// Numerator of the `k / count` falloff.
    pub falloff_k: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self {
            zero_count_fallback: 0.3,
            falloff_k: 600.0,
            min_opacity: 0.03,
            max_opacity: 0.35,
        }
    }
}

/// Entity tick/label presentation knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelConfig {
    /// Opacity for "major" labels when visible but not active.
    pub major_opacity: f64,
    /// Rotation applied to entity labels, degrees (negative = counter-clockwise).
    pub rotation_deg: f64,
    /// Length of the perpendicular tick under each entity midpoint, px.
    pub tick_length: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            major_opacity: 0.6,
            rotation_deg: -45.0,
            tick_length: 6.0,
        }
    }
}

/// Static configuration of one diagram: the domain extent, the region split
/// and the styling constants. Validated once before any render; a failed
/// validation is fatal to initialization (no partial render happens).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramConfig {
    /// Total number of addressable positions on the linear axis.
    pub domain_size: u32,
    /// Last position belonging to the low region.
    pub split_position: Position,
    /// First position of the high region. Datasets historically carry this as
    /// a second independent constant; when present it must equal
    /// `split_position + 1`, otherwise it is derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_region_start: Option<Position>,
    /// Semi-minor over semi-major axis ratio of every arc, in `(0, 1]`.
    #[serde(default = "default_arc_height_ratio")]
    pub arc_height_ratio: f64,
    #[serde(default)]
    pub opacity: OpacityConfig,
    #[serde(default)]
    pub label: LabelConfig,
}

impl DiagramConfig {
    pub fn new(domain_size: u32, split_position: Position) -> Self {
        Self {
            domain_size,
            split_position,
            high_region_start: None,
            arc_height_ratio: default_arc_height_ratio(),
            opacity: OpacityConfig::default(),
            label: LabelConfig::default(),
        }
    }

    /// Deserializes a config from an untyped JSON value and validates it.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.region_map()?;
        if !self.arc_height_ratio.is_finite()
            || self.arc_height_ratio <= 0.0
            || self.arc_height_ratio > 1.0
        {
            return Err(Error::InvalidArcHeightRatio {
                ratio: self.arc_height_ratio,
            });
        }
        Ok(())
    }

    /// The region classifier implied by this config.
    pub fn region_map(&self) -> Result<RegionMap> {
        RegionMap::new(self.domain_size, self.split_position, self.high_region_start)
    }
}
