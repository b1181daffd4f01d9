use archord_core::{LabelVisibility, Region, Section};
use serde::{Deserialize, Serialize};

/// One aggregated arc layer: every visible arc whose target falls in
/// `target_region`, concatenated into a single path.
///
/// Batching by target class keeps the drawable count constant as datasets
/// grow to tens of thousands of references; the price is that arcs inside a
/// class cannot be styled individually, which the uniform class styling never
/// needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcLayer {
    pub target_region: Region,
    /// Concatenated elliptical-arc path data; empty when nothing was drawable.
    pub path: String,
    /// Number of arcs that contributed a fragment.
    pub arc_count: usize,
}

/// Tick plus rotated label for one entity on the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMarker {
    pub entity_id: String,
    pub label: String,
    pub region: Region,
    /// Mapped x of the entity's mid position.
    pub x: f64,
    pub tick_y0: f64,
    pub tick_y1: f64,
    pub label_y: f64,
    pub rotation_deg: f64,
    pub visibility: LabelVisibility,
    pub opacity: f64,
}

/// A fully computed frame: everything a drawing backend needs, with no
/// reference back to the data it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub baseline_y: f64,
    /// Mapped x of the boundary between the two regions.
    pub divider_x: f64,
    pub section: Section,
    /// Shared opacity for all non-highlighted arcs, derived from the visible
    /// reference count.
    pub base_opacity: f64,
    /// True when an overlay is present and the base layers render dimmed.
    pub dimmed: bool,
    pub base_layers: Vec<ArcLayer>,
    /// Outgoing arcs of the active entity, partitioned like the base layers.
    /// Empty when nothing is highlighted.
    pub overlay_layers: Vec<ArcLayer>,
    pub active_entity_id: Option<String>,
    pub markers: Vec<EntityMarker>,
}

impl Scene {
    /// Total arcs drawn in the base layers.
    pub fn base_arc_count(&self) -> usize {
        self.base_layers.iter().map(|l| l.arc_count).sum()
    }

    /// Total arcs drawn in the overlay.
    pub fn overlay_arc_count(&self) -> usize {
        self.overlay_layers.iter().map(|l| l.arc_count).sum()
    }
}
