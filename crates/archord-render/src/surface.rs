use crate::model::EntityMarker;
use crate::{Error, Result};
use archord_core::geom::{Point, point, vector};
use archord_core::{DiagramConfig, Entity, LabelVisibility, LinearScale, RegionMap};
use rustc_hash::{FxHashMap, FxHashSet};

/// An already-measured drawable area, in pixels. Measuring belongs to the
/// embedding UI; the surface only validates what it is handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0
    }
}

/// Drawing context for one diagram instance: the pixel scale, the baseline
/// and the region divider.
///
/// Rebuilt wholesale on every resize; a new surface fully replaces the old
/// one, so repeated initialization never layers stale elements.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    scale: LinearScale,
    region_map: RegionMap,
    viewport: Viewport,
    baseline_y: f64,
    divider_x: f64,
    tick_length: f64,
    label_rotation_deg: f64,
    major_opacity: f64,
}

impl RenderSurface {
    pub fn new(viewport: Viewport, config: &DiagramConfig) -> Result<Self> {
        if !viewport.is_drawable() {
            return Err(Error::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;

        let scale = LinearScale::new(config.domain_size, viewport.width)?;
        let region_map = config.region_map()?;
        let divider_x = scale.map(region_map.high_region_start());

        Ok(Self {
            scale,
            region_map,
            viewport,
            baseline_y: viewport.height / 2.0,
            divider_x,
            tick_length: config.label.tick_length,
            label_rotation_deg: config.label.rotation_deg,
            major_opacity: config.label.major_opacity,
        })
    }

    pub fn scale(&self) -> &LinearScale {
        &self.scale
    }

    pub fn region_map(&self) -> &RegionMap {
        &self.region_map
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn baseline_y(&self) -> f64 {
        self.baseline_y
    }

    pub fn divider_x(&self) -> f64 {
        self.divider_x
    }

    /// One tick and one rotated label per entity at its mapped mid position.
    ///
    /// Baseline visibility before any section policy applies: the caller's
    /// major subset is shown, everything else starts hidden. The highlighter
    /// overrides this per section via [`RenderSurface::apply_label_plan`].
    pub fn entity_markers(
        &self,
        entities: &[Entity],
        major: &FxHashSet<String>,
    ) -> Vec<EntityMarker> {
        entities
            .iter()
            .map(|entity| {
                let anchor: Point =
                    point(self.scale.map_f64(entity.mid_position()), self.baseline_y);
                let half_tick = vector(0.0, self.tick_length / 2.0);
                let tick_top = anchor - half_tick;
                let tick_bottom = anchor + half_tick;
                let is_major = major.contains(&entity.id);
                EntityMarker {
                    entity_id: entity.id.clone(),
                    label: entity.display_name.clone(),
                    region: entity.region,
                    x: anchor.x,
                    tick_y0: tick_top.y,
                    tick_y1: tick_bottom.y,
                    label_y: tick_bottom.y + 4.0,
                    rotation_deg: self.label_rotation_deg,
                    visibility: if is_major {
                        LabelVisibility::Major
                    } else {
                        LabelVisibility::Hidden
                    },
                    opacity: if is_major { 1.0 } else { 0.0 },
                }
            })
            .collect()
    }

    /// Applies an explicit visibility plan to the markers. The plan is
    /// computed from section/highlight state; markers are write-only here,
    /// nothing is ever decided by reading previously rendered state back.
    pub fn apply_label_plan(
        &self,
        markers: &mut [EntityMarker],
        plan: &FxHashMap<String, LabelVisibility>,
    ) {
        for marker in markers {
            let visibility = plan
                .get(&marker.entity_id)
                .copied()
                .unwrap_or(LabelVisibility::Hidden);
            marker.visibility = visibility;
            marker.opacity = match visibility {
                LabelVisibility::Hidden => 0.0,
                LabelVisibility::Major => self.major_opacity,
                LabelVisibility::Active => 1.0,
            };
        }
    }
}
