use crate::batch::{base_opacity, batch_arcs};
use crate::highlight::{HighlightState, label_plan};
use crate::model::Scene;
use crate::surface::{RenderSurface, Viewport};
use crate::{Error, Result};
use archord_core::{DiagramConfig, Entity, Position, Reference, ReferenceStore, Section};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// The event-driven arc-diagram component.
///
/// Owns every piece of mutable cross-cutting state: the highlight machine,
/// the current section tag and the reveal cursor. External collaborators only
/// feed it events (already serialized and, for resize, already debounced);
/// each event handler runs synchronously to completion and returns the next
/// [`Scene`].
#[derive(Debug, Clone)]
pub struct ArcDiagram {
    config: DiagramConfig,
    store: Option<ReferenceStore>,
    surface: Option<RenderSurface>,
    major: FxHashSet<String>,
    state: HighlightState,
    section: Section,
    revealed_position: Option<Position>,
}

impl ArcDiagram {
    /// Validates the configuration up front; a bad config never gets as far
    /// as a partial render.
    pub fn new(config: DiagramConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store: None,
            surface: None,
            major: FxHashSet::default(),
            state: HighlightState::Cleared,
            section: Section::default(),
            revealed_position: None,
        })
    }

    /// Loads the dataset. Must happen before the first render; replaces any
    /// previously loaded data wholesale and resets the highlight machine.
    pub fn load(&mut self, entities: Vec<Entity>, references: Vec<Reference>) -> Result<()> {
        self.store = Some(ReferenceStore::new(entities, references)?);
        self.state = HighlightState::Cleared;
        self.revealed_position = None;
        Ok(())
    }

    /// Marks the subset of entities whose labels stay visible outside focus.
    /// This is presentation policy supplied by the embedding UI.
    pub fn set_major_entities<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.major = ids.into_iter().collect();
    }

    /// Builds (or rebuilds) the render surface for an already-measured
    /// viewport. Idempotent: the previous surface is fully replaced, nothing
    /// layers up across calls.
    pub fn initialize(&mut self, viewport: Viewport) -> Result<()> {
        self.surface = Some(RenderSurface::new(viewport, &self.config)?);
        Ok(())
    }

    fn store(&self) -> Result<&ReferenceStore> {
        self.store.as_ref().ok_or(Error::Uninitialized)
    }

    fn surface(&self) -> Result<&RenderSurface> {
        self.surface.as_ref().ok_or(Error::Uninitialized)
    }

    /// Scroll-driver entry point: a section transition with an optional
    /// entity to focus. An absent entity means "intro/reset for this
    /// section", which clears any highlight.
    pub fn on_section_enter(&mut self, section: Section, entity_id: Option<&str>) -> Result<Scene> {
        self.section = section;
        match entity_id {
            Some(id) => self.focus(id),
            None => self.state = HighlightState::Cleared,
        }
        self.redraw()
    }

    /// Debounced viewport change: rebuild the geometry for the new pixel
    /// width, then redraw with the current data and highlight state.
    pub fn on_resize(&mut self, viewport: Viewport) -> Result<Scene> {
        self.initialize(viewport)?;
        self.redraw()
    }

    /// Renders one frame restricted to references sourced at or before
    /// `position`. The restriction lives for this call only; every later
    /// query and redraw sees the full set again.
    pub fn reveal_to(&mut self, position: Position) -> Result<Scene> {
        self.revealed_position = Some(position);
        self.render_frame(Some(position))
    }

    /// Full redraw of the unrestricted working set.
    pub fn redraw(&mut self) -> Result<Scene> {
        self.revealed_position = None;
        self.render_frame(None)
    }

    /// Currently highlighted entity, for UI text updates.
    pub fn active_entity_id(&self) -> Option<&str> {
        self.state.active_entity_id()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Reveal cursor of the most recent frame, if that frame was revealed.
    pub fn revealed_position(&self) -> Option<Position> {
        self.revealed_position
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Per-entity outgoing reference counts over the full set, in axis order.
    /// Narrative step generation feeds off this.
    pub fn counts_per_entity(&self) -> Result<IndexMap<String, u64>> {
        let store = self.store()?;
        Ok(store.count_per_entity(store.references()))
    }

    /// The shared base opacity for the unrestricted reference set, exposed
    /// for styling hooks outside the SVG itself.
    pub fn base_opacity(&self) -> Result<f64> {
        let store = self.store()?;
        Ok(base_opacity(
            store.references().len() as u64,
            &self.config.opacity,
        ))
    }

    /// Highlights an entity if it exists; an unknown id is reported and
    /// ignored, leaving the current state untouched.
    fn focus(&mut self, entity_id: &str) {
        let Ok(store) = self.store() else {
            // No data yet; the redraw that follows will surface Uninitialized.
            return;
        };
        if store.entity(entity_id).is_none() {
            tracing::warn!(entity_id, "ignoring focus on unknown entity");
            return;
        }
        self.state = HighlightState::Highlighted(entity_id.to_string());
    }

    fn render_frame(&self, limit: Option<Position>) -> Result<Scene> {
        let store = self.store()?;
        let surface = self.surface()?;

        let visible: Vec<&Reference> = match limit {
            Some(position) => store.references_up_to(position),
            None => store.references().iter().collect(),
        };

        let base_layers = batch_arcs(
            surface.scale(),
            surface.baseline_y(),
            &visible,
            surface.region_map(),
            self.config.arc_height_ratio,
        );
        let shared_opacity = base_opacity(visible.len() as u64, &self.config.opacity);

        // Overlay: the active entity's outgoing references, restricted the
        // same way as the base layer. A stale id (data reloaded underneath a
        // held highlight) downgrades to a cleared frame with a warning.
        let (overlay_layers, active_entity_id) = match self.state.active_entity_id() {
            None => (Vec::new(), None),
            Some(id) => match store.references_from(id) {
                Ok(outgoing) => {
                    let outgoing: Vec<&Reference> = outgoing
                        .into_iter()
                        .filter(|r| limit.is_none_or(|p| r.from_position <= p))
                        .collect();
                    let layers = batch_arcs(
                        surface.scale(),
                        surface.baseline_y(),
                        &outgoing,
                        surface.region_map(),
                        self.config.arc_height_ratio,
                    );
                    (layers, Some(id.to_string()))
                }
                Err(_) => {
                    tracing::warn!(entity_id = id, "active entity missing from store; skipping overlay");
                    (Vec::new(), None)
                }
            },
        };
        let dimmed = active_entity_id.is_some();

        let mut markers = surface.entity_markers(store.entities(), &self.major);
        let plan = label_plan(
            store.entities(),
            &self.major,
            self.section,
            active_entity_id.as_deref(),
        );
        surface.apply_label_plan(&mut markers, &plan);

        let viewport = surface.viewport();
        tracing::debug!(
            section = self.section.as_str(),
            visible = visible.len(),
            active = active_entity_id.as_deref().unwrap_or("-"),
            "frame rendered"
        );
        Ok(Scene {
            width: viewport.width,
            height: viewport.height,
            baseline_y: surface.baseline_y(),
            divider_x: surface.divider_x(),
            section: self.section,
            base_opacity: shared_opacity,
            dimmed,
            base_layers,
            overlay_layers,
            active_entity_id,
            markers,
        })
    }
}
