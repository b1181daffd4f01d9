use archord_core::{Entity, LabelVisibility, Section};
use rustc_hash::{FxHashMap, FxHashSet};

/// Highlight state: nothing emphasized, or exactly one entity. A second
/// simultaneous highlight is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Cleared,
    Highlighted(String),
}

impl HighlightState {
    pub fn active_entity_id(&self) -> Option<&str> {
        match self {
            HighlightState::Cleared => None,
            HighlightState::Highlighted(id) => Some(id),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, HighlightState::Highlighted(_))
    }
}

/// Computes the label visibility for every entity from the section tag and
/// the active entity.
///
/// Policy: intro/timeline/transition sections show the major subset across
/// both regions. A region-focused section keeps the *other* region's major
/// subset visible while hiding everything in the focused region except the
/// active entity; that asymmetry keeps the focused half uncluttered while
/// scrolling through it.
pub fn label_plan(
    entities: &[Entity],
    major: &FxHashSet<String>,
    section: Section,
    active_entity_id: Option<&str>,
) -> FxHashMap<String, LabelVisibility> {
    let focused_region = section.focused_region();
    entities
        .iter()
        .map(|entity| {
            let major_or_hidden = if major.contains(&entity.id) {
                LabelVisibility::Major
            } else {
                LabelVisibility::Hidden
            };
            let visibility = match focused_region {
                None => major_or_hidden,
                Some(region) if entity.region != region => major_or_hidden,
                Some(_) => {
                    if active_entity_id == Some(entity.id.as_str()) {
                        LabelVisibility::Active
                    } else {
                        LabelVisibility::Hidden
                    }
                }
            };
            (entity.id.clone(), visibility)
        })
        .collect()
}
