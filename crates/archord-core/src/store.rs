use crate::domain::{Entity, Position, Reference};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// Immutable collection of entities and references plus the range queries the
/// renderer needs.
///
/// Entities are sorted by start position on load; duplicate ids and
/// overlapping spans are rejected. Gaps between consecutive entities are
/// tolerated: positions inside a gap simply resolve to no entity and drop out
/// of per-entity counts.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    entities: Vec<Entity>,
    by_id: FxHashMap<String, usize>,
    references: Vec<Reference>,
}

impl ReferenceStore {
    pub fn new(mut entities: Vec<Entity>, references: Vec<Reference>) -> Result<Self> {
        entities.sort_by_key(|e| e.start_position);

        let mut by_id = FxHashMap::default();
        for (index, entity) in entities.iter().enumerate() {
            if by_id.insert(entity.id.clone(), index).is_some() {
                return Err(Error::DuplicateEntityId {
                    id: entity.id.clone(),
                });
            }
        }
        for pair in entities.windows(2) {
            if pair[1].start_position <= pair[0].end_position() {
                return Err(Error::OverlappingEntities {
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
        }

        tracing::debug!(
            entities = entities.len(),
            references = references.len(),
            "reference store loaded"
        );
        Ok(Self {
            entities,
            by_id,
            references,
        })
    }

    /// Entities in axis order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The full reference collection, untouched since load.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&index| &self.entities[index])
    }

    /// The entity whose span contains `position`, if any (gap positions have
    /// none).
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        let idx = self
            .entities
            .partition_point(|e| e.start_position <= position);
        let candidate = &self.entities[idx.checked_sub(1)?];
        candidate.contains(position).then_some(candidate)
    }

    /// All references originating inside the entity's span.
    pub fn references_from(&self, entity_id: &str) -> Result<Vec<&Reference>> {
        let entity = self.entity(entity_id).ok_or_else(|| Error::UnknownEntity {
            id: entity_id.to_string(),
        })?;
        Ok(self
            .references
            .iter()
            .filter(|r| entity.contains(r.from_position))
            .collect())
    }

    /// References whose source lies at or before `position`.
    pub fn references_up_to(&self, position: Position) -> Vec<&Reference> {
        self.references
            .iter()
            .filter(|r| r.from_position <= position)
            .collect()
    }

    /// Per-entity source counts over an arbitrary reference subset, zero-filled
    /// for entities with none, keyed in axis order. References originating in
    /// a gap match no entity and are skipped.
    pub fn count_per_entity<'a, I>(&self, refs: I) -> IndexMap<String, u64>
    where
        I: IntoIterator<Item = &'a Reference>,
    {
        let mut counts: IndexMap<String, u64> = self
            .entities
            .iter()
            .map(|e| (e.id.clone(), 0u64))
            .collect();
        for reference in refs {
            if let Some(entity) = self.entity_at(reference.from_position) {
                if let Some(count) = counts.get_mut(&entity.id) {
                    *count += 1;
                }
            }
        }
        counts
    }
}
