//! Entity manager - single owner of the mutable world entity list
//!
//! Other components never hold entity references across ticks; entities can
//! be removed (depletion) or appended (spawn) at any point. All reads and
//! mutation requests go through the operations here, and side effects are
//! visible immediately to subsequent calls within the same tick.

use rand::Rng;

use crate::core::types::Coordinate;
use crate::world::entity::{Entity, ResourceEntity};

/// Normalize a key for fuzzy matching: lowercase, spaces/underscores/hyphens
/// stripped.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Fuzzy key match used for all candidate lookups
///
/// A required token matches an entity key when equal verbatim, equal
/// case-insensitively, equal after normalization, or when the normalized
/// entity key starts with the normalized token ("tree" matches "tree_oak").
fn matches_key(entity_key: &str, required: &str) -> bool {
    if entity_key == required || entity_key.eq_ignore_ascii_case(required) {
        return true;
    }
    let entity_norm = normalize_key(entity_key);
    let required_norm = normalize_key(required);
    entity_norm == required_norm || entity_norm.starts_with(&required_norm)
}

/// Owner of the world entity collection
#[derive(Debug, Clone, Default)]
pub struct EntityManager {
    entities: Vec<Entity>,
}

impl EntityManager {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Exact-key lookup, first match
    pub fn find_by_key(&self, key: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.key() == key)
    }

    /// Indices of entities fuzzily matching `key`
    ///
    /// Depleted resources never qualify; undiscovered resources are also
    /// excluded when `discovered_only` is set. Non-resource entities are
    /// unaffected by either filter.
    pub fn candidates_by_key(&self, key: &str, discovered_only: bool) -> Vec<usize> {
        self.entities
            .iter()
            .enumerate()
            .filter(|(_, e)| matches_key(e.key(), key))
            .filter(|(_, e)| match e.as_resource() {
                Some(r) => !r.is_depleted() && (!discovered_only || r.is_discovered),
                None => true,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Uniform-random choice among matching candidates' positions
    pub fn resolve_target_tile(
        &self,
        key: &str,
        discovered_only: bool,
        rng: &mut impl Rng,
    ) -> Option<Coordinate> {
        let candidates = self.candidates_by_key(key, discovered_only);
        if candidates.is_empty() {
            return None;
        }
        let pick = candidates[rng.gen_range(0..candidates.len())];
        Some(self.entities[pick].position())
    }

    /// Consume `amount` units from a random matching entity
    ///
    /// Non-resource entities are "consumed" as a no-op success: the call
    /// signals availability, not depletion. Resources are decremented by
    /// `max(1, amount)` saturating at zero; any resource driven to zero is
    /// removed from the collection before returning.
    pub fn consume(&mut self, key: &str, amount: u32, rng: &mut impl Rng) -> bool {
        let candidates = self.candidates_by_key(key, false);
        if candidates.is_empty() {
            return false;
        }
        let pick = candidates[rng.gen_range(0..candidates.len())];
        let consumed = match self.entities[pick].as_resource_mut() {
            None => true,
            Some(r) => {
                if r.is_depleted() {
                    false
                } else {
                    r.current_quantity = r.current_quantity.saturating_sub(amount.max(1));
                    true
                }
            }
        };
        // Drop anything that just ran dry
        self.entities
            .retain(|e| e.as_resource().map_or(true, |r| !r.is_depleted()));
        consumed
    }

    /// Mark one undiscovered resource near `center` as discovered
    ///
    /// Picks uniformly at random among undiscovered resources within the
    /// Chebyshev `radius` and returns a copy of the discovered entity.
    pub fn discover_near(
        &mut self,
        center: Coordinate,
        radius: i32,
        rng: &mut impl Rng,
    ) -> Option<ResourceEntity> {
        let hidden: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                let r = e.as_resource()?;
                (!r.is_discovered && r.position.chebyshev(&center) <= radius).then_some(i)
            })
            .collect();
        if hidden.is_empty() {
            return None;
        }
        let pick = hidden[rng.gen_range(0..hidden.len())];
        let resource = self.entities[pick].as_resource_mut()?;
        resource.is_discovered = true;
        Some(resource.clone())
    }

    /// Append a new entity to the world
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }
}
