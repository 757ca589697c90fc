//! Tagged-variant hazard source entities and their registry.
//!
//! Every hazard-relevant flag is a typed field on an enum payload, checked
//! at compile time. The registry iterates in insertion order (via
//! [`IndexMap`]), which keeps entity scans deterministic across replays.

use indexmap::IndexMap;

use crate::id::EntityId;
use crate::pos::GridPos;

/// The kind of a hazard source entity, with its per-kind payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// A power relay. While `overheating`, acts as a fixed heat and smoke
    /// injector at its cell, exempt from natural decay.
    Relay {
        /// Whether the relay is currently overheating.
        overheating: bool,
    },
    /// A hull breach. While not `sealed`, drains its cell's pressure every
    /// turn.
    Breach {
        /// Whether the breach has been patched.
        sealed: bool,
    },
    /// A continuous radiation injector, exempt from decay.
    RadiationSource,
    /// A shield generator. While `activated`, forces radiation to zero
    /// within a fixed Manhattan radius every turn.
    ShieldGenerator {
        /// Whether the generator is powered on.
        activated: bool,
    },
    /// A reinforcement panel. While `installed`, its cell and the four
    /// orthogonal neighbours are immune to structural collapse.
    ReinforcementPanel {
        /// Whether the panel has been fitted.
        installed: bool,
    },
    /// Debris left by a structural collapse. Its presence makes the cell
    /// impassable until externally cleared.
    Rubble,
}

/// A hazard source entity: identity, position, and typed payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entity {
    /// Stable identity, allocated at spawn.
    pub id: EntityId,
    /// Cell the entity occupies.
    pub pos: GridPos,
    /// Kind and flags.
    pub kind: EntityKind,
}

/// Registry of all hazard source entities on the station.
///
/// Owned by the simulation state and mutated only between or inside turns:
/// external interaction handlers toggle flags, the hazard pipeline spawns
/// rubble and milestone breaches. Iteration order is insertion order.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: IndexMap<EntityId, Entity>,
    next_id: u32,
}

impl EntityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a new entity, returning its allocated ID.
    pub fn spawn(&mut self, pos: GridPos, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity { id, pos, kind });
        id
    }

    /// Remove an entity. Returns the removed entity if it existed.
    ///
    /// Uses `shift_remove` so the remaining iteration order is unchanged.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.shift_remove(&id)
    }

    /// Look up an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Look up an entity mutably by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterate all entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate all entities mutably, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // ── Typed scans ────────────────────────────────────────────────

    /// Cells hosting a relay that is currently overheating.
    pub fn overheating_relay_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| matches!(k, EntityKind::Relay { overheating: true }))
    }

    /// Cells hosting any relay, overheating or not.
    pub fn relay_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| matches!(k, EntityKind::Relay { .. }))
    }

    /// Cells hosting an unsealed breach.
    pub fn unsealed_breach_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| matches!(k, EntityKind::Breach { sealed: false }))
    }

    /// Cells hosting a radiation source.
    pub fn radiation_source_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| matches!(k, EntityKind::RadiationSource))
    }

    /// Cells hosting an activated shield generator.
    pub fn active_shield_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| matches!(k, EntityKind::ShieldGenerator { activated: true }))
    }

    /// Cells hosting an installed reinforcement panel.
    pub fn installed_reinforcement_cells(&self) -> Vec<GridPos> {
        self.cells_matching(|k| {
            matches!(k, EntityKind::ReinforcementPanel { installed: true })
        })
    }

    /// Whether any rubble marker sits at `pos`.
    pub fn rubble_at(&self, pos: GridPos) -> bool {
        self.iter()
            .any(|e| e.pos == pos && matches!(e.kind, EntityKind::Rubble))
    }

    /// Whether any breach (sealed or not) sits at `pos`.
    pub fn breach_at(&self, pos: GridPos) -> bool {
        self.iter()
            .any(|e| e.pos == pos && matches!(e.kind, EntityKind::Breach { .. }))
    }

    /// Whether any entity at all sits at `pos`.
    pub fn any_at(&self, pos: GridPos) -> bool {
        self.iter().any(|e| e.pos == pos)
    }

    fn cells_matching(&self, pred: impl Fn(&EntityKind) -> bool) -> Vec<GridPos> {
        self.iter()
            .filter(|e| pred(&e.kind))
            .map(|e| e.pos)
            .collect()
    }
}
