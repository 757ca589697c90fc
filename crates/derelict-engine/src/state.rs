//! The replayable simulation state and its external mutation surface.

use derelict_core::{level, EntityId, EntityKind, EntityRegistry, GridPos};
use derelict_grid::TileField;
use derelict_hazard::EscalationState;

/// Everything the hazard simulation owns between turns.
///
/// Cloning is cheap (the field shares rows copy-on-write), which is what
/// lets [`TickPipeline::advance`](crate::TickPipeline::advance) treat the
/// incoming state as immutable and publish a fresh one.
#[derive(Clone, Debug)]
pub struct StationState {
    /// The hazard field.
    pub field: TileField,
    /// Hazard source entities.
    pub entities: EntityRegistry,
    /// Milestone once-flags.
    pub escalation: EscalationState,
    /// Station integrity in `[0, 100]`. The pipeline applies the
    /// per-unsealed-breach penalty; the repair bonus arrives from the
    /// orchestrator through [`StationState::restore_integrity`]. What zero
    /// means is the orchestrator's business.
    pub integrity: u8,
}

impl StationState {
    /// A fresh state over generator output, at full integrity.
    pub fn new(field: TileField, entities: EntityRegistry) -> Self {
        Self {
            field,
            entities,
            escalation: EscalationState::new(),
            integrity: level::LEVEL_MAX,
        }
    }

    // ── External interaction surface ───────────────────────────────
    //
    // Interaction handlers (repair, patch, toggle, clean) run between
    // turns and reach the simulation only through these methods. Each
    // returns false when the target entity is missing or of the wrong
    // kind.

    /// Patch a breach shut.
    pub fn seal_breach(&mut self, id: EntityId) -> bool {
        match self.entities.get_mut(id) {
            Some(e) => match &mut e.kind {
                EntityKind::Breach { sealed } => {
                    *sealed = true;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Set a relay's overheating flag (repair clears it, sabotage sets it).
    pub fn set_relay_overheating(&mut self, id: EntityId, overheating: bool) -> bool {
        match self.entities.get_mut(id) {
            Some(e) => match &mut e.kind {
                EntityKind::Relay { overheating: flag } => {
                    *flag = overheating;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Power a shield generator on or off.
    pub fn set_shield_activated(&mut self, id: EntityId, activated: bool) -> bool {
        match self.entities.get_mut(id) {
            Some(e) => match &mut e.kind {
                EntityKind::ShieldGenerator { activated: flag } => {
                    *flag = activated;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Fit or strip a reinforcement panel.
    pub fn set_reinforcement_installed(&mut self, id: EntityId, installed: bool) -> bool {
        match self.entities.get_mut(id) {
            Some(e) => match &mut e.kind {
                EntityKind::ReinforcementPanel { installed: flag } => {
                    *flag = installed;
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Clear rubble from a cell, restoring the terrain's walkability.
    pub fn clear_rubble(&mut self, pos: GridPos) -> bool {
        let rubble_id = self
            .entities
            .iter()
            .find(|e| e.pos == pos && matches!(e.kind, EntityKind::Rubble))
            .map(|e| e.id);
        let Some(id) = rubble_id else { return false };
        self.entities.remove(id);
        if let Some(cell) = self.field.get_mut(pos) {
            cell.walkable = cell.terrain.default_walkable();
        }
        true
    }

    /// Apply the orchestrator's integrity bonus (e.g. for a relay repair).
    pub fn restore_integrity(&mut self, amount: u8) {
        self.integrity = level::saturating_gain(self.integrity, amount as u32);
    }
}
