//! Per-turn outputs handed back to the orchestrator.

use derelict_core::{EntityRegistry, LogEvent, TurnId};
use derelict_grid::TileField;
use derelict_hazard::PlayerVitals;

/// Field-wide hazard measurements taken after a turn completes.
///
/// Cheap aggregates for pacing, AI, and UI — never fed back into the
/// simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardSummary {
    /// Breaches currently venting.
    pub unsealed_breaches: u32,
    /// Relays currently overheating.
    pub overheating_relays: u32,
    /// Rubble markers on the deck.
    pub rubble_total: u32,
    /// Cells that collapsed this turn.
    pub cells_collapsed: u32,
    /// Hottest cell on the grid.
    pub peak_heat: u8,
    /// Mean pressure across walkable cells (0 when none are walkable).
    pub mean_pressure: u8,
}

impl HazardSummary {
    /// Measure a field and registry.
    pub fn measure(field: &TileField, entities: &EntityRegistry, cells_collapsed: u32) -> Self {
        let mut peak_heat = 0u8;
        let mut pressure_sum = 0u64;
        let mut walkable = 0u64;
        for pos in field.positions() {
            let Some(cell) = field.get(pos) else { continue };
            peak_heat = peak_heat.max(cell.heat);
            if cell.walkable {
                pressure_sum += cell.pressure as u64;
                walkable += 1;
            }
        }
        let rubble_total = entities
            .iter()
            .filter(|e| matches!(e.kind, derelict_core::EntityKind::Rubble))
            .count() as u32;
        Self {
            unsealed_breaches: entities.unsealed_breach_cells().len() as u32,
            overheating_relays: entities.overheating_relay_cells().len() as u32,
            rubble_total,
            cells_collapsed,
            peak_heat,
            mean_pressure: if walkable == 0 {
                0
            } else {
                (pressure_sum / walkable) as u8
            },
        }
    }
}

/// Everything one turn produced for the outside world.
#[derive(Clone, Debug)]
pub struct TickReport {
    /// The turn this report describes.
    pub turn: TurnId,
    /// Human-readable records appended this turn, in emission order.
    pub events: Vec<LogEvent>,
    /// The player's vitals after damage resolution.
    pub vitals: PlayerVitals,
    /// Station integrity after this turn's breach penalty.
    pub integrity: u8,
    /// Field-wide measurements.
    pub summary: HazardSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use derelict_core::{Cell, EntityKind, GridPos};

    #[test]
    fn summary_measures_field_and_registry() {
        let mut field = TileField::filled(4, 4, Cell::floor()).unwrap();
        field.get_mut(GridPos::new(1, 1)).unwrap().heat = 70;
        field.get_mut(GridPos::new(2, 2)).unwrap().pressure = 0;

        let mut entities = EntityRegistry::new();
        entities.spawn(GridPos::new(0, 0), EntityKind::Breach { sealed: false });
        entities.spawn(GridPos::new(1, 0), EntityKind::Breach { sealed: true });
        entities.spawn(GridPos::new(2, 0), EntityKind::Relay { overheating: true });
        entities.spawn(GridPos::new(3, 0), EntityKind::Rubble);

        let summary = HazardSummary::measure(&field, &entities, 1);
        assert_eq!(summary.unsealed_breaches, 1);
        assert_eq!(summary.overheating_relays, 1);
        assert_eq!(summary.rubble_total, 1);
        assert_eq!(summary.cells_collapsed, 1);
        assert_eq!(summary.peak_heat, 70);
        // 15 cells at 100, one at 0 => 1500/16 = 93.
        assert_eq!(summary.mean_pressure, 93);
    }

    #[test]
    fn empty_registry_summary_is_quiet() {
        let field = TileField::filled(3, 3, Cell::wall()).unwrap();
        let summary = HazardSummary::measure(&field, &EntityRegistry::new(), 0);
        assert_eq!(summary, HazardSummary::default());
    }
}
