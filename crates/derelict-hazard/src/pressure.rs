//! Atmospheric pressure: breach drain, airlock venting, equalisation,
//! slow recovery, and emergency bulkhead logic.

use derelict_core::{GridPos, Severity, TerrainKind};

use crate::constants::{
    BREACH_RECOVERY_RADIUS, PRESSURE_BREACH_DRAIN, PRESSURE_BULKHEAD_THRESHOLD,
    PRESSURE_RECOVERY_RATE, PRESSURE_SPREAD_RATE, SAFE_PRESSURE_THRESHOLD,
};
use crate::stage::{HazardStage, StageContext};

/// Drains pressure at breaches, pins open airlocks to vacuum, equalises
/// neighbouring cells, recovers isolated cells, and toggles emergency
/// bulkheads.
///
/// Equalisation runs in place over the staged field in row-major order:
/// each lower-pressure cell pulls from its higher-pressure walkable
/// neighbours as it is visited, and the donor's loss lands immediately.
/// One unit of every transfer is lost to turbulence — the receiver gains
/// the pull minus one.
pub struct PressureSimulator;

/// Force every open airlock cell to vacuum.
fn pin_open_airlocks(field: &mut derelict_grid::TileField) {
    let open: Vec<GridPos> = field
        .positions()
        .filter(|&pos| {
            field.get(pos).is_some_and(|c| {
                c.terrain == TerrainKind::Airlock { open: true } && c.pressure != 0
            })
        })
        .collect();
    for pos in open {
        if let Some(cell) = field.get_mut(pos) {
            cell.pressure = 0;
        }
    }
}

impl HazardStage for PressureSimulator {
    fn name(&self) -> &'static str {
        "pressure"
    }

    fn step(&self, ctx: &mut StageContext<'_>) {
        let breach_cells = ctx.entities.unsealed_breach_cells();

        // 1. Breach drain.
        for pos in &breach_cells {
            if let Some(cell) = ctx.field.get_mut(*pos) {
                cell.pressure = cell.pressure.saturating_sub(PRESSURE_BREACH_DRAIN);
            }
        }

        // 2. Open airlocks are pinned to vacuum.
        pin_open_airlocks(ctx.field);

        // 3. Sequential equalisation between adjacent walkable cells.
        let positions: Vec<GridPos> = ctx.field.positions().collect();
        for pos in &positions {
            let pos = *pos;
            if !ctx.field.get(pos).is_some_and(|c| c.walkable) {
                continue;
            }
            for nb in ctx.field.walkable_neighbours(pos) {
                let Some(own_p) = ctx.field.get(pos).map(|c| c.pressure) else {
                    continue;
                };
                let Some(nb_p) = ctx.field.get(nb).map(|c| c.pressure) else {
                    continue;
                };
                if nb_p <= own_p {
                    continue;
                }
                let pull = PRESSURE_SPREAD_RATE.min((nb_p - own_p) / 3);
                if pull == 0 {
                    continue;
                }
                if let Some(donor) = ctx.field.get_mut(nb) {
                    donor.pressure = nb_p - pull;
                }
                if let Some(receiver) = ctx.field.get_mut(pos) {
                    receiver.pressure = (own_p + pull - 1).min(100);
                }
            }
        }

        // 4. Slow recovery away from unsealed breaches.
        for pos in &positions {
            let pos = *pos;
            let Some(cell) = ctx.field.get(pos) else { continue };
            if cell.pressure == 0 || cell.pressure == 100 {
                continue;
            }
            let near_breach = breach_cells
                .iter()
                .any(|b| b.manhattan(pos) <= BREACH_RECOVERY_RADIUS);
            if near_breach {
                continue;
            }
            if let Some(cell) = ctx.field.get_mut(pos) {
                cell.pressure = (cell.pressure + PRESSURE_RECOVERY_RATE).min(100);
            }
        }

        // Equalisation and recovery may have bled pressure back into an
        // open airlock; the pin is the last word on those cells.
        pin_open_airlocks(ctx.field);

        // 5. Emergency bulkheads slam next to depressurising cells. Only
        //    atmosphere-bearing (walkable) cells trigger the seal; walls
        //    read zero pressure by construction.
        let low_cells: Vec<GridPos> = positions
            .iter()
            .copied()
            .filter(|&pos| {
                ctx.field
                    .get(pos)
                    .is_some_and(|c| c.walkable && c.pressure < PRESSURE_BULKHEAD_THRESHOLD)
            })
            .collect();
        for pos in low_cells {
            for nb in ctx.field.neighbours4(pos) {
                let is_door = ctx
                    .field
                    .get(nb)
                    .is_some_and(|c| c.terrain == TerrainKind::Door);
                if !is_door {
                    continue;
                }
                if let Some(door) = ctx.field.get_mut(nb) {
                    door.terrain = TerrainKind::LockedDoor;
                    door.walkable = false;
                }
                ctx.events.push(
                    ctx.sim.turn,
                    Severity::Warning,
                    format!("Emergency bulkhead at {nb} slams shut."),
                );
            }
        }

        // 6. Auto-sealed bulkheads release once the surrounding atmosphere
        //    is safe. A locked door hosting an entity is a deliberate lock,
        //    not an emergency seal — leave it alone.
        let locked: Vec<GridPos> = positions
            .iter()
            .copied()
            .filter(|&pos| {
                ctx.field
                    .get(pos)
                    .is_some_and(|c| c.terrain == TerrainKind::LockedDoor)
            })
            .collect();
        for pos in locked {
            if ctx.entities.any_at(pos) {
                continue;
            }
            let neighbours = ctx.field.walkable_neighbours(pos);
            let all_safe = !neighbours.is_empty()
                && neighbours.iter().all(|nb| {
                    ctx.field
                        .get(*nb)
                        .is_some_and(|c| c.pressure >= SAFE_PRESSURE_THRESHOLD)
                });
            if all_safe {
                if let Some(door) = ctx.field.get_mut(pos) {
                    door.terrain = TerrainKind::Door;
                    door.walkable = true;
                }
                ctx.events.push(
                    ctx.sim.turn,
                    Severity::Notice,
                    format!("Bulkhead at {pos} releases."),
                );
            }
        }
    }
}
