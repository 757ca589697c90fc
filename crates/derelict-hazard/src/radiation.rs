//! Radiation: long-range wall-penetrating spread with distance falloff,
//! absolute shield suppression.

use crate::constants::{
    RADIATION_DECAY_RATE, RADIATION_SOURCE_CAP, RADIATION_SOURCE_RATE, RADIATION_SPREAD_RANGE,
    RADIATION_SPREAD_RATE, SHIELD_RADIUS,
};
use crate::stage::{HazardStage, StageContext};
use derelict_core::level;

/// Spreads radiation through structure and zeroes it inside shield
/// umbrellas.
///
/// Unlike heat, radiation projects to every cell within Manhattan range —
/// no walkability filter, walls do not shadow it. Shield suppression runs
/// after spread and decay so the same turn's spread cannot defeat it.
pub struct RadiationSimulator;

/// Projection into a cell `dist` away: scaled falloff, minimum one unit.
fn radiation_transfer(radiation: u8, dist: u32) -> u32 {
    ((RADIATION_SPREAD_RATE as u32 * radiation as u32 / 100) / dist).max(1)
}

impl HazardStage for RadiationSimulator {
    fn name(&self) -> &'static str {
        "radiation"
    }

    fn step(&self, ctx: &mut StageContext<'_>) {
        let prev = ctx.prior;
        let mut gain = vec![0u32; prev.len()];

        for pos in prev.positions() {
            let Some(cell) = prev.get(pos) else { continue };
            if cell.radiation == 0 {
                continue;
            }
            for target in prev.manhattan_disk(pos, RADIATION_SPREAD_RANGE) {
                let dist = pos.manhattan(target);
                if dist == 0 {
                    continue;
                }
                let Some(i) = prev.index_of(target) else { continue };
                gain[i] += radiation_transfer(cell.radiation, dist);
            }
        }

        let sources = ctx.entities.radiation_source_cells();

        for pos in prev.positions() {
            let (Some(i), Some(cell)) = (prev.index_of(pos), prev.get(pos)) else {
                continue;
            };
            let base = if sources.contains(&pos) {
                level::raise_capped(cell.radiation, RADIATION_SOURCE_RATE, RADIATION_SOURCE_CAP)
            } else {
                cell.radiation.saturating_sub(RADIATION_DECAY_RATE)
            };
            let radiation = level::saturating_gain(base, gain[i]);
            if radiation != cell.radiation {
                if let Some(out) = ctx.field.get_mut(pos) {
                    out.radiation = radiation;
                }
            }
        }

        // Shields last: suppression is absolute and instantaneous.
        for shield in ctx.entities.active_shield_cells() {
            for pos in ctx.field.manhattan_disk(shield, SHIELD_RADIUS) {
                let hot = ctx.field.get(pos).is_some_and(|c| c.radiation != 0);
                if hot {
                    if let Some(cell) = ctx.field.get_mut(pos) {
                        cell.radiation = 0;
                    }
                }
            }
        }
    }
}
