//! Heat and smoke: relay-sourced injection, pressure-modulated spread,
//! pressure-scaled decay.

use derelict_core::level;
use derelict_core::GridPos;

use crate::constants::{
    HEAT_DECAY_RATE, HEAT_SOURCE_CAP, HEAT_SOURCE_RATE, HEAT_SPREAD_MIN, HEAT_SPREAD_RATE,
    LOW_PRESSURE_CUTOFF, MID_PRESSURE_CUTOFF, SMOKE_DECAY_RATE, SMOKE_SOURCE_CAP,
    SMOKE_SOURCE_RATE, SMOKE_SPREAD_MIN, SMOKE_SPREAD_RATE,
};
use crate::stage::{HazardStage, StageContext};

/// Spreads and decays heat and smoke, sourced by overheating relays.
///
/// Per-cell combination rule, with `prev` the frozen stage-start value:
/// `base = source ? min(cap, prev + rate) : max(0, prev - decay)`, then
/// `new = clamp(base + incoming projections)`. Projections are computed
/// from `prev`, so decay never eats a projection received this turn and
/// a source's own output never feeds back into itself.
pub struct HeatSmokeSimulator;

/// Heat projected into one neighbour: `ceil(rate * heat/100)` scaled by
/// the receiver's pressure band. Vacuum carries no fire.
fn heat_transfer(heat: u8, receiver_pressure: u8) -> u32 {
    let base = HEAT_SPREAD_RATE as u32 * heat as u32;
    if receiver_pressure < LOW_PRESSURE_CUTOFF {
        0
    } else if receiver_pressure < MID_PRESSURE_CUTOFF {
        base.div_ceil(200)
    } else {
        base.div_ceil(100)
    }
}

/// Smoke projected into one neighbour, capped per transfer.
fn smoke_transfer(smoke: u8) -> u32 {
    (SMOKE_SPREAD_RATE as u32 * smoke as u32)
        .div_ceil(100)
        .min(SMOKE_SPREAD_RATE as u32)
}

/// Heat decay for a non-source cell. Thin atmosphere starves a fire:
/// decay doubles in the mid band and triples near vacuum.
fn heat_decay(pressure: u8) -> u8 {
    if pressure < LOW_PRESSURE_CUTOFF {
        HEAT_DECAY_RATE * 3
    } else if pressure < MID_PRESSURE_CUTOFF {
        HEAT_DECAY_RATE * 2
    } else {
        HEAT_DECAY_RATE
    }
}

impl HazardStage for HeatSmokeSimulator {
    fn name(&self) -> &'static str {
        "heat_smoke"
    }

    fn step(&self, ctx: &mut StageContext<'_>) {
        let prev = ctx.prior;
        let mut heat_gain = vec![0u32; prev.len()];
        let mut smoke_gain = vec![0u32; prev.len()];

        // Project from the frozen view.
        for pos in prev.positions() {
            let Some(cell) = prev.get(pos) else { continue };

            if cell.heat >= HEAT_SPREAD_MIN {
                for nb in prev.walkable_neighbours(pos) {
                    let (Some(i), Some(target)) = (prev.index_of(nb), prev.get(nb)) else {
                        continue;
                    };
                    heat_gain[i] += heat_transfer(cell.heat, target.pressure);
                }
            }
            if cell.smoke >= SMOKE_SPREAD_MIN {
                let gain = smoke_transfer(cell.smoke);
                for nb in prev.walkable_neighbours(pos) {
                    let Some(i) = prev.index_of(nb) else { continue };
                    smoke_gain[i] += gain;
                }
            }
        }

        let sources: Vec<GridPos> = ctx.entities.overheating_relay_cells();

        // Inject, decay, and combine.
        for pos in prev.positions() {
            let (Some(i), Some(cell)) = (prev.index_of(pos), prev.get(pos)) else {
                continue;
            };
            let is_source = sources.contains(&pos);

            let heat_base = if is_source {
                level::raise_capped(cell.heat, HEAT_SOURCE_RATE, HEAT_SOURCE_CAP)
            } else {
                cell.heat.saturating_sub(heat_decay(cell.pressure))
            };
            let smoke_base = if is_source {
                level::raise_capped(cell.smoke, SMOKE_SOURCE_RATE, SMOKE_SOURCE_CAP)
            } else {
                cell.smoke.saturating_sub(SMOKE_DECAY_RATE)
            };

            let heat = level::saturating_gain(heat_base, heat_gain[i]);
            let smoke = level::saturating_gain(smoke_base, smoke_gain[i]);

            if heat != cell.heat || smoke != cell.smoke {
                if let Some(out) = ctx.field.get_mut(pos) {
                    out.heat = heat;
                    out.smoke = smoke;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derelict_core::{Cell, EntityKind};
    use derelict_test_utils::{stage_harness, StageHarness};

    fn run(harness: &mut StageHarness) {
        harness.run_stage(&HeatSmokeSimulator);
    }

    #[test]
    fn relay_scenario_matches_contract() {
        // Relay at (5,5) with heat 90, clean floor neighbour at (5,6) with
        // full pressure: after one turn the neighbour holds exactly
        // ceil(HEAT_SPREAD_RATE * 0.90) and the source is capped injection,
        // untouched by decay.
        let mut h = stage_harness(10, 10);
        h.field.get_mut(GridPos::new(5, 5)).unwrap().heat = 90;
        h.entities
            .spawn(GridPos::new(5, 5), EntityKind::Relay { overheating: true });

        run(&mut h);

        let expected_gain =
            (HEAT_SPREAD_RATE as u32 * 90).div_ceil(100) as u8;
        assert_eq!(
            h.field.get(GridPos::new(5, 6)).unwrap().heat,
            expected_gain
        );
        assert_eq!(
            h.field.get(GridPos::new(5, 5)).unwrap().heat,
            (90 + HEAT_SOURCE_RATE).min(HEAT_SOURCE_CAP)
        );
    }

    #[test]
    fn source_cell_never_decays() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = 30;
        h.entities
            .spawn(GridPos::new(2, 2), EntityKind::Relay { overheating: true });

        run(&mut h);
        assert_eq!(
            h.field.get(GridPos::new(2, 2)).unwrap().heat,
            30 + HEAT_SOURCE_RATE
        );
    }

    #[test]
    fn cooled_relay_decays_normally() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = 30;
        h.entities
            .spawn(GridPos::new(2, 2), EntityKind::Relay { overheating: false });

        run(&mut h);
        assert_eq!(
            h.field.get(GridPos::new(2, 2)).unwrap().heat,
            30 - HEAT_DECAY_RATE
        );
    }

    #[test]
    fn vacuum_suppresses_heat_transfer() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = 80;
        // Receiver in hard vacuum: no oxygen, no fire transfer.
        h.field.get_mut(GridPos::new(3, 2)).unwrap().pressure = 5;

        run(&mut h);
        assert_eq!(h.field.get(GridPos::new(3, 2)).unwrap().heat, 0);
        // A pressurised neighbour of the same cell still receives heat.
        assert!(h.field.get(GridPos::new(1, 2)).unwrap().heat > 0);
    }

    #[test]
    fn mid_pressure_halves_transfer() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = 80;
        h.field.get_mut(GridPos::new(3, 2)).unwrap().pressure = 40;

        run(&mut h);
        let full = (HEAT_SPREAD_RATE as u32 * 80).div_ceil(100) as u8;
        let half = (HEAT_SPREAD_RATE as u32 * 80).div_ceil(200) as u8;
        assert_eq!(h.field.get(GridPos::new(3, 2)).unwrap().heat, half);
        assert_eq!(h.field.get(GridPos::new(1, 2)).unwrap().heat, full);
    }

    #[test]
    fn low_pressure_accelerates_decay() {
        let mut h = stage_harness(5, 5);
        {
            let c = h.field.get_mut(GridPos::new(2, 2)).unwrap();
            c.heat = 30;
            c.pressure = 10;
        }

        run(&mut h);
        assert_eq!(
            h.field.get(GridPos::new(2, 2)).unwrap().heat,
            30 - 3 * HEAT_DECAY_RATE
        );
    }

    #[test]
    fn heat_does_not_cross_walls() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = 90;
        *h.field.get_mut(GridPos::new(3, 2)).unwrap() = Cell::wall();

        run(&mut h);
        assert_eq!(h.field.get(GridPos::new(3, 2)).unwrap().heat, 0);
    }

    #[test]
    fn smoke_transfer_is_capped() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().smoke = 100;

        run(&mut h);
        assert_eq!(
            h.field.get(GridPos::new(3, 2)).unwrap().smoke,
            SMOKE_SPREAD_RATE
        );
    }

    #[test]
    fn below_spread_minimum_nothing_projects() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().heat = HEAT_SPREAD_MIN - 1;

        run(&mut h);
        assert_eq!(h.field.get(GridPos::new(3, 2)).unwrap().heat, 0);
    }

    #[test]
    fn quiescent_field_stays_quiescent() {
        let mut h = stage_harness(6, 6);
        run(&mut h);
        for pos in h.field.positions() {
            let c = h.field.get(pos).unwrap();
            assert_eq!((c.heat, c.smoke), (0, 0));
        }
    }
}
