//! Structural stress: spread, per-cell collapse countdown, reinforcement
//! immunity.

use derelict_core::{level, EntityKind, Severity};

use crate::constants::{
    STRESS_COLLAPSE_THRESHOLD, STRESS_COLLAPSE_TURNS, STRESS_SPREAD_MIN, STRESS_SPREAD_RATE,
};
use crate::stage::{HazardStage, StageContext};

/// Spreads stress to walkable neighbours and collapses cells held over
/// the threshold too long.
///
/// Stress never decays; only reinforcement zeroes the countdown. A cell
/// at or above [`STRESS_COLLAPSE_THRESHOLD`] accumulates one countdown
/// turn per tick and collapses on the tick its count reaches
/// [`STRESS_COLLAPSE_TURNS`]; dropping below the threshold resets the
/// count. Cells on or orthogonally adjacent to an installed reinforcement
/// panel have their count forced to zero every tick, whatever their
/// stress.
pub struct StructuralStressSimulator;

impl HazardStage for StructuralStressSimulator {
    fn name(&self) -> &'static str {
        "stress"
    }

    fn step(&self, ctx: &mut StageContext<'_>) {
        let prev = ctx.prior;
        let mut gain = vec![0u32; prev.len()];

        for pos in prev.positions() {
            let Some(cell) = prev.get(pos) else { continue };
            if cell.stress < STRESS_SPREAD_MIN {
                continue;
            }
            for nb in prev.walkable_neighbours(pos) {
                let Some(i) = prev.index_of(nb) else { continue };
                gain[i] += STRESS_SPREAD_RATE as u32;
            }
        }

        // Reinforcement umbrella: panel cells and their orthogonal
        // neighbours.
        let mut reinforced = vec![false; prev.len()];
        for panel in ctx.entities.installed_reinforcement_cells() {
            if let Some(i) = prev.index_of(panel) {
                reinforced[i] = true;
            }
            for nb in panel.orthogonal() {
                if let Some(i) = prev.index_of(nb) {
                    reinforced[i] = true;
                }
            }
        }

        for pos in prev.positions() {
            let (Some(i), Some(cell)) = (prev.index_of(pos), prev.get(pos)) else {
                continue;
            };
            let stress = level::saturating_gain(cell.stress, gain[i]);

            let stress_turns = if reinforced[i] {
                0
            } else if stress >= STRESS_COLLAPSE_THRESHOLD {
                cell.stress_turns + 1
            } else {
                0
            };

            if stress_turns >= STRESS_COLLAPSE_TURNS {
                if let Some(out) = ctx.field.get_mut(pos) {
                    out.walkable = false;
                    out.stress = 0;
                    out.stress_turns = 0;
                }
                if pos != ctx.player && !ctx.entities.rubble_at(pos) {
                    ctx.entities.spawn(pos, EntityKind::Rubble);
                }
                ctx.events.push(
                    ctx.sim.turn,
                    Severity::Warning,
                    format!("The deck at {pos} gives way; rubble chokes the passage."),
                );
            } else if stress != cell.stress || stress_turns != cell.stress_turns {
                if let Some(out) = ctx.field.get_mut(pos) {
                    out.stress = stress;
                    out.stress_turns = stress_turns;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derelict_core::GridPos;
    use derelict_test_utils::{stage_harness, StageHarness};

    fn run(h: &mut StageHarness) {
        h.run_stage(&StructuralStressSimulator);
    }

    #[test]
    fn collapse_on_exactly_the_configured_tick() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.player = GridPos::new(0, 0);
        h.field.get_mut(pos).unwrap().stress = STRESS_COLLAPSE_THRESHOLD;

        for tick in 1..STRESS_COLLAPSE_TURNS {
            run(&mut h);
            let c = *h.field.get(pos).unwrap();
            assert!(c.walkable, "must not collapse before tick {tick}");
            assert_eq!(c.stress_turns, tick);
        }

        run(&mut h);
        let c = *h.field.get(pos).unwrap();
        assert!(!c.walkable, "collapse due on the final qualifying tick");
        assert_eq!(c.stress, 0);
        assert_eq!(c.stress_turns, 0);
        assert!(h.entities.rubble_at(pos));
    }

    #[test]
    fn collapse_spawns_exactly_one_rubble() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.field.get_mut(pos).unwrap().stress = 100;

        for _ in 0..STRESS_COLLAPSE_TURNS {
            run(&mut h);
        }
        let rubble = h
            .entities
            .iter()
            .filter(|e| e.pos == pos && matches!(e.kind, EntityKind::Rubble))
            .count();
        assert_eq!(rubble, 1);

        // Pin the cell back over threshold: a second collapse cycle must
        // not duplicate the marker.
        h.field.get_mut(pos).unwrap().stress = 100;
        for _ in 0..STRESS_COLLAPSE_TURNS {
            run(&mut h);
        }
        let rubble = h
            .entities
            .iter()
            .filter(|e| e.pos == pos && matches!(e.kind, EntityKind::Rubble))
            .count();
        assert_eq!(rubble, 1);
    }

    #[test]
    fn dipping_below_threshold_resets_the_countdown() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.field.get_mut(pos).unwrap().stress = STRESS_COLLAPSE_THRESHOLD;

        run(&mut h);
        run(&mut h);
        assert_eq!(h.field.get(pos).unwrap().stress_turns, 2);

        h.field.get_mut(pos).unwrap().stress = STRESS_COLLAPSE_THRESHOLD - 1;
        run(&mut h);
        assert_eq!(h.field.get(pos).unwrap().stress_turns, 0);
        assert!(h.field.get(pos).unwrap().walkable);
    }

    #[test]
    fn reinforcement_prevents_collapse_indefinitely() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.field.get_mut(pos).unwrap().stress = 100;
        h.entities.spawn(
            GridPos::new(2, 3),
            EntityKind::ReinforcementPanel { installed: true },
        );

        for _ in 0..20 {
            run(&mut h);
        }
        let c = *h.field.get(pos).unwrap();
        assert!(c.walkable, "reinforced neighbour must never collapse");
        assert_eq!(c.stress_turns, 0);
        assert!(!h.entities.rubble_at(pos));
    }

    #[test]
    fn uninstalled_panel_grants_nothing() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.field.get_mut(pos).unwrap().stress = 100;
        h.entities.spawn(
            GridPos::new(2, 3),
            EntityKind::ReinforcementPanel { installed: false },
        );

        for _ in 0..STRESS_COLLAPSE_TURNS {
            run(&mut h);
        }
        assert!(!h.field.get(pos).unwrap().walkable);
    }

    #[test]
    fn no_rubble_under_the_player() {
        let mut h = stage_harness(5, 5);
        let pos = GridPos::new(2, 2);
        h.player = pos;
        h.field.get_mut(pos).unwrap().stress = 100;

        for _ in 0..STRESS_COLLAPSE_TURNS {
            run(&mut h);
        }
        assert!(!h.field.get(pos).unwrap().walkable);
        assert!(!h.entities.rubble_at(pos));
    }

    #[test]
    fn stress_spreads_only_from_laden_cells() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().stress = STRESS_SPREAD_MIN;
        h.field.get_mut(GridPos::new(0, 0)).unwrap().stress = STRESS_SPREAD_MIN - 1;

        run(&mut h);
        assert_eq!(
            h.field.get(GridPos::new(2, 1)).unwrap().stress,
            STRESS_SPREAD_RATE
        );
        assert_eq!(h.field.get(GridPos::new(1, 0)).unwrap().stress, 0);
    }

    #[test]
    fn stress_never_decays_on_its_own() {
        let mut h = stage_harness(5, 5);
        h.field.get_mut(GridPos::new(2, 2)).unwrap().stress = 40;

        run(&mut h);
        assert_eq!(h.field.get(GridPos::new(2, 2)).unwrap().stress, 40);
    }
}
