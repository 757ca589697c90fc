//! Station deterioration: periodic escalation waves and one-time
//! milestones.
//!
//! Both mechanisms draw their randomness from pure functions of
//! `(seed, turn, position)` — the wave's ignition set from the stateless
//! hazard hash, the milestone breach room from a ChaCha8 stream seeded
//! fresh from `seed ^ turn`. No RNG cursor survives between turns, so
//! replay never has to serialise one.

use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use derelict_core::{hazard_noise, level, EntityKind, GridPos, Severity};

use crate::constants::{
    BREACH_START_PRESSURE, HEAT_WAVE_BASE, HEAT_WAVE_PER_TIER, HOT_ZONE_MIN, IGNITE_CHANCE_PCT,
    IGNITE_SMOKE, MAX_IGNITIONS_PER_WAVE, MILESTONE_TURNS,
};
use crate::stage::{HazardStage, StageContext};

/// Once-flags for the three escalation milestones.
///
/// Lives inside the replayed simulation state: milestones guard on exact
/// turn equality AND the flag, so re-evaluating the same turn twice is a
/// no-op while a replay from scratch re-fires them at the same turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscalationState {
    fired: [bool; 3],
}

impl EscalationState {
    /// All milestones unfired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether milestone `index` (0..3) has fired.
    pub fn is_fired(&self, index: usize) -> bool {
        self.fired.get(index).copied().unwrap_or(false)
    }

    /// The once-flags, for state hashing.
    pub fn flags(&self) -> [bool; 3] {
        self.fired
    }

    fn mark(&mut self, index: usize) {
        if let Some(flag) = self.fired.get_mut(index) {
            *flag = true;
        }
    }
}

/// Escalation tier for a turn: the number of milestone thresholds already
/// reached (0 through 3).
pub fn escalation_tier(turn: u64) -> u32 {
    MILESTONE_TURNS.iter().filter(|&&m| turn >= m).count() as u32
}

/// Periodic deterioration waves plus the three one-time milestones.
pub struct DeteriorationScheduler;

impl DeteriorationScheduler {
    fn periodic_wave(&self, ctx: &mut StageContext<'_>) {
        let turn = ctx.sim.turn.0;
        let interval = ctx.sim.difficulty.deterioration_interval();
        if turn == 0 || turn % interval != 0 {
            return;
        }

        let tier = escalation_tier(turn);
        let boost = HEAT_WAVE_BASE + tier as u32 * HEAT_WAVE_PER_TIER;

        // Every relay housing and its surroundings run hotter, overheating
        // or not — decaying infrastructure, not the relay flag, drives this.
        for relay in ctx.entities.relay_cells() {
            let mut targets = vec![relay];
            targets.extend(ctx.field.walkable_neighbours(relay));
            for pos in targets {
                let Some(heat) = ctx.field.get(pos).map(|c| c.heat) else {
                    continue;
                };
                let boosted = level::saturating_gain(heat, boost);
                if boosted != heat {
                    if let Some(cell) = ctx.field.get_mut(pos) {
                        cell.heat = boosted;
                    }
                }
            }
        }

        // Ignite a bounded number of smoke patches beside existing hot
        // zones. Row-major scan plus stateless noise keeps the ignition
        // set identical for identical (seed, turn).
        let mut ignited = 0u32;
        let positions: Vec<GridPos> = ctx.field.positions().collect();
        'scan: for pos in positions {
            if !ctx.field.get(pos).is_some_and(|c| c.heat >= HOT_ZONE_MIN) {
                continue;
            }
            for nb in ctx.field.walkable_neighbours(pos) {
                let Some(smoke) = ctx.field.get(nb).map(|c| c.smoke) else {
                    continue;
                };
                if smoke >= IGNITE_SMOKE {
                    continue;
                }
                if hazard_noise(ctx.sim.seed, ctx.sim.turn, nb) % 100 < IGNITE_CHANCE_PCT {
                    if let Some(cell) = ctx.field.get_mut(nb) {
                        cell.smoke = IGNITE_SMOKE;
                    }
                    ignited += 1;
                    if ignited >= MAX_IGNITIONS_PER_WAVE {
                        break 'scan;
                    }
                }
            }
        }

        let (severity, message) = match tier {
            0 => (
                Severity::Notice,
                "Maintenance backlog grows; the station settles and creaks.",
            ),
            1 => (
                Severity::Caution,
                "Relay housings run hot; scorch marks spread along the conduits.",
            ),
            2 => (
                Severity::Warning,
                "Cascading faults ripple through the power grid.",
            ),
            _ => (
                Severity::Critical,
                "The station is tearing itself apart.",
            ),
        };
        ctx.events.push(ctx.sim.turn, severity, message);
    }

    fn milestones(&self, ctx: &mut StageContext<'_>) {
        let turn = ctx.sim.turn.0;

        if turn == MILESTONE_TURNS[0] && !ctx.escalation.is_fired(0) {
            ctx.escalation.mark(0);
            ctx.events.push(
                ctx.sim.turn,
                Severity::Warning,
                "Automated announcement: core system degradation has reached \
                 the first intervention threshold.",
            );
        }

        if turn == MILESTONE_TURNS[1] && !ctx.escalation.is_fired(1) {
            ctx.escalation.mark(1);
            match self.spawn_cascade_breach(ctx) {
                Some(pos) => ctx.events.push(
                    ctx.sim.turn,
                    Severity::Warning,
                    format!("Cascade failure: the hull gives at {pos}. Atmosphere venting."),
                ),
                None => ctx.events.push(
                    ctx.sim.turn,
                    Severity::Warning,
                    "Cascade failure: hull groans under cascade load, but every \
                     compartment holds.",
                ),
            }
        }

        if turn == MILESTONE_TURNS[2] && !ctx.escalation.is_fired(2) {
            ctx.escalation.mark(2);
            ctx.events.push(
                ctx.sim.turn,
                Severity::Critical,
                "Automated announcement: structural failure imminent. Evacuate.",
            );
        }
    }

    /// Pick a non-safe, breach-free room and open its centre to space.
    ///
    /// The draw is a fresh ChaCha8 stream over `seed ^ turn`: same seed and
    /// turn, same room, no cursor carried between turns.
    fn spawn_cascade_breach(&self, ctx: &mut StageContext<'_>) -> Option<GridPos> {
        let candidates: Vec<GridPos> = ctx
            .rooms
            .rooms()
            .iter()
            .filter(|room| !room.safe)
            .filter(|room| {
                !ctx.entities.iter().any(|e| {
                    matches!(e.kind, EntityKind::Breach { .. }) && room.bounds.contains(e.pos)
                })
            })
            .map(|room| room.bounds.center())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(ctx.sim.seed ^ ctx.sim.turn.0);
        let pos = candidates[rng.random_range(0..candidates.len())];

        ctx.entities.spawn(pos, EntityKind::Breach { sealed: false });
        if let Some(cell) = ctx.field.get_mut(pos) {
            cell.pressure = cell.pressure.min(BREACH_START_PRESSURE);
        }
        Some(pos)
    }
}

impl HazardStage for DeteriorationScheduler {
    fn name(&self) -> &'static str {
        "deterioration"
    }

    fn step(&self, ctx: &mut StageContext<'_>) {
        self.periodic_wave(ctx);
        self.milestones(ctx);
    }
}
