//! Tuning constants for the hazard simulators.
//!
//! Heat spread at full intensity (12/turn into each neighbour) exceeds
//! heat decay (4/turn), so unattended heat zones expand monotonically.
//! That margin is the game's primary pacing lever; treat these numbers as
//! load-bearing.

/// Heat added to an overheating relay's cell each turn.
pub const HEAT_SOURCE_RATE: u8 = 8;
/// Ceiling for relay-injected heat. Below 100 so a repaired relay's cell
/// still reads cooler than a raging deck fire.
pub const HEAT_SOURCE_CAP: u8 = 90;
/// Smoke added to an overheating relay's cell each turn.
pub const SMOKE_SOURCE_RATE: u8 = 6;
/// Ceiling for relay-injected smoke.
pub const SMOKE_SOURCE_CAP: u8 = 70;

/// Minimum heat before a cell projects heat to its neighbours.
pub const HEAT_SPREAD_MIN: u8 = 40;
/// Scale of per-neighbour heat projection: `ceil(rate * heat/100)` at
/// full pressure.
pub const HEAT_SPREAD_RATE: u8 = 12;
/// Minimum smoke before a cell projects smoke to its neighbours.
pub const SMOKE_SPREAD_MIN: u8 = 30;
/// Scale and per-neighbour cap of smoke projection.
pub const SMOKE_SPREAD_RATE: u8 = 8;

/// Heat lost per turn by non-source cells at normal pressure.
pub const HEAT_DECAY_RATE: u8 = 4;
/// Smoke lost per turn by non-source cells.
pub const SMOKE_DECAY_RATE: u8 = 3;

/// Below this pressure there is no oxygen to carry fire: heat transfer
/// stops and heat decays at triple rate.
pub const LOW_PRESSURE_CUTOFF: u8 = 20;
/// Between [`LOW_PRESSURE_CUTOFF`] and this, heat transfer is halved and
/// decay doubled.
pub const MID_PRESSURE_CUTOFF: u8 = 60;

/// Pressure lost per turn at an unsealed breach cell.
pub const PRESSURE_BREACH_DRAIN: u8 = 15;
/// Maximum pressure pulled from a single higher-pressure neighbour per
/// turn.
pub const PRESSURE_SPREAD_RATE: u8 = 6;
/// Pressure recovered per turn by cells away from any unsealed breach.
pub const PRESSURE_RECOVERY_RATE: u8 = 1;
/// Cells within this Manhattan distance of an unsealed breach do not
/// recover pressure.
pub const BREACH_RECOVERY_RADIUS: u32 = 4;
/// A walkable cell below this pressure slams adjacent doors shut.
pub const PRESSURE_BULKHEAD_THRESHOLD: u8 = 30;
/// An auto-sealed bulkhead releases once every walkable neighbour is at or
/// above this pressure.
pub const SAFE_PRESSURE_THRESHOLD: u8 = 70;

/// Radiation added to a source cell each turn.
pub const RADIATION_SOURCE_RATE: u8 = 10;
/// Ceiling for source-injected radiation.
pub const RADIATION_SOURCE_CAP: u8 = 95;
/// Manhattan range of radiation projection. Radiation ignores walls.
pub const RADIATION_SPREAD_RANGE: u32 = 3;
/// Scale of radiation projection before distance falloff.
pub const RADIATION_SPREAD_RATE: u8 = 9;
/// Radiation lost per turn by non-source cells.
pub const RADIATION_DECAY_RATE: u8 = 2;
/// Manhattan radius inside which an activated shield generator forces
/// radiation to zero.
pub const SHIELD_RADIUS: u32 = 4;

/// Minimum stress before a cell projects stress to its neighbours.
pub const STRESS_SPREAD_MIN: u8 = 50;
/// Stress added to each walkable neighbour per turn.
pub const STRESS_SPREAD_RATE: u8 = 2;
/// Stress level at or above which a cell accumulates collapse turns.
pub const STRESS_COLLAPSE_THRESHOLD: u8 = 80;
/// Consecutive over-threshold turns before a cell collapses.
pub const STRESS_COLLAPSE_TURNS: u16 = 3;

/// Turns of the three one-time escalation milestones (early, mid, late).
pub const MILESTONE_TURNS: [u64; 3] = [100, 250, 400];
/// Base heat boost of a periodic deterioration wave.
pub const HEAT_WAVE_BASE: u32 = 5;
/// Additional wave heat boost per escalation tier.
pub const HEAT_WAVE_PER_TIER: u32 = 3;
/// Minimum heat for a cell to count as a hot zone during ignition scans.
pub const HOT_ZONE_MIN: u8 = 60;
/// Percent chance (per candidate cell) that a wave ignites a smoke patch.
pub const IGNITE_CHANCE_PCT: u64 = 25;
/// Smoke level of a freshly ignited patch.
pub const IGNITE_SMOKE: u8 = 40;
/// Upper bound on ignitions per deterioration wave.
pub const MAX_IGNITIONS_PER_WAVE: u32 = 3;
/// Pressure a milestone-spawned breach cell starts at.
pub const BREACH_START_PRESSURE: u8 = 20;

/// Pressure below which the player takes decompression damage.
pub const PRESSURE_DAMAGE_THRESHOLD: u8 = 30;
/// Base decompression damage per turn.
pub const PRESSURE_DAMAGE_BASE: u8 = 6;
/// Heat at or above which the player takes burn damage.
pub const HEAT_PAIN_THRESHOLD: u8 = 40;
/// Base burn damage per turn.
pub const HEAT_DAMAGE_BASE: u8 = 4;
/// Heat span over which burn intensity ramps from 0 to 1.
pub const HEAT_INTENSITY_SPAN: u8 = 60;
/// Fractional burn damage removed by an equipped thermal sensor.
pub const THERMAL_SENSOR_REDUCTION: f32 = 0.4;
/// Smoke above which the player takes toxic-fume damage.
pub const SMOKE_DAMAGE_THRESHOLD: u8 = 50;
/// Fixed toxic-fume damage per turn.
pub const SMOKE_DAMAGE: i32 = 2;
/// Radiation above which the player takes radiation damage.
pub const RADIATION_DAMAGE_THRESHOLD: u8 = 35;
/// Base radiation damage per turn (doubled without a radiation sensor).
pub const RADIATION_DAMAGE: i32 = 3;
/// HP recovered per fully-safe turn.
pub const RECOVERY_HEAL: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_outpaces_decay() {
        // The pacing invariant: a cell at the spread threshold already
        // projects more heat per neighbour than decay removes.
        let weakest_projection =
            (HEAT_SPREAD_RATE as u32 * HEAT_SPREAD_MIN as u32).div_ceil(100);
        assert!(weakest_projection > HEAT_DECAY_RATE as u32);
    }

    #[test]
    fn source_caps_leave_headroom() {
        assert!(HEAT_SOURCE_CAP < 100);
        assert!(SMOKE_SOURCE_CAP < 100);
        assert!(RADIATION_SOURCE_CAP < 100);
    }

    #[test]
    fn milestones_are_strictly_increasing() {
        assert!(MILESTONE_TURNS[0] < MILESTONE_TURNS[1]);
        assert!(MILESTONE_TURNS[1] < MILESTONE_TURNS[2]);
    }

    #[test]
    fn bulkhead_seals_before_decompression_is_survivable() {
        // Doors must slam before the pressure threshold where damage starts,
        // not after.
        assert!(PRESSURE_BULKHEAD_THRESHOLD >= PRESSURE_DAMAGE_THRESHOLD);
        assert!(SAFE_PRESSURE_THRESHOLD > PRESSURE_BULKHEAD_THRESHOLD);
    }
}
