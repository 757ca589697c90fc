//! Converts the player's current-tile hazard readings into HP change.

use derelict_core::{EventLog, Severity, SimulationContext};
use derelict_grid::TileField;

use crate::constants::{
    HEAT_DAMAGE_BASE, HEAT_INTENSITY_SPAN, HEAT_PAIN_THRESHOLD, PRESSURE_DAMAGE_BASE,
    PRESSURE_DAMAGE_THRESHOLD, RADIATION_DAMAGE, RADIATION_DAMAGE_THRESHOLD, RECOVERY_HEAL,
    SMOKE_DAMAGE, SMOKE_DAMAGE_THRESHOLD, THERMAL_SENSOR_REDUCTION,
};
use derelict_core::GridPos;

/// Which hazard sensors the player has equipped.
///
/// Each sensor softens exactly one damage branch; none of them affects
/// the field simulation itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorSuite {
    /// Halves decompression damage.
    pub atmospheric: bool,
    /// Cuts burn damage by 40%.
    pub thermal: bool,
    /// Without it, radiation damage is doubled.
    pub radiation: bool,
}

impl SensorSuite {
    /// No sensors equipped.
    pub fn none() -> Self {
        Self::default()
    }

    /// All three sensors equipped.
    pub fn full() -> Self {
        Self {
            atmospheric: true,
            thermal: true,
            radiation: true,
        }
    }
}

/// The player's health, as plain data.
///
/// Death is a field, not an error: the external win/loss collaborator
/// decides what it means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerVitals {
    /// Current hit points.
    pub hp: i32,
    /// Hit point ceiling for recovery.
    pub max_hp: i32,
    /// Cleared when hp reaches zero.
    pub alive: bool,
}

impl PlayerVitals {
    /// Full health.
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            alive: true,
        }
    }

    /// Current health as a fraction of maximum.
    pub fn fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

/// Per-turn player input to the pipeline: where they stand, what they
/// carry, how they fare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnInput {
    /// The player's current cell.
    pub player: GridPos,
    /// Equipped sensors.
    pub sensors: SensorSuite,
    /// Vitals going into the turn.
    pub vitals: PlayerVitals,
}

/// Resolves hazard damage against the player's current cell.
///
/// Branches are evaluated in strict priority order — pressure, heat,
/// smoke, radiation, recovery — and exactly one applies per turn: the
/// most acute hazard dominates, and a death short-circuits everything
/// after it.
pub struct DamageResolver;

/// Event severity from the player's remaining health.
fn severity_for(vitals: &PlayerVitals) -> Severity {
    let fraction = vitals.fraction();
    if !vitals.alive || fraction < 0.25 {
        Severity::Critical
    } else if fraction < 0.5 {
        Severity::Warning
    } else if fraction < 0.75 {
        Severity::Caution
    } else {
        Severity::Notice
    }
}

fn apply_damage(vitals: &mut PlayerVitals, damage: i32) {
    vitals.hp -= damage;
    if vitals.hp <= 0 {
        vitals.hp = 0;
        vitals.alive = false;
    }
}

impl DamageResolver {
    /// Resolve one turn of hazard damage.
    ///
    /// Reads the final field of the turn (after every simulator has run)
    /// and returns the updated vitals. A dead or off-grid player is left
    /// untouched.
    pub fn resolve(
        &self,
        field: &TileField,
        input: &TurnInput,
        sim: &SimulationContext,
        events: &mut EventLog,
    ) -> PlayerVitals {
        let mut vitals = input.vitals;
        if !vitals.alive {
            return vitals;
        }
        let Some(cell) = field.get(input.player) else {
            return vitals;
        };
        let multiplier = sim.difficulty.damage_multiplier();

        if cell.pressure < PRESSURE_DAMAGE_THRESHOLD {
            let mut damage = PRESSURE_DAMAGE_BASE as f32;
            if input.sensors.atmospheric {
                damage *= 0.5;
            }
            let damage = (damage * multiplier).ceil() as i32;
            apply_damage(&mut vitals, damage);
            events.push(
                sim.turn,
                severity_for(&vitals),
                format!("Thin air claws at your lungs ({damage} damage)."),
            );
        } else if cell.heat >= HEAT_PAIN_THRESHOLD {
            let intensity = ((cell.heat - HEAT_PAIN_THRESHOLD) as f32
                / HEAT_INTENSITY_SPAN as f32)
                .clamp(0.0, 1.0);
            let mut damage = HEAT_DAMAGE_BASE as f32 * (0.5 + intensity * 1.5) * multiplier;
            if input.sensors.thermal {
                damage *= 1.0 - THERMAL_SENSOR_REDUCTION;
            }
            let damage = damage.ceil() as i32;
            apply_damage(&mut vitals, damage);
            events.push(
                sim.turn,
                severity_for(&vitals),
                format!("Searing heat washes over you ({damage} damage)."),
            );
        } else if cell.smoke > SMOKE_DAMAGE_THRESHOLD {
            apply_damage(&mut vitals, SMOKE_DAMAGE);
            events.push(
                sim.turn,
                severity_for(&vitals),
                format!("Toxic fumes sting your throat ({SMOKE_DAMAGE} damage)."),
            );
        } else if cell.radiation > RADIATION_DAMAGE_THRESHOLD {
            let damage = if input.sensors.radiation {
                RADIATION_DAMAGE
            } else {
                RADIATION_DAMAGE * 2
            };
            apply_damage(&mut vitals, damage);
            events.push(
                sim.turn,
                severity_for(&vitals),
                format!("Your skin prickles; the dosimeter whines ({damage} damage)."),
            );
        } else if vitals.hp < vitals.max_hp {
            vitals.hp = (vitals.hp + RECOVERY_HEAL).min(vitals.max_hp);
        }

        vitals
    }
}
