//! State hashing for replay verification.
//!
//! Uses FNV-1a for fast, deterministic hashing of simulation state. The
//! hashes are not cryptographically secure — they exist so a replayed run
//! can be compared against a recorded one cheaply, turn by turn.

use derelict_core::{Cell, Entity, EntityKind, TerrainKind};

use crate::state::StationState;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn terrain_code(terrain: TerrainKind) -> u8 {
    match terrain {
        TerrainKind::Wall => 0,
        TerrainKind::Floor => 1,
        TerrainKind::Corridor => 2,
        TerrainKind::Door => 3,
        TerrainKind::LockedDoor => 4,
        TerrainKind::Airlock { open: false } => 5,
        TerrainKind::Airlock { open: true } => 6,
    }
}

fn fold_cell(mut hash: u64, cell: &Cell) -> u64 {
    hash = fnv1a_byte(hash, terrain_code(cell.terrain));
    hash = fnv1a_byte(hash, cell.walkable as u8);
    hash = fnv1a_byte(hash, cell.heat);
    hash = fnv1a_byte(hash, cell.smoke);
    hash = fnv1a_byte(hash, cell.pressure);
    hash = fnv1a_byte(hash, cell.radiation);
    hash = fnv1a_byte(hash, cell.stress);
    hash = fnv1a_u32(hash, cell.stress_turns as u32);
    hash = fnv1a_byte(hash, cell.dirt);
    hash
}

fn fold_entity(mut hash: u64, entity: &Entity) -> u64 {
    hash = fnv1a_u32(hash, entity.id.0);
    hash = fnv1a_u32(hash, entity.pos.x as u32);
    hash = fnv1a_u32(hash, entity.pos.y as u32);
    let (kind, flag) = match entity.kind {
        EntityKind::Relay { overheating } => (0u8, overheating),
        EntityKind::Breach { sealed } => (1, sealed),
        EntityKind::RadiationSource => (2, false),
        EntityKind::ShieldGenerator { activated } => (3, activated),
        EntityKind::ReinforcementPanel { installed } => (4, installed),
        EntityKind::Rubble => (5, false),
    };
    hash = fnv1a_byte(hash, kind);
    fnv1a_byte(hash, flag as u8)
}

/// Hash the full simulation state.
///
/// Folds every cell in row-major order, every entity in registry order,
/// the milestone flags, and integrity. Two runs with equal seed, config,
/// and input sequence produce equal hashes at every turn; any divergence
/// pins the turn where determinism broke.
pub fn state_hash(state: &StationState) -> u64 {
    let mut hash = FNV_OFFSET;
    hash = fnv1a_u32(hash, state.field.width());
    hash = fnv1a_u32(hash, state.field.height());
    for pos in state.field.positions() {
        if let Some(cell) = state.field.get(pos) {
            hash = fold_cell(hash, cell);
        }
    }
    for entity in state.entities.iter() {
        hash = fold_entity(hash, entity);
    }
    for flag in state.escalation.flags() {
        hash = fnv1a_byte(hash, flag as u8);
    }
    fnv1a_byte(hash, state.integrity)
}
