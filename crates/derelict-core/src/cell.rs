//! The per-cell data model: terrain and hazard scalars.

use crate::level::LEVEL_MAX;

/// Structural classification of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainKind {
    /// Solid hull or interior wall. Never walkable.
    Wall,
    /// Open deck plating.
    Floor,
    /// Narrow connective passage. Behaves like floor for every hazard.
    Corridor,
    /// A passable door.
    Door,
    /// A sealed door: emergency bulkhead or puzzle lock. Not walkable.
    LockedDoor,
    /// An airlock cell. While `open`, the pressure stage pins it to vacuum.
    Airlock {
        /// Whether the outer hatch is currently open to space.
        open: bool,
    },
}

impl TerrainKind {
    /// Whether this terrain admits movement before any hazard overrides.
    pub fn default_walkable(&self) -> bool {
        !matches!(self, Self::Wall | Self::LockedDoor)
    }
}

/// One cell of the station grid: terrain plus the five hazard scalars.
///
/// Pure data, no behaviour. Every hazard scalar stays in `[0, 100]` after
/// every turn; `walkable` is stored rather than derived because collapse
/// and bulkhead toggles change it independently of terrain history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Structural classification.
    pub terrain: TerrainKind,
    /// Whether the player and crew can stand here.
    pub walkable: bool,
    /// Thermal load.
    pub heat: u8,
    /// Particulate smoke density.
    pub smoke: u8,
    /// Atmospheric pressure. 100 on walkable tiles at generation, 0 in walls.
    pub pressure: u8,
    /// Ionising radiation level.
    pub radiation: u8,
    /// Structural stress.
    pub stress: u8,
    /// Consecutive turns this cell has spent at or above the collapse
    /// threshold.
    pub stress_turns: u16,
    /// Grime level, consumed by the external cleaning mechanic. The hazard
    /// pipeline carries it but never mutates it.
    pub dirt: u8,
}

impl Cell {
    /// A cell with default hazard values for the given terrain.
    ///
    /// Walkable terrain starts fully pressurised; walls hold no atmosphere.
    pub fn new(terrain: TerrainKind) -> Self {
        let walkable = terrain.default_walkable();
        Self {
            terrain,
            walkable,
            heat: 0,
            smoke: 0,
            pressure: if walkable { LEVEL_MAX } else { 0 },
            radiation: 0,
            stress: 0,
            stress_turns: 0,
            dirt: 0,
        }
    }

    /// A solid wall cell.
    pub fn wall() -> Self {
        Self::new(TerrainKind::Wall)
    }

    /// An open floor cell.
    pub fn floor() -> Self {
        Self::new(TerrainKind::Floor)
    }

    /// A corridor cell.
    pub fn corridor() -> Self {
        Self::new(TerrainKind::Corridor)
    }

    /// A passable door cell.
    pub fn door() -> Self {
        Self::new(TerrainKind::Door)
    }

    /// Whether every hazard scalar is at its quiescent value.
    pub fn is_hazard_free(&self) -> bool {
        self.heat == 0 && self.smoke == 0 && self.radiation == 0 && self.stress == 0
    }
}
