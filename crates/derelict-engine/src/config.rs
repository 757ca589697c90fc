//! Station configuration, validated once at pipeline construction.

use std::error::Error;
use std::fmt;

use derelict_core::{Difficulty, GridPos, RoomId, RoomTable};

/// Largest supported grid edge. Keeps per-turn cost bounded and flat
/// indices comfortably inside `u32`.
pub const MAX_GRID_DIM: u32 = 512;

/// Inputs fixed at station generation.
///
/// Validated by [`StationConfig::validate`] before the first turn; the
/// per-turn pipeline itself never fails.
#[derive(Clone, Debug)]
pub struct StationConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// The map generation seed. All in-tick noise derives from it.
    pub seed: u64,
    /// Difficulty selected at generation.
    pub difficulty: Difficulty,
    /// Generated room layout, used for milestone breach placement.
    pub rooms: RoomTable,
}

impl StationConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_GRID_DIM || self.height > MAX_GRID_DIM {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        for room in self.rooms.rooms() {
            let b = room.bounds;
            let in_grid = |p: GridPos| {
                p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
            };
            if b.min.x > b.max.x || b.min.y > b.max.y || !in_grid(b.min) || !in_grid(b.max) {
                return Err(ConfigError::RoomOutOfBounds { room: room.id });
            }
        }
        Ok(())
    }
}

/// Errors detected during [`StationConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height of zero.
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Width or height beyond [`MAX_GRID_DIM`].
    GridTooLarge {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// A room's bounds are inverted or fall off the grid.
    RoomOutOfBounds {
        /// The offending room.
        room: RoomId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must be non-empty, got {width}x{height}")
            }
            Self::GridTooLarge { width, height } => {
                write!(
                    f,
                    "grid {width}x{height} exceeds maximum edge {MAX_GRID_DIM}"
                )
            }
            Self::RoomOutOfBounds { room } => {
                write!(f, "room {room} has bounds outside the grid")
            }
        }
    }
}

impl Error for ConfigError {}
