//! Room layout consumed from the external map generator.
//!
//! Rooms are read-only input to the hazard core: the deterioration
//! scheduler uses them to place milestone breaches, nothing else. How the
//! rooms were carved is the generator's business.

use crate::id::RoomId;
use crate::pos::GridPos;

/// An axis-aligned, inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Smallest contained position.
    pub min: GridPos,
    /// Largest contained position.
    pub max: GridPos,
}

impl Rect {
    /// Construct from corner positions. Callers are expected to pass
    /// `min <= max` on both axes; a degenerate rect is a single cell.
    pub fn new(min: GridPos, max: GridPos) -> Self {
        Self { min, max }
    }

    /// Whether `pos` lies inside the rectangle.
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= self.min.x && pos.x <= self.max.x && pos.y >= self.min.y && pos.y <= self.max.y
    }

    /// The centre cell (rounded toward `min` on even spans).
    pub fn center(&self) -> GridPos {
        GridPos::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
        )
    }
}

/// One generated room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    /// Stable identity from the generator.
    pub id: RoomId,
    /// Footprint of the room's interior.
    pub bounds: Rect,
    /// Designated safe rooms never receive milestone breaches.
    pub safe: bool,
}

/// The generator's room listing, in generation order.
#[derive(Clone, Debug, Default)]
pub struct RoomTable {
    rooms: Vec<Room>,
}

impl RoomTable {
    /// An empty table (legal: milestone breach spawns become no-ops).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a room list, preserving order.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// All rooms in generation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The room containing `pos`, if any.
    pub fn room_at(&self, pos: GridPos) -> Option<&Room> {
        self.rooms.iter().find(|r| r.bounds.contains(pos))
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the table lists no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
