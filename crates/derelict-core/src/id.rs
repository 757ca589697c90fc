//! Strongly-typed identifiers.

use std::fmt;

/// Monotonically increasing turn counter.
///
/// Incremented by the orchestrator each time the simulation advances one
/// turn. The hazard pipeline never increments it itself; the counter is an
/// input so that replaying a recorded action sequence visits the same turn
/// numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TurnId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies an entity in the [`EntityRegistry`](crate::EntityRegistry).
///
/// Allocated sequentially at spawn time and never reused within a run, so
/// registry iteration order (insertion order) is stable across replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a room in the externally-generated [`RoomTable`](crate::RoomTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RoomId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
