//! Derelict: the hazard simulation core of a turn-based station
//! exploration game.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Derelict sub-crates. For most users, adding `derelict` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use derelict::prelude::*;
//!
//! // An 8x8 open deck with one overheating relay.
//! let field = TileField::filled(8, 8, Cell::floor()).unwrap();
//! let mut entities = EntityRegistry::new();
//! entities.spawn(GridPos::new(4, 4), EntityKind::Relay { overheating: true });
//!
//! let pipeline = TickPipeline::new(StationConfig {
//!     width: 8,
//!     height: 8,
//!     seed: 42,
//!     difficulty: Difficulty::Normal,
//!     rooms: RoomTable::new(),
//! })
//! .unwrap();
//!
//! let state = StationState::new(field, entities);
//! let input = TurnInput {
//!     player: GridPos::new(0, 0),
//!     sensors: SensorSuite::none(),
//!     vitals: PlayerVitals::new(20),
//! };
//!
//! let outcome = pipeline.advance(&state, &input, TurnId(1));
//! assert_eq!(
//!     outcome.state.field.get(GridPos::new(4, 4)).unwrap().heat,
//!     8,
//! );
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `derelict-core` | IDs, cells, entities, events, context, hashing |
//! | [`grid`] | `derelict-grid` | The copy-on-write `TileField` |
//! | [`hazard`] | `derelict-hazard` | Hazard stages, scheduler, damage resolver |
//! | [`engine`] | `derelict-engine` | Configuration, turn pipeline, replay hashing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and the deterministic hash (`derelict-core`).
pub use derelict_core as types;

/// Tile grid storage (`derelict-grid`).
pub use derelict_grid as grid;

/// Hazard simulators, deterioration scheduler, and damage resolver
/// (`derelict-hazard`).
pub use derelict_hazard as hazard;

/// Turn pipeline, configuration, and replay hashing (`derelict-engine`).
pub use derelict_engine as engine;

/// Common imports for typical Derelict usage.
///
/// ```rust
/// use derelict::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use derelict_core::{
        Cell, Difficulty, Entity, EntityId, EntityKind, EntityRegistry, EventLog, GridPos,
        LogEvent, Rect, Room, RoomId, RoomTable, Severity, SimulationContext, TerrainKind,
        TurnId,
    };

    // Grid
    pub use derelict_grid::{GridError, TileField};

    // Hazard stages and player I/O
    pub use derelict_hazard::{
        DamageResolver, EscalationState, HazardStage, PlayerVitals, SensorSuite, StageContext,
        TurnInput,
    };

    // Engine
    pub use derelict_engine::{
        state_hash, ConfigError, HazardSummary, StationConfig, StationState, TickOutcome,
        TickPipeline, TickReport,
    };
}
