//! The [`HazardStage`] trait and per-stage execution context.

use derelict_core::{EntityRegistry, EventLog, GridPos, RoomTable, SimulationContext};
use derelict_grid::TileField;

use crate::deterioration::EscalationState;

/// Execution context handed to each stage's `step()`.
///
/// Fields are public so a stage can hold disjoint borrows simultaneously
/// (read `prior` while writing `field`, spawn into `entities` while
/// logging to `events`).
///
/// # Split views
///
/// - `prior` is the frozen stage-start field: projections read it so a
///   cell's output this stage cannot feed its own input.
/// - `field` is the staged field the stage mutates. It begins each stage
///   as a copy-on-write clone of `prior`, so untouched rows stay shared.
pub struct StageContext<'a> {
    /// Frozen stage-start view of the field.
    pub prior: &'a TileField,
    /// The staged field being written this stage.
    pub field: &'a mut TileField,
    /// Hazard source entities. Stages read flags and may spawn rubble or
    /// milestone breaches; they never toggle externally-owned flags.
    pub entities: &'a mut EntityRegistry,
    /// Milestone once-flags, part of replayed state.
    pub escalation: &'a mut EscalationState,
    /// Append-only event sink for this turn.
    pub events: &'a mut EventLog,
    /// Seed, turn, and difficulty for this tick.
    pub sim: &'a SimulationContext,
    /// The player's current cell.
    pub player: GridPos,
    /// Generated room layout, read-only.
    pub rooms: &'a RoomTable,
}

/// A stateless operator in the per-turn hazard pipeline.
///
/// # Contract
///
/// - `step()` MUST be deterministic: same context, same output. The only
///   permitted noise source is the stateless hash in `derelict-core`.
/// - `&self` — stages hold tuning only; all mutable state flows through
///   the context.
/// - `step()` is total. Out-of-grid coordinates are skipped, arithmetic
///   is clamped; there is no error path mid-turn.
///
/// # Object safety
///
/// The trait is object-safe; the pipeline stores stages as
/// `Vec<Box<dyn HazardStage>>` and runs them in registration order.
pub trait HazardStage: Send + 'static {
    /// Stable name for events and test diagnostics.
    fn name(&self) -> &'static str;

    /// Execute the stage for one turn.
    fn step(&self, ctx: &mut StageContext<'_>);
}
