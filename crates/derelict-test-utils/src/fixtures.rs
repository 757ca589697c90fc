//! Reusable field, registry, and stage fixtures.

use derelict_core::{
    Cell, Difficulty, EntityRegistry, EventLog, GridPos, Rect, Room, RoomId, RoomTable,
    SimulationContext, TurnId,
};
use derelict_grid::TileField;
use derelict_hazard::{EscalationState, HazardStage, StageContext};

/// An all-floor deck: every cell walkable and fully pressurised.
pub fn open_deck(width: u32, height: u32) -> TileField {
    TileField::filled(width, height, Cell::floor()).expect("fixture dimensions are non-zero")
}

/// A two-room table covering the left and right halves of a `width` x
/// `height` deck. The left room is safe, the right is not.
pub fn two_room_table(width: i32, height: i32) -> RoomTable {
    let mid = width / 2;
    RoomTable::from_rooms(vec![
        Room {
            id: RoomId(0),
            bounds: Rect::new(GridPos::new(0, 0), GridPos::new(mid - 1, height - 1)),
            safe: true,
        },
        Room {
            id: RoomId(1),
            bounds: Rect::new(GridPos::new(mid, 0), GridPos::new(width - 1, height - 1)),
            safe: false,
        },
    ])
}

/// Everything a single [`HazardStage`] needs to run in isolation.
///
/// Mutate the public fields to set up a scenario, then call
/// [`StageHarness::run_stage`] once per simulated turn.
pub struct StageHarness {
    /// The staged field; starts as an open deck.
    pub field: TileField,
    /// Hazard source entities; starts empty.
    pub entities: EntityRegistry,
    /// Milestone once-flags; starts unfired.
    pub escalation: EscalationState,
    /// Event sink shared across runs.
    pub events: EventLog,
    /// Room layout; starts empty.
    pub rooms: RoomTable,
    /// Generation seed.
    pub seed: u64,
    /// Turn passed to the next `run_stage` call.
    pub turn: TurnId,
    /// Difficulty passed to the next `run_stage` call.
    pub difficulty: Difficulty,
    /// Player position passed to the next `run_stage` call.
    pub player: GridPos,
}

impl StageHarness {
    /// Run one stage for one turn against the harness state.
    ///
    /// Freezes the current field as the stage's prior view, exactly as the
    /// engine pipeline does between stages.
    pub fn run_stage(&mut self, stage: &dyn HazardStage) {
        let sim = SimulationContext::new(self.seed, self.turn, self.difficulty);
        let frozen = self.field.clone();
        let mut ctx = StageContext {
            prior: &frozen,
            field: &mut self.field,
            entities: &mut self.entities,
            escalation: &mut self.escalation,
            events: &mut self.events,
            sim: &sim,
            player: self.player,
            rooms: &self.rooms,
        };
        stage.step(&mut ctx);
    }

    /// Run one stage for `turns` consecutive turns, incrementing the turn
    /// counter after each.
    pub fn run_stage_turns(&mut self, stage: &dyn HazardStage, turns: u64) {
        for _ in 0..turns {
            self.run_stage(stage);
            self.turn = TurnId(self.turn.0 + 1);
        }
    }
}

/// A harness over an open `width` x `height` deck.
///
/// Seed 77, turn 1, normal difficulty, player parked at the origin.
pub fn stage_harness(width: u32, height: u32) -> StageHarness {
    StageHarness {
        field: open_deck(width, height),
        entities: EntityRegistry::new(),
        escalation: EscalationState::new(),
        events: EventLog::new(),
        rooms: RoomTable::new(),
        seed: 77,
        turn: TurnId(1),
        difficulty: Difficulty::Normal,
        player: GridPos::new(0, 0),
    }
}
