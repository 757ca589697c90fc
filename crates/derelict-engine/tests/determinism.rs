//! Replay determinism: same seed and inputs, bit-identical state.

use derelict_core::{
    Difficulty, EntityKind, EntityRegistry, GridPos, RoomTable, TurnId,
};
use derelict_engine::{state_hash, StationConfig, StationState, TickPipeline};
use derelict_hazard::{PlayerVitals, SensorSuite, TurnInput};
use derelict_test_utils::{open_deck, two_room_table};

fn seeded_state() -> StationState {
    let mut entities = EntityRegistry::new();
    entities.spawn(GridPos::new(3, 3), EntityKind::Relay { overheating: true });
    entities.spawn(GridPos::new(12, 12), EntityKind::RadiationSource);
    entities.spawn(GridPos::new(8, 2), EntityKind::Breach { sealed: false });
    entities.spawn(
        GridPos::new(12, 8),
        EntityKind::ShieldGenerator { activated: true },
    );
    StationState::new(open_deck(16, 16), entities)
}

fn pipeline(seed: u64, rooms: RoomTable) -> TickPipeline {
    TickPipeline::new(StationConfig {
        width: 16,
        height: 16,
        seed,
        difficulty: Difficulty::Normal,
        rooms,
    })
    .expect("config is valid")
}

/// Scripted player input: a fixed patrol, full vitals each turn (the
/// orchestrator owns HP carry-over; the hazard core only transforms it).
fn input_for(turn: u64) -> TurnInput {
    let along = (turn % 8) as i32;
    TurnInput {
        player: GridPos::new(1 + along, 1),
        sensors: SensorSuite::none(),
        vitals: PlayerVitals::new(20),
    }
}

fn hash_trace(seed: u64, turns: u64) -> Vec<u64> {
    let pipeline = pipeline(seed, two_room_table(16, 16));
    let mut state = seeded_state();
    let mut trace = Vec::with_capacity(turns as usize);
    for turn in 1..=turns {
        let outcome = pipeline.advance(&state, &input_for(turn), TurnId(turn));
        state = outcome.state;
        trace.push(state_hash(&state));
    }
    trace
}

#[test]
fn same_seed_reproduces_the_exact_hash_trace() {
    let a = hash_trace(0xD5_CAFE, 300);
    let b = hash_trace(0xD5_CAFE, 300);
    assert_eq!(a, b, "replay diverged from the recorded run");
}

#[test]
fn different_seeds_diverge() {
    let a = hash_trace(1, 300);
    let b = hash_trace(2, 300);
    // 300 turns cross dozens of deterioration waves and a milestone
    // breach draw; distinct seeds cannot shadow each other through all
    // of that.
    assert_ne!(a, b);
}

#[test]
fn advancing_a_state_does_not_mutate_it() {
    let pipeline = pipeline(9, RoomTable::new());
    let state = seeded_state();
    let before = state_hash(&state);

    for turn in 1..=5 {
        let _ = pipeline.advance(&state, &input_for(turn), TurnId(turn));
    }
    assert_eq!(state_hash(&state), before);
}

#[test]
fn identical_turn_identical_outcome() {
    // advance() is a pure function of (state, input, turn): calling it
    // twice with the same arguments yields the same successor state.
    let pipeline = pipeline(123, two_room_table(16, 16));
    let state = seeded_state();

    let a = pipeline.advance(&state, &input_for(1), TurnId(1));
    let b = pipeline.advance(&state, &input_for(1), TurnId(1));
    assert_eq!(state_hash(&a.state), state_hash(&b.state));
    assert_eq!(a.report.events.len(), b.report.events.len());
}
