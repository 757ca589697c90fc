//! Integration tests running the full stage sequence in contract order.

use derelict_core::{EntityKind, EventLog, GridPos, SimulationContext, TurnId};
use derelict_hazard::{
    DamageResolver, DeteriorationScheduler, HeatSmokeSimulator, PlayerVitals, PressureSimulator,
    RadiationSimulator, SensorSuite, StructuralStressSimulator, TurnInput,
};
use derelict_test_utils::{stage_harness, StageHarness};
use proptest::prelude::*;

/// Run one full turn: all five stages in the fixed contract order.
fn full_turn(h: &mut StageHarness) {
    h.run_stage(&HeatSmokeSimulator);
    h.run_stage(&PressureSimulator);
    h.run_stage(&RadiationSimulator);
    h.run_stage(&StructuralStressSimulator);
    h.run_stage(&DeteriorationScheduler);
    h.turn = TurnId(h.turn.0 + 1);
}

#[test]
fn relay_scenario_survives_the_full_pipeline() {
    // The §heat contract scenario must hold through the whole stage
    // sequence, not just the heat stage: no later stage may touch heat.
    let mut h = stage_harness(10, 10);
    h.field.get_mut(GridPos::new(5, 5)).unwrap().heat = 90;
    h.entities
        .spawn(GridPos::new(5, 5), EntityKind::Relay { overheating: true });

    full_turn(&mut h);

    // ceil(12 * 90/100) into the pressurised neighbour.
    assert_eq!(h.field.get(GridPos::new(5, 6)).unwrap().heat, 11);
    // min(cap, 90 + rate), untouched by decay.
    assert_eq!(h.field.get(GridPos::new(5, 5)).unwrap().heat, 90);
}

#[test]
fn zero_state_is_a_fixed_point() {
    let mut h = stage_harness(8, 8);
    let before = h.field.clone();

    for _ in 0..10 {
        full_turn(&mut h);
    }

    for pos in before.positions() {
        assert_eq!(h.field.get(pos), before.get(pos), "cell {pos} drifted");
    }
    // The periodic wave may narrate the station settling, but nothing
    // above a notice and no mechanical change.
    assert!(h
        .events
        .all()
        .iter()
        .all(|e| e.severity == derelict_core::Severity::Notice));
    assert!(h.entities.is_empty());
}

#[test]
fn unattended_heat_zones_expand_monotonically() {
    let mut h = stage_harness(12, 12);
    h.entities
        .spawn(GridPos::new(6, 6), EntityKind::Relay { overheating: true });

    let hot_cells = |h: &StageHarness| {
        h.field
            .positions()
            .filter(|&p| h.field.get(p).unwrap().heat > 0)
            .count()
    };

    let mut last = 0;
    for _ in 0..30 {
        full_turn(&mut h);
        let now = hot_cells(&h);
        assert!(now >= last, "heat zone shrank: {now} < {last}");
        last = now;
    }
    assert!(last > 5, "heat zone failed to expand beyond the source");
}

#[test]
fn shield_holds_the_line_against_a_live_source() {
    let mut h = stage_harness(12, 12);
    h.entities
        .spawn(GridPos::new(2, 2), EntityKind::RadiationSource);
    h.entities.spawn(
        GridPos::new(8, 2),
        EntityKind::ShieldGenerator { activated: true },
    );

    for _ in 0..20 {
        full_turn(&mut h);
    }

    // The source side is saturated...
    assert!(h.field.get(GridPos::new(2, 2)).unwrap().radiation > 0);
    // ...but every cell under the shield umbrella reads exactly zero.
    for pos in h.field.manhattan_disk(GridPos::new(8, 2), 4) {
        assert_eq!(
            h.field.get(pos).unwrap().radiation,
            0,
            "shielded cell {pos} is hot"
        );
    }
}

#[test]
fn breach_eventually_seals_doors_between_compartments() {
    // A 3-wide corridor deck: breach on the left, door in the middle.
    let mut h = stage_harness(9, 1);
    *h.field.get_mut(GridPos::new(4, 0)).unwrap() = derelict_core::Cell::door();
    h.entities
        .spawn(GridPos::new(0, 0), EntityKind::Breach { sealed: false });

    let mut sealed_turn = None;
    for turn in 0..60 {
        full_turn(&mut h);
        let door = h.field.get(GridPos::new(4, 0)).unwrap();
        if !door.walkable {
            sealed_turn = Some(turn);
            break;
        }
    }
    let sealed_turn = sealed_turn.expect("door beside a venting corridor must seal");

    // Pressure next to the breach must already have been low by then.
    assert!(sealed_turn >= 1);
    let near = h.field.get(GridPos::new(3, 0)).unwrap().pressure;
    assert!(near < 30, "door sealed while pressure was still {near}");
}

#[test]
fn collapse_blocks_a_corridor_and_rubble_clears_it() {
    let mut h = stage_harness(7, 7);
    let pos = GridPos::new(3, 3);
    h.field.get_mut(pos).unwrap().stress = 100;

    for _ in 0..3 {
        full_turn(&mut h);
    }

    assert!(!h.field.get(pos).unwrap().walkable);
    assert!(h.entities.rubble_at(pos));
    let collapse_logged = h
        .events
        .all()
        .iter()
        .any(|e| e.message.contains("gives way"));
    assert!(collapse_logged);
}

#[test]
fn damage_priority_on_a_cell_that_is_both_cold_and_burning() {
    // End-to-end: run the stages, then resolve damage on a cell that
    // qualifies for both decompression and burn damage. Only the
    // decompression branch may fire.
    let mut h = stage_harness(6, 6);
    let pos = GridPos::new(3, 3);
    {
        let c = h.field.get_mut(pos).unwrap();
        c.pressure = 5;
        c.heat = 100;
    }
    h.player = pos;

    full_turn(&mut h);

    let sim = SimulationContext::new(h.seed, h.turn, h.difficulty);
    let input = TurnInput {
        player: pos,
        sensors: SensorSuite::none(),
        vitals: PlayerVitals::new(20),
    };
    let mut events = EventLog::new();
    let out = DamageResolver.resolve(&h.field, &input, &sim, &mut events);

    assert_eq!(events.len(), 1, "exactly one damage branch may fire");
    assert!(events.all()[0].message.contains("Thin air"));
    assert_eq!(out.hp, 20 - 6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn all_scalars_clamped_after_any_turn(
        cells in prop::collection::vec((0u8..=100, 0u8..=100, 0u8..=100, 0u8..=100, 0u8..=100), 36),
        relay_at in 0usize..36,
        seed in 0u64..1000,
    ) {
        let mut h = stage_harness(6, 6);
        h.seed = seed;
        for (i, (heat, smoke, pressure, radiation, stress)) in cells.iter().enumerate() {
            let pos = GridPos::new((i % 6) as i32, (i / 6) as i32);
            let c = h.field.get_mut(pos).unwrap();
            c.heat = *heat;
            c.smoke = *smoke;
            c.pressure = *pressure;
            c.radiation = *radiation;
            c.stress = *stress;
        }
        let relay_pos = GridPos::new((relay_at % 6) as i32, (relay_at / 6) as i32);
        h.entities.spawn(relay_pos, EntityKind::Relay { overheating: true });

        full_turn(&mut h);

        for pos in h.field.positions().collect::<Vec<_>>() {
            let c = h.field.get(pos).unwrap();
            prop_assert!(c.heat <= 100);
            prop_assert!(c.smoke <= 100);
            prop_assert!(c.pressure <= 100);
            prop_assert!(c.radiation <= 100);
            prop_assert!(c.stress <= 100);
        }
    }
}
