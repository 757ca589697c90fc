//! The fixed-order turn pipeline.

use derelict_core::{EntityKind, EventLog, SimulationContext, TurnId};
use derelict_hazard::{
    DamageResolver, DeteriorationScheduler, HazardStage, HeatSmokeSimulator, PressureSimulator,
    RadiationSimulator, StageContext, StructuralStressSimulator, TurnInput,
};

use crate::config::{ConfigError, StationConfig};
use crate::report::{HazardSummary, TickReport};
use crate::state::StationState;

/// Integrity lost per unsealed breach per turn.
const INTEGRITY_BREACH_PENALTY: u32 = 1;

/// Result of one turn: the published state and the turn's report.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    /// The new simulation state.
    pub state: StationState,
    /// Everything the orchestrator needs to narrate and adjudicate.
    pub report: TickReport,
}

/// Runs the hazard stages in their fixed order, then damage resolution.
///
/// The order — heat/smoke, pressure, radiation, stress, deterioration,
/// damage — is part of the game's balance contract: each stage reads the
/// previous stage's output, and recorded replays assume the sequence.
/// The pipeline is stateless between turns; everything mutable lives in
/// [`StationState`].
pub struct TickPipeline {
    config: StationConfig,
    stages: Vec<Box<dyn HazardStage>>,
    resolver: DamageResolver,
}

impl TickPipeline {
    /// Build a pipeline over a validated configuration.
    pub fn new(config: StationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            stages: vec![
                Box::new(HeatSmokeSimulator),
                Box::new(PressureSimulator),
                Box::new(RadiationSimulator),
                Box::new(StructuralStressSimulator),
                Box::new(DeteriorationScheduler),
            ],
            resolver: DamageResolver,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    /// Stage names in execution order, for diagnostics.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Advance the simulation one turn.
    ///
    /// `state` is read-only; the returned outcome carries the successor
    /// state. Each stage sees the field as frozen at its own start (the
    /// prior stage's output) and writes through copy-on-write rows, so
    /// rows untouched by the whole turn stay shared with `state`.
    pub fn advance(&self, state: &StationState, input: &TurnInput, turn: TurnId) -> TickOutcome {
        let sim = SimulationContext::new(self.config.seed, turn, self.config.difficulty);
        let mut next = state.clone();
        let mut events = EventLog::new();

        let rubble_before = count_rubble(&next.entities);

        for stage in &self.stages {
            let frozen = next.field.clone();
            let mut ctx = StageContext {
                prior: &frozen,
                field: &mut next.field,
                entities: &mut next.entities,
                escalation: &mut next.escalation,
                events: &mut events,
                sim: &sim,
                player: input.player,
                rooms: &self.config.rooms,
            };
            stage.step(&mut ctx);
        }

        let vitals = self.resolver.resolve(&next.field, input, &sim, &mut events);

        let breaches = next.entities.unsealed_breach_cells().len() as u32;
        let penalty = (breaches * INTEGRITY_BREACH_PENALTY).min(u8::MAX as u32) as u8;
        next.integrity = next.integrity.saturating_sub(penalty);

        let cells_collapsed = count_rubble(&next.entities).saturating_sub(rubble_before);
        let summary = HazardSummary::measure(&next.field, &next.entities, cells_collapsed);

        let report = TickReport {
            turn,
            events: events.into_events(),
            vitals,
            integrity: next.integrity,
            summary,
        };
        TickOutcome {
            state: next,
            report,
        }
    }
}

fn count_rubble(entities: &derelict_core::EntityRegistry) -> u32 {
    entities
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::Rubble))
        .count() as u32
}
