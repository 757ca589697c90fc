//! Hazard simulators for the Derelict station.
//!
//! Each simulator is a [`HazardStage`]: a stateless operator over the
//! staged tile field, executed in a fixed order every turn:
//!
//! 1. [`HeatSmokeSimulator`] — relay-sourced heat and smoke spread/decay
//! 2. [`PressureSimulator`] — breach drain, equalisation, bulkhead logic
//! 3. [`RadiationSimulator`] — wall-penetrating spread, shield suppression
//! 4. [`StructuralStressSimulator`] — stress spread and collapse
//! 5. [`DeteriorationScheduler`] — periodic waves and one-time milestones
//!
//! The [`DamageResolver`] then reads the final field at the player's cell.
//! Reordering any of this silently changes game balance and breaks
//! recorded-replay equivalence.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod damage;
pub mod deterioration;
pub mod heat_smoke;
pub mod pressure;
pub mod radiation;
pub mod stage;
pub mod stress;

pub use damage::{DamageResolver, PlayerVitals, SensorSuite, TurnInput};
pub use deterioration::{DeteriorationScheduler, EscalationState};
pub use heat_smoke::HeatSmokeSimulator;
pub use pressure::PressureSimulator;
pub use radiation::RadiationSimulator;
pub use stage::{HazardStage, StageContext};
pub use stress::StructuralStressSimulator;
