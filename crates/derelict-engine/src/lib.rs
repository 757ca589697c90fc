//! The Derelict turn pipeline.
//!
//! [`TickPipeline`] wires the five hazard stages and the damage resolver
//! into one deterministic, atomic turn step: it accepts an immutable
//! [`StationState`], runs the stages in their fixed order, and publishes a
//! new state plus a [`TickReport`] for the orchestrator. There is no
//! partial failure — a turn is total arithmetic over a bounded grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod pipeline;
pub mod replay;
pub mod report;
pub mod state;

pub use config::{ConfigError, StationConfig};
pub use pipeline::{TickOutcome, TickPipeline};
pub use replay::state_hash;
pub use report::{HazardSummary, TickReport};
pub use state::StationState;
