//! Test utilities for Derelict development.
//!
//! Not published; shared fixtures for unit and integration tests across
//! the workspace.

#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{open_deck, stage_harness, two_room_table, StageHarness};
