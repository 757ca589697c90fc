//! The simulation context threaded through every tick.

use std::fmt;

use crate::id::TurnId;

/// Difficulty setting, fixed at station generation.
///
/// Scales incoming damage and the deterioration cadence. Never consulted
/// for anything else, so two runs at different difficulty diverge only
/// where the contract says they may.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// Forgiving: half damage, slow deterioration.
    Easy,
    /// The baseline tuning.
    #[default]
    Normal,
    /// Half again as much damage, fast deterioration.
    Hard,
}

impl Difficulty {
    /// Multiplier applied to all hazard damage against the player.
    pub fn damage_multiplier(&self) -> f32 {
        match self {
            Self::Easy => 0.5,
            Self::Normal => 1.0,
            Self::Hard => 1.5,
        }
    }

    /// Turns between periodic deterioration waves.
    pub fn deterioration_interval(&self) -> u64 {
        match self {
            Self::Easy => 9,
            Self::Normal => 7,
            Self::Hard => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Immutable per-turn context handed to every stage.
///
/// Threading this value explicitly (rather than reading a global) is what
/// lets tests and replays run isolated, repeated, or side by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationContext {
    /// The map's generation seed. All in-tick noise derives from it.
    pub seed: u64,
    /// The turn being simulated.
    pub turn: TurnId,
    /// Difficulty selected at generation.
    pub difficulty: Difficulty,
}

impl SimulationContext {
    /// Construct a context for one turn.
    pub fn new(seed: u64, turn: TurnId, difficulty: Difficulty) -> Self {
        Self {
            seed,
            turn,
            difficulty,
        }
    }
}
