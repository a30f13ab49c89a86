//! Game state and core model types
//!
//! Everything a running game needs lives in [`GameState`]. The rotation of the
//! log is not stored here: it is sampled from a
//! [`super::RotationDriver`] and handed to [`super::fire`] per shot.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Arrows can be fired
    Playing,
    /// An arrow hit another arrow; only reset leaves this phase
    GameOver,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped on every reset so each game gets fresh layouts
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Independent generator for a given level, so reseeding is reproducible
    pub fn rng_for_level(&self, level: u32) -> Pcg32 {
        Pcg32::new(
            self.seed ^ (level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
            (self.stream << 32) | level as u64,
        )
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// RNG state for level seeding
    pub rng_state: RngState,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Log-local angles (degrees, [0, 360)) of arrows stuck this level
    pub stuck_arrows: Vec<f32>,
    /// Successful throws this run
    pub score: u64,
    /// Throws left on the current level
    pub remaining_arrows: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Time for one full rotation of the log
    pub rotation_period_ms: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Best score seen at any game over; survives reset
    pub high_score: u64,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default(), 0)
    }

    /// Create a new game with explicit tuning and a previously persisted high score
    pub fn with_tuning(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            rng_state: RngState::new(seed),
            remaining_arrows: tuning.arrows_for_level(1),
            rotation_period_ms: tuning.initial_rotation_period_ms,
            tuning,
            stuck_arrows: Vec::new(),
            score: 0,
            level: 1,
            phase: GamePhase::Playing,
            high_score,
        };
        state.stuck_arrows = super::seeding::seed_level(&state);
        state
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether a fire action would be processed right now
    pub fn can_fire(&self) -> bool {
        self.phase == GamePhase::Playing && self.remaining_arrows > 0
    }

    /// Tip position of every stuck arrow, relative to the log center,
    /// for a log of the given radius rotated by `rotation_deg`
    pub fn arrow_tip_positions(&self, radius: f32, rotation_deg: f32) -> Vec<Vec2> {
        self.stuck_arrows
            .iter()
            .map(|&angle| polar_to_cartesian(radius, angle + rotation_deg))
            .collect()
    }
}
