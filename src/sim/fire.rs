//! Arrow throws and resets
//!
//! The two transitions that mutate a [`GameState`]. Both are synchronous and
//! take everything they need as arguments; side effects (sounds, saving the
//! high score) are reported through [`FireOutcome`] for the caller to run.

use super::seeding::seed_level;
use super::state::{GamePhase, GameState};
use crate::{circular_distance, normalize_360};

/// What a fire action did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// Game over or out of arrows; nothing changed
    Ignored,
    /// Arrow stuck at the given log-local angle
    Stuck { angle: f32 },
    /// Arrow stuck and emptied the quiver; `level` is the level now starting
    LevelComplete { angle: f32, level: u32 },
    /// Arrow hit a stuck arrow; the run is over
    Collision { angle: f32, new_high_score: bool },
}

impl FireOutcome {
    /// Whether the throw changed any state
    pub fn is_ignored(&self) -> bool {
        matches!(self, FireOutcome::Ignored)
    }
}

/// Log-local angle an arrow lands at, given the log's rotation
pub fn impact_angle(state: &GameState, rotation_deg: f32) -> f32 {
    normalize_360(
        state.tuning.fixed_impact_angle_deg - rotation_deg + state.tuning.impact_offset_deg,
    )
}

/// Whether an arrow landing at `angle` would hit a stuck arrow
pub fn collides(state: &GameState, angle: f32) -> bool {
    let tolerance = state.tuning.impact_tolerance_deg;
    state
        .stuck_arrows
        .iter()
        .any(|&existing| circular_distance(existing, angle) < tolerance)
}

/// Throw an arrow at the log, which is currently rotated by `rotation_deg`
pub fn fire(state: &mut GameState, rotation_deg: f32) -> FireOutcome {
    if !state.can_fire() {
        return FireOutcome::Ignored;
    }

    let angle = impact_angle(state, rotation_deg);

    if collides(state, angle) {
        state.phase = GamePhase::GameOver;
        let new_high_score = state.score > state.high_score;
        if new_high_score {
            state.high_score = state.score;
        }
        log::info!(
            "Game over at level {} with score {} (arrow at {:.1} deg)",
            state.level,
            state.score,
            angle
        );
        return FireOutcome::Collision {
            angle,
            new_high_score,
        };
    }

    state.stuck_arrows.push(angle);
    state.score += 1;
    state.remaining_arrows -= 1;

    if state.remaining_arrows == 0 {
        advance_level(state);
        return FireOutcome::LevelComplete {
            angle,
            level: state.level,
        };
    }

    FireOutcome::Stuck { angle }
}

/// Move to the next level: faster log, fresh quiver, fresh stuck arrows
fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.remaining_arrows = state.tuning.arrows_for_level(state.level);
    state.rotation_period_ms = state.tuning.next_rotation_period(state.rotation_period_ms);
    state.stuck_arrows = seed_level(state);
    log::info!(
        "Level {} started: {} arrows, {} pre-placed, period {:.0} ms",
        state.level,
        state.remaining_arrows,
        state.stuck_arrows.len(),
        state.rotation_period_ms
    );
}

/// Start over from level 1, keeping the high score
pub fn reset(state: &mut GameState) {
    state.score = 0;
    state.level = 1;
    state.remaining_arrows = state.tuning.arrows_for_level(1);
    state.rotation_period_ms = state.tuning.initial_rotation_period_ms;
    state.phase = GamePhase::Playing;
    state.rng_state.stream = state.rng_state.stream.wrapping_add(1);
    state.stuck_arrows = seed_level(state);
    log::debug!(
        "Game reset (high score {}, stream {})",
        state.high_score,
        state.rng_state.stream
    );
}
