//! Pre-placed arrows for a fresh level
//!
//! Placement keeps every pair of arrows at least the impact tolerance apart,
//! so the collision invariant holds before the player throws anything.

use rand::Rng;

use super::state::GameState;
use crate::{circular_distance, normalize_360};

/// Attempts per arrow before giving up on placing it
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Stuck arrows a level should start with, per the tuning's level-up policy
pub fn seed_level(state: &GameState) -> Vec<f32> {
    let count = state.tuning.preseeded_for_level(state.level) as usize;
    if count == 0 {
        return Vec::new();
    }

    let mut rng = state.rng_state.rng_for_level(state.level);
    let tolerance = state.tuning.impact_tolerance_deg;
    let mut arrows: Vec<f32> = Vec::with_capacity(count);

    for _ in 0..count {
        let placed = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let candidate = normalize_360(rng.random_range(0.0..360.0));
            arrows
                .iter()
                .all(|&a| circular_distance(a, candidate) >= tolerance)
                .then_some(candidate)
        });
        match placed {
            Some(angle) => arrows.push(angle),
            None => {
                log::warn!(
                    "Could only pre-place {} of {} arrows on level {}",
                    arrows.len(),
                    count,
                    state.level
                );
                break;
            }
        }
    }

    arrows
}

/// True when no two arrows are closer than `tolerance`
pub fn is_well_spaced(arrows: &[f32], tolerance: f32) -> bool {
    arrows.iter().enumerate().all(|(i, &a)| {
        arrows[i + 1..]
            .iter()
            .all(|&b| circular_distance(a, b) >= tolerance)
    })
}
