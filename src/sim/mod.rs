//! Deterministic game model
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Rotation is sampled, never read from a shared cell
//! - Seeded RNG only
//! - No audio, storage or terminal dependencies

pub mod fire;
pub mod rotation;
pub mod seeding;
pub mod state;

pub use fire::{FireOutcome, collides, fire, impact_angle, reset};
pub use rotation::RotationDriver;
pub use seeding::{is_well_spaced, seed_level};
pub use state::{GamePhase, GameState, RngState};
