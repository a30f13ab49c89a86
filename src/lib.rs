//! Arrow Log Hit - a rotating-target arcade mini-game plus a tiny storefront model
//!
//! Core modules:
//! - `sim`: Deterministic game model (rotation, arrow impacts, levels)
//! - `session`: Owns a running game and dispatches its side effects
//! - `persistence`: Key-value storage backing settings and the high score
//! - `audio`: Fire-and-forget sound effects
//! - `tuning`: Data-driven game balance
//! - `shop`: Product catalog and shopping cart

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod shop;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arrows closer than this (degrees, circular) to a stuck arrow collide
    pub const IMPACT_TOLERANCE_DEG: f32 = 15.0;
    /// World angle where a fired arrow always strikes (top of the log)
    pub const FIXED_IMPACT_ANGLE_DEG: f32 = 0.0;
    /// Aligns the renderer's zero angle with the impact point
    pub const IMPACT_OFFSET_DEG: f32 = 175.0;

    /// Arrows available on level 1
    pub const INITIAL_ARROWS: u32 = 5;
    /// Upper bound on the per-level arrow bonus
    pub const MAX_EXTRA_ARROWS: u32 = 7;
    /// Upper bound on arrows pre-placed on a fresh level
    pub const MAX_PRESEEDED_ARROWS: u32 = 6;

    /// One full log rotation on level 1
    pub const INITIAL_ROTATION_PERIOD_MS: f32 = 4000.0;
    /// Fastest allowed rotation
    pub const MIN_ROTATION_PERIOD_MS: f32 = 1200.0;
    /// Period reduction applied on every level-up
    pub const SPEEDUP_STEP_MS: f32 = 300.0;

    /// Fixed simulation step for the demo driver (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_360(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest distance between two angles on the circle, in [0, 180]
#[inline]
pub fn circular_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Convert polar (r, theta in degrees, 0 = up, clockwise) to cartesian (x, y-down)
#[inline]
pub fn polar_to_cartesian(r: f32, theta_deg: f32) -> Vec2 {
    let theta = theta_deg.to_radians();
    Vec2::new(r * theta.sin(), -r * theta.cos())
}
