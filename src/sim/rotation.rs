//! Continuous log rotation
//!
//! The log spins at a constant rate of `360 / period` degrees per
//! millisecond. The driver is advanced by whoever owns the clock (a frame
//! loop, wall-clock timer, or test) and sampled once per throw.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_ROTATION_PERIOD_MS;

/// Linear, wrapping rotation clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationDriver {
    period_ms: f32,
    /// Time into the current cycle, always in [0, period_ms)
    elapsed_ms: f32,
}

impl RotationDriver {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms: sanitize_period(period_ms),
            elapsed_ms: 0.0,
        }
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Advance the clock. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms).rem_euclid(self.period_ms);
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms = 0.0;
        }
    }

    /// Current rotation in degrees, in [0, 360)
    pub fn angle_deg(&self) -> f32 {
        crate::normalize_360(360.0 * self.elapsed_ms / self.period_ms)
    }

    /// Start a new cycle from angle 0 with the given period
    pub fn restart(&mut self, period_ms: f32) {
        self.period_ms = sanitize_period(period_ms);
        self.elapsed_ms = 0.0;
    }
}

fn sanitize_period(period_ms: f32) -> f32 {
    if period_ms.is_finite() && period_ms > 0.0 {
        period_ms
    } else {
        log::warn!("Invalid rotation period {}, using {}", period_ms, MIN_ROTATION_PERIOD_MS);
        MIN_ROTATION_PERIOD_MS
    }
}
