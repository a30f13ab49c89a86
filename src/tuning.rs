//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]; settings may override individual
//! values.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a freshly started level looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelUpPolicy {
    /// Every level starts with an empty log
    Clear,
    /// Higher levels start with a few pre-placed arrows as obstacles
    #[default]
    Reseed,
}

impl LevelUpPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelUpPolicy::Clear => "clear",
            LevelUpPolicy::Reseed => "reseed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "clear" | "empty" => Some(LevelUpPolicy::Clear),
            "reseed" | "random" => Some(LevelUpPolicy::Reseed),
            _ => None,
        }
    }
}

/// Balance values for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub impact_tolerance_deg: f32,
    pub fixed_impact_angle_deg: f32,
    pub impact_offset_deg: f32,
    pub initial_arrows: u32,
    pub max_extra_arrows: u32,
    pub max_preseeded_arrows: u32,
    pub initial_rotation_period_ms: f32,
    pub min_rotation_period_ms: f32,
    pub speedup_step_ms: f32,
    pub level_up_policy: LevelUpPolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            impact_tolerance_deg: IMPACT_TOLERANCE_DEG,
            fixed_impact_angle_deg: FIXED_IMPACT_ANGLE_DEG,
            impact_offset_deg: IMPACT_OFFSET_DEG,
            initial_arrows: INITIAL_ARROWS,
            max_extra_arrows: MAX_EXTRA_ARROWS,
            max_preseeded_arrows: MAX_PRESEEDED_ARROWS,
            initial_rotation_period_ms: INITIAL_ROTATION_PERIOD_MS,
            min_rotation_period_ms: MIN_ROTATION_PERIOD_MS,
            speedup_step_ms: SPEEDUP_STEP_MS,
            level_up_policy: LevelUpPolicy::default(),
        }
    }
}

impl Tuning {
    /// Arrow budget for a level (1-based). Never decreases with level.
    pub fn arrows_for_level(&self, level: u32) -> u32 {
        let extra = level.saturating_sub(1).min(self.max_extra_arrows);
        self.initial_arrows.saturating_add(extra)
    }

    /// Number of arrows pre-placed when a level starts
    pub fn preseeded_for_level(&self, level: u32) -> u32 {
        match self.level_up_policy {
            LevelUpPolicy::Clear => 0,
            LevelUpPolicy::Reseed => level.saturating_sub(1).min(self.max_preseeded_arrows),
        }
    }

    /// Rotation period after one more level-up
    pub fn next_rotation_period(&self, current_ms: f32) -> f32 {
        (current_ms - self.speedup_step_ms).max(self.min_rotation_period_ms)
    }

    /// Clamp values that would break the model's invariants
    pub fn sanitized(mut self) -> Self {
        if !self.impact_tolerance_deg.is_finite() || self.impact_tolerance_deg < 0.0 {
            log::warn!("Invalid impact tolerance {}, using default", self.impact_tolerance_deg);
            self.impact_tolerance_deg = IMPACT_TOLERANCE_DEG;
        }
        self.impact_tolerance_deg = self.impact_tolerance_deg.min(180.0);
        if self.initial_arrows == 0 {
            log::warn!("Initial arrows must be positive, using default");
            self.initial_arrows = INITIAL_ARROWS;
        }
        if !self.min_rotation_period_ms.is_finite() || self.min_rotation_period_ms <= 0.0 {
            self.min_rotation_period_ms = MIN_ROTATION_PERIOD_MS;
        }
        if !self.initial_rotation_period_ms.is_finite() {
            self.initial_rotation_period_ms = INITIAL_ROTATION_PERIOD_MS;
        }
        self.initial_rotation_period_ms = self
            .initial_rotation_period_ms
            .max(self.min_rotation_period_ms);
        if !self.speedup_step_ms.is_finite() || self.speedup_step_ms < 0.0 {
            self.speedup_step_ms = SPEEDUP_STEP_MS;
        }

        // A level's arrows, thrown or pre-placed, must fit on the log
        let slots = self.slot_count();
        if self.initial_arrows > slots {
            log::warn!("Initial arrows {} exceed {} slots", self.initial_arrows, slots);
            self.initial_arrows = slots;
        }
        self.max_extra_arrows = self.max_extra_arrows.min(slots - self.initial_arrows);
        self.max_preseeded_arrows = self
            .max_preseeded_arrows
            .min(slots - self.initial_arrows - self.max_extra_arrows);
        self
    }

    /// How many arrows fit around the log at the impact tolerance
    pub fn slot_count(&self) -> u32 {
        if self.impact_tolerance_deg <= 0.0 {
            return u32::MAX;
        }
        ((360.0 / self.impact_tolerance_deg) as u32).max(1)
    }
}
