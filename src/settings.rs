//! Player settings and preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError, load_json, save_json};
use crate::tuning::{LevelUpPolicy, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all sound
    pub muted: bool,

    // === HUD ===
    /// Show the log-local angle of each throw
    pub show_angles: bool,

    // === Gameplay ===
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            show_angles: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arrow_log_hit_settings";

    /// Switch the level-up policy
    pub fn with_policy(mut self, policy: LevelUpPolicy) -> Self {
        self.tuning.level_up_policy = policy;
        self
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, using defaults if missing or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<Settings>(storage, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                Settings::STORAGE_KEY,
                r#"{"muted":true,"tuning":{"initial_arrows":8,"level_up_policy":"Clear"}}"#,
            )
            .unwrap();
        let settings = Settings::load(&storage);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.tuning.initial_arrows, 8);
        assert_eq!(settings.tuning.level_up_policy, LevelUpPolicy::Clear);
        assert_eq!(settings.tuning.impact_offset_deg, 175.0);
    }

    #[test]
    fn test_roundtrip_through_storage() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            show_angles: true,
            ..Default::default()
        }
        .with_policy(LevelUpPolicy::Clear);
        settings.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn test_garbage_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Settings::STORAGE_KEY, "42").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
