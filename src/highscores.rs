//! Persisted high score
//!
//! A single best score, loaded once per session and saved on every increase.
//! Stored as a bare JSON integer.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError, load_json, save_json};

/// The stored high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "StoredHighScore", into = "u64")]
pub struct HighScore {
    /// Best score at any game over
    pub score: u64,
}

/// Shapes accepted when reading; `{"score": n}` is what older saves used
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredHighScore {
    Bare(u64),
    Record { score: u64 },
}

impl From<StoredHighScore> for HighScore {
    fn from(stored: StoredHighScore) -> Self {
        match stored {
            StoredHighScore::Bare(score) | StoredHighScore::Record { score } => Self { score },
        }
    }
}

impl From<HighScore> for u64 {
    fn from(record: HighScore) -> Self {
        record.score
    }
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arrow_log_hit_highscore";

    /// Check if a score would replace this record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a finished run; returns true if it became the new best
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load the stored record, falling back to zero on any failure
    pub fn load(storage: &dyn Storage) -> Self {
        match load_json::<HighScore>(storage, Self::STORAGE_KEY) {
            Ok(Some(record)) => {
                log::info!("Loaded high score {}", record.score);
                record
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load high score: {}", e);
                Self::default()
            }
        }
    }

    /// Save the record
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        save_json(storage, Self::STORAGE_KEY, self)?;
        log::info!("High score saved ({})", self.score);
        Ok(())
    }
}
