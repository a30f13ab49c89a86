//! A running game with its collaborators
//!
//! The session is the single owner of the game state. It advances the
//! rotation clock, samples it once per tap, runs the model transition and
//! then performs the side effects the outcome asks for (sounds, saving a new
//! high score, restarting the rotation on level-up).

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScore;
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::sim::{self, FireOutcome, GameState, RotationDriver};

pub struct Session {
    state: GameState,
    rotation: RotationDriver,
    storage: Box<dyn Storage>,
    audio: AudioManager,
    settings: Settings,
    record: HighScore,
}

impl Session {
    /// Load settings and the high score from `storage` and start a game
    pub fn start(seed: u64, storage: Box<dyn Storage>, mut audio: AudioManager) -> Self {
        let settings = Settings::load(storage.as_ref());
        let record = HighScore::load(storage.as_ref());
        audio.configure(&settings);

        let state = GameState::with_tuning(seed, settings.tuning.clone(), record.score);
        let rotation = RotationDriver::new(state.rotation_period_ms);
        log::info!(
            "Session started (seed {}, high score {}, policy {})",
            state.seed(),
            record.score,
            state.tuning.level_up_policy.as_str()
        );

        Self {
            state,
            rotation,
            storage,
            audio,
            settings,
            record,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current rotation of the log in degrees
    pub fn rotation_deg(&self) -> f32 {
        self.rotation.angle_deg()
    }

    /// Advance the rotation clock by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.state.is_game_over() {
            self.rotation.advance(dt_ms);
        }
    }

    /// Fire an arrow at the log's current rotation
    pub fn tap(&mut self) -> FireOutcome {
        let rotation = self.rotation.angle_deg();
        let outcome = sim::fire(&mut self.state, rotation);

        match outcome {
            FireOutcome::Ignored => {}
            FireOutcome::Stuck { .. } => self.audio.play(SoundEffect::ArrowShoot),
            FireOutcome::LevelComplete { .. } => {
                self.audio.play(SoundEffect::ArrowShoot);
                self.audio.play(SoundEffect::LevelComplete);
                self.rotation.restart(self.state.rotation_period_ms);
            }
            FireOutcome::Collision { new_high_score, .. } => {
                self.audio.play(SoundEffect::ArrowShoot);
                self.audio.play(SoundEffect::Collision);
                if new_high_score {
                    self.audio.play(SoundEffect::HighScore);
                    self.persist_high_score();
                }
            }
        }

        outcome
    }

    /// Start over; the high score is kept
    pub fn reset(&mut self) {
        sim::reset(&mut self.state);
        self.rotation.restart(self.state.rotation_period_ms);
    }

    fn persist_high_score(&mut self) {
        if !self.record.submit(self.state.high_score) {
            return;
        }
        if let Err(e) = self.record.save(self.storage.as_mut()) {
            log::warn!("Failed to save high score: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::persistence::{MemoryStorage, StorageError};
    use crate::tuning::LevelUpPolicy;

    fn session_with(storage: MemoryStorage) -> (Session, RecordingSink) {
        let sink = RecordingSink::new();
        let audio = AudioManager::new(Box::new(sink.clone()));
        (Session::start(1, Box::new(storage), audio), sink)
    }

    #[test]
    fn test_tap_samples_rotation() {
        let (mut session, _) = session_with(MemoryStorage::new());
        // Quarter turn on the default 4 s period
        session.tick(1000.0);
        assert_eq!(session.tap(), FireOutcome::Stuck { angle: 85.0 });
    }

    #[test]
    fn test_collision_saves_high_score() {
        let mut storage = MemoryStorage::new();
        HighScore { score: 0 }.save(&mut storage).unwrap();
        let (mut session, sink) = session_with(storage);

        session.tap();
        session.tick(500.0);
        session.tap();
        // Back to rotation 0 after a full turn from the start
        session.tick(3500.0);
        let outcome = session.tap();
        assert!(matches!(
            outcome,
            FireOutcome::Collision {
                new_high_score: true,
                ..
            }
        ));
        assert_eq!(session.state().high_score, 2);
        assert_eq!(session.record.score, 2);
        assert_eq!(HighScore::load(session.storage.as_ref()).score, 2);
        assert_eq!(
            sink.played(),
            vec![
                SoundEffect::ArrowShoot,
                SoundEffect::ArrowShoot,
                SoundEffect::ArrowShoot,
                SoundEffect::Collision,
                SoundEffect::HighScore,
            ]
        );
    }

    #[test]
    fn test_high_score_loaded_and_kept_on_reset() {
        let mut storage = MemoryStorage::new();
        HighScore { score: 7 }.save(&mut storage).unwrap();
        let (mut session, _) = session_with(storage);
        assert_eq!(session.state().high_score, 7);

        session.tap();
        session.tap();
        assert!(session.state().is_game_over());
        assert_eq!(session.state().high_score, 7);

        session.reset();
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().level, 1);
        assert!(!session.state().is_game_over());
        assert_eq!(session.state().high_score, 7);
        assert_eq!(session.rotation_deg(), 0.0);
    }

    #[test]
    fn test_level_up_restarts_faster_rotation() {
        let mut storage = MemoryStorage::new();
        Settings::default()
            .with_policy(LevelUpPolicy::Clear)
            .save(&mut storage)
            .unwrap();
        let (mut session, sink) = session_with(storage);
        let initial_period = session.state().rotation_period_ms;

        for _ in 0..5 {
            session.tap();
            session.tick(400.0);
        }
        assert_eq!(session.state().level, 2);
        assert!(session.state().rotation_period_ms < initial_period);
        assert!(sink.played().contains(&SoundEffect::LevelComplete));
        // Restarted at level-up, then advanced once
        let expected = 360.0 * 400.0 / session.state().rotation_period_ms;
        assert!((session.rotation_deg() - expected).abs() < 1e-2);
    }

    #[test]
    fn test_oversized_arrow_settings_do_not_crash_level_up() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                Settings::STORAGE_KEY,
                r#"{"tuning":{"initial_arrows":4294967295,"max_extra_arrows":4294967295}}"#,
            )
            .unwrap();
        let (mut session, _) = session_with(storage);
        session.state.remaining_arrows = 1;

        let outcome = sim::fire(&mut session.state, 0.0);
        assert_eq!(outcome, FireOutcome::LevelComplete { angle: 175.0, level: 2 });
        let slots = session.state().tuning.slot_count();
        assert!(session.state().remaining_arrows <= slots);
        assert!(session.state().remaining_arrows > 0);
    }

    #[test]
    fn test_rotation_frozen_after_game_over() {
        let (mut session, _) = session_with(MemoryStorage::new());
        session.tap();
        session.tap();
        let angle = session.rotation_deg();
        session.tick(250.0);
        assert_eq!(session.rotation_deg(), angle);
        assert!(session.tap().is_ignored());
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("read-only").into())
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failure_does_not_break_game() {
        let mut session = Session::start(3, Box::new(ReadOnlyStorage), AudioManager::default());
        session.tap();
        let outcome = session.tap();
        assert!(matches!(outcome, FireOutcome::Collision { .. }));
        assert_eq!(session.state().high_score, 1);
        session.reset();
        assert_eq!(session.tap(), FireOutcome::Stuck { angle: 175.0 });
    }
}
