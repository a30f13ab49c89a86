//! Sound effects
//!
//! Playback is fire-and-forget: a failing output is logged and otherwise
//! ignored, it never reaches the game model.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Arrow leaves the bow
    ArrowShoot,
    /// Arrow hits a stuck arrow
    Collision,
    /// Quiver emptied, next level
    LevelComplete,
    /// New high score
    HighScore,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::ArrowShoot => "arrow_shoot",
            SoundEffect::Collision => "collision",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::HighScore => "high_score",
        }
    }
}

/// Where sounds end up
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> io::Result<()>;
}

/// Discards every sound
#[derive(Debug, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) -> io::Result<()> {
        Ok(())
    }
}

/// Terminal bell for the loud events, log lines for the rest
#[derive(Debug, Default)]
pub struct TerminalSink;

impl SoundSink for TerminalSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> io::Result<()> {
        log::debug!("sound {} @ {:.2}", effect.as_str(), volume);
        if matches!(effect, SoundEffect::Collision | SoundEffect::HighScore) {
            let mut err = io::stderr().lock();
            err.write_all(b"\x07")?;
            err.flush()?;
        }
        Ok(())
    }
}

/// Keeps every played effect; clones share the same history
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<SoundEffect>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundEffect> {
        self.played
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl SoundSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect, _volume: f32) -> io::Result<()> {
        let mut played = self
            .played
            .lock()
            .map_err(|_| io::Error::other("recording sink poisoned"))?;
        played.push(effect);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn SoundSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullSink))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn SoundSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Apply volume preferences from settings
    pub fn configure(&mut self, settings: &crate::Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, vol) {
            log::warn!("Failed to play {}: {}", effect.as_str(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink;

    impl SoundSink for BrokenSink {
        fn play(&mut self, _effect: SoundEffect, _volume: f32) -> io::Result<()> {
            Err(io::Error::other("no device"))
        }
    }

    #[test]
    fn test_recording_sink_shares_history() {
        let sink = RecordingSink::new();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.play(SoundEffect::ArrowShoot);
        audio.play(SoundEffect::Collision);
        assert_eq!(
            sink.played(),
            vec![SoundEffect::ArrowShoot, SoundEffect::Collision]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let sink = RecordingSink::new();
        let mut audio = AudioManager::new(Box::new(sink.clone()));
        audio.set_muted(true);
        audio.play(SoundEffect::ArrowShoot);
        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::ArrowShoot);
        assert!(sink.played().is_empty());
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let mut audio = AudioManager::new(Box::new(BrokenSink));
        audio.play(SoundEffect::Collision);
    }
}
