//! Sound cues
//!
//! There is no audio engine here: gameplay events are mapped to cues and
//! queued for whatever plays sound. Muting drops cues at the source.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Coin picked up
    Coin,
    /// Shield picked up
    ShieldUp,
    /// Shield ran out
    ShieldDown,
    /// Took a hit
    Hurt,
    /// Launched by a bounce platform
    Bounce,
    /// Kicked by a speed platform
    Boost,
    /// All coins in
    LevelClear,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Cue for a gameplay event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEvent::ShieldPickedUp { .. } => Some(SoundEffect::ShieldUp),
            GameEvent::ShieldExpired => Some(SoundEffect::ShieldDown),
            GameEvent::Damaged { .. } => Some(SoundEffect::Hurt),
            GameEvent::Bounced { .. } => Some(SoundEffect::Bounce),
            GameEvent::SpeedBoost { .. } => Some(SoundEffect::Boost),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelClear),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::LevelStarted { .. } => None,
        }
    }
}

/// Queue of cues waiting to be played
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    muted: bool,
    pending: Vec<SoundEffect>,
}

impl AudioManager {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            pending: Vec::new(),
        }
    }

    /// Mute/unmute; muting also drops anything still queued
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.pending.clear();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Queue a sound effect (ignored while muted)
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            self.pending.push(effect);
        }
    }

    /// Queue the cue for `event`, if any
    pub fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Take all queued cues
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.pending)
    }
}
