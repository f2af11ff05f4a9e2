//! Player preferences
//!
//! Separate from `Tuning`: these never change gameplay outcomes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound cues enabled (the mute toggle flips this)
    pub sound_enabled: bool,
    /// Interval at which held movement keys are re-applied (ms)
    pub move_sample_ms: f64,
    /// Health below which the HUD raises a low-health warning
    pub low_health_warning: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            move_sample_ms: 16.0,
            low_health_warning: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_sample_ms > 0.0) {
            return Err(ConfigError::NonPositive {
                name: "move_sample_ms",
                value: self.move_sample_ms as f32,
            });
        }
        Ok(())
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }
}
