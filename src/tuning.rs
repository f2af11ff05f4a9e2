//! Data-driven game balance
//!
//! Built-in defaults reproduce the shipped balance. A JSON document can
//! override any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::GROUND_HEIGHT;
use crate::error::ConfigError;

/// Camera keeps this much canvas below its lowest position
pub const CAMERA_FLOOR_MARGIN: f32 = 100.0;

/// Coin and platform quotas for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Coins placed at level start; collecting all of them completes the level
    pub coin_quota: u32,
    /// Platform budget for the level (informational; streaming follows the camera)
    pub platform_quota: u32,
}

/// Level number -> settings. Level 1 is the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable(Vec<LevelSettings>);

impl Default for LevelTable {
    fn default() -> Self {
        Self(vec![
            LevelSettings { coin_quota: 5, platform_quota: 10 },
            LevelSettings { coin_quota: 7, platform_quota: 12 },
            LevelSettings { coin_quota: 9, platform_quota: 14 },
            LevelSettings { coin_quota: 11, platform_quota: 16 },
            LevelSettings { coin_quota: 13, platform_quota: 18 },
        ])
    }
}

impl LevelTable {
    pub fn new(levels: Vec<LevelSettings>) -> Self {
        Self(levels)
    }

    /// Highest level with its own entry
    pub fn max_defined_level(&self) -> u32 {
        self.0.len() as u32
    }

    /// Settings for `level`, falling back to the highest defined entry.
    /// Level 0 is treated as level 1.
    pub fn get(&self, level: u32) -> LevelSettings {
        let index = (level.max(1) as usize - 1).min(self.0.len().saturating_sub(1));
        self.0.get(index).copied().unwrap_or(LevelSettings {
            coin_quota: 1,
            platform_quota: 0,
        })
    }

    pub fn coin_quota(&self, level: u32) -> u32 {
        self.get(level).coin_quota
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        if let Some(index) = self.0.iter().position(|l| l.coin_quota == 0) {
            return Err(ConfigError::ZeroCoinQuota {
                level: index as u32 + 1,
            });
        }
        Ok(())
    }
}

/// Player body and physics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Spawn x in world space
    pub spawn_x: f32,
    /// Spawn height above the canvas bottom (spawn y = canvas height - this)
    pub spawn_rise: f32,
    pub speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Run speed added per level once the first level is cleared
    pub speed_per_level: f32,
    /// Gravity added per level once the first level is cleared
    pub gravity_per_level: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 50.0,
            spawn_x: 100.0,
            spawn_rise: 150.0,
            speed: 5.0,
            jump_force: 15.0,
            gravity: 0.8,
            speed_per_level: 0.2,
            gravity_per_level: 0.05,
        }
    }
}

impl PlayerTuning {
    /// Run speed at `level` (level 1 plays at the base speed)
    pub fn speed_for_level(&self, level: u32) -> f32 {
        if level <= 1 {
            self.speed
        } else {
            self.speed + level as f32 * self.speed_per_level
        }
    }

    /// Gravity at `level` (level 1 plays at the base gravity)
    pub fn gravity_for_level(&self, level: u32) -> f32 {
        if level <= 1 {
            self.gravity
        } else {
            self.gravity + level as f32 * self.gravity_per_level
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal extent the camera and moving entities are confined to
    pub world_width: f32,
    /// Canvas / viewport size
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub player: PlayerTuning,
    pub levels: LevelTable,
    /// Whether touching a moving obstacle hurts like a damage obstacle
    pub moving_obstacles_damage: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            player: PlayerTuning::default(),
            levels: LevelTable::default(),
            moving_obstacles_damage: false,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file from disk
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("world_width", self.world_width),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("player.speed", self.player.speed),
            ("player.jump_force", self.player.jump_force),
            ("player.gravity", self.player.gravity),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let min_height = GROUND_HEIGHT + CAMERA_FLOOR_MARGIN;
        if self.viewport_height < min_height {
            return Err(ConfigError::ViewportTooShort {
                height: self.viewport_height,
                min: min_height,
            });
        }

        self.levels.validate()
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.viewport_height - GROUND_HEIGHT
    }

    /// Largest camera x that keeps the viewport inside the world
    #[inline]
    pub fn camera_max_x(&self) -> f32 {
        (self.world_width - self.viewport_width).max(0.0)
    }

    /// Largest camera y; 0 when the viewport is too short to scroll
    #[inline]
    pub fn camera_max_y(&self) -> f32 {
        (self.viewport_height - CAMERA_FLOOR_MARGIN).max(0.0)
    }
}
