//! Sky Runner - A side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, camera)
//! - `game`: Frame driver (clock, command queue, scheduled level transitions)
//! - `input`: Commands and held-key sampling
//! - `view`: Read-only scene/HUD views for an external renderer
//! - `audio`: Sound cue queue behind the mute flag
//! - `settings` / `tuning`: Player preferences and data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;
pub use tuning::{LevelSettings, LevelTable, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the per-tick constants are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Height of the ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Soft left bound for the player
    pub const PLAYER_MIN_X: f32 = -100.0;
    /// Extra depth below a platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Horizontal friction applied every tick
    pub const FRICTION: f32 = 0.85;
    /// Below this |vx| the player stops dead
    pub const STOP_THRESHOLD: f32 = 0.1;
    /// Fraction of vx converted into distance while running right
    pub const DISTANCE_FACTOR: f32 = 0.1;

    /// Bounce platforms launch at this multiple of the jump force
    pub const BOUNCE_MULTIPLIER: f32 = 1.5;
    /// Speed platforms kick at this multiple of the run speed
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    /// Second jump strength relative to the first
    pub const DOUBLE_JUMP_MULTIPLIER: f32 = 0.8;

    /// Health bounds
    pub const MAX_HEALTH: u32 = 100;
    pub const DAMAGE_PER_HIT: u32 = 10;
    /// Knockback after a hit
    pub const KNOCKBACK_LIFT: f32 = 0.5;
    pub const KNOCKBACK_PUSH: f32 = 2.0;

    /// Shield duration in ticks (5 seconds at 60 Hz)
    pub const SHIELD_DURATION_TICKS: u32 = 300;
    /// Point value of a coin
    pub const COIN_VALUE: u64 = 100;
    /// Per-level completion bonus
    pub const LEVEL_BONUS: u64 = 500;

    /// Level-complete banner display time (ms)
    pub const LEVEL_BANNER_MS: f64 = 1800.0;
    /// Delay from completion to the next level (ms)
    pub const LEVEL_ADVANCE_MS: f64 = 2000.0;
}
