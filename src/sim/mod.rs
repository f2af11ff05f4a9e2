//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per tick, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod entities;
pub mod generate;
pub mod player;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use camera::Camera;
pub use collision::{Contact, lands_on, obstacle_contact};
pub use entities::{Obstacle, ObstacleKind, Oscillator, Platform, PlatformKind};
pub use generate::{create_initial_platforms, generate_level, generate_platform};
pub use player::{Direction, Player};
pub use state::{GameEvent, GamePhase, GameState, Scheduled, ScheduledAction};
pub use tick::{TickInput, advance_level, run_scheduled, tick};
