//! Procedural level generation
//!
//! Coins and hazards are laid out in one batch per level along a running
//! cursor; platforms are streamed in one at a time as the camera approaches
//! the generation frontier. All randomness comes from the state's seeded RNG.

use rand::Rng;

use super::aabb::Aabb;
use super::entities::{Obstacle, ObstacleKind, Platform, PlatformKind};
use super::state::GameState;
use crate::consts::GROUND_HEIGHT;

/// Cursor position the obstacle passes start from on every level
pub const OBSTACLE_CURSOR_START: f32 = 300.0;
/// Coins, hazards and pickups are all this big
pub const OBSTACLE_SIZE: f32 = 20.0;

const COIN_GAP: (f32, f32) = (200.0, 400.0);
/// Coins float 200..450 px above the canvas bottom
const COIN_RISE: (f32, f32) = (200.0, 250.0);

const HAZARD_GAP: (f32, f32) = (150.0, 300.0);
/// Hazards per level before adding the level number
const BASE_HAZARDS: u32 = 3;
/// Damage and moving hazards sit 150..350 px above the canvas bottom
const HAZARD_RISE: (f32, f32) = (150.0, 200.0);
/// Shield pickups sit 200..350 px above the canvas bottom
const SHIELD_RISE: (f32, f32) = (200.0, 150.0);

const PLATFORM_GAP: (f32, f32) = (100.0, 250.0);
const PLATFORM_WIDTH: (f32, f32) = (80.0, 180.0);
const PLATFORM_HEIGHT: f32 = 20.0;
/// Platform tops sit 100..350 px above the ground
const PLATFORM_RISE: (f32, f32) = (100.0, 350.0);
/// Stream a new platform while the frontier is closer than this many viewports
const FRONTIER_LOOKAHEAD: f32 = 1.5;

/// Build the opening layout: the ground strip plus a hand-placed run of platforms
pub fn create_initial_platforms(state: &mut GameState) {
    let h = state.tuning.viewport_height;
    let ground = Aabb::new(0.0, h - GROUND_HEIGHT, state.tuning.world_width, GROUND_HEIGHT);

    let layout = [
        (ground, PlatformKind::Normal),
        (Aabb::new(200.0, h - 150.0, 150.0, 20.0), PlatformKind::Normal),
        (Aabb::new(400.0, h - 200.0, 100.0, 20.0), PlatformKind::Bounce),
        (Aabb::new(600.0, h - 250.0, 120.0, 20.0), PlatformKind::Speed),
        (Aabb::new(300.0, h - 300.0, 100.0, 20.0), PlatformKind::moving(300.0)),
        (Aabb::new(800.0, h - 180.0, 120.0, 20.0), PlatformKind::Normal),
        (Aabb::new(1000.0, h - 220.0, 100.0, 20.0), PlatformKind::Normal),
    ];

    for (bounds, kind) in layout {
        let id = state.next_entity_id();
        state.platforms.push(Platform::new(id, bounds, kind));
    }
    state.last_platform_x = 1000.0;
}

/// Replace all obstacles with a fresh layout for the current level
///
/// Places exactly the level's coin quota, then `3 + level` hazards/pickups.
pub fn generate_level(state: &mut GameState) {
    state.obstacles.clear();
    state.last_obstacle_x = OBSTACLE_CURSOR_START;
    state.coins_on_level = state.tuning.levels.coin_quota(state.level);

    let coins = generate_coins(state);
    let hazards = generate_hazards(state);
    log::debug!(
        "Level {} layout: {} coins, {} hazards, cursor at {:.0}",
        state.level,
        coins,
        hazards,
        state.last_obstacle_x
    );
}

/// Coin pass. Returns the number of coins placed (always the level's quota).
pub fn generate_coins(state: &mut GameState) -> u32 {
    let count = state.tuning.levels.coin_quota(state.level);
    let h = state.tuning.viewport_height;

    for _ in 0..count {
        let gap = state.rng.random_range(COIN_GAP.0..COIN_GAP.1);
        let y = h - COIN_RISE.0 - state.rng.random::<f32>() * COIN_RISE.1;
        let x = state.last_obstacle_x + gap;

        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            Aabb::new(x, y, OBSTACLE_SIZE, OBSTACLE_SIZE),
            ObstacleKind::coin(),
        ));
        state.last_obstacle_x += gap + OBSTACLE_SIZE;
    }
    count
}

/// Hazard pass: damage (60%), shield pickups (30%), moving hazards (10%).
/// Returns the number placed.
pub fn generate_hazards(state: &mut GameState) -> u32 {
    let count = BASE_HAZARDS + state.level;
    let h = state.tuning.viewport_height;

    for _ in 0..count {
        let gap = state.rng.random_range(HAZARD_GAP.0..HAZARD_GAP.1);
        let x = state.last_obstacle_x + gap;

        let roll: f32 = state.rng.random();
        let kind = if roll < 0.6 {
            ObstacleKind::Damage
        } else if roll < 0.9 {
            ObstacleKind::Shield
        } else {
            ObstacleKind::moving(x)
        };

        let (base, spread) = match kind {
            ObstacleKind::Shield => SHIELD_RISE,
            _ => HAZARD_RISE,
        };
        let y = h - base - state.rng.random::<f32>() * spread;

        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(
            id,
            Aabb::new(x, y, OBSTACLE_SIZE, OBSTACLE_SIZE),
            kind,
        ));
        state.last_obstacle_x += gap + OBSTACLE_SIZE;
    }
    count
}

/// Whether the platform frontier is close enough to the camera to extend
pub fn needs_platform(state: &GameState) -> bool {
    state.last_platform_x - state.camera.pos.x < state.camera.viewport.x * FRONTIER_LOOKAHEAD
}

/// Append one platform past the frontier and advance it
pub fn generate_platform(state: &mut GameState) {
    let gap = state.rng.random_range(PLATFORM_GAP.0..PLATFORM_GAP.1);
    let width = state.rng.random_range(PLATFORM_WIDTH.0..PLATFORM_WIDTH.1);
    let rise = state.rng.random_range(PLATFORM_RISE.0..PLATFORM_RISE.1);
    let x = state.last_platform_x + gap;
    let y = state.tuning.floor_y() - rise;

    // Three normal slots, one each of the specials
    let kind = match state.rng.random_range(0..6u32) {
        0..=2 => PlatformKind::Normal,
        3 => PlatformKind::Bounce,
        4 => PlatformKind::Speed,
        _ => PlatformKind::moving(x),
    };

    let id = state.next_entity_id();
    state
        .platforms
        .push(Platform::new(id, Aabb::new(x, y, width, PLATFORM_HEIGHT), kind));
    state.last_platform_x = x + width;
}
