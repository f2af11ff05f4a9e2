//! Game state and core simulation types
//!
//! Everything the simulation reads or writes lives in one owned `GameState`
//! that is passed by `&mut` through the tick. No globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entities::{Obstacle, Platform};
use super::generate::{create_initial_platforms, generate_level};
use super::player::Player;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command
    Start,
    /// Active gameplay
    Playing,
    /// Paused by the player
    Paused,
    /// Level-complete banner is up; resumes on its own
    LevelComplete,
    /// Run ended (health ran out)
    GameOver,
}

/// Something that happened during a tick, for logging, HUD and sound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { obstacle_id: u32, value: u64 },
    ShieldPickedUp { obstacle_id: u32 },
    ShieldExpired,
    Damaged { obstacle_id: u32, health: u32 },
    Bounced { platform_id: u32 },
    SpeedBoost { platform_id: u32 },
    LevelComplete { level: u32, bonus: u64 },
    LevelStarted { level: u32, coins: u32 },
    GameOver { score: u64, level: u32, distance: u32 },
}

/// Deferred state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Take down the level-complete banner and resume play
    EndLevelBanner,
    /// Move on to the next level
    AdvanceLevel,
}

/// A deferred action with a deadline on the frame clock (ms)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduled {
    pub due_ms: f64,
    pub action: ScheduledAction,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Generation RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Balance the run was created with
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Set when the level's coins are all in; cleared when the next level starts
    pub level_complete: bool,
    /// Coins placed on the current level (= the win threshold)
    pub coins_on_level: u32,
    pub player: Player,
    /// Streamed platforms, oldest first; never pruned
    pub platforms: Vec<Platform>,
    /// Current level's coins, hazards and pickups
    pub obstacles: Vec<Obstacle>,
    pub camera: Camera,
    /// Right edge of the furthest generated platform
    pub last_platform_x: f32,
    /// Obstacle placement cursor for the current level
    pub last_obstacle_x: f32,
    /// Simulation ticks run so far
    pub time_ticks: u64,
    /// Pending deferred actions
    pub scheduled: Vec<Scheduled>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new run: player at spawn, opening platforms, level 1 layout
    ///
    /// `tuning` is taken as given; `Game::with_config` validates it first.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&tuning),
            camera: Camera::new(&tuning),
            tuning,
            level: 1,
            phase: GamePhase::Start,
            level_complete: false,
            coins_on_level: 0,
            platforms: Vec::new(),
            obstacles: Vec::new(),
            last_platform_x: 0.0,
            last_obstacle_x: 0.0,
            time_ticks: 0,
            scheduled: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        create_initial_platforms(&mut state);
        generate_level(&mut state);
        log::info!(
            "Level {}: {} coins to collect (seed {})",
            state.level,
            state.coins_on_level,
            seed
        );

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whole units of distance travelled
    pub fn distance(&self) -> u32 {
        self.player.distance.floor() as u32
    }

    /// Coins still lying on the level
    pub fn coins_remaining(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|o| o.is_coin() && !o.collected)
            .count()
    }

    /// Queue a deferred action
    pub fn schedule(&mut self, due_ms: f64, action: ScheduledAction) {
        self.scheduled.push(Scheduled { due_ms, action });
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start -> Playing. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        self.transition(GamePhase::Start, GamePhase::Playing)
    }

    /// Playing -> Paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        self.transition(GamePhase::Playing, GamePhase::Paused)
    }

    /// Paused -> Playing. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        self.transition(GamePhase::Paused, GamePhase::Playing)
    }

    fn transition(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if self.phase != from {
            return false;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run() {
        let state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.health, crate::consts::MAX_HEALTH);
        assert_eq!(state.coins_remaining(), 5);
        assert!(state.scheduled.is_empty());
        assert_eq!(state.camera.pos, glam::Vec2::ZERO);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = GameState::new(1);
        assert!(!state.pause(), "can't pause before starting");
        assert!(!state.resume());

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.start());

        assert!(state.pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!state.pause());

        assert!(state.resume());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_level_complete_ignores_pause_and_resume() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::LevelComplete;
        assert!(!state.pause());
        assert!(!state.resume());
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }

    #[test]
    fn test_entity_ids_unique() {
        let state = GameState::new(5);
        let mut ids: Vec<u32> = state
            .platforms
            .iter()
            .map(|p| p.id)
            .chain(state.obstacles.iter().map(|o| o.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
