//! Read-only views handed to the outside world
//!
//! The renderer gets a camera-culled [`SceneView`] once per playing frame;
//! the HUD gets a serializable [`Hud`] snapshot whenever it asks.

use serde::Serialize;

use crate::consts::{LEVEL_BONUS, SHIELD_DURATION_TICKS, TICKS_PER_SECOND};
use crate::settings::Settings;
use crate::sim::{Camera, GamePhase, GameState, Obstacle, Platform, Player};

/// Everything visible this frame
#[derive(Debug)]
pub struct SceneView<'a> {
    pub camera: &'a Camera,
    pub player: &'a Player,
    /// Platforms on screen (or within the cull margin)
    pub platforms: Vec<&'a Platform>,
    /// Uncollected obstacles on screen (or within the cull margin)
    pub obstacles: Vec<&'a Obstacle>,
}

impl<'a> SceneView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        let camera = &state.camera;
        Self {
            camera,
            player: &state.player,
            platforms: state
                .platforms
                .iter()
                .filter(|p| camera.is_visible(&p.bounds))
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .filter(|o| !o.collected && camera.is_visible(&o.bounds))
                .collect(),
        }
    }
}

/// Draws a scene. Called once per playing frame.
pub trait Renderer {
    fn render(&mut self, scene: &SceneView<'_>);
}

/// Renderer that draws nothing (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, _scene: &SceneView<'_>) {
        self.frames += 1;
    }
}

/// Health bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Good,
    Warning,
    Critical,
}

impl HealthBand {
    pub fn for_health(health: u32) -> Self {
        if health > 70 {
            HealthBand::Good
        } else if health > 40 {
            HealthBand::Warning
        } else {
            HealthBand::Critical
        }
    }
}

/// Text data for the level-complete banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelBanner {
    pub level: u32,
    pub coins: u32,
    pub bonus: u64,
    pub next_level: u32,
}

/// HUD snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub distance: u32,
    pub coins_collected: u32,
    pub coins_on_level: u32,
    pub health: u32,
    pub health_band: HealthBand,
    pub low_health: bool,
    /// Whole seconds of shield left, `None` when unshielded
    pub shield_seconds: Option<u32>,
    /// Shield time left as a fraction of a full pickup
    pub shield_fraction: f32,
    pub all_coins_collected: bool,
    pub level_banner: Option<LevelBanner>,
    pub sound_enabled: bool,
}

impl Hud {
    pub fn new(state: &GameState, settings: &Settings) -> Self {
        let player = &state.player;
        let shield_seconds = player
            .shield
            .then(|| player.shield_ticks.div_ceil(TICKS_PER_SECOND));
        let level_banner = state.level_complete.then(|| LevelBanner {
            level: state.level,
            coins: state.coins_on_level,
            bonus: state.level as u64 * LEVEL_BONUS,
            next_level: state.level + 1,
        });

        Self {
            phase: state.phase,
            score: player.score,
            level: state.level,
            distance: state.distance(),
            coins_collected: player.coins_collected,
            coins_on_level: state.coins_on_level,
            health: player.health,
            health_band: HealthBand::for_health(player.health),
            low_health: player.health < settings.low_health_warning,
            shield_seconds,
            shield_fraction: if player.shield {
                player.shield_ticks as f32 / SHIELD_DURATION_TICKS as f32
            } else {
                0.0
            },
            all_coins_collected: state.coins_on_level > 0
                && player.coins_collected >= state.coins_on_level,
            level_banner,
            sound_enabled: settings.sound_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::for_health(100), HealthBand::Good);
        assert_eq!(HealthBand::for_health(71), HealthBand::Good);
        assert_eq!(HealthBand::for_health(70), HealthBand::Warning);
        assert_eq!(HealthBand::for_health(41), HealthBand::Warning);
        assert_eq!(HealthBand::for_health(40), HealthBand::Critical);
        assert_eq!(HealthBand::for_health(0), HealthBand::Critical);
    }

    #[test]
    fn test_fresh_hud() {
        let state = GameState::new(1);
        let hud = Hud::new(&state, &Settings::default());
        assert_eq!(hud.phase, GamePhase::Start);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.coins_collected, 0);
        assert_eq!(hud.coins_on_level, 5);
        assert_eq!(hud.health, 100);
        assert!(!hud.low_health);
        assert_eq!(hud.shield_seconds, None);
        assert!(!hud.all_coins_collected);
        assert!(hud.level_banner.is_none());
    }

    #[test]
    fn test_shield_seconds_round_up() {
        let mut state = GameState::new(1);
        state.player.shield = true;
        state.player.shield_ticks = 300;
        let hud = Hud::new(&state, &Settings::default());
        assert_eq!(hud.shield_seconds, Some(5));
        assert!((hud.shield_fraction - 1.0).abs() < 1e-6);

        state.player.shield_ticks = 61;
        assert_eq!(Hud::new(&state, &Settings::default()).shield_seconds, Some(2));
        state.player.shield_ticks = 1;
        assert_eq!(Hud::new(&state, &Settings::default()).shield_seconds, Some(1));
    }

    #[test]
    fn test_low_health_and_banner() {
        let mut state = GameState::new(1);
        state.player.health = 29;
        state.player.coins_collected = 5;
        state.level_complete = true;
        let hud = Hud::new(&state, &Settings::default());
        assert!(hud.low_health);
        assert_eq!(hud.health_band, HealthBand::Critical);
        assert!(hud.all_coins_collected);
        assert_eq!(
            hud.level_banner,
            Some(LevelBanner {
                level: 1,
                coins: 5,
                bonus: 500,
                next_level: 2
            })
        );

        let json = serde_json::to_string(&hud).unwrap();
        assert!(json.contains("\"health_band\":\"critical\""));
    }

    #[test]
    fn test_scene_culls_offscreen_and_collected() {
        let mut state = GameState::new(1);
        let total_uncollected = state.obstacles.len();
        if let Some(first) = state.obstacles.first_mut() {
            first.collected = true;
        }
        let scene = SceneView::new(&state);

        // Camera at 0 with a 100 margin sees x < 900
        assert!(scene.platforms.iter().all(|p| p.bounds.left() < 900.0));
        assert!(scene.platforms.len() < state.platforms.len());
        assert!(scene.obstacles.iter().all(|o| !o.collected));
        assert!(scene.obstacles.len() < total_uncollected);
    }
}
