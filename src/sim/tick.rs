//! Simulation tick
//!
//! One call to [`tick`] is one frame of gameplay. Deferred level transitions
//! run separately through [`run_scheduled`] so they fire even while the
//! simulation itself is held by the level-complete banner.

use super::generate::{generate_level, generate_platform, needs_platform};
use super::player::Direction;
use super::state::{GameEvent, GamePhase, GameState, ScheduledAction};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame clock timestamp (ms), used for scheduling
    pub now_ms: f64,
    /// Held movement sampled since the last tick
    pub move_dir: Option<Direction>,
    /// Jump pressed since the last tick
    pub jump: bool,
}

/// Advance the game state by one tick. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    if let Some(dir) = input.move_dir {
        state.player.move_dir(dir);
    }
    if input.jump {
        state.player.jump();
    }

    let world_width = state.tuning.world_width;
    state.player.update(
        &state.platforms,
        &mut state.obstacles,
        &state.tuning,
        &mut state.events,
    );

    for platform in &mut state.platforms {
        platform.update(world_width);
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(world_width);
    }

    state.camera.follow(&state.player.bounds(), &state.tuning);

    check_level_complete(state, input.now_ms);

    if state.player.is_dead() {
        state.phase = GamePhase::GameOver;
        let event = GameEvent::GameOver {
            score: state.player.score,
            level: state.level,
            distance: state.distance(),
        };
        log::info!(
            "Game over: score {}, level {}, distance {}",
            state.player.score,
            state.level,
            state.distance()
        );
        state.events.push(event);
    }

    if needs_platform(state) {
        generate_platform(state);
    }
}

/// Award the level bonus and queue the transition once every coin is in
fn check_level_complete(state: &mut GameState, now_ms: f64) {
    if state.coins_on_level == 0
        || state.player.coins_collected < state.coins_on_level
        || state.level_complete
    {
        return;
    }

    state.level_complete = true;
    let bonus = state.level as u64 * LEVEL_BONUS;
    state.player.score += bonus;
    state.phase = GamePhase::LevelComplete;
    state.schedule(now_ms + LEVEL_BANNER_MS, ScheduledAction::EndLevelBanner);
    state.schedule(now_ms + LEVEL_ADVANCE_MS, ScheduledAction::AdvanceLevel);

    log::info!(
        "Level {} complete: all {} coins collected, bonus +{}",
        state.level,
        state.coins_on_level,
        bonus
    );
    state.events.push(GameEvent::LevelComplete {
        level: state.level,
        bonus,
    });
}

/// Fire every scheduled action whose deadline has passed, earliest first.
/// Runs in any phase.
pub fn run_scheduled(state: &mut GameState, now_ms: f64) {
    let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut state.scheduled)
        .into_iter()
        .partition(|s| s.due_ms <= now_ms);
    state.scheduled = pending;
    due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));

    for scheduled in due {
        match scheduled.action {
            ScheduledAction::EndLevelBanner => {
                if state.phase == GamePhase::LevelComplete {
                    state.phase = GamePhase::Playing;
                }
            }
            ScheduledAction::AdvanceLevel => {
                if state.phase == GamePhase::GameOver {
                    log::warn!("Skipping level advance after game over");
                    continue;
                }
                advance_level(state);
                if state.phase == GamePhase::LevelComplete {
                    state.phase = GamePhase::Playing;
                }
            }
        }
    }
}

/// Move to the next level: rescale physics, reset the coin counter, and
/// lay out a fresh set of coins and hazards
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.level_complete = false;
    state.player.coins_collected = 0;
    state.player.apply_level(state.level, &state.tuning);
    generate_level(state);

    log::info!(
        "Level {} started: {} coins to collect",
        state.level,
        state.coins_on_level
    );
    state.events.push(GameEvent::LevelStarted {
        level: state.level,
        coins: state.coins_on_level,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    /// Walk the player over every coin on the level
    fn collect_all_coins(state: &mut GameState) {
        for obstacle in state.obstacles.iter_mut().filter(|o| o.is_coin()) {
            state.player.pos = obstacle.bounds.pos - glam::Vec2::new(5.0, 15.0);
            state.player.resolve_obstacle(obstacle, false);
        }
    }

    #[test]
    fn test_tick_requires_playing() {
        let mut state = GameState::new(12345);
        let before = state.player.pos;
        tick(&mut state, &at(0.0));
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, before);

        state.start();
        tick(&mut state, &at(16.0));
        assert_eq!(state.time_ticks, 1);
        assert_ne!(state.player.pos, before);

        state.pause();
        let paused_at = state.player.pos;
        tick(&mut state, &at(32.0));
        assert_eq!(state.player.pos, paused_at);
    }

    #[test]
    fn test_level_completion_flow() {
        let mut state = playing(1);
        collect_all_coins(&mut state);
        assert_eq!(state.player.coins_collected, 5);
        assert_eq!(state.player.score, 500);

        tick(&mut state, &at(1000.0));
        assert!(state.level_complete);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.player.score, 1000);
        assert!(state.drain_events().contains(&GameEvent::LevelComplete { level: 1, bonus: 500 }));

        // Banner holds the simulation
        let frozen = state.player.pos;
        tick(&mut state, &at(1500.0));
        assert_eq!(state.player.pos, frozen);

        run_scheduled(&mut state, 2799.0);
        assert_eq!(state.phase, GamePhase::LevelComplete);

        run_scheduled(&mut state, 2800.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);

        run_scheduled(&mut state, 3000.0);
        assert_eq!(state.level, 2);
        assert!(!state.level_complete);
        assert_eq!(state.player.coins_collected, 0);
        assert_eq!(state.coins_on_level, 7);
        assert_eq!(state.coins_remaining(), 7);
        assert_eq!(state.obstacles.len(), 7 + 3 + 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.scheduled.is_empty());
    }

    #[test]
    fn test_level_complete_fires_once() {
        let mut state = playing(2);
        collect_all_coins(&mut state);
        tick(&mut state, &at(0.0));
        run_scheduled(&mut state, 1800.0);
        assert_eq!(state.phase, GamePhase::Playing);

        // Still flagged until the next level starts; no second bonus
        let score = state.player.score;
        tick(&mut state, &at(1900.0));
        assert_eq!(state.player.score, score);
        assert_eq!(state.scheduled.len(), 1);
    }

    #[test]
    fn test_both_deadlines_in_one_frame() {
        let mut state = playing(3);
        collect_all_coins(&mut state);
        tick(&mut state, &at(0.0));
        run_scheduled(&mut state, 10_000.0);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_advance_keeps_pause() {
        let mut state = playing(4);
        collect_all_coins(&mut state);
        tick(&mut state, &at(0.0));
        run_scheduled(&mut state, 1800.0);
        state.pause();
        run_scheduled(&mut state, 2000.0);
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_physics_scale_with_level() {
        let mut state = playing(5);
        advance_level(&mut state);
        assert_eq!(state.level, 2);
        assert!((state.player.speed - 5.4).abs() < 1e-5);
        assert!((state.player.gravity - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_game_over_when_health_runs_out() {
        let mut state = playing(6);
        state.player.health = 0;
        tick(&mut state, &at(0.0));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { level: 1, .. }))
        );

        // Terminal until restart
        state.resume();
        tick(&mut state, &at(16.0));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_advance_after_game_over() {
        let mut state = playing(7);
        collect_all_coins(&mut state);
        state.player.health = 0;
        tick(&mut state, &at(0.0));
        assert_eq!(state.phase, GamePhase::GameOver);
        run_scheduled(&mut state, 5000.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_platforms_stream_in_and_never_vanish() {
        let mut state = playing(8);
        let mut last_count = state.platforms.len();
        let mut last_frontier = state.last_platform_x;
        for i in 0..600 {
            let input = TickInput {
                now_ms: i as f64 * 16.0,
                move_dir: Some(Direction::Right),
                jump: i % 45 == 0,
            };
            tick(&mut state, &input);
            assert!(state.platforms.len() >= last_count);
            assert!(state.last_platform_x >= last_frontier);
            last_count = state.platforms.len();
            last_frontier = state.last_platform_x;
        }
        assert!(state.platforms.len() > 7);
    }

    #[test]
    fn test_unvalidated_short_viewport_keeps_running() {
        let tuning = crate::tuning::Tuning {
            viewport_height: 80.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        state.start();
        for i in 0..120 {
            let input = TickInput {
                now_ms: i as f64 * 16.0,
                move_dir: Some(Direction::Right),
                jump: i % 30 == 0,
            };
            tick(&mut state, &input);
        }
        assert_eq!(state.camera.pos.y, 0.0);
        assert_eq!(state.time_ticks, 120);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99999);
        let mut b = playing(99999);
        for i in 0..300 {
            let input = TickInput {
                now_ms: i as f64 * 16.0,
                move_dir: if i % 3 == 0 { None } else { Some(Direction::Right) },
                jump: i % 40 == 0,
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.platforms.len(), b.platforms.len());
        assert_eq!(a.player.score, b.player.score);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((any::<Option<bool>>(), any::<bool>()), 1..400),
        ) {
            let mut state = playing(seed);
            let tuning = state.tuning.clone();
            for (i, (dir, jump)) in inputs.into_iter().enumerate() {
                let now_ms = i as f64 * 16.0;
                run_scheduled(&mut state, now_ms);
                let input = TickInput {
                    now_ms,
                    move_dir: dir.map(|right| {
                        if right {
                            Direction::Right
                        } else {
                            Direction::Left
                        }
                    }),
                    jump,
                };
                tick(&mut state, &input);

                prop_assert!(state.player.coins_collected <= state.coins_on_level);
                prop_assert!(state.player.health <= MAX_HEALTH);
                let cam = state.camera.pos;
                prop_assert!(cam.x >= 0.0 && cam.x <= tuning.camera_max_x());
                prop_assert!(cam.y >= 0.0 && cam.y <= tuning.camera_max_y());
                prop_assert!(state.player.pos.x >= PLAYER_MIN_X);
            }
        }
    }
}
