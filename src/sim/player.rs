//! The player character: physics body, collision response, abilities, scoring

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{Contact, lands_on, obstacle_contact};
use super::entities::{Obstacle, Platform, PlatformKind};
use super::state::GameEvent;
use crate::consts::*;
use crate::tuning::Tuning;

/// Walk cycle length
pub const PLAYER_ANIM_FRAMES: u8 = 4;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Run speed set by `move_dir`
    pub speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Facing direction (+1 right, -1 left)
    pub facing: f32,
    /// 0..=MAX_HEALTH; 0 ends the run
    pub health: u32,
    pub score: u64,
    /// Coins picked up on the current level
    pub coins_collected: u32,
    /// Total rightward travel (never decreases)
    pub distance: f32,
    pub grounded: bool,
    pub jumping: bool,
    pub double_jump_available: bool,
    pub shield: bool,
    /// Ticks of shield left
    pub shield_ticks: u32,
    /// Walk cycle frame (0..PLAYER_ANIM_FRAMES)
    pub frame: u8,
    anim_timer: f32,
}

impl Player {
    /// Spawn a fresh player for a new run
    pub fn spawn(tuning: &Tuning) -> Self {
        let pt = &tuning.player;
        Self {
            pos: Vec2::new(pt.spawn_x, tuning.viewport_height - pt.spawn_rise),
            vel: Vec2::ZERO,
            size: Vec2::new(pt.width, pt.height),
            speed: pt.speed,
            jump_force: pt.jump_force,
            gravity: pt.gravity,
            facing: 1.0,
            health: MAX_HEALTH,
            score: 0,
            coins_collected: 0,
            distance: 0.0,
            grounded: false,
            jumping: false,
            double_jump_available: false,
            shield: false,
            shield_ticks: 0,
            frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Rescale run speed and gravity for `level`
    pub fn apply_level(&mut self, level: u32, tuning: &Tuning) {
        self.speed = tuning.player.speed_for_level(level);
        self.gravity = tuning.player.gravity_for_level(level);
    }

    /// Run in `dir` at full speed. Friction eats this within a few ticks,
    /// so held input has to be re-applied.
    pub fn move_dir(&mut self, dir: Direction) {
        self.vel.x = dir.sign() * self.speed;
        self.facing = dir.sign();
    }

    /// Jump from the ground, or spend the double-jump charge in the air.
    /// Returns whether a jump happened.
    pub fn jump(&mut self) -> bool {
        if self.grounded {
            self.vel.y = -self.jump_force;
            self.jumping = true;
            self.grounded = false;
            true
        } else if self.double_jump_available {
            self.vel.y = -self.jump_force * DOUBLE_JUMP_MULTIPLIER;
            self.jumping = true;
            self.double_jump_available = false;
            true
        } else {
            false
        }
    }

    /// Advance one tick against the current world
    pub fn update(
        &mut self,
        platforms: &[Platform],
        obstacles: &mut [Obstacle],
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.vel.y += self.gravity;
        self.pos += self.vel;

        if self.pos.x < PLAYER_MIN_X {
            self.pos.x = PLAYER_MIN_X;
            self.vel.x = 0.0;
        }

        let floor_y = tuning.floor_y();
        if self.pos.y + self.size.y > floor_y {
            self.land_at(floor_y);
        } else {
            self.grounded = false;
        }

        self.resolve_platforms(platforms, events);

        for obstacle in obstacles.iter_mut() {
            if let Some(event) = self.resolve_obstacle(obstacle, tuning.moving_obstacles_damage) {
                events.push(event);
            }
        }

        if self.vel.x.abs() > 0.0 {
            self.anim_timer += 0.2;
            if self.anim_timer > 5.0 {
                self.frame = (self.frame + 1) % PLAYER_ANIM_FRAMES;
                self.anim_timer = 0.0;
            }
        } else {
            self.frame = 0;
        }

        if self.shield {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.shield = false;
                events.push(GameEvent::ShieldExpired);
            }
        }

        if self.vel.x > 0.0 {
            self.distance += self.vel.x * DISTANCE_FACTOR;
        }

        self.vel.x *= FRICTION;
        if self.vel.x.abs() < STOP_THRESHOLD {
            self.vel.x = 0.0;
        }
    }

    /// Snap the feet to `top` and restore ground abilities
    fn land_at(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
        self.vel.y = 0.0;
        self.grounded = true;
        self.jumping = false;
        self.double_jump_available = true;
    }

    fn resolve_platforms(&mut self, platforms: &[Platform], events: &mut Vec<GameEvent>) {
        for platform in platforms {
            if !lands_on(&self.bounds(), self.vel.y, &platform.bounds) {
                continue;
            }
            self.land_at(platform.bounds.top());

            match platform.kind {
                PlatformKind::Bounce => {
                    self.vel.y = -self.jump_force * BOUNCE_MULTIPLIER;
                    events.push(GameEvent::Bounced {
                        platform_id: platform.id,
                    });
                }
                PlatformKind::Speed => {
                    self.vel.x = self.facing * self.speed * SPEED_BOOST_MULTIPLIER;
                    events.push(GameEvent::SpeedBoost {
                        platform_id: platform.id,
                    });
                }
                PlatformKind::Normal | PlatformKind::Moving(_) => {}
            }
        }
    }

    /// Apply the effect of touching `obstacle`, if any.
    ///
    /// Collected obstacles are ignored, so calling this repeatedly on the
    /// same coin or shield only counts once.
    pub fn resolve_obstacle(
        &mut self,
        obstacle: &mut Obstacle,
        moving_hurts: bool,
    ) -> Option<GameEvent> {
        match obstacle_contact(&self.bounds(), obstacle, moving_hurts)? {
            Contact::Hurt { push } => {
                if self.shield {
                    return None;
                }
                self.health = self.health.saturating_sub(DAMAGE_PER_HIT);
                self.vel.y = -self.jump_force * KNOCKBACK_LIFT;
                self.vel.x = push * self.speed * KNOCKBACK_PUSH;
                Some(GameEvent::Damaged {
                    obstacle_id: obstacle.id,
                    health: self.health,
                })
            }
            Contact::Coin { value } => {
                self.score += value;
                self.coins_collected += 1;
                obstacle.collected = true;
                Some(GameEvent::CoinCollected {
                    obstacle_id: obstacle.id,
                    value,
                })
            }
            Contact::Shield => {
                self.shield = true;
                self.shield_ticks = SHIELD_DURATION_TICKS;
                obstacle.collected = true;
                Some(GameEvent::ShieldPickedUp {
                    obstacle_id: obstacle.id,
                })
            }
        }
    }
}
