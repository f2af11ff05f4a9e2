//! Platforms and obstacles
//!
//! Both are mostly static boxes. The `Moving` kinds carry an [`Oscillator`]
//! that sways them horizontally around the x they were spawned at.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::COIN_VALUE;

/// Sway distance either side of the anchor for moving platforms
pub const PLATFORM_MOVE_RANGE: f32 = 100.0;
/// Sway distance either side of the anchor for moving obstacles
pub const OBSTACLE_MOVE_RANGE: f32 = 50.0;
/// Horizontal step per tick for anything that moves
pub const MOVE_SPEED: f32 = 2.0;

/// Number of animation frames an obstacle cycles through
pub const OBSTACLE_ANIM_FRAMES: u8 = 10;

/// Horizontal back-and-forth motion around an anchor x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Anchor x the motion is centered on
    pub origin_x: f32,
    /// Maximum excursion from the anchor
    pub range: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Step per tick
    pub speed: f32,
}

impl Oscillator {
    pub fn new(origin_x: f32, range: f32) -> Self {
        Self {
            origin_x,
            range,
            direction: 1.0,
            speed: MOVE_SPEED,
        }
    }

    /// Advance `x` one tick, bouncing off the excursion limits and the world edges
    pub fn step(&mut self, x: &mut f32, width: f32, world_width: f32) {
        *x += self.speed * self.direction;

        if *x > self.origin_x + self.range || *x < self.origin_x - self.range {
            self.direction = -self.direction;
        }

        if *x < 0.0 {
            *x = 0.0;
            self.direction = 1.0;
        }
        if *x + width > world_width {
            *x = world_width - width;
            self.direction = -1.0;
        }
    }
}

/// Platform behaviors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    /// Launches the player upward on landing
    Bounce,
    /// Kicks the player forward on landing
    Speed,
    /// Sways horizontally
    Moving(Oscillator),
}

impl PlatformKind {
    /// A moving platform anchored at `x`
    pub fn moving(x: f32) -> Self {
        PlatformKind::Moving(Oscillator::new(x, PLATFORM_MOVE_RANGE))
    }
}

/// A platform the player can land on from above
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub bounds: Aabb,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(id: u32, bounds: Aabb, kind: PlatformKind) -> Self {
        Self { id, bounds, kind }
    }

    /// Per-tick self update; only moving platforms change
    pub fn update(&mut self, world_width: f32) {
        if let PlatformKind::Moving(ref mut osc) = self.kind {
            osc.step(&mut self.bounds.pos.x, self.bounds.size.x, world_width);
        }
    }
}

/// Obstacle / pickup behaviors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Hurts and knocks back on contact (never consumed)
    Damage,
    /// Collectible worth `value` points
    Coin { value: u64 },
    /// Grants a temporary shield
    Shield,
    /// Sways horizontally; contact effect depends on tuning
    Moving(Oscillator),
}

impl ObstacleKind {
    pub fn coin() -> Self {
        ObstacleKind::Coin { value: COIN_VALUE }
    }

    /// A moving obstacle anchored at `x`
    pub fn moving(x: f32) -> Self {
        ObstacleKind::Moving(Oscillator::new(x, OBSTACLE_MOVE_RANGE))
    }
}

/// A hazard or collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub bounds: Aabb,
    pub kind: ObstacleKind,
    /// Set once when consumed; never reverts
    pub collected: bool,
    /// Presentation frame (0..OBSTACLE_ANIM_FRAMES)
    pub frame: u8,
    anim_timer: f32,
}

impl Obstacle {
    pub fn new(id: u32, bounds: Aabb, kind: ObstacleKind) -> Self {
        Self {
            id,
            bounds,
            kind,
            collected: false,
            frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn is_coin(&self) -> bool {
        matches!(self.kind, ObstacleKind::Coin { .. })
    }

    /// Per-tick self update: animation phase and sway
    pub fn update(&mut self, world_width: f32) {
        self.anim_timer += 0.1;
        if self.anim_timer > 2.0 {
            self.frame = (self.frame + 1) % OBSTACLE_ANIM_FRAMES;
            self.anim_timer = 0.0;
        }

        if let ObstacleKind::Moving(ref mut osc) = self.kind {
            osc.step(&mut self.bounds.pos.x, self.bounds.size.x, world_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillator_reverses_past_range() {
        let mut osc = Oscillator::new(500.0, 10.0);
        let mut x = 500.0;
        for _ in 0..5 {
            osc.step(&mut x, 20.0, 3000.0);
        }
        assert_eq!(x, 510.0);
        assert_eq!(osc.direction, 1.0);

        // Overshoots the range, turns around
        osc.step(&mut x, 20.0, 3000.0);
        assert_eq!(x, 512.0);
        assert_eq!(osc.direction, -1.0);

        osc.step(&mut x, 20.0, 3000.0);
        assert_eq!(x, 510.0);
    }

    #[test]
    fn test_oscillator_stays_in_world() {
        let mut osc = Oscillator::new(1.0, 100.0);
        osc.direction = -1.0;
        let mut x = 1.0;
        osc.step(&mut x, 20.0, 3000.0);
        assert_eq!(x, 0.0);
        assert_eq!(osc.direction, 1.0);

        let mut osc = Oscillator::new(2979.0, 100.0);
        let mut x = 2979.0;
        osc.step(&mut x, 20.0, 3000.0);
        assert_eq!(x, 2980.0);
        assert_eq!(osc.direction, -1.0);
    }

    #[test]
    fn test_static_platform_never_moves() {
        let mut p = Platform::new(1, Aabb::new(200.0, 400.0, 150.0, 20.0), PlatformKind::Bounce);
        for _ in 0..100 {
            p.update(3000.0);
        }
        assert_eq!(p.bounds, Aabb::new(200.0, 400.0, 150.0, 20.0));
    }

    #[test]
    fn test_moving_platform_sways_within_range() {
        let mut p = Platform::new(
            1,
            Aabb::new(300.0, 300.0, 100.0, 20.0),
            PlatformKind::moving(300.0),
        );
        for _ in 0..500 {
            p.update(3000.0);
            assert!(p.bounds.left() >= 300.0 - PLATFORM_MOVE_RANGE - MOVE_SPEED);
            assert!(p.bounds.left() <= 300.0 + PLATFORM_MOVE_RANGE + MOVE_SPEED);
        }
    }

    #[test]
    fn test_obstacle_animation_cycles() {
        let mut o = Obstacle::new(1, Aabb::new(0.0, 0.0, 20.0, 20.0), ObstacleKind::coin());
        for _ in 0..25 {
            o.update(3000.0);
        }
        assert_eq!(o.frame, 1);

        let mut seen = [false; OBSTACLE_ANIM_FRAMES as usize];
        for _ in 0..1000 {
            o.update(3000.0);
            seen[o.frame as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        // Coins don't move
        assert_eq!(o.bounds.left(), 0.0);
    }
}
