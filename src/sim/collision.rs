//! Collision detection for the player body
//!
//! Detection only: these functions never mutate. The response (snapping,
//! scoring, knockback) lives in `player.rs`.

use super::aabb::Aabb;
use super::entities::{Obstacle, ObstacleKind};
use crate::consts::LANDING_TOLERANCE;

/// What touching an obstacle does to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Take a hit; `push` is the knockback sign (-1 left, +1 right)
    Hurt { push: f32 },
    /// Pick up a coin worth `value`
    Coin { value: u64 },
    /// Pick up a shield
    Shield,
}

/// Check whether a falling body lands on top of a platform this tick
///
/// The body must be moving down, overlap the platform horizontally, and have
/// its bottom edge below the platform top but no deeper than the platform's
/// height plus a small tolerance (so fast falls don't tunnel through).
pub fn lands_on(body: &Aabb, vel_y: f32, platform: &Aabb) -> bool {
    vel_y > 0.0
        && body.overlaps_x(platform)
        && body.bottom() > platform.top()
        && body.bottom() < platform.bottom() + LANDING_TOLERANCE
}

/// Classify contact between the body and an obstacle
///
/// Returns `None` when the obstacle was already collected, does not overlap,
/// or is a moving obstacle and `moving_hurts` is off.
pub fn obstacle_contact(body: &Aabb, obstacle: &Obstacle, moving_hurts: bool) -> Option<Contact> {
    if obstacle.collected || !body.overlaps(&obstacle.bounds) {
        return None;
    }

    let push = if body.left() < obstacle.bounds.left() {
        -1.0
    } else {
        1.0
    };

    match obstacle.kind {
        ObstacleKind::Damage => Some(Contact::Hurt { push }),
        ObstacleKind::Coin { value } => Some(Contact::Coin { value }),
        ObstacleKind::Shield => Some(Contact::Shield),
        ObstacleKind::Moving(_) if moving_hurts => Some(Contact::Hurt { push }),
        ObstacleKind::Moving(_) => None,
    }
}
