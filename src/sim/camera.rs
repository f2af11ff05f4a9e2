//! Smoothed follow camera and visibility culling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::tuning::Tuning;

/// Fraction of the horizontal gap closed per tick
pub const FOLLOW_RATE_X: f32 = 0.1;
/// Fraction of the gap closed per tick when the target is above
pub const FOLLOW_RATE_UP: f32 = 0.1;
/// Fraction of the gap (beyond the deadzone) closed when the target is below
pub const FOLLOW_RATE_DOWN: f32 = 0.05;
/// Downward slack before the camera starts following
pub const DOWN_DEADZONE: f32 = 100.0;
/// Extra margin around the viewport that still counts as visible
pub const CULL_MARGIN: f32 = 100.0;

/// Scrolling viewport into the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left of the viewport in world space
    pub pos: Vec2,
    /// Viewport size (fixed)
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport: Vec2::new(tuning.viewport_width, tuning.viewport_height),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.viewport,
        }
    }

    /// Ease toward centering `target`, then clamp to the world
    pub fn follow(&mut self, target: &Aabb, tuning: &Tuning) {
        let target_x = target.left() - self.viewport.x / 2.0 + target.size.x / 2.0;
        self.pos.x += (target_x - self.pos.x) * FOLLOW_RATE_X;
        self.pos.x = self.pos.x.clamp(0.0, tuning.camera_max_x());

        let target_y = target.top() - self.viewport.y / 2.0 + target.size.y / 2.0;
        if target_y < self.pos.y {
            self.pos.y += (target_y - self.pos.y) * FOLLOW_RATE_UP;
        } else if target_y > self.pos.y + DOWN_DEADZONE {
            self.pos.y += (target_y - self.pos.y - DOWN_DEADZONE) * FOLLOW_RATE_DOWN;
        }
        self.pos.y = self.pos.y.clamp(0.0, tuning.camera_max_y());
    }

    /// Whether `object` is on screen or within the cull margin of it
    pub fn is_visible(&self, object: &Aabb) -> bool {
        self.bounds().expanded(CULL_MARGIN).overlaps(object)
    }
}
