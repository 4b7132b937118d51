//! Collision detection between round bodies
//!
//! Every entity pair in the arena is tested as two disks: square sprites use
//! half their side as the radius.

use glam::Vec2;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the first body toward the second
    pub normal: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
        }
    }
}

/// Strict disk overlap: `distance < ra + rb`
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Disk overlap with contact normal, for responses that push bodies apart
pub fn circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32) -> CollisionResult {
    let delta = b - a;
    if delta.length() >= ra + rb {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: delta.normalize_or_zero(),
    }
}

/// Unit step from `from` toward `to` scaled by `speed` (simple pursuit)
#[inline]
pub fn pursue(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let angle = crate::angle_between(from, to);
    crate::direction(angle) * speed
}
