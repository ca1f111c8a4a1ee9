//! Vector helpers for aiming and circle contact
//!
//! Screen coordinates: origin top-left, y grows downward. Angles follow
//! `atan2`, so 0 points right and π/2 points down the screen.

use glam::Vec2;

/// Angle (radians) of the direction from `from` toward `to`
///
/// Reversing the arguments gives the opposite direction.
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Velocity of magnitude `speed` along `angle`
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    unit_from_angle(angle) * speed
}

/// True when two circles touch or overlap (touching counts)
#[inline]
pub fn circles_overlap(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    p1.distance(p2) <= r1 + r2
}

/// One Euler step at a fixed tick rate: velocity is already per-tick
#[inline]
pub fn advance(pos: &mut Vec2, vel: Vec2) {
    *pos += vel;
}
