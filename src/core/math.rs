// Math utilities for top-down steering and facing

use glam::Vec2;
use rapier2d::prelude::{Real, Vector};

/// Sprites face "up" while angle zero points along +x, so facing angles are
/// offset by a quarter turn.
pub const SPRITE_FACING_OFFSET_DEGREES: f32 = 90.0;

/// Facing angle (degrees) for a sprite looking along `direction`
pub fn facing_angle(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees() - SPRITE_FACING_OFFSET_DEGREES
}

/// Unit vector pointing along `v`, or zero when `v` has no usable length
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Convert a glam vector into a rapier vector
pub fn to_physics(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

/// Convert a rapier vector into a glam vector
pub fn from_physics(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}
