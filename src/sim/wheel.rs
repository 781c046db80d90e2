//! Wheel-ground contact
//!
//! Each tick a wheel picks the surface it rolls on, cancels gravity along
//! the surface normal, keeps only the tangential part of its motion, then
//! loses some speed to friction.

use glam::Vec2;

use super::body::Body;
use crate::config::SimConfig;
use crate::{cross, perpendicular};

/// Surface normal under a wheel at horizontal position `x`
#[inline]
pub fn contact_normal(x: f32, config: &SimConfig) -> Vec2 {
    if x <= config.slope_boundary {
        config.slope_normal()
    } else {
        Vec2::Y
    }
}

/// Velocity change from rolling friction over one step.
///
/// `coefficient * dot(gravity_dv, normal)` is never positive, and it is
/// clamped at `-speed` so friction can stop a wheel but never reverse it.
#[inline]
pub fn friction_dv(coefficient: f32, gravity_dv: Vec2, normal: Vec2, speed: f32) -> f32 {
    (coefficient * gravity_dv.dot(normal)).max(-speed)
}

/// Advance one wheel by `dt`, rolling with the given friction coefficient
pub fn update_wheel(wheel: &mut Body, coefficient: f32, config: &SimConfig, dt: f32) {
    let normal = contact_normal(wheel.x(), config);

    // Gravity, then the normal reaction that cancels it across the surface
    let gravity = config.gravity_vec() * dt;
    wheel.accelerate(gravity);
    wheel.accelerate(-gravity.dot(normal) * normal);

    // Rolling contact: keep only the tangential motion
    let tangent = perpendicular(normal);
    wheel.vel = cross(wheel.vel, normal) * tangent;

    // Decelerate along the current heading; the clamp lands exactly on zero
    let speed = wheel.speed();
    let remaining = speed + friction_dv(coefficient, gravity, normal, speed);
    debug_assert!(remaining >= 0.0, "friction reversed a wheel");
    wheel.set_speed(remaining);

    wheel.integrate(dt);
}
