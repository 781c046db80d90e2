//! Trolley Chain - a Rube-Goldberg chain reaction in 2D
//!
//! A cart rolls down a slope, knocks a hammer, which flips a lever, which
//! launches a ball that has to land back on the cart.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, wheel contact, linkage step)
//! - `config`: Physical constants and scene geometry
//! - `error`: Configuration errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::{BodySpec, SceneLayout, SimConfig};
pub use error::ConfigError;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per reference frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Surface tangent for a contact normal, pointing "downhill-right" for an upward normal
#[inline]
pub fn perpendicular(normal: Vec2) -> Vec2 {
    Vec2::new(normal.y, -normal.x)
}

/// Reflect a vector about a surface normal
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad.to_degrees()
}

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_of_tangent_and_normal_is_one() {
        let normal = Vec2::new(0.3_f32.sin(), 0.3_f32.cos());
        assert!((cross(perpendicular(normal), normal) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let r = reflect(Vec2::new(5.0, 2.0), Vec2::new(-1.0, 0.0));
        assert!((r - Vec2::new(-5.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_perpendicular_of_floor_normal() {
        assert_eq!(perpendicular(Vec2::Y), Vec2::X);
    }
}
