//! Simulation constants and scene geometry
//!
//! Everything tunable lives here and is passed by reference into the
//! simulation. Loaded from JSON; missing fields fall back to the reference scene.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Body;

/// Initial geometry of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Anchor position
    pub pos: Vec2,
    /// Hit box width and height
    pub size: Vec2,
    /// Offset from anchor to box centre
    #[serde(default)]
    pub pivot: Vec2,
}

impl BodySpec {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            pivot: Vec2::ZERO,
        }
    }

    pub const fn with_pivot(mut self, px: f32, py: f32) -> Self {
        self.pivot = Vec2::new(px, py);
        self
    }

    /// Build a resting body from this spec
    pub fn build(&self) -> Body {
        Body::new(self.pos, self.size).with_pivot(self.pivot)
    }
}

/// Where every body starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneLayout {
    pub trolley: BodySpec,
    pub front_wheel: BodySpec,
    pub rear_wheel: BodySpec,
    pub shelf: BodySpec,
    pub ball: BodySpec,
    pub hammer: BodySpec,
    pub lever: BodySpec,
    pub wedge: BodySpec,
    pub bumper: BodySpec,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            // Cart body sits 20 px above the axle line it is anchored on
            trolley: BodySpec::new(100.0, 400.0, 146.0, 40.0).with_pivot(0.0, 20.0),
            front_wheel: BodySpec::new(40.0, 380.0, 40.0, 40.0),
            rear_wheel: BodySpec::new(160.0, 380.0, 40.0, 40.0),
            shelf: BodySpec::new(620.0, 511.0, 140.0, 20.0),
            ball: BodySpec::new(560.0, 540.0, 40.0, 40.0),
            hammer: BodySpec::new(550.0, 266.0, 40.0, 340.0),
            lever: BodySpec::new(520.0, 472.0, 20.0, 100.0),
            wedge: BodySpec::new(848.0, 106.0, 40.0, 30.0),
            bumper: BodySpec::new(1200.0, 120.0, 40.0, 80.0),
        }
    }
}

impl SceneLayout {
    fn entries(&self) -> [(&'static str, &BodySpec); 9] {
        [
            ("trolley", &self.trolley),
            ("front wheel", &self.front_wheel),
            ("rear wheel", &self.rear_wheel),
            ("shelf", &self.shelf),
            ("ball", &self.ball),
            ("hammer", &self.hammer),
            ("lever", &self.lever),
            ("wedge", &self.wedge),
            ("bumper", &self.bumper),
        ]
    }
}

/// Physical constants of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Slope angle `alpha` (degrees)
    pub slope_angle_deg: f32,
    /// x coordinate where the slope meets the flat floor
    pub slope_boundary: f32,
    /// Gravity magnitude (px/s², pointing down)
    pub gravity: f32,
    /// Rolling friction before the wedge (`f`)
    pub friction: f32,
    /// Rolling friction once the cart reaches the wedge (`w`)
    pub wedge_friction: f32,
    /// Restitution (`e`)
    pub restitution: f32,
    /// Floor level
    pub floor_y: f32,
    /// Distance from cart anchor to its nose
    pub cart_half_length: f32,
    /// Distance from cart anchor to each wheel
    pub wheel_offset: f32,
    /// Height of the cart anchor above the surface
    pub wheel_radius: f32,
    /// Ball must drop below `floor_y + landing_height` to count as landed
    pub landing_height: f32,
    /// Maximum horizontal distance between ball and cart for a win
    pub landing_tolerance: f32,
    /// Minimum gap between the slope end and a dragged wedge
    pub wedge_clearance: f32,
    pub layout: SceneLayout,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            slope_angle_deg: 15.0,
            slope_boundary: 400.0,
            gravity: 600.0,
            friction: 0.1,
            wedge_friction: 0.5,
            restitution: 0.6,
            floor_y: 100.0,
            cart_half_length: 73.0,
            wheel_offset: 60.0,
            wheel_radius: 20.0,
            landing_height: 57.0,
            landing_tolerance: 70.0,
            wedge_clearance: 20.0,
            layout: SceneLayout::default(),
        }
    }
}

impl SimConfig {
    /// Parse from JSON (missing fields take defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constant and body extent
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("slope_angle_deg", self.slope_angle_deg),
            ("slope_boundary", self.slope_boundary),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("wedge_friction", self.wedge_friction),
            ("restitution", self.restitution),
            ("floor_y", self.floor_y),
            ("cart_half_length", self.cart_half_length),
            ("wheel_offset", self.wheel_offset),
            ("wheel_radius", self.wheel_radius),
            ("landing_height", self.landing_height),
            ("landing_tolerance", self.landing_tolerance),
            ("wedge_clearance", self.wedge_clearance),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if self.slope_angle_deg <= 0.0 || self.slope_angle_deg >= 90.0 {
            return Err(ConfigError::invalid(
                "slope_angle_deg",
                format!("{} is outside (0, 90)", self.slope_angle_deg),
            ));
        }
        if self.gravity <= 0.0 {
            return Err(ConfigError::invalid("gravity", "must be positive"));
        }
        if self.friction < 0.0 {
            return Err(ConfigError::invalid("friction", "must not be negative"));
        }
        if self.wedge_friction < 0.0 {
            return Err(ConfigError::invalid("wedge_friction", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::invalid(
                "restitution",
                format!("{} is outside [0, 1]", self.restitution),
            ));
        }
        if self.landing_tolerance <= 0.0 {
            return Err(ConfigError::invalid("landing_tolerance", "must be positive"));
        }

        for (body, spec) in self.layout.entries() {
            if !(spec.pos.is_finite() && spec.size.is_finite() && spec.pivot.is_finite()) {
                return Err(ConfigError::invalid("layout", format!("{body} is not finite")));
            }
            if spec.size.x <= 0.0 {
                return Err(ConfigError::ZeroExtent {
                    body,
                    dimension: "width",
                });
            }
            if spec.size.y <= 0.0 {
                return Err(ConfigError::ZeroExtent {
                    body,
                    dimension: "height",
                });
            }
        }
        Ok(())
    }

    /// Slope angle `alpha` in radians
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.slope_angle_deg.to_radians()
    }

    #[inline]
    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::new(0.0, -self.gravity)
    }

    /// Contact normal of the slope surface
    #[inline]
    pub fn slope_normal(&self) -> Vec2 {
        let alpha = self.alpha();
        Vec2::new(alpha.sin(), alpha.cos())
    }

    /// Unit vector along the slope, pointing downhill
    #[inline]
    pub fn slope_tangent(&self) -> Vec2 {
        let alpha = self.alpha();
        Vec2::new(alpha.cos(), -alpha.sin())
    }

    /// Surface height of the slope at `x`
    #[inline]
    pub fn slope_height_at(&self, x: f32) -> f32 {
        self.floor_y + (self.slope_boundary - x) * self.alpha().tan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "friction": 0.25, "restitution": 0.5 }"#).unwrap();
        assert_eq!(config.friction, 0.25);
        assert_eq!(config.restitution, 0.5);
        assert_eq!(config.slope_boundary, SimConfig::default().slope_boundary);
        assert_eq!(config.layout, SceneLayout::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_zero_height_hammer_rejected() {
        let mut config = SimConfig::default();
        config.layout.hammer.size.y = 0.0;
        match config.validate() {
            Err(ConfigError::ZeroExtent { body, dimension }) => {
                assert_eq!(body, "hammer");
                assert_eq!(dimension, "height");
            }
            other => panic!("expected ZeroExtent, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_constants_rejected() {
        let cases: [fn(&mut SimConfig); 5] = [
            |c| c.restitution = 1.5,
            |c| c.friction = -0.1,
            |c| c.slope_angle_deg = 90.0,
            |c| c.gravity = 0.0,
            |c| c.floor_y = f32::NAN,
        ];
        for mutate in cases {
            let mut config = SimConfig::default();
            mutate(&mut config);
            assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
        }
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(SimConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_slope_geometry() {
        let config = SimConfig::default();
        assert!((config.slope_height_at(config.slope_boundary) - config.floor_y).abs() < 1e-4);
        assert!(config.slope_height_at(0.0) > config.floor_y);
        assert!(config.slope_normal().dot(config.slope_tangent()).abs() < 1e-6);
        assert!(config.slope_tangent().y < 0.0);
    }
}
