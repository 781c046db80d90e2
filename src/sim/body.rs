//! Rigid body kinematics and box hit testing
//!
//! A body is an anchored rectangle. The anchor is both the position that
//! integrates and the point the rectangle rotates around; `pivot` is the
//! offset from the anchor to the rectangle centre in the unrotated frame.
//!
//! Rotation is in degrees, positive clockwise (y-up world).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::deg_to_rad;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Smallest box enclosing the given points
    pub fn enclosing(points: &[Vec2]) -> Self {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A positioned, rotatable body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Anchor position (rotation centre)
    pub pos: Vec2,
    /// Linear velocity (px/s)
    pub vel: Vec2,
    /// Rotation (degrees, clockwise)
    pub rotation: f32,
    /// Angular velocity (degrees/s, clockwise)
    pub omega: f32,
    /// Width and height of the hit box
    pub size: Vec2,
    /// Offset from anchor to box centre, unrotated
    #[serde(default)]
    pub pivot: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            omega: 0.0,
            size,
            pivot: Vec2::ZERO,
        }
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Magnitude of the linear velocity
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Rescale velocity to the given magnitude, keeping its direction.
    /// A body at rest has no direction and stays at rest.
    pub fn set_speed(&mut self, speed: f32) {
        self.vel = self.vel.normalize_or_zero() * speed;
    }

    /// Unit velocity direction (zero when at rest)
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.vel.normalize_or_zero()
    }

    /// Apply a velocity change
    #[inline]
    pub fn accelerate(&mut self, dv: Vec2) {
        self.vel += dv;
    }

    /// Advance position and rotation by `dt` seconds
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation += self.omega * dt;
    }

    /// Rotate a local offset into world orientation (clockwise degrees)
    fn to_world(&self, local: Vec2) -> Vec2 {
        if self.rotation == 0.0 {
            return local;
        }
        Vec2::from_angle(-deg_to_rad(self.rotation)).rotate(local)
    }

    /// Centre of the hit box in world space
    pub fn center(&self) -> Vec2 {
        self.pos + self.to_world(self.pivot)
    }

    /// Axis-aligned box enclosing the rotated rectangle
    pub fn bounds(&self) -> Aabb {
        let half = self.size * 0.5;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|c| self.pos + self.to_world(self.pivot + c));
        Aabb::enclosing(&corners)
    }

    /// Lowest point of the body
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.bounds().min.y
    }

    /// Box overlap against another body
    pub fn hit_test(&self, other: &Body) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// Point-in-box test
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.bounds().contains(p)
    }
}
