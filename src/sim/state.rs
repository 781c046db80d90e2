//! Scene state and run lifecycle
//!
//! The scene is a fixed set of nine named bodies. All of it is plain data so
//! a run can be cloned, compared and serialized.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::chain::ChainState;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::rad_to_deg;

/// Current phase of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Setting up: trolley and wedge can be dragged
    Menu,
    /// Chain reaction running
    Simulating,
    /// Run paused mid-way
    Paused,
    /// Ball landed on the cart
    Won,
    /// Ball hit the floor
    Lost,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Missed,
}

/// Which body is being dragged during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTarget {
    Trolley,
    Wedge,
}

/// Active drag: target plus horizontal grab offset (`body.x - pointer.x`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub target: DragTarget,
    pub offset: f32,
}

/// Complete scene state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Cart body; pose derived from the wheels every step
    pub trolley: Body,
    pub front: Body,
    pub rear: Body,
    pub shelf: Body,
    pub ball: Body,
    pub hammer: Body,
    pub lever: Body,
    pub wedge: Body,
    pub bumper: Body,
    /// Current phase
    pub phase: GamePhase,
    /// Win latch; cleared only by `start_run`
    pub won: bool,
    /// Hammer/lever/ball event phases
    pub chain: ChainState,
    /// Active drag during setup
    pub drag: Option<Drag>,
    /// Steps simulated in the current run
    pub time_ticks: u64,
}

impl Scene {
    /// Build the scene from a validated config, in its rest pose
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = &config.layout;
        let mut scene = Self {
            trolley: layout.trolley.build(),
            front: layout.front_wheel.build(),
            rear: layout.rear_wheel.build(),
            shelf: layout.shelf.build(),
            ball: layout.ball.build(),
            hammer: layout.hammer.build(),
            lever: layout.lever.build(),
            wedge: layout.wedge.build(),
            bumper: layout.bumper.build(),
            phase: GamePhase::Menu,
            won: false,
            chain: ChainState::default(),
            drag: None,
            time_ticks: 0,
        };
        scene.reset_to_rest_pose(config);
        Ok(scene)
    }

    /// Put every moving body back where it starts and return to the menu
    pub fn reset_to_rest_pose(&mut self, config: &SimConfig) {
        let layout = &config.layout;

        self.seat_trolley(config, layout.trolley.pos.x);
        self.trolley.vel = Vec2::ZERO;
        self.trolley.omega = 0.0;
        self.front.vel = Vec2::ZERO;
        self.rear.vel = Vec2::ZERO;

        self.ball.pos = layout.ball.pos;
        self.ball.vel = Vec2::ZERO;
        self.wedge.pos = layout.wedge.pos;

        for part in [&mut self.hammer, &mut self.lever] {
            part.rotation = 0.0;
            part.omega = 0.0;
        }

        self.chain = ChainState::default();
        self.drag = None;
        self.time_ticks = 0;
        self.phase = GamePhase::Menu;
        log::debug!("Scene reset to rest pose");
    }

    /// Sit the trolley on the slope with its anchor at `x`, wheels underneath
    pub(crate) fn seat_trolley(&mut self, config: &SimConfig, x: f32) {
        let normal = config.slope_normal();
        let along = config.slope_tangent();

        self.trolley.pos = Vec2::new(x, config.slope_height_at(x)) + normal * config.wheel_radius;
        self.trolley.rotation = rad_to_deg(config.alpha());

        self.front.pos = self.trolley.pos + config.wheel_offset * along;
        self.rear.pos = self.trolley.pos - config.wheel_offset * along;
    }

    /// Begin a run from the menu. Clears the win latch.
    pub fn start_run(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            log::warn!("Ignoring start request in {:?}", self.phase);
            return false;
        }
        self.drag = None;
        self.won = false;
        self.phase = GamePhase::Simulating;
        log::info!("Run started");
        true
    }

    /// Pause or resume a running simulation
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Simulating => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Simulating,
            other => other,
        };
    }

    /// Abandon whatever is going on and go back to the menu
    pub fn new_game(&mut self, config: &SimConfig) {
        self.reset_to_rest_pose(config);
    }

    #[inline]
    pub fn is_simulating(&self) -> bool {
        self.phase == GamePhase::Simulating
    }

    /// Result of the last run, once it has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Won => Some(Outcome::Won),
            GamePhase::Lost => Some(Outcome::Missed),
            _ => None,
        }
    }

    /// Stop the run with the given outcome
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.phase = match outcome {
            Outcome::Won => GamePhase::Won,
            Outcome::Missed => GamePhase::Lost,
        };
        log::info!("Run over after {} ticks: {:?}", self.time_ticks, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_is_in_rest_pose() {
        let config = SimConfig::default();
        let scene = Scene::new(&config).unwrap();
        assert_eq!(scene.phase, GamePhase::Menu);
        assert!(!scene.won);

        // Wheels straddle the trolley along the slope
        let mid = (scene.front.pos + scene.rear.pos) / 2.0;
        assert!((mid - scene.trolley.pos).length() < 1e-3);
        assert!(scene.front.x() > scene.rear.x());
        assert!(scene.front.y() < scene.rear.y());
        assert!((scene.trolley.rotation - config.slope_angle_deg).abs() < 1e-4);

        // Cart sits wheel_radius above the slope surface
        let surface_x = scene.trolley.x() - config.wheel_radius * config.alpha().sin();
        let expected_y = config.slope_height_at(surface_x) + config.wheel_radius * config.alpha().cos();
        assert!((scene.trolley.y() - expected_y).abs() < 1e-3);
    }

    #[test]
    fn test_new_rejects_degenerate_lever() {
        let mut config = SimConfig::default();
        config.layout.lever.size.y = 0.0;
        assert!(matches!(Scene::new(&config), Err(ConfigError::ZeroExtent { body: "lever", .. })));
    }

    #[test]
    fn test_lifecycle() {
        let config = SimConfig::default();
        let mut scene = Scene::new(&config).unwrap();

        assert!(scene.start_run());
        assert!(scene.is_simulating());
        assert!(!scene.start_run());

        scene.toggle_pause();
        assert_eq!(scene.phase, GamePhase::Paused);
        scene.toggle_pause();
        assert_eq!(scene.phase, GamePhase::Simulating);

        scene.won = true;
        scene.finish(Outcome::Won);
        assert_eq!(scene.outcome(), Some(Outcome::Won));
        scene.toggle_pause();
        assert_eq!(scene.phase, GamePhase::Won);

        scene.new_game(&config);
        assert_eq!(scene.phase, GamePhase::Menu);
        assert_eq!(scene.outcome(), None);
        // Latch survives the menu and is only cleared by starting again
        assert!(scene.won);
        scene.start_run();
        assert!(!scene.won);
    }

    #[test]
    fn test_reset_restores_moving_parts() {
        let config = SimConfig::default();
        let pristine = Scene::new(&config).unwrap();
        let mut scene = pristine.clone();

        scene.start_run();
        scene.ball.pos.x += 200.0;
        scene.ball.vel = Vec2::new(50.0, -20.0);
        scene.hammer.rotation = -30.0;
        scene.hammer.omega = -12.0;
        scene.lever.rotation = 20.0;
        scene.wedge.pos.x += 100.0;
        scene.front.vel = Vec2::new(80.0, 0.0);
        scene.time_ticks = 99;

        scene.reset_to_rest_pose(&config);
        assert_eq!(scene, pristine);
    }
}
