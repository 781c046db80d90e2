//! Fixed timestep simulation tick
//!
//! One step runs the whole chain in a fixed order: wheels, axle, cart pose,
//! wedge, bumper, hammer, lever, ball, landing. Later checks see what earlier
//! ones changed in the same step, so the order must not change.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::chain::{BallPhase, ChainEvent};
use super::state::{Outcome, Scene};
use super::wheel::update_wheel;
use crate::config::SimConfig;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::{deg_to_rad, rad_to_deg, reflect};

/// Surface normal of the bumper, facing the incoming cart
const BUMPER_NORMAL: Vec2 = Vec2::new(-1.0, 0.0);

/// What happened during one or more steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub events: Vec<ChainEvent>,
    pub outcome: Option<Outcome>,
}

impl StepReport {
    fn push(&mut self, event: ChainEvent) {
        log::debug!("{event:?}");
        self.events.push(event);
    }

    /// Fold a later report into this one
    pub fn merge(&mut self, later: StepReport) {
        self.events.extend(later.events);
        if later.outcome.is_some() {
            self.outcome = later.outcome;
        }
    }
}

/// Cart anchor and rotation (degrees, clockwise) from its wheel positions
pub fn derive_cart_pose(front: Vec2, rear: Vec2) -> (Vec2, f32) {
    let d = front - rear;
    ((front + rear) / 2.0, rad_to_deg((-d.y).atan2(d.x)))
}

/// Rigid axle: both wheels roll at their mean speed. Returns that speed.
///
/// A wheel that has come to a dead stop borrows the other wheel's heading.
pub fn couple_axle(front: &mut Body, rear: &mut Body) -> f32 {
    let speed = (front.speed() + rear.speed()) / 2.0;
    let shared = (front.vel + rear.vel).normalize_or_zero();
    for wheel in [front, rear] {
        let dir = wheel.direction();
        let dir = if dir == Vec2::ZERO { shared } else { dir };
        wheel.vel = dir * speed;
    }
    speed
}

/// Advance the scene by one fixed timestep. No-op unless simulating.
pub fn step(scene: &mut Scene, config: &SimConfig, dt: f32) -> StepReport {
    let mut report = StepReport::default();
    if !scene.is_simulating() {
        return report;
    }
    scene.time_ticks += 1;

    // Friction regime depends on whether the nose has reached the wedge
    let wedge_reached = scene.trolley.x() + config.cart_half_length >= scene.wedge.x();
    if wedge_reached && !scene.chain.wedge_reached {
        scene.chain.wedge_reached = true;
        report.push(ChainEvent::WedgeReached);
    }
    let coefficient = if wedge_reached {
        config.wedge_friction
    } else {
        config.friction
    };
    update_wheel(&mut scene.front, coefficient, config, dt);
    update_wheel(&mut scene.rear, coefficient, config, dt);

    let speed = couple_axle(&mut scene.front, &mut scene.rear);
    debug_assert!((scene.front.speed() - scene.rear.speed()).abs() <= 1e-3 * speed.max(1.0));

    let (pos, rotation) = derive_cart_pose(scene.front.pos, scene.rear.pos);
    scene.trolley.pos = pos;
    scene.trolley.rotation = rotation;

    // Wedge gets shoved along by the nose, never pulled back
    let nose = scene.trolley.x() + config.cart_half_length;
    scene.wedge.set_x(scene.wedge.x().max(nose));

    bounce_off_bumper(scene, config, &mut report);
    strike_hammer(scene, speed, &mut report);
    hammer_hits_lever(scene, &mut report);
    lever_hits_ball(scene, config, &mut report);
    lever_hits_shelf(scene, &mut report);
    move_free_parts(scene, config, dt);

    if let Some(outcome) = check_landing(scene, config) {
        scene.finish(outcome);
        report.outcome = Some(outcome);
    }
    report
}

fn bounce_off_bumper(scene: &mut Scene, config: &SimConfig, report: &mut StepReport) {
    if scene.trolley.hit_test(&scene.bumper) && scene.front.vel.dot(BUMPER_NORMAL) < 0.0 {
        for wheel in [&mut scene.front, &mut scene.rear] {
            wheel.vel = config.restitution * reflect(wheel.vel, BUMPER_NORMAL);
        }
        report.push(ChainEvent::BumperBounce {
            velocity: scene.front.vel,
        });
    }
}

/// Cart speed becomes hammer spin through the hammer's half-height lever arm
fn strike_hammer(scene: &mut Scene, speed: f32, report: &mut StepReport) {
    if !scene.trolley.hit_test(&scene.hammer) {
        return;
    }
    let omega = rad_to_deg(-speed / scene.hammer.height() * 2.0);
    if scene.chain.hammer.strike(&mut scene.hammer, omega) {
        report.push(ChainEvent::HammerStruck { omega });
    }
}

/// Hammer hands all of its spin to the lever, scaled by their arm lengths
fn hammer_hits_lever(scene: &mut Scene, report: &mut StepReport) {
    if !scene.chain.hammer.is_swinging() || !scene.hammer.hit_test(&scene.lever) {
        return;
    }
    if let Some(hammer_omega) = scene.chain.hammer.release(&mut scene.hammer) {
        let omega = -hammer_omega * scene.hammer.height() / scene.lever.height();
        if scene.chain.lever.strike(&mut scene.lever, omega) {
            report.push(ChainEvent::LeverStruck { omega });
        }
    }
}

/// Lever tip speed launches the ball horizontally
fn lever_hits_ball(scene: &mut Scene, config: &SimConfig, report: &mut StepReport) {
    if !scene.chain.lever.is_swinging() || !scene.lever.hit_test(&scene.ball) {
        return;
    }
    let tip_speed = deg_to_rad(scene.lever.omega) * scene.lever.height() / 2.0;
    scene.ball.vel = Vec2::new(config.restitution * tip_speed, 0.0);
    if scene.chain.ball == BallPhase::Resting {
        scene.chain.ball = BallPhase::Launched;
        report.push(ChainEvent::BallLaunched {
            speed: scene.ball.vel.x,
        });
    }
}

/// Shelf is a mechanical stop for the lever
fn lever_hits_shelf(scene: &mut Scene, report: &mut StepReport) {
    if !scene.chain.lever.is_swinging() || !scene.lever.hit_test(&scene.shelf) {
        return;
    }
    if scene.chain.lever.release(&mut scene.lever).is_some() {
        report.push(ChainEvent::LeverStopped);
    }
}

/// Ball falls unless the shelf holds it; then integrate ball, hammer and lever
fn move_free_parts(scene: &mut Scene, config: &SimConfig, dt: f32) {
    let gravity = config.gravity_vec() * dt;
    scene.ball.accelerate(gravity);
    if scene.ball.hit_test(&scene.shelf) {
        scene.ball.accelerate(-gravity);
    }

    scene.ball.integrate(dt);
    scene.hammer.integrate(dt);
    scene.lever.integrate(dt);
}

/// Latch a win when the ball drops onto the cart; end the run on win or floor
fn check_landing(scene: &mut Scene, config: &SimConfig) -> Option<Outcome> {
    let low_enough = scene.ball.y() < config.floor_y + config.landing_height;
    let over_cart = (scene.ball.x() - scene.trolley.x()).abs() < config.landing_tolerance;
    if low_enough && over_cart {
        scene.won = true;
    }

    if scene.won {
        Some(Outcome::Won)
    } else if scene.ball.bottom() <= config.floor_y {
        Some(Outcome::Missed)
    } else {
        None
    }
}

/// Turns variable frame times into fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed wall time and run the steps it pays for
    pub fn advance(&mut self, scene: &mut Scene, config: &SimConfig, frame_dt: f32) -> StepReport {
        // A bogus frame time (NaN, inf) counts as no time at all
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut report = StepReport::default();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            report.merge(step(scene, config, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        report
    }

    /// Drop any partial step (e.g. after a reset)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
