//! Event propagation along the hammer -> lever -> ball chain
//!
//! Each pivoting part moves through `Rest -> Swinging -> Spent` exactly once
//! per run. A part only hands its spin on while `Swinging`, which makes the
//! transfer one-shot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Phase of a pivoting part (hammer or lever)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LinkPhase {
    /// Untouched, at rest rotation
    #[default]
    Rest,
    /// Struck and spinning
    Swinging,
    /// Spin handed on or stopped; stays put until reset
    Spent,
}

impl LinkPhase {
    /// Rest -> Swinging. A zero strike leaves the part at rest.
    pub fn strike(&mut self, body: &mut Body, omega: f32) -> bool {
        if *self != LinkPhase::Rest || omega == 0.0 {
            return false;
        }
        body.omega = omega;
        *self = LinkPhase::Swinging;
        true
    }

    /// Swinging -> Spent. Zeroes the body's spin and returns what it had.
    pub fn release(&mut self, body: &mut Body) -> Option<f32> {
        if *self != LinkPhase::Swinging {
            return None;
        }
        let omega = body.omega;
        body.omega = 0.0;
        *self = LinkPhase::Spent;
        Some(omega)
    }

    #[inline]
    pub fn is_swinging(self) -> bool {
        self == LinkPhase::Swinging
    }
}

/// Phase of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallPhase {
    #[default]
    Resting,
    Launched,
}

/// Phases of all moving parts of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainState {
    pub hammer: LinkPhase,
    pub lever: LinkPhase,
    pub ball: BallPhase,
    /// Cart has reached the wedge at least once this run
    pub wedge_reached: bool,
}

/// Something notable that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChainEvent {
    /// Cart nose reached the wedge; high friction from now on
    WedgeReached,
    /// Cart bounced off the bumper
    BumperBounce { velocity: Vec2 },
    /// Cart knocked the hammer (deg/s)
    HammerStruck { omega: f32 },
    /// Hammer handed its spin to the lever (deg/s)
    LeverStruck { omega: f32 },
    /// Lever kicked the ball off the shelf (px/s)
    BallLaunched { speed: f32 },
    /// Lever came to rest against the shelf
    LeverStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part() -> Body {
        Body::new(Vec2::ZERO, Vec2::new(10.0, 50.0))
    }

    #[test]
    fn test_strike_only_from_rest() {
        let mut body = part();
        let mut phase = LinkPhase::Rest;
        assert!(phase.strike(&mut body, -30.0));
        assert_eq!(phase, LinkPhase::Swinging);
        assert_eq!(body.omega, -30.0);

        // Second strike is ignored
        assert!(!phase.strike(&mut body, -90.0));
        assert_eq!(body.omega, -30.0);
    }

    #[test]
    fn test_zero_strike_stays_at_rest() {
        let mut body = part();
        let mut phase = LinkPhase::Rest;
        assert!(!phase.strike(&mut body, 0.0));
        assert_eq!(phase, LinkPhase::Rest);
    }

    #[test]
    fn test_release_is_one_shot() {
        let mut body = part();
        let mut phase = LinkPhase::Rest;
        assert_eq!(phase.release(&mut body), None);

        phase.strike(&mut body, 45.0);
        assert_eq!(phase.release(&mut body), Some(45.0));
        assert_eq!(body.omega, 0.0);
        assert_eq!(phase, LinkPhase::Spent);

        assert_eq!(phase.release(&mut body), None);
        assert!(!phase.strike(&mut body, 45.0));
    }
}
