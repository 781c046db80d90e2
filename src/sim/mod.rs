//! Deterministic simulation module
//!
//! All chain-reaction logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed step order (wheels, axle, cart, wedge, bumper, hammer, lever, ball, landing)
//! - No rendering or platform dependencies

pub mod body;
pub mod chain;
pub mod drag;
pub mod search;
pub mod state;
pub mod tick;
pub mod wheel;

pub use body::{Aabb, Body};
pub use chain::{BallPhase, ChainEvent, ChainState, LinkPhase};
pub use search::{Placement, find_winning_placement, run_to_end, try_placement};
pub use state::{Drag, DragTarget, GamePhase, Outcome, Scene};
pub use tick::{FrameClock, StepReport, couple_axle, derive_cart_pose, step};
pub use wheel::{contact_normal, friction_dv, update_wheel};
