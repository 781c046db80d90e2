//! Headless search for a winning setup
//!
//! Samples trolley and wedge positions with a seeded RNG and plays each one
//! out at the fixed timestep. Same seed, same answer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Outcome, Scene};
use super::tick::step;
use crate::config::SimConfig;
use crate::consts::SIM_DT;
use crate::error::ConfigError;

/// Pre-run positions chosen during setup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Trolley anchor x on the slope
    pub trolley_x: f32,
    /// Wedge x on the floor
    pub wedge_x: f32,
}

/// Start the scene (if in the menu) and step until the run ends or `max_ticks` pass
pub fn run_to_end(scene: &mut Scene, config: &SimConfig, max_ticks: u64) -> Option<Outcome> {
    scene.start_run();
    for _ in 0..max_ticks {
        if let Some(outcome) = step(scene, config, SIM_DT).outcome {
            return Some(outcome);
        }
        if !scene.is_simulating() {
            break;
        }
    }
    scene.outcome()
}

/// Play out one placement from a fresh scene
pub fn try_placement(
    config: &SimConfig,
    placement: Placement,
    max_ticks: u64,
) -> Result<Option<Outcome>, ConfigError> {
    let mut scene = Scene::new(config)?;
    if !scene.place_trolley(config, placement.trolley_x) {
        return Err(ConfigError::invalid(
            "trolley_x",
            format!("{} leaves the slope", placement.trolley_x),
        ));
    }
    if !scene.place_wedge(config, placement.wedge_x) {
        return Err(ConfigError::invalid(
            "wedge_x",
            format!("{} is too close to the slope", placement.wedge_x),
        ));
    }
    Ok(run_to_end(&mut scene, config, max_ticks))
}

/// Allowed x ranges for the trolley and the wedge
fn placement_ranges(config: &SimConfig) -> Result<(std::ops::Range<f32>, std::ops::Range<f32>), ConfigError> {
    let trolley = config.wheel_offset..config.slope_boundary - config.wheel_offset;
    let bumper = &config.layout.bumper;
    let wedge = config.slope_boundary + config.wedge_clearance + 1.0..bumper.pos.x - bumper.size.x / 2.0;
    if trolley.is_empty() {
        return Err(ConfigError::invalid("slope_boundary", "no room for the trolley on the slope"));
    }
    if wedge.is_empty() {
        return Err(ConfigError::invalid("layout", "no room for the wedge before the bumper"));
    }
    Ok((trolley, wedge))
}

/// Try up to `attempts` random placements; return the first that wins
pub fn find_winning_placement(
    config: &SimConfig,
    seed: u64,
    attempts: u32,
    max_ticks: u64,
) -> Result<Option<Placement>, ConfigError> {
    config.validate()?;
    let (trolley_range, wedge_range) = placement_ranges(config)?;
    let mut rng = Pcg32::seed_from_u64(seed);

    for attempt in 0..attempts {
        let placement = Placement {
            trolley_x: rng.random_range(trolley_range.clone()),
            wedge_x: rng.random_range(wedge_range.clone()),
        };
        let outcome = try_placement(config, placement, max_ticks)?;
        log::debug!("Attempt {attempt}: {placement:?} -> {outcome:?}");
        if outcome == Some(Outcome::Won) {
            log::info!("Winning placement after {} attempts: {placement:?}", attempt + 1);
            return Ok(Some(placement));
        }
    }
    log::info!("No winning placement in {attempts} attempts");
    Ok(None)
}
