//! Pre-run placement of the trolley and the wedge
//!
//! Only available in the menu. The trolley stays on the slope with both
//! wheels short of the slope end; the wedge stays out on the flat floor.

use glam::Vec2;

use super::state::{Drag, DragTarget, GamePhase, Scene};
use crate::config::SimConfig;

impl Scene {
    /// Grab whatever is under the pointer. The wedge wins over the trolley.
    pub fn drag_start(&mut self, point: Vec2) -> Option<DragTarget> {
        if self.phase != GamePhase::Menu {
            return None;
        }
        if self.wedge.contains_point(point) {
            self.drag = Some(Drag {
                target: DragTarget::Wedge,
                offset: self.wedge.x() - point.x,
            });
        } else if self.trolley.contains_point(point) {
            self.drag = Some(Drag {
                target: DragTarget::Trolley,
                offset: self.trolley.x() - point.x,
            });
        }
        self.drag.map(|d| d.target)
    }

    /// Follow the pointer with the grabbed body. Returns whether it moved.
    pub fn drag_move(&mut self, config: &SimConfig, point: Vec2) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        let Some(drag) = self.drag else {
            return false;
        };
        let x = point.x + drag.offset;
        match drag.target {
            DragTarget::Trolley => self.place_trolley(config, x),
            DragTarget::Wedge => self.place_wedge(config, x),
        }
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Seat the trolley at `x` on the slope if its front wheel stays on the slope
    pub fn place_trolley(&mut self, config: &SimConfig, x: f32) -> bool {
        if self.phase != GamePhase::Menu || x + config.wheel_offset >= config.slope_boundary {
            return false;
        }
        self.seat_trolley(config, x);
        log::debug!("Trolley placed at x={x:.1}");
        true
    }

    /// Move the wedge to `x` if it stays clear of the slope
    pub fn place_wedge(&mut self, config: &SimConfig, x: f32) -> bool {
        if self.phase != GamePhase::Menu || x <= config.slope_boundary + config.wedge_clearance {
            return false;
        }
        self.wedge.set_x(x);
        log::debug!("Wedge placed at x={x:.1}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SimConfig, Scene) {
        let config = SimConfig::default();
        let scene = Scene::new(&config).unwrap();
        (config, scene)
    }

    #[test]
    fn test_drag_trolley_along_slope() {
        let (config, mut scene) = setup();
        let grab = scene.trolley.center();
        assert_eq!(scene.drag_start(grab), Some(DragTarget::Trolley));

        let before = scene.trolley.x();
        assert!(scene.drag_move(&config, grab + Vec2::new(50.0, 0.0)));
        assert!(scene.trolley.x() > before);

        // Wheels re-seated under the cart
        let mid = (scene.front.pos + scene.rear.pos) / 2.0;
        assert!((mid - scene.trolley.pos).length() < 1e-3);

        scene.drag_end();
        assert!(scene.drag.is_none());
        assert!(!scene.drag_move(&config, grab));
    }

    #[test]
    fn test_trolley_cannot_leave_slope() {
        let (config, mut scene) = setup();
        let before = scene.trolley.pos;
        assert!(!scene.place_trolley(&config, config.slope_boundary - config.wheel_offset));
        assert_eq!(scene.trolley.pos, before);
        assert!(scene.place_trolley(&config, config.slope_boundary - config.wheel_offset - 1.0));
    }

    #[test]
    fn test_drag_wedge_respects_clearance() {
        let (config, mut scene) = setup();
        let grab = scene.wedge.center();
        assert_eq!(scene.drag_start(grab), Some(DragTarget::Wedge));

        assert!(scene.drag_move(&config, grab + Vec2::new(-200.0, 0.0)));
        assert!((scene.wedge.x() - (grab.x - 200.0)).abs() < 1e-3);

        let limit = config.slope_boundary + config.wedge_clearance;
        let held = scene.wedge.x();
        assert!(!scene.drag_move(&config, Vec2::new(limit, grab.y)));
        assert_eq!(scene.wedge.x(), held);
    }

    #[test]
    fn test_no_drag_outside_menu() {
        let (config, mut scene) = setup();
        scene.start_run();
        assert_eq!(scene.drag_start(scene.wedge.center()), None);
        assert!(!scene.place_wedge(&config, 900.0));
    }

    #[test]
    fn test_miss_grabs_nothing() {
        let (_, mut scene) = setup();
        assert_eq!(scene.drag_start(Vec2::new(-500.0, -500.0)), None);
    }
}
