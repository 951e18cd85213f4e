//! Drag-to-rotate and wheel-to-zoom camera controls.
//!
//! Rotation follows the pointer incrementally while a drag is active and stops
//! the moment it ends; there is no inertia. Zoom is hard-clamped on every
//! wheel event.

use foundation::math::Vec2;
use serde::Serialize;

use crate::config::ControlsConfig;

/// Camera pose: two accumulated rotation angles and a zoom factor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CameraState {
    /// Rotation about the X axis (`x`) and Y axis (`y`), radians, unbounded.
    pub rotation: Vec2,
    pub zoom: f64,
}

impl CameraState {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            rotation: Vec2::new(config.initial_tilt, 0.0),
            zoom: config.initial_zoom.clamp(config.zoom_min, config.zoom_max),
        }
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(&ControlsConfig::default())
    }
}

/// Translates pointer and wheel input into camera updates.
#[derive(Debug, Clone)]
pub struct SphereController {
    pub camera: CameraState,
    config: ControlsConfig,
    dragging: bool,
    /// Pointer position at the previous move (or at drag start).
    last_pos_px: [f64; 2],
}

impl Default for SphereController {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

impl SphereController {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            camera: CameraState::new(&config),
            config,
            dragging: false,
            last_pos_px: [0.0, 0.0],
        }
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Begin a drag at `pos_px`.
    pub fn on_pointer_down(&mut self, pos_px: [f64; 2]) {
        self.dragging = true;
        self.last_pos_px = pos_px;
    }

    /// Rotate by the delta since the last move. Returns whether the camera changed.
    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) -> bool {
        if !self.dragging || !pos_px[0].is_finite() || !pos_px[1].is_finite() {
            return false;
        }

        let dx = pos_px[0] - self.last_pos_px[0];
        let dy = pos_px[1] - self.last_pos_px[1];
        self.last_pos_px = pos_px;

        self.camera.rotation.x -= dy * self.config.rotate_speed;
        self.camera.rotation.y += dx * self.config.rotate_speed;
        dx != 0.0 || dy != 0.0
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn on_pointer_leave(&mut self) {
        self.dragging = false;
    }

    /// Zoom by a wheel delta (positive = away from the viewer).
    pub fn on_wheel(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            return;
        }
        let zoom = self.camera.zoom - delta_y * self.config.zoom_speed;
        self.camera.zoom = zoom.clamp(self.config.zoom_min, self.config.zoom_max);
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraState, SphereController};
    use crate::config::ControlsConfig;

    #[test]
    fn starts_with_default_tilt() {
        let cam = CameraState::default();
        assert_eq!(cam.rotation.x, 0.2);
        assert_eq!(cam.rotation.y, 0.0);
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn drag_rotates_incrementally() {
        let mut ctrl = SphereController::default();
        ctrl.on_pointer_down([100.0, 100.0]);
        assert!(ctrl.on_pointer_move([110.0, 100.0]));
        assert!(ctrl.on_pointer_move([110.0, 120.0]));

        let cam = ctrl.camera();
        assert!((cam.rotation.y - 10.0 * 0.005).abs() < 1e-12);
        assert!((cam.rotation.x - (0.2 - 20.0 * 0.005)).abs() < 1e-12);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut ctrl = SphereController::default();
        assert!(!ctrl.on_pointer_move([50.0, 50.0]));
        ctrl.on_pointer_down([0.0, 0.0]);
        ctrl.on_pointer_up();
        assert!(!ctrl.on_pointer_move([500.0, 500.0]));
        assert_eq!(ctrl.camera(), CameraState::default());
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let mut ctrl = SphereController::default();
        ctrl.on_pointer_down([0.0, 0.0]);
        ctrl.on_pointer_leave();
        assert!(!ctrl.is_dragging());
        assert!(!ctrl.on_pointer_move([10.0, 10.0]));
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut ctrl = SphereController::default();
        ctrl.on_wheel(100_000.0);
        assert_eq!(ctrl.camera().zoom, 0.5);

        let mut ctrl = SphereController::default();
        ctrl.on_wheel(-100_000.0);
        assert_eq!(ctrl.camera().zoom, 2.5);

        ctrl.on_wheel(f64::NAN);
        assert_eq!(ctrl.camera().zoom, 2.5);
    }

    #[test]
    fn zoom_stays_in_bounds_for_any_sequence() {
        let mut ctrl = SphereController::new(ControlsConfig::default());
        let deltas = [120.0, -3000.0, 40.0, 99999.0, -1.0, -250.0, 500.0, -700.0];
        for d in deltas.iter().cycle().take(64) {
            ctrl.on_wheel(*d);
            let z = ctrl.camera().zoom;
            assert!((0.5..=2.5).contains(&z), "zoom {z} escaped bounds");
        }
    }

    #[test]
    fn small_wheel_steps_are_linear() {
        let mut ctrl = SphereController::default();
        ctrl.on_wheel(-100.0);
        assert!((ctrl.camera().zoom - 1.1).abs() < 1e-12);
    }
}
