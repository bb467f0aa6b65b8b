use crate::math::Vector3;

use super::view_camera::Camera;

/// Mouse button held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Maps pointer deltas, already captured by the windowing layer, onto camera
/// moves. Larger divisors mean slower movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    pub pan_divisor: f32,
    pub dolly_divisor: f32,
    pub rotate_divisor: f32,
    pub wheel_step: f32,
    /// Wheel deltas at or below this magnitude are ignored.
    pub wheel_threshold: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            pan_divisor: 40.0,
            dolly_divisor: 20.0,
            rotate_divisor: 10.0,
            wheel_step: 2.0,
            wheel_threshold: 0.01,
        }
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Left drag pans, middle drag dollies along the view axis and right
    /// drag turns the camera.
    pub fn process_drag(&self, button: MouseButton, dx: f32, dy: f32, camera: &mut Camera) {
        match button {
            MouseButton::Left => camera.translate(Vector3::new(
                -dx / self.pan_divisor,
                dy / self.pan_divisor,
                0.0,
            )),
            MouseButton::Middle => {
                camera.translate(Vector3::new(0.0, 0.0, -(dy + dx) / self.dolly_divisor))
            }
            MouseButton::Right => camera.rotate(Vector3::new(
                -dy / self.rotate_divisor,
                -dx / self.rotate_divisor,
                0.0,
            )),
        }
    }

    /// Steps along the camera's local Z. Returns whether the camera moved.
    pub fn process_wheel(&self, delta: f32, camera: &mut Camera) -> bool {
        if delta.abs() <= self.wheel_threshold {
            return false;
        }
        let step = if delta > 0.0 {
            self.wheel_step
        } else {
            -self.wheel_step
        };
        camera.translate(Vector3::new(0.0, 0.0, step));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_left_drag_pans() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        controller.process_drag(MouseButton::Left, 40.0, 80.0, &mut camera);
        assert!(camera.position().approx_eq(Vector3::new(-1.0, 2.0, 0.0), EPS));
        assert_eq!(camera.rotation(), Vector3::ZERO);
    }

    #[test]
    fn test_middle_drag_dollies() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        controller.process_drag(MouseButton::Middle, 10.0, 30.0, &mut camera);
        assert!(camera.position().approx_eq(Vector3::new(0.0, 0.0, -2.0), EPS));
    }

    #[test]
    fn test_right_drag_rotates() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        controller.process_drag(MouseButton::Right, 20.0, -50.0, &mut camera);
        assert!(camera.rotation().approx_eq(Vector3::new(5.0, -2.0, 0.0), EPS));
        assert_eq!(camera.position(), Vector3::ZERO);
    }

    #[test]
    fn test_wheel() {
        let controller = CameraController::new();
        let mut camera = Camera::default();
        assert!(!controller.process_wheel(0.005, &mut camera));
        assert_eq!(camera.position(), Vector3::ZERO);

        assert!(controller.process_wheel(-3.0, &mut camera));
        assert!(camera.position().approx_eq(Vector3::new(0.0, 0.0, -2.0), EPS));
        assert!(controller.process_wheel(0.5, &mut camera));
        assert!(camera.position().approx_eq(Vector3::ZERO, EPS));
    }
}
