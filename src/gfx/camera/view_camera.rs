//! Free-flying camera driven by a [`Transform`].
//!
//! The transform holds the camera's pose in the world. The view matrix is the
//! inverse of that pose and is refreshed after every pose change, so it is
//! always ready to hand to a shader.

use crate::gfx::transform::Transform;
use crate::math::{Matrix4, Vector3};

use super::camera_utils::ViewSink;

pub struct Camera {
    transform: Transform,
    view_matrix: Matrix4,
    sinks: Vec<Box<dyn ViewSink>>,
}

impl std::fmt::Debug for Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("transform", &self.transform)
            .field("view_matrix", &self.view_matrix)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` with Euler `rotation` in degrees.
    pub fn new(position: Vector3, rotation: Vector3) -> Self {
        let mut camera = Self {
            transform: Transform::from_pose(position, rotation, Vector3::ONE),
            view_matrix: Matrix4::identity(),
            sinks: Vec::new(),
        };
        camera.update_view();
        camera
    }

    /// Registers a consumer of the view matrix and sends it the current one.
    pub fn add_sink(&mut self, mut sink: Box<dyn ViewSink>) {
        sink.update_view(&self.view_matrix, self.position());
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vector3 {
        self.transform.position()
    }

    /// Euler angles in degrees.
    pub fn rotation(&self) -> Vector3 {
        self.transform.rotation()
    }

    /// The camera-to-world matrix.
    pub fn pose_matrix(&self) -> &Matrix4 {
        self.transform.world_matrix()
    }

    /// The world-to-camera matrix.
    pub fn view_matrix(&self) -> &Matrix4 {
        &self.view_matrix
    }

    pub fn right(&self) -> Vector3 {
        self.view_matrix.row3(0)
    }

    pub fn up(&self) -> Vector3 {
        self.view_matrix.row3(1)
    }

    /// Viewing direction. The camera looks down its local -Z.
    pub fn forward(&self) -> Vector3 {
        -self.view_matrix.row3(2)
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.transform.set_position(position);
        self.update_view();
    }

    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.transform.set_rotation(rotation);
        self.update_view();
    }

    /// Sets the pitch in degrees, keeping yaw and roll.
    pub fn rotate_x(&mut self, degrees: f32) {
        let mut rotation = self.rotation();
        rotation.x = degrees;
        self.set_rotation(rotation);
    }

    /// Sets the yaw in degrees, keeping pitch and roll.
    pub fn rotate_y(&mut self, degrees: f32) {
        let mut rotation = self.rotation();
        rotation.y = degrees;
        self.set_rotation(rotation);
    }

    /// Adds `delta` degrees to the Euler angles.
    pub fn rotate(&mut self, delta: Vector3) {
        self.set_rotation(self.rotation() + delta);
    }

    /// Moves relative to the camera: `x` along right, `y` along up and `z`
    /// along the camera's local +Z, which points away from the view direction.
    pub fn translate(&mut self, offset: Vector3) {
        let delta = self.view_matrix.row3(0) * offset.x
            + self.view_matrix.row3(1) * offset.y
            + self.view_matrix.row3(2) * offset.z;
        self.set_position(self.position() + delta);
    }

    /// View-projection matrix for the given projection matrix.
    pub fn build_view_projection_matrix(&self, projection: &Matrix4) -> Matrix4 {
        *projection * self.view_matrix
    }

    fn update_view(&mut self) {
        match Matrix4::invert(self.transform.world_matrix()) {
            Some(view) => self.view_matrix = view,
            None => log::warn!("camera pose is singular, keeping the previous view matrix"),
        }

        let eye = self.position();
        for sink in &mut self.sinks {
            sink.update_view(&self.view_matrix, eye);
        }
    }
}
