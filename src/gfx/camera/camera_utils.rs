use crate::math::{Matrix4, Vector3};

use super::{
    camera_controller::{CameraController, MouseButton},
    projection::Projection,
    view_camera::Camera,
};

/// Receives the camera's view matrix and world position after every pose
/// change, typically a shader program's uniform slot.
pub trait ViewSink {
    fn update_view(&mut self, view: &Matrix4, eye: Vector3);
}

/// Camera, its projection and the input mapping that drives it.
#[derive(Debug)]
pub struct CameraManager {
    pub camera: Camera,
    pub controller: CameraController,
    pub projection: Projection,
}

impl CameraManager {
    pub fn new(camera: Camera, controller: CameraController, projection: Projection) -> Self {
        Self {
            camera,
            controller,
            projection,
        }
    }

    pub fn process_drag(&mut self, button: MouseButton, dx: f32, dy: f32) {
        self.controller.process_drag(button, dx, dy, &mut self.camera);
    }

    pub fn process_wheel(&mut self, delta: f32) -> bool {
        self.controller.process_wheel(delta, &mut self.camera)
    }

    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.projection.resize(width, height)
    }

    /// Get the view projection matrix, depth-remapped for wgpu
    pub fn get_view_proj_matrix(&self) -> Matrix4 {
        self.camera
            .build_view_projection_matrix(&self.projection.wgpu_matrix())
    }

    pub fn uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::default();
        uniform.update_view_proj(&self.camera, &self.projection);
        uniform
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().to_cols_array_2d(),
        }
    }
}

impl CameraUniform {
    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        let eye = camera.position();
        self.view_position = [eye.x, eye.y, eye.z, 1.0];
        self.view_proj = camera
            .build_view_projection_matrix(&projection.wgpu_matrix())
            .to_cols_array_2d();
    }
}
