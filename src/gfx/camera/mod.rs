pub mod camera_controller;
pub mod camera_utils;
pub mod projection;
pub mod view_camera;

// Re-export main types
pub use camera_controller::{CameraController, MouseButton};
pub use camera_utils::{CameraManager, CameraUniform, ViewSink};
pub use projection::Projection;
pub use view_camera::Camera;
