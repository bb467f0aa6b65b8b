//! # Graphics Module
//!
//! Spatial and geometric core of the engine: transforms, the scene graph, the
//! view camera and procedural geometry. Buffer upload and draw submission stay
//! with the renderer; this module hands it plain matrices, colors, vertex
//! slices and `bytemuck` uniforms.
//!
//! ## Architecture Overview
//!
//! - **Transform** ([`transform`]) - Pose to local and world matrix composition
//! - **Scene Management** ([`scene`]) - Transform hierarchy, objects and lights
//! - **Camera System** ([`camera`]) - Transform-driven view matrix, projection
//!   and pointer navigation
//! - **Geometry** ([`geometry`]) - Cube, sphere, cylinder and plane generators

pub mod camera;
pub mod geometry;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use geometry::GeometryData;
pub use scene::{Scene, SceneGraph};
pub use transform::Transform;
