//! # Wavebox Prelude
//!
//! This module provides a convenient way to import commonly used types from
//! the engine.
//!
//! ## Usage
//!
//! ```rust
//! use wavebox::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = wavebox::default()?;
//!
//!     app.settings
//!         .set(settings::WATER_COLOR, SettingValue::Color([0.0, 0.3, 0.6]))?;
//!     app.process_signals()?;
//!     app.advance(16.0)?;
//!
//!     let items: Vec<DrawItem> = app.draw_items()?;
//!     assert!(!items.is_empty());
//!     Ok(())
//! }
//! ```

// Re-export core application types
pub use crate::app::{ObjectDesc, WaterRoomApp};
pub use crate::default;
pub use crate::settings::{self, SettingValue, WaveSettings, WaveUniform};

// Re-export math types
pub use crate::math::{Matrix4, Vector3};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, CameraManager, MouseButton, Projection, ViewSink};
pub use crate::gfx::geometry::{
    generate_cube, generate_cylinder_sharp, generate_cylinder_smooth, generate_plane,
    generate_plane_grid, generate_sphere, GeometryData,
};
pub use crate::gfx::scene::{
    DrawItem, Mesh, PointLight, Scene, SceneGraph, SceneObject, ShaderKind, ShapeKind,
    TransformId,
};
pub use crate::gfx::transform::Transform;
