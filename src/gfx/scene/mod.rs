//! # Scene Management Module
//!
//! This module provides the scene graph and everything that lives in it:
//! transform hierarchy, renderable meshes, named game objects and point
//! lights.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Arena owning every transform, with parent/child links and
//!   eager world-matrix propagation
//! - [`Scene`] - Objects and lights under a shared root transform, plus scene time
//! - [`SceneObject`] - Named object whose meshes are children of its transform
//! - [`Mesh`] - Generated geometry with a color and its own transform
//! - [`PointLight`] - Light source with color, attenuation and a lamp model
//! - [`Vertex`] - GPU vertex matching the interleaved geometry layout
//!
//! ## Usage
//!
//! ```rust
//! use wavebox::gfx::scene::{Mesh, Scene, SceneObject, ShapeKind};
//! use wavebox::math::Vector3;
//!
//! let mut scene = Scene::new();
//! let mut floor = SceneObject::new(&mut scene.graph, "Floor");
//! let mesh = Mesh::new(&mut scene.graph, ShapeKind::cube());
//! floor.add_mesh(&mut scene.graph, mesh).unwrap();
//! floor.set_scale(&mut scene.graph, Vector3::new(100.0, 0.1, 100.0)).unwrap();
//! scene.add_object(floor).unwrap();
//!
//! assert_eq!(scene.draw_items().unwrap().len(), 1);
//! ```
//!
//! ## Hierarchy Rules
//!
//! - Every node's world matrix equals its parent's world matrix times its
//!   local matrix as soon as a mutating call returns
//! - Reparenting never changes a node's local pose
//! - Parenting a node under itself or one of its descendants is an error

pub mod graph;
pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use graph::{GraphError, SceneGraph, TransformId};
pub use light::{Attenuation, PointLight, PointLightUniform, PointLightsUniform, MAX_POINT_LIGHTS};
pub use object::{Color, DrawMode, Mesh, SceneObject, ShaderKind, ShapeKind, UpdateHook};
pub use scene::{DrawItem, Scene, SceneError, SceneStatistics};
pub use vertex::Vertex;
