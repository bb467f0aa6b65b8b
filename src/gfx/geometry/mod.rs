//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive solids the scene is
//! built from, eliminating the need for external model files.
//!
//! ## Supported Primitives
//!
//! - **Cube**: box with per-face normals, 24 vertices
//! - **Sphere**: UV sphere with pole fans
//! - **Cylinder**: smooth-shaded with shared body rings, or faceted
//! - **Plane grid**: subdivided flat grid used for the water surface
//! - **Textured plane**: single quad with repeating texture coordinates
//!
//! ## Layout
//!
//! Vertices are interleaved, eight floats per vertex:
//! `position.xyz, normal.xyz, uv.st`. Indices are 16-bit and describe
//! triangle lists. Generators that would need more than 65536 vertices are
//! clamped down to the largest configuration that still fits.
//!
//! ## Usage
//!
//! ```rust
//! use wavebox::gfx::geometry::{generate_cube, generate_sphere, generate_plane_grid};
//!
//! let cube = generate_cube(1.0, 1.0, 1.0);
//! assert_eq!(cube.vertex_count(), 24);
//!
//! let sphere = generate_sphere(32, 1.0);
//! let water = generate_plane_grid(200, 200);
//! assert_eq!(water.vertex_count(), 201 * 201);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex;

/// Floats per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 8;

/// Largest vertex count addressable with 16-bit indices.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Interleaved `position.xyz, normal.xyz, uv.st`
    pub vertices: Vec<f32>,
    /// Triangle list indices
    pub indices: Vec<u16>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices * FLOATS_PER_VERTEX),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.vertices.extend_from_slice(&position);
        self.vertices.extend_from_slice(&normal);
        self.vertices.extend_from_slice(&uv);
    }

    pub fn push_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        self.attribute(index, 0)
    }

    pub fn normal(&self, index: usize) -> Option<[f32; 3]> {
        self.attribute(index, 3)
    }

    pub fn uv(&self, index: usize) -> Option<[f32; 2]> {
        let base = index * FLOATS_PER_VERTEX + 6;
        let s = self.vertices.get(base..base + 2)?;
        Some([s[0], s[1]])
    }

    /// True when every index addresses an existing vertex and the index list
    /// forms whole triangles.
    pub fn is_valid(&self) -> bool {
        let count = self.vertex_count();
        self.vertices.len() % FLOATS_PER_VERTEX == 0
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < count)
    }

    /// Converts to the vertex format used by the renderer
    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.vertices
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| Vertex {
                position: [v[0], v[1], v[2]],
                normal: [v[3], v[4], v[5]],
                tex_coords: [v[6], v[7]],
            })
            .collect()
    }

    fn attribute(&self, index: usize, offset: usize) -> Option<[f32; 3]> {
        let base = index * FLOATS_PER_VERTEX + offset;
        let s = self.vertices.get(base..base + 3)?;
        Some([s[0], s[1], s[2]])
    }
}
