//! Point light sources.
//!
//! A light is a regular [`SceneObject`] so it can be placed and parented like
//! anything else. Its visible model is a small sphere drawn with the ambient
//! shader in the light's own color.

use crate::math::Vector3;

use super::graph::{Result, SceneGraph};
use super::object::{Color, Mesh, SceneObject, ShaderKind, ShapeKind};

/// Upper bound on lights the shaders accept.
pub const MAX_POINT_LIGHTS: usize = 10;

/// Sphere resolution of the lamp model.
pub const LIGHT_MODEL_SEGMENTS: u32 = 8;

/// Distance falloff `1 / (1 + k_linear * d + k_quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub k_linear: f32,
    pub k_quadratic: f32,
}

impl Default for Attenuation {
    /// Reaches roughly 325 units.
    fn default() -> Self {
        Self {
            k_linear: 0.014,
            k_quadratic: 0.0007,
        }
    }
}

impl Attenuation {
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (1.0 + self.k_linear * distance + self.k_quadratic * distance * distance)
    }
}

#[derive(Debug)]
pub struct PointLight {
    pub object: SceneObject,
    pub color: Color,
    pub attenuation: Attenuation,
}

impl PointLight {
    /// Creates a white light with its lamp model attached.
    pub fn new(graph: &mut SceneGraph, name: impl Into<String>) -> Result<Self> {
        let mut object = SceneObject::new(graph, name);
        object.set_shader(ShaderKind::Ambient);
        let model = Mesh::new(graph, ShapeKind::sphere_with_segments(LIGHT_MODEL_SEGMENTS));
        object.add_mesh(graph, model)?;

        let mut light = Self {
            object,
            color: [1.0; 3],
            attenuation: Attenuation::default(),
        };
        light.set_light_color([1.0; 3]);
        Ok(light)
    }

    /// Sets the emitted color and tints the lamp model to match.
    pub fn set_light_color(&mut self, color: Color) {
        self.color = color;
        self.object.set_color(color);
    }

    pub fn set_attenuation(&mut self, k_linear: f32, k_quadratic: f32) {
        self.attenuation = Attenuation {
            k_linear,
            k_quadratic,
        };
    }

    pub fn world_position(&self, graph: &SceneGraph) -> Result<Vector3> {
        self.object.world_position(graph)
    }

    pub fn uniform(&self, graph: &SceneGraph) -> Result<PointLightUniform> {
        let position = self.world_position(graph)?;
        Ok(PointLightUniform {
            position: [position.x, position.y, position.z, 1.0],
            color: [self.color[0], self.color[1], self.color[2], 1.0],
            attenuation: [self.attenuation.k_linear, self.attenuation.k_quadratic, 0.0, 0.0],
        })
    }
}

/// GPU layout of one light, padded to 16-byte rows.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub color: [f32; 4],
    /// `k_linear`, `k_quadratic`, padding.
    pub attenuation: [f32; 4],
}

/// Fixed-size light array plus the number of live entries.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightsUniform {
    pub lights: [PointLightUniform; MAX_POINT_LIGHTS],
    pub count: u32,
    pub _padding: [u32; 3],
}

impl Default for PointLightsUniform {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}
