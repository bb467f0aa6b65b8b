use crate::gfx::geometry::{
    generate_cube, generate_cylinder_sharp, generate_cylinder_smooth, generate_plane,
    generate_plane_grid, generate_sphere, GeometryData,
};
use crate::gfx::transform::Transform;
use crate::math::Vector3;

use super::graph::{Result, SceneGraph, TransformId};

/// Linear RGB, each channel in `0..=1`.
pub type Color = [f32; 3];

pub const DEFAULT_MESH_COLOR: Color = [0.5, 0.5, 0.5];

/// Per-step behaviour of a scene object, called with the object's transform
/// and the time step in seconds.
pub type UpdateHook = Box<dyn FnMut(&mut Transform, f32)>;

/// Shader program a scene object is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderKind {
    /// Lit by the scene's point lights.
    #[default]
    Phong,
    /// Flat color, used for the lamp models.
    Ambient,
    /// Animated wave surface.
    Procedural,
}

impl ShaderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderKind::Phong => "phong",
            ShaderKind::Ambient => "ambient",
            ShaderKind::Procedural => "procedural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Triangles,
    Lines,
}

/// Which generator a mesh was built from, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Cube {
        half_extents: Vector3,
    },
    Sphere {
        segments: u32,
        radius: f32,
    },
    CylinderSmooth {
        vertical_segments: u32,
        horizontal_segments: u32,
        radius: f32,
        height: f32,
    },
    CylinderSharp {
        vertical_segments: u32,
        radius: f32,
        height: f32,
    },
    PlaneGrid {
        rows: u32,
        columns: u32,
    },
    Plane {
        width: f32,
        height: f32,
        texture_width: f32,
        texture_height: f32,
    },
    /// Caller-supplied geometry.
    Custom,
}

impl ShapeKind {
    /// Unit cube spanning `-1..1` on every axis.
    pub fn cube() -> Self {
        ShapeKind::Cube {
            half_extents: Vector3::ONE,
        }
    }

    pub fn sphere() -> Self {
        Self::sphere_with_segments(32)
    }

    pub fn sphere_with_segments(segments: u32) -> Self {
        ShapeKind::Sphere {
            segments,
            radius: 1.0,
        }
    }

    pub fn cylinder_smooth() -> Self {
        ShapeKind::CylinderSmooth {
            vertical_segments: 32,
            horizontal_segments: 1,
            radius: 1.0,
            height: 2.0,
        }
    }

    pub fn cylinder_sharp() -> Self {
        ShapeKind::CylinderSharp {
            vertical_segments: 8,
            radius: 1.0,
            height: 2.0,
        }
    }

    /// The 200x200 grid the water surface is drawn on.
    pub fn plane_grid() -> Self {
        ShapeKind::PlaneGrid {
            rows: 200,
            columns: 200,
        }
    }

    /// Runs the generator. `Custom` has nothing to generate.
    pub fn generate(&self) -> Option<GeometryData> {
        let data = match *self {
            ShapeKind::Cube { half_extents: e } => generate_cube(e.x, e.y, e.z),
            ShapeKind::Sphere { segments, radius } => generate_sphere(segments, radius),
            ShapeKind::CylinderSmooth {
                vertical_segments,
                horizontal_segments,
                radius,
                height,
            } => generate_cylinder_smooth(vertical_segments, horizontal_segments, radius, height),
            ShapeKind::CylinderSharp {
                vertical_segments,
                radius,
                height,
            } => generate_cylinder_sharp(vertical_segments, radius, height),
            ShapeKind::PlaneGrid { rows, columns } => generate_plane_grid(rows, columns),
            ShapeKind::Plane {
                width,
                height,
                texture_width,
                texture_height,
            } => generate_plane(width, height, texture_width, texture_height),
            ShapeKind::Custom => return None,
        };
        Some(data)
    }
}

/// Renderable geometry with a color and its own node in the scene graph.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: GeometryData,
    pub shape: ShapeKind,
    pub color: Color,
    pub draw_mode: DrawMode,
    transform: TransformId,
}

impl Mesh {
    /// Generates `shape` and registers a parentless transform for it.
    pub fn new(graph: &mut SceneGraph, shape: ShapeKind) -> Self {
        let geometry = shape.generate().unwrap_or_default();
        Self::with_geometry(graph, shape, geometry, DrawMode::Triangles)
    }

    /// Wraps caller-supplied geometry, e.g. debug lines.
    pub fn custom(graph: &mut SceneGraph, geometry: GeometryData, draw_mode: DrawMode) -> Self {
        Self::with_geometry(graph, ShapeKind::Custom, geometry, draw_mode)
    }

    fn with_geometry(
        graph: &mut SceneGraph,
        shape: ShapeKind,
        geometry: GeometryData,
        draw_mode: DrawMode,
    ) -> Self {
        Self {
            geometry,
            shape,
            color: DEFAULT_MESH_COLOR,
            draw_mode,
            transform: graph.insert(Transform::new()),
        }
    }

    pub fn transform_id(&self) -> TransformId {
        self.transform
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_position(&self, graph: &mut SceneGraph, position: Vector3) -> Result<()> {
        graph.set_position(self.transform, position)
    }

    pub fn set_rotation(&self, graph: &mut SceneGraph, rotation: Vector3) -> Result<()> {
        graph.set_rotation(self.transform, rotation)
    }

    pub fn set_scale(&self, graph: &mut SceneGraph, scaling: Vector3) -> Result<()> {
        graph.set_scale(self.transform, scaling)
    }
}

/// A named game object: one transform node with any number of meshes hanging
/// off it.
pub struct SceneObject {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub shader: ShaderKind,
    transform: TransformId,
    update_hook: Option<UpdateHook>,
}

impl std::fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneObject")
            .field("name", &self.name)
            .field("meshes", &self.meshes)
            .field("shader", &self.shader)
            .field("transform", &self.transform)
            .field("update_hook", &self.update_hook.is_some())
            .finish()
    }
}

impl SceneObject {
    pub fn new(graph: &mut SceneGraph, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            shader: ShaderKind::default(),
            transform: graph.insert(Transform::new()),
            update_hook: None,
        }
    }

    pub fn transform_id(&self) -> TransformId {
        self.transform
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_shader(&mut self, shader: ShaderKind) {
        self.shader = shader;
    }

    /// Attaches `mesh`, parenting its transform under this object's.
    pub fn add_mesh(&mut self, graph: &mut SceneGraph, mesh: Mesh) -> Result<()> {
        graph.add_child(self.transform, mesh.transform)?;
        self.meshes.push(mesh);
        Ok(())
    }

    /// Recolors every mesh of the object.
    pub fn set_color(&mut self, color: Color) {
        for mesh in &mut self.meshes {
            mesh.set_color(color);
        }
    }

    /// Translation column of the object's world matrix.
    pub fn world_position(&self, graph: &SceneGraph) -> Result<Vector3> {
        graph
            .transform(self.transform)
            .map(Transform::world_position)
    }

    pub fn set_position(&self, graph: &mut SceneGraph, position: Vector3) -> Result<()> {
        graph.set_position(self.transform, position)
    }

    pub fn set_rotation(&self, graph: &mut SceneGraph, rotation: Vector3) -> Result<()> {
        graph.set_rotation(self.transform, rotation)
    }

    pub fn set_scale(&self, graph: &mut SceneGraph, scaling: Vector3) -> Result<()> {
        graph.set_scale(self.transform, scaling)
    }

    pub fn translate(&self, graph: &mut SceneGraph, offset: Vector3) -> Result<()> {
        graph.translate(self.transform, offset)
    }

    pub fn rotate(&self, graph: &mut SceneGraph, delta: Vector3) -> Result<()> {
        graph.rotate(self.transform, delta)
    }

    /// Installs the behaviour [`SceneObject::update`] runs every step,
    /// replacing any previous one.
    pub fn set_update_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Transform, f32) + 'static,
    {
        self.update_hook = Some(Box::new(hook));
    }

    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    pub fn has_update_hook(&self) -> bool {
        self.update_hook.is_some()
    }

    /// Runs the update hook, if any, on the object's transform. The change
    /// cascades to the meshes like any other pose change.
    pub fn update(&mut self, graph: &mut SceneGraph, time_step: f32) -> Result<()> {
        match self.update_hook.as_mut() {
            Some(hook) => graph.update(self.transform, |t| hook(t, time_step)),
            None => Ok(()),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.triangle_count()).sum()
    }
}
