use crate::gfx::transform::Transform;
use crate::math::{Matrix4, Vector3};

use super::graph::{GraphError, SceneGraph, TransformId};
use super::light::{PointLight, PointLightsUniform, MAX_POINT_LIGHTS};
use super::object::{Color, DrawMode, SceneObject, ShaderKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("scene already holds the maximum of {max} point lights")]
    TooManyLights { max: usize },
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// One mesh ready to be submitted: where it is, how it looks and which
/// shader draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub world_matrix: Matrix4,
    pub color: Color,
    pub shader: ShaderKind,
    pub draw_mode: DrawMode,
    /// Index into [`Scene::objects`], or into [`Scene::lights`] for
    /// [`ShaderKind::Ambient`] lamp models.
    pub source: usize,
}

/// Scene holding objects and point lights under a common root transform
#[derive(Debug)]
pub struct Scene {
    pub graph: SceneGraph,
    pub objects: Vec<SceneObject>,
    pub lights: Vec<PointLight>,
    root: TransformId,
    current_time: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Transform::new());
        Self {
            graph,
            objects: Vec::new(),
            lights: Vec::new(),
            root,
            current_time: 0.0,
        }
    }

    pub fn root(&self) -> TransformId {
        self.root
    }

    /// Moves the whole scene.
    pub fn set_position(&mut self, position: Vector3) -> Result<()> {
        Ok(self.graph.set_position(self.root, position)?)
    }

    pub fn set_rotation(&mut self, rotation: Vector3) -> Result<()> {
        Ok(self.graph.set_rotation(self.root, rotation)?)
    }

    pub fn set_scale(&mut self, scaling: Vector3) -> Result<()> {
        Ok(self.graph.set_scale(self.root, scaling)?)
    }

    /// Parents the object under the scene root and returns its index.
    pub fn add_object(&mut self, object: SceneObject) -> Result<usize> {
        self.graph.add_child(self.root, object.transform_id())?;
        log::debug!("added object '{}' to scene", object.name);
        self.objects.push(object);
        Ok(self.objects.len() - 1)
    }

    /// Parents the light under the scene root and returns its index.
    pub fn add_light(&mut self, light: PointLight) -> Result<usize> {
        if self.lights.len() >= MAX_POINT_LIGHTS {
            return Err(SceneError::TooManyLights {
                max: MAX_POINT_LIGHTS,
            });
        }
        self.graph.add_child(self.root, light.object.transform_id())?;
        log::debug!("added light '{}' to scene", light.object.name);
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    /// Advances scene time by `time_step` seconds and runs every object's
    /// update hook, lamps included.
    pub fn update(&mut self, time_step: f32) -> Result<()> {
        self.current_time += time_step;
        let lamps = self.lights.iter_mut().map(|l| &mut l.object);
        for object in self.objects.iter_mut().chain(lamps) {
            object.update(&mut self.graph, time_step)?;
        }
        Ok(())
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Every mesh of every object in insertion order, followed by the lamp
    /// models.
    pub fn draw_items(&self) -> Result<Vec<DrawItem>> {
        let mut items = Vec::new();
        for (index, object) in self.objects.iter().enumerate() {
            self.push_draw_items(&mut items, object, object.shader, index)?;
        }
        for (index, light) in self.lights.iter().enumerate() {
            self.push_draw_items(&mut items, &light.object, ShaderKind::Ambient, index)?;
        }
        Ok(items)
    }

    fn push_draw_items(
        &self,
        items: &mut Vec<DrawItem>,
        object: &SceneObject,
        shader: ShaderKind,
        source: usize,
    ) -> Result<()> {
        for mesh in &object.meshes {
            items.push(DrawItem {
                world_matrix: self.graph.world_matrix(mesh.transform_id())?,
                color: mesh.color,
                shader,
                draw_mode: mesh.draw_mode,
                source,
            });
        }
        Ok(())
    }

    /// Packs every light for upload.
    pub fn light_uniforms(&self) -> Result<PointLightsUniform> {
        let mut uniform = PointLightsUniform::default();
        for (slot, light) in uniform.lights.iter_mut().zip(&self.lights) {
            *slot = light.uniform(&self.graph)?;
        }
        uniform.count = self.lights.len() as u32;
        Ok(uniform)
    }

    /// Gets all object names for UI display
    pub fn get_object_names(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.name.clone()).collect()
    }

    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get_object(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(index)
    }

    /// First object with the given name.
    pub fn find_object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let all = || {
            self.objects
                .iter()
                .chain(self.lights.iter().map(|l| &l.object))
        };

        SceneStatistics {
            object_count: self.objects.len(),
            light_count: self.lights.len(),
            mesh_count: all().map(|obj| obj.meshes.len()).sum(),
            total_triangles: all().map(SceneObject::triangle_count).sum(),
            total_vertices: all().map(SceneObject::vertex_count).sum(),
        }
    }

    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub light_count: usize,
    pub mesh_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
}
