//! The water room: a boxed floor with four walls, an animated water plane and
//! nine ceiling lamps, viewed through a free camera.
//!
//! [`WaterRoomApp`] owns the scene, the camera and the wave settings and runs
//! the fixed-step update. Windowing, input capture and draw submission belong
//! to the host, which feeds it elapsed time and pointer deltas and reads back
//! draw items and uniforms.

use anyhow::{Context, Result};

use crate::gfx::camera::{
    Camera, CameraController, CameraManager, CameraUniform, MouseButton, Projection,
};
use crate::gfx::scene::{
    Color, DrawItem, Mesh, PointLight, Scene, SceneObject, ShaderKind, ShapeKind,
};
use crate::math::Vector3;
use crate::settings::{self, WaveSettings, WaveUniform};

pub const CAMERA_POSITION: Vector3 = Vector3::new(90.0, 34.0, -90.0);
pub const CAMERA_ROTATION: Vector3 = Vector3::new(-15.0, 140.0, 0.0);

/// Milliseconds of real time per simulation step.
pub const MS_PER_UPDATE: f32 = 4.0;
/// Scene time advanced per simulation step, in seconds.
pub const UPDATE_TIME_STEP: f32 = 0.01;

pub const WALL_HEIGHT: f32 = 20.0;
pub const WALL_WIDTH: f32 = 100.0;
pub const LAMP_RADIUS: f32 = 1.0;

const WALL_COLOR: Color = [1.0, 1.0, 1.0];
const FLOOR_COLOR: Color = [0.75, 0.75, 0.75];
const LAMP_COLOR: Color = [1.0, 1.0, 1.0];

/// Everything needed to create one single-mesh scene object.
#[derive(Debug, Clone)]
pub struct ObjectDesc {
    pub name: String,
    pub shape: ShapeKind,
    pub position: Vector3,
    pub scale: Vector3,
    pub color: Color,
    pub shader: ShaderKind,
}

impl ObjectDesc {
    pub fn new(name: impl Into<String>, shape: ShapeKind) -> Self {
        Self {
            name: name.into(),
            shape,
            position: Vector3::ZERO,
            scale: Vector3::ONE,
            color: crate::gfx::scene::object::DEFAULT_MESH_COLOR,
            shader: ShaderKind::Phong,
        }
    }

    pub fn position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn shader(mut self, shader: ShaderKind) -> Self {
        self.shader = shader;
        self
    }
}

#[derive(Debug)]
pub struct WaterRoomApp {
    pub scene: Scene,
    pub camera_manager: CameraManager,
    pub settings: WaveSettings,
    /// Indices into `scene.objects` of the water surfaces.
    water: Vec<usize>,
    wave_uniform: WaveUniform,
    lag: f32,
}

impl WaterRoomApp {
    /// Builds the default room for a square viewport.
    pub fn new(settings: WaveSettings) -> Result<Self> {
        Self::with_viewport(settings, 1, 1)
    }

    pub fn with_viewport(settings: WaveSettings, width: u32, height: u32) -> Result<Self> {
        let camera = Camera::new(CAMERA_POSITION, CAMERA_ROTATION);
        let camera_manager = CameraManager::new(
            camera,
            CameraController::default(),
            Projection::new(width, height),
        );

        let wave_uniform = settings
            .wave_uniform(0.0)
            .context("wave settings are missing a water room parameter")?;

        let mut app = Self {
            scene: Scene::new(),
            camera_manager,
            settings,
            water: Vec::new(),
            wave_uniform,
            lag: 0.0,
        };
        app.load_default_scene()
            .context("failed to assemble the water room")?;
        log::debug!("water room ready: {:?}", app.scene.get_statistics());
        Ok(app)
    }

    fn load_default_scene(&mut self) -> Result<()> {
        let water_color = self.settings.color(settings::WATER_COLOR)?;
        let water = self.create_object(
            ObjectDesc::new("Waves", ShapeKind::plane_grid())
                .position(Vector3::new(0.0, 10.0, 100.0))
                .color(water_color)
                .shader(ShaderKind::Procedural),
        )?;
        self.water.push(water);

        self.create_object(
            ObjectDesc::new("Floor", ShapeKind::cube())
                .position(Vector3::new(0.0, -0.1, 0.0))
                .scale(Vector3::new(WALL_WIDTH, 0.1, WALL_WIDTH))
                .color(FLOOR_COLOR),
        )?;

        let side_scale = Vector3::new(0.1, WALL_HEIGHT, WALL_WIDTH);
        let end_scale = Vector3::new(WALL_WIDTH, WALL_HEIGHT, 0.1);
        let walls = [
            ("Left Wall", Vector3::new(-WALL_WIDTH, WALL_HEIGHT, 0.0), side_scale),
            ("Right Wall", Vector3::new(WALL_WIDTH, WALL_HEIGHT, 0.0), side_scale),
            ("Back Wall", Vector3::new(0.0, WALL_HEIGHT, -WALL_WIDTH), end_scale),
            ("Front Wall", Vector3::new(0.0, WALL_HEIGHT, WALL_WIDTH), end_scale),
        ];
        for (name, position, scale) in walls {
            self.create_object(
                ObjectDesc::new(name, ShapeKind::cube())
                    .position(position)
                    .scale(scale)
                    .color(WALL_COLOR),
            )?;
        }

        let lamp_height = 2.0 * WALL_HEIGHT - LAMP_RADIUS;
        let offset = WALL_WIDTH * 0.75;
        let lamps = [
            ("Middle Lamp", 0.0, -offset),
            ("Right Lamp", offset, -offset),
            ("Left Lamp", -offset, -offset),
            ("Middle Lamp", 0.0, offset),
            ("Right Lamp", offset, offset),
            ("Left Lamp", -offset, offset),
            ("Middle Left Lamp", -offset, 0.0),
            ("Middle Right Lamp", offset, 0.0),
            ("Middle Lamp", 0.0, 0.0),
        ];
        for (name, x, z) in lamps {
            self.create_lamp(name, Vector3::new(x, lamp_height, z))?;
        }
        Ok(())
    }

    /// Creates a single-mesh object from `desc` and adds it to the scene.
    pub fn create_object(&mut self, desc: ObjectDesc) -> Result<usize> {
        let graph = &mut self.scene.graph;
        let mut mesh = Mesh::new(graph, desc.shape);
        mesh.set_color(desc.color);

        let mut object = SceneObject::new(graph, desc.name);
        object.set_position(graph, desc.position)?;
        object.set_scale(graph, desc.scale)?;
        object.add_mesh(graph, mesh)?;
        object.set_shader(desc.shader);

        let name = object.name.clone();
        self.scene
            .add_object(object)
            .with_context(|| format!("failed to add object '{}'", name))
    }

    /// Creates a white lamp of [`LAMP_RADIUS`] at `position`.
    pub fn create_lamp(&mut self, name: &str, position: Vector3) -> Result<usize> {
        let graph = &mut self.scene.graph;
        let mut light = PointLight::new(graph, name)?;
        light.object.set_position(graph, position)?;
        light.object.set_scale(graph, Vector3::splat(LAMP_RADIUS))?;
        light.set_light_color(LAMP_COLOR);

        self.scene
            .add_light(light)
            .with_context(|| format!("failed to add lamp '{}'", name))
    }

    /// Applies every pending settings change. A water color change recolors
    /// the water meshes, anything else refreshes the wave uniform. Returns the
    /// number of changes applied.
    pub fn process_signals(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Some(tag) = self.settings.take_signal() {
            if tag == settings::WATER_COLOR {
                let color = self.settings.color(&tag)?;
                for &index in &self.water {
                    if let Some(object) = self.scene.get_object_mut(index) {
                        object.set_color(color);
                    }
                }
            }
            self.refresh_wave_uniform()
                .with_context(|| format!("failed to apply setting '{}'", tag))?;
            log::debug!("applied setting '{}'", tag);
            applied += 1;
        }
        Ok(applied)
    }

    /// Feeds `elapsed_ms` of real time into the fixed-step loop and returns
    /// the number of steps taken.
    pub fn advance(&mut self, elapsed_ms: f32) -> Result<u32> {
        self.lag += elapsed_ms.max(0.0);
        let mut steps = 0;
        while self.lag >= MS_PER_UPDATE {
            self.scene
                .update(UPDATE_TIME_STEP)
                .context("failed to run object update hooks")?;
            self.lag -= MS_PER_UPDATE;
            steps += 1;
        }
        self.wave_uniform.time = self.scene.current_time();
        Ok(steps)
    }

    /// Fraction of a step left over after [`WaterRoomApp::advance`], for
    /// render interpolation.
    pub fn residual_lag(&self) -> f32 {
        self.lag / MS_PER_UPDATE
    }

    pub fn process_drag(&mut self, button: MouseButton, dx: f32, dy: f32) {
        self.camera_manager.process_drag(button, dx, dy);
    }

    pub fn process_wheel(&mut self, delta: f32) -> bool {
        self.camera_manager.process_wheel(delta)
    }

    /// Returns whether the projection changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        self.camera_manager.resize(width, height)
    }

    pub fn water_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.water
            .iter()
            .filter_map(|&index| self.scene.get_object(index))
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.camera_manager.uniform()
    }

    pub fn wave_uniform(&self) -> &WaveUniform {
        &self.wave_uniform
    }

    pub fn draw_items(&self) -> Result<Vec<DrawItem>> {
        Ok(self.scene.draw_items()?)
    }

    fn refresh_wave_uniform(&mut self) -> Result<()> {
        self.wave_uniform = self.settings.wave_uniform(self.scene.current_time())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingValue;

    fn app() -> WaterRoomApp {
        let _ = env_logger::builder().is_test(true).try_init();
        WaterRoomApp::new(WaveSettings::with_defaults()).unwrap()
    }

    #[test]
    fn test_default_room_layout() {
        let app = app();
        let stats = app.scene.get_statistics();
        assert_eq!(stats.object_count, 6);
        assert_eq!(stats.light_count, 9);
        assert_eq!(
            app.scene.get_object_names(),
            vec!["Waves", "Floor", "Left Wall", "Right Wall", "Back Wall", "Front Wall"]
        );

        let water = app.water_objects().next().unwrap();
        assert_eq!(water.shader, ShaderKind::Procedural);
        assert_eq!(water.meshes[0].color, [0.1, 0.15, 0.4]);
        assert_eq!(
            water.world_position(&app.scene.graph).unwrap(),
            Vector3::new(0.0, 10.0, 100.0)
        );

        let lamp = &app.scene.lights[8];
        assert_eq!(
            lamp.world_position(&app.scene.graph).unwrap(),
            Vector3::new(0.0, 39.0, 0.0)
        );
        assert_eq!(app.camera_manager.camera.position(), CAMERA_POSITION);
    }

    #[test]
    fn test_water_color_signal_recolors_water() {
        let mut app = app();
        app.settings
            .set(settings::WATER_COLOR, SettingValue::Color([0.0, 0.3, 0.6]))
            .unwrap();
        assert_eq!(app.process_signals().unwrap(), 1);

        let water = app.water_objects().next().unwrap();
        assert_eq!(water.meshes[0].color, [0.0, 0.3, 0.6]);
        // Walls keep their color
        assert_eq!(app.scene.objects[2].meshes[0].color, WALL_COLOR);
        assert_eq!(app.wave_uniform().water_color, [0.0, 0.3, 0.6, 1.0]);
    }

    #[test]
    fn test_scalar_signal_refreshes_uniform() {
        let mut app = app();
        app.settings
            .set(settings::HARMONIC_SPEED, SettingValue::Scalar(12.0))
            .unwrap();
        assert_eq!(app.wave_uniform().speed, 5.0);
        app.process_signals().unwrap();
        assert_eq!(app.wave_uniform().speed, 12.0);
        assert_eq!(app.process_signals().unwrap(), 0);
    }

    #[test]
    fn test_fixed_step_update() {
        let mut app = app();
        assert_eq!(app.advance(10.0).unwrap(), 2);
        assert!((app.residual_lag() - 0.5).abs() < 1e-6);
        assert_eq!(app.advance(2.0).unwrap(), 1);
        assert!((app.scene.current_time() - 0.03).abs() < 1e-6);
        assert_eq!(app.wave_uniform().time, app.scene.current_time());
    }

    #[test]
    fn test_advance_runs_update_hooks() {
        let mut app = app();
        let floor = app.scene.get_object_mut(1).unwrap();
        floor.set_update_hook(|t, dt| t.translate(Vector3::new(0.0, dt, 0.0)));
        let id = floor.transform_id();
        let before = app.scene.graph.world_matrix(id).unwrap();

        assert_eq!(app.advance(8.0).unwrap(), 2);
        let after = app.scene.graph.world_matrix(id).unwrap();
        assert_ne!(after, before);
        // unit speed despite the floor's flattened scale
        let lift = after.translation_part() - before.translation_part();
        assert!(lift.approx_eq(Vector3::new(0.0, 0.02, 0.0), 1e-6));

        let water = app.scene.get_object(0).unwrap().transform_id();
        let water_world = app.scene.graph.world_matrix(water).unwrap();
        assert_eq!(water_world.translation_part(), Vector3::new(0.0, 10.0, 100.0));
    }

    #[test]
    fn test_missing_settings_fail_with_context() {
        let err = WaterRoomApp::new(WaveSettings::new()).unwrap_err();
        assert!(format!("{:#}", err).contains("wave settings"));
    }

    #[test]
    fn test_draw_items_cover_every_mesh() {
        let app = app();
        let items = app.draw_items().unwrap();
        assert_eq!(items.len(), 15);
        assert_eq!(items[0].shader, ShaderKind::Procedural);
        assert!(items[6..].iter().all(|i| i.shader == ShaderKind::Ambient));
    }
}
