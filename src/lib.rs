// src/lib.rs
//! Wavebox
//!
//! Scene core for a procedural water room: column-major matrix math, a
//! transform hierarchy, a transform-driven camera, procedural geometry and
//! tagged wave settings, packed for upload with wgpu and bytemuck.

pub mod app;
pub mod gfx;
pub mod math;
pub mod prelude;
pub mod settings;

// Re-export main types for convenience
pub use app::WaterRoomApp;

/// Creates the default water room with the built-in wave settings
pub fn default() -> anyhow::Result<WaterRoomApp> {
    WaterRoomApp::new(settings::WaveSettings::with_defaults())
}
