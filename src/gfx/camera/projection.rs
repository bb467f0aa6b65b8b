use crate::math::Matrix4;

/// Vertical field of view used by the water room, in radians.
pub const DEFAULT_FOVY: f32 = std::f32::consts::FRAC_PI_3;
pub const DEFAULT_ZNEAR: f32 = 0.1;
pub const DEFAULT_ZFAR: f32 = 10000.0;

/// Aspect changes smaller than this keep the current matrix.
pub const ASPECT_EPSILON: f32 = 0.001;

/// Remaps OpenGL clip depth (`-1..1`) to the `0..1` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4 = Matrix4::from_array([
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Perspective projection state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    aspect: f32,
    matrix: Matrix4,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_params(
            DEFAULT_FOVY,
            aspect_of(width, height).unwrap_or(1.0),
            DEFAULT_ZNEAR,
            DEFAULT_ZFAR,
        )
    }

    pub fn with_params(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            fovy,
            znear,
            zfar,
            aspect,
            matrix: Matrix4::perspective(fovy, aspect, znear, zfar),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// OpenGL-convention perspective matrix.
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// The perspective matrix with depth remapped for wgpu.
    pub fn wgpu_matrix(&self) -> Matrix4 {
        OPENGL_TO_WGPU_MATRIX * self.matrix
    }

    /// Rebuilds the matrix if `aspect` differs from the current one by at
    /// least [`ASPECT_EPSILON`]. Returns whether it did.
    pub fn set_aspect(&mut self, aspect: f32) -> bool {
        if (aspect - self.aspect).abs() < ASPECT_EPSILON {
            return false;
        }
        self.aspect = aspect;
        self.matrix = Matrix4::perspective(self.fovy, aspect, self.znear, self.zfar);
        true
    }

    /// Window resize. A minimized window (zero width or height) is ignored.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        match aspect_of(width, height) {
            Some(aspect) => self.set_aspect(aspect),
            None => false,
        }
    }
}

fn aspect_of(width: u32, height: u32) -> Option<f32> {
    if width == 0 || height == 0 {
        None
    } else {
        Some(width as f32 / height as f32)
    }
}
