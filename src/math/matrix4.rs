//! # 4x4 Matrices
//!
//! Column-major 4x4 matrices for affine transforms and perspective projection.
//! Element `m[col * 4 + row]` holds column `col`, row `row`, which is the layout
//! shaders expect, so [`Matrix4::as_array`] can be uploaded as-is.
//!
//! Affine matrices built from [`Matrix4::translation`], [`Matrix4::scaling`] and
//! the rotation constructors keep a bottom row of `(0, 0, 0, 1)`.
//!
//! The helpers that take an existing matrix (`translate`, `scale`,
//! `rotate_x/y/z`) compose by left-multiplication: `rotate_x(m, a)` is
//! `rotation_x(a) * m`, so the new operation is applied after `m`.
//! [`Matrix4::rotate`] is the exception and right-multiplies, see its docs.

use std::ops::{Index, Mul};

use super::vector3::Vector3;

/// Axes shorter than this cannot be normalized and make [`Matrix4::rotate`] fail.
pub const AXIS_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// Builds a matrix from 16 column-major values.
    pub const fn from_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Self::from_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self::from_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            tx,  ty,  tz,  1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_array([
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Right-handed rotation about +X.
    #[rustfmt::skip]
    pub fn rotation_x(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_array([
            1.0, 0.0,  0.0, 0.0,
            0.0, cos,  sin, 0.0,
            0.0, -sin, cos, 0.0,
            0.0, 0.0,  0.0, 1.0,
        ])
    }

    /// Right-handed rotation about +Y.
    #[rustfmt::skip]
    pub fn rotation_y(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_array([
            cos, 0.0, -sin, 0.0,
            0.0, 1.0, 0.0,  0.0,
            sin, 0.0, cos,  0.0,
            0.0, 0.0, 0.0,  1.0,
        ])
    }

    /// Right-handed rotation about +Z.
    #[rustfmt::skip]
    pub fn rotation_z(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_array([
            cos,  sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        ])
    }

    /// Builds a matrix whose upper 3x3 block has the given vectors as its rows
    /// and whose translation column is `position`.
    ///
    /// With an orthonormal basis this is the inverse rotation of the column
    /// basis, which makes it a look-at style view matrix builder.
    #[rustfmt::skip]
    pub fn compose(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3, position: Vector3) -> Self {
        Self::from_array([
            x_axis.x,   y_axis.x,   z_axis.x,   0.0,
            x_axis.y,   y_axis.y,   z_axis.y,   0.0,
            x_axis.z,   y_axis.z,   z_axis.z,   0.0,
            position.x, position.y, position.z, 1.0,
        ])
    }

    /// Right-handed perspective projection mapping view-space depth into
    /// OpenGL clip space (`-1..1`), with `-z` copied into clip `w`.
    #[rustfmt::skip]
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let nf = 1.0 / (near - far);
        Self::from_array([
            f / aspect, 0.0, 0.0,                    0.0,
            0.0,        f,   0.0,                    0.0,
            0.0,        0.0, (far + near) * nf,      -1.0,
            0.0,        0.0, 2.0 * far * near * nf,  0.0,
        ])
    }

    /// Standard product `a * b`: transforming by the result applies `b` first,
    /// then `a`.
    pub fn multiply(a: &Matrix4, b: &Matrix4) -> Matrix4 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a.m[row] * b.m[col * 4]
                    + a.m[row + 4] * b.m[col * 4 + 1]
                    + a.m[row + 8] * b.m[col * 4 + 2]
                    + a.m[row + 12] * b.m[col * 4 + 3];
            }
        }
        Matrix4::from_array(out)
    }

    /// `m * v` for a homogeneous column vector.
    pub fn multiply_vector(m: &Matrix4, v: [f32; 4]) -> [f32; 4] {
        let m = &m.m;
        [
            m[0] * v[0] + m[4] * v[1] + m[8] * v[2] + m[12] * v[3],
            m[1] * v[0] + m[5] * v[1] + m[9] * v[2] + m[13] * v[3],
            m[2] * v[0] + m[6] * v[1] + m[10] * v[2] + m[14] * v[3],
            m[3] * v[0] + m[7] * v[1] + m[11] * v[2] + m[15] * v[3],
        ]
    }

    /// Transforms a point (`w = 1`) and drops the homogeneous coordinate.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let [x, y, z, _] = Self::multiply_vector(self, [p.x, p.y, p.z, 1.0]);
        Vector3::new(x, y, z)
    }

    pub fn translate(matrix: &Matrix4, tx: f32, ty: f32, tz: f32) -> Matrix4 {
        Self::multiply(&Self::translation(tx, ty, tz), matrix)
    }

    pub fn scale(matrix: &Matrix4, sx: f32, sy: f32, sz: f32) -> Matrix4 {
        Self::multiply(&Self::scaling(sx, sy, sz), matrix)
    }

    pub fn rotate_x(matrix: &Matrix4, radians: f32) -> Matrix4 {
        Self::multiply(&Self::rotation_x(radians), matrix)
    }

    pub fn rotate_y(matrix: &Matrix4, radians: f32) -> Matrix4 {
        Self::multiply(&Self::rotation_y(radians), matrix)
    }

    pub fn rotate_z(matrix: &Matrix4, radians: f32) -> Matrix4 {
        Self::multiply(&Self::rotation_z(radians), matrix)
    }

    /// Rotates `input` by `radians` around an arbitrary `axis` (Rodrigues'
    /// formula), returning `input * R`.
    ///
    /// Only the upper three columns are rotated; the translation column of
    /// `input` is carried over untouched. Returns `None` when `axis` is shorter
    /// than [`AXIS_EPSILON`], in which case callers keep `input` unchanged.
    pub fn rotate(input: &Matrix4, radians: f32, axis: Vector3) -> Option<Matrix4> {
        let len = axis.magnitude();
        if len.abs() < AXIS_EPSILON {
            return None;
        }
        let (x, y, z) = (axis.x / len, axis.y / len, axis.z / len);

        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;

        // Columns of the rotation matrix
        let b00 = x * x * t + c;
        let b01 = y * x * t + z * s;
        let b02 = z * x * t - y * s;
        let b10 = x * y * t - z * s;
        let b11 = y * y * t + c;
        let b12 = z * y * t + x * s;
        let b20 = x * z * t + y * s;
        let b21 = y * z * t - x * s;
        let b22 = z * z * t + c;

        let a = &input.m;
        let mut out = input.m;
        for row in 0..4 {
            let (a0, a1, a2) = (a[row], a[row + 4], a[row + 8]);
            out[row] = a0 * b00 + a1 * b01 + a2 * b02;
            out[row + 4] = a0 * b10 + a1 * b11 + a2 * b12;
            out[row + 8] = a0 * b20 + a1 * b21 + a2 * b22;
        }
        Some(Matrix4::from_array(out))
    }

    /// General 4x4 inverse by 2x2 sub-determinant cofactor expansion.
    ///
    /// Returns `None` for singular input. A NaN determinant is treated the same
    /// as zero.
    pub fn invert(a: &Matrix4) -> Option<Matrix4> {
        let a = &a.m;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        if det == 0.0 || det.is_nan() {
            return None;
        }
        let inv_det = 1.0 / det;

        Some(Matrix4::from_array([
            (a11 * b11 - a12 * b10 + a13 * b09) * inv_det,
            (a02 * b10 - a01 * b11 - a03 * b09) * inv_det,
            (a31 * b05 - a32 * b04 + a33 * b03) * inv_det,
            (a22 * b04 - a21 * b05 - a23 * b03) * inv_det,
            (a12 * b08 - a10 * b11 - a13 * b07) * inv_det,
            (a00 * b11 - a02 * b08 + a03 * b07) * inv_det,
            (a32 * b02 - a30 * b05 - a33 * b01) * inv_det,
            (a20 * b05 - a22 * b02 + a23 * b01) * inv_det,
            (a10 * b10 - a11 * b08 + a13 * b06) * inv_det,
            (a01 * b08 - a00 * b10 - a03 * b06) * inv_det,
            (a30 * b04 - a31 * b02 + a33 * b00) * inv_det,
            (a21 * b02 - a20 * b04 - a23 * b00) * inv_det,
            (a11 * b07 - a10 * b09 - a12 * b06) * inv_det,
            (a00 * b09 - a01 * b07 + a02 * b06) * inv_det,
            (a31 * b01 - a30 * b03 - a32 * b00) * inv_det,
            (a20 * b03 - a21 * b01 + a22 * b00) * inv_det,
        ]))
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    pub fn column(&self, col: usize) -> [f32; 4] {
        let i = col * 4;
        [self.m[i], self.m[i + 1], self.m[i + 2], self.m[i + 3]]
    }

    /// First three entries of a row of the upper 3x3 block.
    pub fn row3(&self, row: usize) -> Vector3 {
        Vector3::new(self.m[row], self.m[row + 4], self.m[row + 8])
    }

    /// The translation column.
    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(self.m[12], self.m[13], self.m[14])
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Column-major nested array, the layout used by uniform structs.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        [self.column(0), self.column(1), self.column(2), self.column(3)]
    }

    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        Matrix4::multiply(&self, &rhs)
    }
}

impl From<cgmath::Matrix4<f32>> for Matrix4 {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        // cgmath is column-major as well
        let cols: [[f32; 4]; 4] = m.into();
        let mut values = [0.0; 16];
        for (col, column) in cols.iter().enumerate() {
            values[col * 4..col * 4 + 4].copy_from_slice(column);
        }
        Matrix4::from_array(values)
    }
}

impl From<Matrix4> for cgmath::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        cgmath::Matrix4::from(m.to_cols_array_2d())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

    const EPS: f32 = 1e-5;

    fn sample_affine() -> Matrix4 {
        let r = Matrix4::rotate_y(&Matrix4::rotate_x(&Matrix4::rotation_z(0.3), 1.1), -0.7);
        Matrix4::translation(4.0, -2.0, 9.0) * r * Matrix4::scaling(2.0, 0.5, 3.0)
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample_affine();
        assert_eq!(Matrix4::identity() * m, m);
        assert_eq!(m * Matrix4::identity(), m);
    }

    #[test]
    fn test_translation_moves_points() {
        let m = Matrix4::translation(1.0, 2.0, 3.0);
        let p = m.transform_point(Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(m.translation_part(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_axis_rotations_are_right_handed() {
        let x = Matrix4::rotation_x(FRAC_PI_2).transform_point(Vector3::UP);
        assert!(x.approx_eq(Vector3::FORWARD, EPS));

        let y = Matrix4::rotation_y(FRAC_PI_2).transform_point(Vector3::FORWARD);
        assert!(y.approx_eq(Vector3::RIGHT, EPS));

        let z = Matrix4::rotation_z(FRAC_PI_2).transform_point(Vector3::RIGHT);
        assert!(z.approx_eq(Vector3::UP, EPS));
    }

    #[test]
    fn test_rotate_helpers_left_multiply() {
        let base = Matrix4::translation(1.0, 0.0, 0.0);
        let rotated = Matrix4::rotate_z(&base, FRAC_PI_2);
        // Translation happens first, then the rotation swings it onto +Y
        let p = rotated.transform_point(Vector3::ZERO);
        assert!(p.approx_eq(Vector3::UP, EPS));
        assert_eq!(rotated, Matrix4::rotation_z(FRAC_PI_2) * base);
    }

    #[test]
    fn test_multiply_matches_cgmath() {
        let a = sample_affine();
        let b = Matrix4::perspective(FRAC_PI_3, 1.5, 0.1, 100.0);
        let ours = a * b;
        let theirs = cgmath::Matrix4::from(a) * cgmath::Matrix4::from(b);
        assert!(ours.approx_eq(&Matrix4::from(theirs), EPS));
    }

    #[test]
    fn test_invert_matches_cgmath() {
        let m = sample_affine();
        let ours = Matrix4::invert(&m).unwrap();
        let theirs = cgmath::Matrix4::from(m).invert().unwrap();
        assert!(ours.approx_eq(&Matrix4::from(theirs), 1e-4));
        assert!((m * ours).approx_eq(&Matrix4::identity(), 1e-4));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = sample_affine();
        let back = Matrix4::invert(&Matrix4::invert(&m).unwrap()).unwrap();
        assert!(back.approx_eq(&m, 1e-4));
    }

    #[test]
    fn test_invert_singular_is_none() {
        assert!(Matrix4::invert(&Matrix4::scaling(1.0, 0.0, 1.0)).is_none());
        assert!(Matrix4::invert(&Matrix4::from_array([0.0; 16])).is_none());
    }

    #[test]
    fn test_rotate_zero_axis_is_none() {
        let m = sample_affine();
        assert!(Matrix4::rotate(&m, 1.0, Vector3::ZERO).is_none());
        assert!(Matrix4::rotate(&m, 1.0, Vector3::new(0.0005, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_rotate_matches_axis_rotations() {
        let around_x = Matrix4::rotate(&Matrix4::identity(), 0.8, Vector3::RIGHT).unwrap();
        assert!(around_x.approx_eq(&Matrix4::rotation_x(0.8), EPS));

        // Axis length does not matter
        let around_y = Matrix4::rotate(&Matrix4::identity(), -1.3, Vector3::new(0.0, 5.0, 0.0))
            .unwrap();
        assert!(around_y.approx_eq(&Matrix4::rotation_y(-1.3), EPS));
    }

    #[test]
    fn test_rotate_right_multiplies_and_keeps_translation() {
        let base = Matrix4::translation(3.0, 4.0, 5.0) * Matrix4::scaling(2.0, 2.0, 2.0);
        let rotated = Matrix4::rotate(&base, PI / 5.0, Vector3::new(1.0, 1.0, 0.0)).unwrap();
        let axis_only =
            Matrix4::rotate(&Matrix4::identity(), PI / 5.0, Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(rotated.approx_eq(&(base * axis_only), EPS));
        assert_eq!(rotated.translation_part(), base.translation_part());
    }

    #[test]
    fn test_perspective_layout() {
        let p = Matrix4::perspective(FRAC_PI_2, 2.0, 1.0, 3.0);
        assert!((p.get(0, 0) - 0.5).abs() < EPS);
        assert!((p.get(1, 1) - 1.0).abs() < EPS);
        assert_eq!(p.get(3, 2), -1.0);
        assert_eq!(p.get(3, 3), 0.0);
        assert!((p.get(2, 2) + 2.0).abs() < EPS);
        assert!((p.get(2, 3) + 3.0).abs() < EPS);

        let theirs = cgmath::perspective(cgmath::Rad(FRAC_PI_2), 2.0, 1.0, 3.0);
        assert!(p.approx_eq(&Matrix4::from(theirs), EPS));
    }

    #[test]
    fn test_compose_puts_axes_in_rows() {
        let m = Matrix4::compose(Vector3::RIGHT, Vector3::UP, Vector3::FORWARD, Vector3::ONE);
        assert_eq!(m, Matrix4::translation(1.0, 1.0, 1.0));

        let x = Vector3::new(1.0, 2.0, 3.0);
        let m = Matrix4::compose(x, Vector3::ZERO, Vector3::ZERO, Vector3::ZERO);
        assert_eq!(m.row3(0), x);
    }
}
