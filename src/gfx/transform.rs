//! # Transform
//!
//! A single node's pose: position, Euler rotation in degrees, scale and one
//! auxiliary axis-angle rotation. The pose is composed into a local matrix and,
//! combined with the parent's world matrix, into a world matrix.
//!
//! The parent relationship itself lives in [`SceneGraph`], which owns every
//! node and pushes the parent's world matrix down into each child. A
//! `Transform` only remembers the last parent world matrix it was given, which
//! is enough to keep `world = parent.world * local` true after any setter.
//!
//! [`SceneGraph`]: crate::gfx::scene::graph::SceneGraph

use crate::math::{Matrix4, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vector3,
    /// Euler angles in degrees, applied Z first, then X, then Y.
    rotation: Vector3,
    scaling: Vector3,
    custom_axis: Vector3,
    /// Radians.
    custom_angle: f32,
    local_matrix: Matrix4,
    matrix: Matrix4,
    parent_world: Option<Matrix4>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity pose with no parent.
    pub fn new() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            scaling: Vector3::ONE,
            custom_axis: Vector3::RIGHT,
            custom_angle: 0.0,
            local_matrix: Matrix4::identity(),
            matrix: Matrix4::identity(),
            parent_world: None,
        }
    }

    /// Creates a root transform with the given pose.
    pub fn from_pose(position: Vector3, rotation: Vector3, scaling: Vector3) -> Self {
        let mut transform = Self::new();
        transform.position = position;
        transform.rotation = rotation;
        transform.scaling = scaling;
        transform.compose_matrix();
        transform
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Euler angles in degrees.
    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    pub fn scaling(&self) -> Vector3 {
        self.scaling
    }

    /// The auxiliary rotation as `(axis, radians)`.
    pub fn axis_rotation(&self) -> (Vector3, f32) {
        (self.custom_axis, self.custom_angle)
    }

    pub fn local_matrix(&self) -> &Matrix4 {
        &self.local_matrix
    }

    /// The world matrix, or its inverse right after a successful [`Transform::invert`].
    pub fn world_matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    pub fn has_parent(&self) -> bool {
        self.parent_world.is_some()
    }

    /// World-space position, the translation column of the world matrix.
    pub fn world_position(&self) -> Vector3 {
        self.matrix.translation_part()
    }

    /// First row of the world matrix's rotation block.
    pub fn x_axis(&self) -> Vector3 {
        self.matrix.row3(0)
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.compose_matrix();
    }

    /// Sets the Euler angles in degrees.
    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.rotation = rotation;
        self.compose_matrix();
    }

    pub fn set_scale(&mut self, scaling: Vector3) {
        self.scaling = scaling;
        self.compose_matrix();
    }

    /// Sets the auxiliary rotation, applied after the Euler rotation.
    ///
    /// An axis too short to normalize leaves the rotation out of the
    /// composition entirely.
    pub fn set_axis_rotation(&mut self, axis: Vector3, angle_degrees: f32) {
        self.custom_axis = axis;
        self.custom_angle = angle_degrees.to_radians();
        self.compose_matrix();
    }

    /// Moves along the current local basis.
    ///
    /// The basis vectors are the columns of the local rotation-scale block,
    /// each divided by its scale component, so scaled nodes still move at unit
    /// speed.
    pub fn translate(&mut self, offset: Vector3) {
        let axis = |col: usize, scale: f32| {
            let [x, y, z, _] = self.local_matrix.column(col);
            unscale(Vector3::new(x, y, z), scale)
        };
        let x_axis = axis(0, self.scaling.x);
        let y_axis = axis(1, self.scaling.y);
        let z_axis = axis(2, self.scaling.z);

        self.position += x_axis * offset.x + y_axis * offset.y + z_axis * offset.z;
        self.compose_matrix();
    }

    /// Adds `delta` degrees to the Euler angles.
    pub fn rotate(&mut self, delta: Vector3) {
        self.rotation += delta;
        self.compose_matrix();
    }

    /// Replaces the world matrix with its inverse.
    ///
    /// Returns `false` and leaves the matrix untouched when it is singular. The
    /// next pose change recomposes the regular world matrix.
    pub fn invert(&mut self) -> bool {
        match Matrix4::invert(&self.matrix) {
            Some(inverse) => {
                self.matrix = inverse;
                true
            }
            None => {
                log::warn!("transform matrix is singular, keeping it as is");
                false
            }
        }
    }

    /// Recomputes the local matrix from the pose and the world matrix from the
    /// local matrix and the cached parent world matrix.
    pub fn compose_matrix(&mut self) {
        let scale = Matrix4::scaling(self.scaling.x, self.scaling.y, self.scaling.z);

        let radians = self.rotation.to_radians();
        let euler = Matrix4::rotate_y(
            &Matrix4::rotate_x(&Matrix4::rotation_z(radians.z), radians.x),
            radians.y,
        );
        let custom = Matrix4::rotate(&Matrix4::identity(), self.custom_angle, self.custom_axis);
        let rotation = match custom {
            Some(custom) => custom * euler,
            None => euler,
        };

        let translation = Matrix4::translation(self.position.x, self.position.y, self.position.z);
        self.local_matrix = translation * (rotation * scale);
        self.matrix = match &self.parent_world {
            Some(parent) => *parent * self.local_matrix,
            None => self.local_matrix,
        };
    }

    /// Sets or clears the cached parent world matrix and recomposes.
    pub(crate) fn set_parent_world(&mut self, parent_world: Option<Matrix4>) {
        self.parent_world = parent_world;
        self.compose_matrix();
    }
}

fn unscale(axis: Vector3, scale: f32) -> Vector3 {
    if scale == 0.0 {
        axis
    } else {
        axis / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_new_is_identity() {
        let t = Transform::new();
        assert_eq!(*t.local_matrix(), Matrix4::identity());
        assert_eq!(*t.world_matrix(), Matrix4::identity());
        assert!(!t.has_parent());
    }

    #[test]
    fn test_local_is_translation_rotation_scale() {
        let mut t = Transform::new();
        t.set_scale(Vector3::new(2.0, 3.0, 4.0));
        t.set_rotation(Vector3::new(30.0, 45.0, 60.0));
        t.set_position(Vector3::new(1.0, -1.0, 5.0));

        let r = Matrix4::rotate_y(
            &Matrix4::rotate_x(&Matrix4::rotation_z(60f32.to_radians()), 30f32.to_radians()),
            45f32.to_radians(),
        );
        let expected = Matrix4::translation(1.0, -1.0, 5.0) * r * Matrix4::scaling(2.0, 3.0, 4.0);
        assert!(t.local_matrix().approx_eq(&expected, EPS));
        assert_eq!(t.world_matrix(), t.local_matrix());
    }

    #[test]
    fn test_euler_order_is_z_then_x_then_y() {
        let mut t = Transform::new();
        t.set_rotation(Vector3::new(90.0, 90.0, 0.0));
        // X takes +Y to +Z, then Y takes +Z to +X
        let p = t.world_matrix().transform_point(Vector3::UP);
        assert!(p.approx_eq(Vector3::RIGHT, EPS));
    }

    #[test]
    fn test_axis_rotation_applies_after_euler() {
        let mut t = Transform::new();
        t.set_rotation(Vector3::new(0.0, 0.0, 90.0));
        t.set_axis_rotation(Vector3::new(0.0, 10.0, 0.0), 90.0);
        // Z takes +X to +Y, the custom Y rotation leaves +Y alone
        let p = t.world_matrix().transform_point(Vector3::RIGHT);
        assert!(p.approx_eq(Vector3::UP, EPS));

        let (axis, angle) = t.axis_rotation();
        assert_eq!(axis, Vector3::new(0.0, 10.0, 0.0));
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_degenerate_axis_rotation_is_skipped() {
        let mut t = Transform::new();
        t.set_rotation(Vector3::new(10.0, 20.0, 30.0));
        let before = *t.world_matrix();
        t.set_axis_rotation(Vector3::ZERO, 45.0);
        assert_eq!(*t.world_matrix(), before);
    }

    #[test]
    fn test_translate_moves_along_local_basis() {
        let mut t = Transform::new();
        t.set_scale(Vector3::new(4.0, 4.0, 4.0));
        t.translate(Vector3::new(1.0, 2.0, 3.0));
        // Unrotated basis is the world basis regardless of scale
        assert!(t.position().approx_eq(Vector3::new(1.0, 2.0, 3.0), EPS));

        let mut t = Transform::new();
        t.set_rotation(Vector3::new(0.0, 0.0, 90.0));
        t.translate(Vector3::new(1.0, 0.0, 0.0));
        // Local +X of a +90 Z rotation points along world +Y
        assert!(t.position().approx_eq(Vector3::UP, EPS));

        let mut t = Transform::new();
        t.set_rotation(Vector3::new(0.0, 30.0, 0.0));
        t.translate(Vector3::new(0.0, 0.0, 1.0));
        assert!(t.position().approx_eq(Vector3::new(0.5, 0.0, 0.866_025_4), EPS));
    }

    #[test]
    fn test_translate_on_scaled_rotated_node() {
        let mut t = Transform::new();
        t.set_scale(Vector3::new(2.0, 5.0, 0.5));
        t.set_rotation(Vector3::new(0.0, 0.0, 90.0));
        t.translate(Vector3::new(1.0, 1.0, 2.0));
        // +X goes to +Y, +Y goes to -X, +Z stays; all at unit speed
        assert!(t.position().approx_eq(Vector3::new(-1.0, 1.0, 2.0), EPS));
    }

    #[test]
    fn test_rotate_accumulates_degrees() {
        let mut t = Transform::new();
        t.rotate(Vector3::new(10.0, 0.0, 5.0));
        t.rotate(Vector3::new(5.0, -20.0, 5.0));
        assert_eq!(t.rotation(), Vector3::new(15.0, -20.0, 10.0));
    }

    #[test]
    fn test_invert_in_place() {
        let mut t = Transform::from_pose(
            Vector3::new(3.0, 2.0, 1.0),
            Vector3::new(20.0, 40.0, 0.0),
            Vector3::ONE,
        );
        let world = *t.world_matrix();
        assert!(t.invert());
        assert!((world * *t.world_matrix()).approx_eq(&Matrix4::identity(), 1e-4));
        // Recomposing restores the regular world matrix
        t.compose_matrix();
        assert_eq!(*t.world_matrix(), world);
    }

    #[test]
    fn test_invert_singular_keeps_matrix() {
        let mut t = Transform::new();
        t.set_scale(Vector3::new(1.0, 0.0, 1.0));
        let before = *t.world_matrix();
        assert!(!t.invert());
        assert_eq!(*t.world_matrix(), before);
    }

    #[test]
    fn test_parent_world_is_prepended() {
        let mut t = Transform::new();
        t.set_position(Vector3::new(0.0, 1.0, 0.0));
        let parent = Matrix4::translation(10.0, 0.0, 0.0);
        t.set_parent_world(Some(parent));
        assert_eq!(*t.world_matrix(), parent * *t.local_matrix());
        assert_eq!(t.world_position(), Vector3::new(10.0, 1.0, 0.0));

        t.set_parent_world(None);
        assert_eq!(t.world_matrix(), t.local_matrix());
    }

    #[test]
    fn test_x_axis_reads_first_row() {
        let mut t = Transform::new();
        t.set_rotation(Vector3::new(0.0, 90.0, 0.0));
        assert!(t.x_axis().approx_eq(Vector3::new(0.0, 0.0, 1.0), EPS));
    }
}
