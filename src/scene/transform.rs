use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Intrinsic rotation angles in radians.
///
/// Composed YXZ: yaw about Y is applied outermost, then pitch about X, then
/// roll about Z. This order is part of the contract; reordering changes
/// every orientation produced by the graph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Euler {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    #[must_use]
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self { pitch, yaw, roll }
    }

    #[must_use]
    pub fn to_mat3(self) -> Mat3 {
        Mat3::from_quat(self.to_quat())
    }
}

/// Principal axis selector for [`Transform::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Pitch.
    X,
    /// Yaw.
    Y,
    /// Roll.
    Z,
}

/// Local position, scale and rotation of a node, compiled lazily into a
/// matrix.
///
/// The cached matrix is valid exactly while the dirty flag is clear. Every
/// mutator sets the flag; [`get`](Self::get) recomputes on the first access
/// after a mutation and bumps [`version`](Self::version).
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    scale: Vec3,
    rotation: Euler,

    matrix: Mat4,
    dirty: bool,
    version: u64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Euler::ZERO,
            matrix: Mat4::IDENTITY,
            dirty: true,
            version: 0,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::new();
        t.position = position;
        t
    }

    // ========================================================================
    // Relative mutators
    // ========================================================================

    /// Moves along `delta` expressed in the transform's own rotated frame.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += if self.rotation.is_zero() {
            delta
        } else {
            self.rotation.to_quat() * delta
        };
        self.dirty = true;
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.translate(Vec3::new(distance, 0.0, 0.0));
    }

    pub fn translate_y(&mut self, distance: f32) {
        self.translate(Vec3::new(0.0, distance, 0.0));
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.translate(Vec3::new(0.0, 0.0, distance));
    }

    /// Multiplies the current scale component-wise.
    pub fn scale_by(&mut self, factor: Vec3) {
        self.scale *= factor;
        self.dirty = true;
    }

    /// Adds `angle` to the Euler component matching `axis`.
    pub fn rotate(&mut self, axis: Axis, angle: f32) {
        match axis {
            Axis::X => self.rotation.pitch += angle,
            Axis::Y => self.rotation.yaw += angle,
            Axis::Z => self.rotation.roll += angle,
        }
        self.dirty = true;
    }

    /// Applies an arbitrary local axis-angle rotation on top of the current
    /// orientation.
    pub fn rotate_around(&mut self, axis: Vec3, angle: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let rotation = self.rotation.to_quat() * Quat::from_axis_angle(axis, angle);
        self.rotation = Euler::from_quat(rotation.normalize());
        self.dirty = true;
    }

    /// Orients the transform so that its +Z axis points from `eye` toward
    /// `target`.
    ///
    /// Coincident points leave the rotation unchanged. When the direction is
    /// parallel to `up` the direction is nudged so a basis still exists.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.face_direction(target - eye, up);
    }

    pub(crate) fn face_direction(&mut self, direction: Vec3, up: Vec3) {
        let Some(mut forward) = direction.try_normalize() else {
            return;
        };

        let mut right = up.cross(forward);
        if right.length_squared() < 1e-8 {
            if up.z.abs() >= 1.0 - f32::EPSILON {
                forward.x += 1e-4;
            } else {
                forward.z += 1e-4;
            }
            forward = forward.normalize();
            right = up.cross(forward);
        }
        let Some(right) = right.try_normalize() else {
            return;
        };
        let new_up = forward.cross(right);

        let basis = Mat3::from_cols(right, new_up, forward);
        self.rotation = Euler::from_quat(Quat::from_mat3(&basis).normalize());
        self.dirty = true;
    }

    // ========================================================================
    // Absolute setters
    // ========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    pub fn set_rotation(&mut self, rotation: Euler) {
        self.rotation = rotation;
        self.dirty = true;
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times the matrix has been recomputed.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Forces the next [`get`](Self::get) to recompute.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns `T * Ry(yaw) * Rx(pitch) * Rz(roll) * S`, recomputing only
    /// if a mutation happened since the last call.
    pub fn get(&mut self) -> Mat4 {
        if self.dirty {
            self.matrix = Mat4::from_scale_rotation_translation(
                self.scale,
                self.rotation.to_quat(),
                self.position,
            );
            self.dirty = false;
            self.version += 1;
        }
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn yaw_is_applied_outside_pitch() {
        let mut t = Transform::new();
        t.set_rotation(Euler::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        let m = t.get();

        let expected = Mat4::from_rotation_y(FRAC_PI_2) * Mat4::from_rotation_x(FRAC_PI_2);
        assert!(m.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn translate_follows_rotation() {
        let mut t = Transform::new();
        t.rotate(Axis::Y, FRAC_PI_2);
        t.translate(Vec3::Z);
        assert!(t.position().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn zero_scale_is_accepted() {
        let mut t = Transform::new();
        t.set_scale(Vec3::ZERO);
        assert_eq!(t.get().x_axis.truncate(), Vec3::ZERO);
    }

    #[test]
    fn rotate_around_principal_axis_matches_rotate() {
        let mut a = Transform::new();
        a.rotate_around(Vec3::Y, 0.7);
        let mut b = Transform::new();
        b.rotate(Axis::Y, 0.7);
        assert!(a.get().abs_diff_eq(b.get(), 1e-5));
    }

    #[test]
    fn look_at_points_positive_z_at_target() {
        let mut t = Transform::new();
        t.look_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        let forward = t.get().z_axis.truncate();
        assert!(forward.abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn look_at_straight_up_does_not_produce_nan() {
        let mut t = Transform::new();
        t.look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(!t.get().is_nan());
    }
}
