use glam::{Vec3, Vec4};

use crate::math::Sphere;

/// An oriented plane `dot(normal, p) + distance = 0`.
///
/// Points on the side the normal faces have a positive signed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            distance: 0.0,
        }
    }
}

impl Plane {
    #[must_use]
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Builds a plane from packed `(a, b, c, d)` coefficients.
    #[inline]
    #[must_use]
    pub fn from_coefficients(v: Vec4) -> Self {
        Self {
            normal: v.truncate(),
            distance: v.w,
        }
    }

    /// Signed distance from `point` to the plane.
    ///
    /// Only a true Euclidean distance once the plane is normalized.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    #[inline]
    #[must_use]
    pub fn distance_to_sphere(&self, sphere: &Sphere) -> f32 {
        self.distance_to_point(sphere.center) - sphere.radius
    }

    /// Scales the normal to unit length and the distance by the same factor.
    ///
    /// A degenerate (zero-length) normal is left untouched.
    pub fn normalize(&mut self) {
        let length_sq = self.normal.length_squared();
        if length_sq <= f32::EPSILON {
            return;
        }
        let inverse_length = length_sq.sqrt().recip();
        self.normal *= inverse_length;
        self.distance *= inverse_length;
    }

    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
