use glam::{Mat4, Vec3};

/// A bounding sphere. A negative radius marks an empty sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Sphere {
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        radius: -1.0,
    };

    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    /// Grows the sphere just enough to enclose `point`.
    ///
    /// The center moves toward the point so the result stays tight
    /// (Ritter-style incremental update).
    pub fn expand_with_point(&mut self, point: Vec3) {
        if self.is_empty() {
            self.center = point;
            self.radius = 0.0;
            return;
        }

        let delta = point - self.center;
        let length_sq = delta.length_squared();
        if length_sq > self.radius * self.radius {
            let length = length_sq.sqrt();
            let half_way = (length - self.radius) * 0.5;
            self.center += delta * (half_way / length);
            self.radius += half_way;
        }
    }

    /// Grows the sphere to enclose `other`.
    pub fn union(&mut self, other: &Sphere) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = *other;
            return;
        }

        let delta = other.center - self.center;
        let distance = delta.length();
        if distance + other.radius <= self.radius {
            return;
        }
        if distance + self.radius <= other.radius {
            *self = *other;
            return;
        }

        let radius = (distance + self.radius + other.radius) * 0.5;
        let direction = delta / distance;
        self.center += direction * (radius - self.radius);
        self.radius = radius;
    }

    /// Moves the sphere into the space described by `transform`.
    ///
    /// The radius is scaled by the largest axis scale, so non-uniform
    /// scaling yields a conservative bound.
    pub fn apply_transform(&mut self, transform: &Mat4) {
        if self.is_empty() {
            return;
        }
        self.center = transform.transform_point3(self.center);
        let max_scale_sq = transform
            .x_axis
            .truncate()
            .length_squared()
            .max(transform.y_axis.truncate().length_squared())
            .max(transform.z_axis.truncate().length_squared());
        self.radius *= max_scale_sq.sqrt();
    }

    #[must_use]
    pub fn transformed(mut self, transform: &Mat4) -> Self {
        self.apply_transform(transform);
        self
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.center += translation;
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        !self.is_empty() && self.center.distance_squared(point) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_initializes_sphere() {
        let mut sphere = Sphere::EMPTY;
        sphere.expand_with_point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sphere.center, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sphere.radius, 0.0);
    }

    #[test]
    fn expansion_encloses_both_points() {
        let mut sphere = Sphere::EMPTY;
        sphere.expand_with_point(Vec3::new(-1.0, 0.0, 0.0));
        sphere.expand_with_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((sphere.radius - 1.0).abs() < 1e-6);
        assert!(sphere.center.length() < 1e-6);
    }

    #[test]
    fn transform_scales_radius_by_largest_axis() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0).transformed(
            &Mat4::from_scale_rotation_translation(
                Vec3::new(1.0, 3.0, 2.0),
                glam::Quat::IDENTITY,
                Vec3::new(5.0, 0.0, 0.0),
            ),
        );
        assert!((sphere.radius - 3.0).abs() < 1e-6);
        assert_eq!(sphere.center, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn union_encloses_disjoint_spheres() {
        let mut a = Sphere::new(Vec3::new(-2.0, 0.0, 0.0), 1.0);
        a.union(&Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0));
        assert!((a.radius - 3.0).abs() < 1e-5);
        assert!(a.center.length() < 1e-5);
    }
}
