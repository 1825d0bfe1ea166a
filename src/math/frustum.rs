use glam::{Mat4, Vec3};

use crate::math::{Box3, Plane, Sphere};

/// The six-plane convex volume visible through a camera.
///
/// Planes point inward and are stored normalized in the order left, right,
/// bottom, top, near, far. All tests are boundary inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const BOTTOM: usize = 2;
    pub const TOP: usize = 3;
    pub const NEAR: usize = 4;
    pub const FAR: usize = 5;

    /// Extracts the planes from a combined `projection * view` matrix.
    ///
    /// Gribb-Hartmann: plane = row3 ± row_i. The matrix must map into
    /// OpenGL clip space (`-w <= z <= w`), which is what
    /// [`Camera`](crate::scene::Camera) produces.
    #[must_use]
    pub fn new(view_projection: Mat4) -> Self {
        let mut frustum = Self::default();
        frustum.set_from_view_projection(view_projection);
        frustum
    }

    pub fn set_from_view_projection(&mut self, m: Mat4) {
        let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));

        self.planes = [
            Plane::from_coefficients(r3 + r0),
            Plane::from_coefficients(r3 - r0),
            Plane::from_coefficients(r3 + r1),
            Plane::from_coefficients(r3 - r1),
            Plane::from_coefficients(r3 + r2),
            Plane::from_coefficients(r3 - r2),
        ];

        for plane in &mut self.planes {
            plane.normalize();
        }
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Conservative AABB test using each plane's positive vertex, the box
    /// corner furthest along the plane normal.
    #[must_use]
    pub fn intersects_box3(&self, b: &Box3) -> bool {
        if b.is_empty() {
            return false;
        }
        self.planes.iter().all(|plane| {
            let positive = Vec3::select(plane.normal.cmpgt(Vec3::ZERO), b.max, b.min);
            plane.distance_to_point(positive) >= 0.0
        })
    }

    #[must_use]
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        if sphere.is_empty() {
            return false;
        }
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(sphere.center) >= -sphere.radius)
    }
}
