use glam::{Mat4, Vec3};

use crate::math::Frustum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees.
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

/// Camera payload of a camera node.
///
/// The projection is right-handed and maps into OpenGL clip space
/// (`-w..w` depth), which is what [`Frustum::new`] expects. The view
/// transform is the inverse of the node's world transform and is refreshed
/// by the scene whenever the frustum is requested.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Projection,
    pub projection_transform: Mat4,
    pub view_transform: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new(projection: Projection) -> Self {
        let mut camera = Self {
            projection,
            projection_transform: Mat4::IDENTITY,
            view_transform: Mat4::IDENTITY,
        };
        camera.update_projection_transform();
        camera
    }

    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(Projection::Perspective {
            fov,
            aspect,
            near,
            far,
        })
    }

    #[must_use]
    pub fn new_orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self::new(Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
        })
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_projection_transform();
    }

    /// Updates the aspect ratio of a perspective camera, or rescales the
    /// horizontal extent of an orthographic one around its center.
    pub fn set_aspect(&mut self, new_aspect: f32) {
        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = new_aspect,
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                ..
            } => {
                let half_height = (*top - *bottom) * 0.5;
                let center = (*left + *right) * 0.5;
                *left = center - half_height * new_aspect;
                *right = center + half_height * new_aspect;
            }
        }
        self.update_projection_transform();
    }

    pub fn update_projection_transform(&mut self) {
        self.projection_transform = match self.projection {
            Projection::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh_gl(fov.to_radians(), aspect, near, far),
            Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh_gl(left, right, bottom, top, near, far),
        };
    }

    /// Refreshes the view transform from the owning node's world transform.
    pub fn update_view_transform(&mut self, world_transform: &Mat4) {
        self.view_transform = world_transform.inverse();
    }

    #[inline]
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_transform * self.view_transform
    }

    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.view_projection())
    }

    /// World-space forward direction (-Z of the view).
    #[must_use]
    pub fn view_forward(&self) -> Vec3 {
        let world = self.view_transform.inverse();
        (-world.z_axis.truncate()).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_plane_maps_to_minus_one() {
        let camera = Camera::new_perspective(60.0, 1.0, 0.5, 10.0);
        let clip = camera.projection_transform * glam::Vec4::new(0.0, 0.0, -0.5, 1.0);
        assert!((clip.z / clip.w + 1.0).abs() < 1e-5);
    }

    #[test]
    fn view_is_inverse_of_world() {
        let mut camera = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        camera.update_view_transform(&world);
        assert!((world * camera.view_transform).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn orthographic_aspect_keeps_height() {
        let mut camera = Camera::new_orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
        camera.set_aspect(2.0);
        match camera.projection() {
            Projection::Orthographic { left, right, top, .. } => {
                assert_eq!((left, right, top), (-2.0, 2.0, 1.0));
            }
            Projection::Perspective { .. } => unreachable!(),
        }
    }
}
