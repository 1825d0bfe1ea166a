use std::sync::Arc;

use glam::Vec2;

use crate::math::Sphere;
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// Camera-facing quad.
///
/// The quad geometry is shared by every sprite of a scene; see
/// [`Scene::sprite_geometry`](crate::scene::Scene::sprite_geometry).
#[derive(Debug, Clone)]
pub struct Sprite {
    pub geometry: Option<Arc<Geometry>>,
    /// Must be a sprite material for the node to render.
    pub material: Option<Arc<Material>>,
    /// Screen-plane rotation in radians.
    pub rotation: f32,
    /// Pivot inside the quad, `(0.5, 0.5)` being its center.
    pub anchor: Vec2,
}

impl Sprite {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, material: Option<Arc<Material>>) -> Self {
        Self {
            geometry: Some(geometry),
            material,
            rotation: 0.0,
            anchor: Vec2::splat(0.5),
        }
    }

    #[must_use]
    pub fn bounding_sphere(&self) -> Option<Sphere> {
        self.geometry.as_ref()?.bounding_sphere()
    }
}
