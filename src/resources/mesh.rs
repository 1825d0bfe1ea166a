use std::sync::{Arc, OnceLock};

use glam::{Mat4, Vec4};

use crate::math::Sphere;
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// Geometry drawn with one material.
///
/// Either side may be missing while its asset is still loading; such a mesh
/// simply fails render validation until both arrive.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub geometry: Option<Arc<Geometry>>,
    pub material: Option<Arc<Material>>,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self {
            geometry: Some(geometry),
            material: Some(material),
        }
    }

    #[must_use]
    pub fn with_geometry(geometry: Arc<Geometry>) -> Self {
        Self {
            geometry: Some(geometry),
            material: None,
        }
    }

    /// Local-space bounding sphere of the geometry.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<Sphere> {
        self.geometry.as_ref()?.bounding_sphere()
    }
}

/// One geometry/material pair drawn `count` times, each instance with its
/// own transform (relative to the node) and color.
#[derive(Debug, Clone)]
pub struct InstancedMesh {
    geometry: Option<Arc<Geometry>>,
    material: Option<Arc<Material>>,
    transforms: Vec<Mat4>,
    colors: Vec<Vec4>,
    bounding_sphere: OnceLock<Option<Sphere>>,
}

impl InstancedMesh {
    /// All instances start at the identity transform with a white color.
    #[must_use]
    pub fn new(
        geometry: Option<Arc<Geometry>>,
        material: Option<Arc<Material>>,
        count: usize,
    ) -> Self {
        Self {
            geometry,
            material,
            transforms: vec![Mat4::IDENTITY; count],
            colors: vec![Vec4::ONE; count],
            bounding_sphere: OnceLock::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.geometry.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    pub fn set_geometry(&mut self, geometry: Arc<Geometry>) {
        self.geometry = Some(geometry);
        self.bounding_sphere = OnceLock::new();
    }

    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = Some(material);
    }

    #[must_use]
    pub fn transform_at(&self, index: usize) -> Option<Mat4> {
        self.transforms.get(index).copied()
    }

    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<Vec4> {
        self.colors.get(index).copied()
    }

    #[inline]
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    #[inline]
    #[must_use]
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn set_transform_at(&mut self, index: usize, transform: Mat4) {
        assert!(index < self.count(), "instance index {index} out of range");
        self.transforms[index] = transform;
        self.bounding_sphere = OnceLock::new();
    }

    /// # Panics
    ///
    /// Panics if `index >= count()`.
    pub fn set_color_at(&mut self, index: usize, color: Vec4) {
        assert!(index < self.count(), "instance index {index} out of range");
        self.colors[index] = color;
    }

    /// Union of the geometry's sphere placed at every instance transform.
    pub fn bounding_sphere(&self) -> Option<Sphere> {
        *self.bounding_sphere.get_or_init(|| {
            let base = self.geometry.as_ref()?.bounding_sphere()?;
            let mut bounds = Sphere::EMPTY;
            for transform in &self.transforms {
                bounds.union(&base.transformed(transform));
            }
            (!bounds.is_empty()).then_some(bounds)
        })
    }
}
