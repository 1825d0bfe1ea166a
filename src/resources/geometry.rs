use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec3;
use uuid::Uuid;

use crate::math::{Box3, Sphere};

/// Semantic of one interleaved vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Uv,
    Color,
}

impl AttributeKind {
    /// Conventional component count for this semantic.
    #[must_use]
    pub fn default_item_size(self) -> u32 {
        match self {
            AttributeKind::Uv => 2,
            AttributeKind::Position | AttributeKind::Normal | AttributeKind::Color => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryAttribute {
    pub kind: AttributeKind,
    /// Number of `f32` components per vertex.
    pub item_size: u32,
}

impl GeometryAttribute {
    #[must_use]
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            item_size: kind.default_item_size(),
        }
    }

    #[must_use]
    pub fn with_item_size(kind: AttributeKind, item_size: u32) -> Self {
        Self { kind, item_size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveType {
    #[default]
    Triangles,
    Lines,
    LineLoop,
}

/// Interleaved vertex data, optional indices and the attribute layout that
/// describes them.
///
/// Geometry is shared between nodes through `Arc`. Bounding volumes are
/// computed on first request and memoized; every `&mut self` mutation that
/// touches vertex data or layout resets them. Disposal only flips a flag so
/// that nodes still holding the `Arc` stop rendering it.
#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,
    pub primitive: PrimitiveType,

    vertex_data: Vec<f32>,
    index_data: Vec<u32>,
    attributes: Vec<GeometryAttribute>,

    bounding_box: OnceLock<Option<Box3>>,
    bounding_sphere: OnceLock<Option<Sphere>>,

    disposed: AtomicBool,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    #[must_use]
    pub fn with_data(vertex_data: Vec<f32>, index_data: Vec<u32>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            primitive: PrimitiveType::Triangles,
            vertex_data,
            index_data,
            attributes: Vec::new(),
            bounding_box: OnceLock::new(),
            bounding_sphere: OnceLock::new(),
            disposed: AtomicBool::new(false),
        }
    }

    /// Appends an attribute to the interleaved layout.
    ///
    /// A second attribute of an already present kind is ignored with a
    /// warning.
    ///
    /// # Panics
    ///
    /// Panics if `attribute.item_size` is zero.
    pub fn set_attribute(&mut self, attribute: GeometryAttribute) {
        assert!(
            attribute.item_size > 0,
            "geometry attribute {:?} must have a non-zero item size",
            attribute.kind
        );
        if self.has_attribute(attribute.kind) {
            log::warn!("Vertex attribute {:?} already exists", attribute.kind);
            return;
        }
        self.attributes.push(attribute);
        self.reset_bounds();
    }

    #[must_use]
    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attributes.iter().any(|a| a.kind == kind)
    }

    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &[GeometryAttribute] {
        &self.attributes
    }

    pub fn set_vertex_data(&mut self, vertex_data: Vec<f32>) {
        self.vertex_data = vertex_data;
        self.reset_bounds();
    }

    pub fn set_index_data(&mut self, index_data: Vec<u32>) {
        self.index_data = index_data;
    }

    #[inline]
    #[must_use]
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    #[inline]
    #[must_use]
    pub fn index_data(&self) -> &[u32] {
        &self.index_data
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.index_data.len()
    }

    /// Floats per vertex.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.item_size as usize).sum()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        let stride = self.stride();
        if stride == 0 {
            return 0;
        }
        self.vertex_data.len() / stride
    }

    fn position_offset(&self) -> Option<usize> {
        let mut offset = 0;
        for attribute in &self.attributes {
            if attribute.kind == AttributeKind::Position {
                return Some(offset);
            }
            offset += attribute.item_size as usize;
        }
        None
    }

    /// Iterates over the position of every complete vertex.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        let stride = self.stride();
        let offset = self.position_offset();
        self.vertex_data
            .chunks_exact(stride.max(1))
            .filter_map(move |vertex| {
                let offset = offset?;
                vertex
                    .get(offset..offset + 3)
                    .map(Vec3::from_slice)
            })
    }

    /// Axis-aligned bounds of all positions, or `None` when the geometry has
    /// no positions.
    pub fn bounding_box(&self) -> Option<Box3> {
        *self.bounding_box.get_or_init(|| {
            let mut bounds = Box3::EMPTY;
            for point in self.positions() {
                bounds.expand_with_point(point);
            }
            if bounds.is_empty() {
                log::error!("Failed to create a bounding box for geometry {}", self.uuid);
                return None;
            }
            Some(bounds)
        })
    }

    /// Sphere centered on the bounding box center that encloses every
    /// position.
    pub fn bounding_sphere(&self) -> Option<Sphere> {
        *self.bounding_sphere.get_or_init(|| {
            let center = self.bounding_box()?.center();
            let max_distance_squared = self
                .positions()
                .map(|point| point.distance_squared(center))
                .fold(0.0_f32, f32::max);
            Some(Sphere::new(center, max_distance_squared.sqrt()))
        })
    }

    fn reset_bounds(&mut self) {
        self.bounding_box = OnceLock::new();
        self.bounding_sphere = OnceLock::new();
    }

    /// Marks the geometry as released. Nodes referencing it stop rendering.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            log::trace!("Geometry {} disposed", self.uuid);
        }
    }

    #[inline]
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}
