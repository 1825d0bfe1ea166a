//! Render validation and culling of individual nodes
//!
//! A node is renderable when its kind is [`NodeKind::Mesh`],
//! [`NodeKind::InstancedMesh`] or [`NodeKind::Sprite`]. Whether it can be
//! drawn *this frame* depends on the content it carries, which may still be
//! loading; [`can_render`] is the gate and never panics on bad content.

use std::sync::Arc;

use crate::math::{Frustum, Sphere};
use crate::resources::{AttributeKind, Geometry, Material};
use crate::scene::node::{Node, NodeKind};

/// Geometry and material slots of a renderable node, `None` for any other
/// kind.
#[must_use]
pub fn render_parts(node: &Node) -> Option<(Option<&Arc<Geometry>>, Option<&Arc<Material>>)> {
    match &node.kind {
        NodeKind::Mesh(mesh) => Some((mesh.geometry.as_ref(), mesh.material.as_ref())),
        NodeKind::InstancedMesh(mesh) => Some((mesh.geometry(), mesh.material())),
        NodeKind::Sprite(sprite) => Some((sprite.geometry.as_ref(), sprite.material.as_ref())),
        _ => None,
    }
}

/// Material of a renderable node, if it has one.
#[must_use]
pub fn material_of(node: &Node) -> Option<&Arc<Material>> {
    render_parts(node)?.1
}

#[inline]
#[must_use]
pub fn is_renderable(node: &Node) -> bool {
    render_parts(node).is_some()
}

/// Whether the node carries everything needed to be drawn.
///
/// Failures are logged at debug level and reported as `false`; they are
/// expected while assets are in flight.
#[must_use]
pub fn can_render(node: &Node) -> bool {
    let Some((geometry, material)) = render_parts(node) else {
        log::debug!("Skipped rendering non-renderable node {}", node.id());
        return false;
    };

    let Some(geometry) = geometry else {
        log::debug!("Skipped rendering a node with invalid geometry {}", node.id());
        return false;
    };
    if geometry.is_disposed() {
        log::debug!("Skipped rendering a node with disposed geometry {}", node.id());
        return false;
    }
    if geometry.vertex_data().is_empty() {
        log::debug!("Skipped rendering a node with no geometry data {}", node.id());
        return false;
    }
    if !geometry.has_attribute(AttributeKind::Position) {
        log::debug!("Skipped rendering a node with no position attribute {}", node.id());
        return false;
    }

    let Some(material) = material else {
        log::debug!("Skipped rendering a node with no valid material {}", node.id());
        return false;
    };

    let is_sprite_node = matches!(node.kind, NodeKind::Sprite(_));
    if is_sprite_node != material.is_sprite() {
        log::debug!(
            "Skipped rendering node {} with mismatched {} material",
            node.id(),
            material.material_type().as_str()
        );
        return false;
    }

    true
}

/// Whether the node still holds live geometry and a material.
///
/// The per-frame subset of [`can_render`]: geometry released or taken away
/// after the last full validation is caught here.
#[must_use]
pub fn has_live_content(node: &Node) -> bool {
    match render_parts(node) {
        Some((Some(geometry), Some(_))) => !geometry.is_disposed(),
        _ => false,
    }
}

/// Local-space bounding sphere of a renderable node.
#[must_use]
pub fn local_bounding_sphere(node: &Node) -> Option<Sphere> {
    match &node.kind {
        NodeKind::Mesh(mesh) => mesh.bounding_sphere(),
        NodeKind::InstancedMesh(mesh) => mesh.bounding_sphere(),
        NodeKind::Sprite(sprite) => sprite.bounding_sphere(),
        _ => None,
    }
}

/// Frustum test against the node's cached world transform.
///
/// Sprites always face the camera, so they are never culled; neither is a
/// node with `frustum_culled` off. A mesh without bounds is treated as
/// outside.
#[must_use]
pub fn in_frustum(node: &Node, frustum: &Frustum) -> bool {
    if !node.frustum_culled || matches!(node.kind, NodeKind::Sprite(_)) {
        return true;
    }
    let Some(sphere) = local_bounding_sphere(node) else {
        return false;
    };
    frustum.intersects_sphere(&sphere.transformed(node.cached_world_transform()))
}

/// True for [`NodeKind::Mesh`] and [`NodeKind::InstancedMesh`].
#[inline]
#[must_use]
pub fn is_mesh_type(node: &Node) -> bool {
    matches!(node.kind, NodeKind::Mesh(_) | NodeKind::InstancedMesh(_))
}
