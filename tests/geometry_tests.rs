//! Geometry and Renderable Validation Tests
//!
//! Tests for:
//! - Box and plane primitives (layout, counts, bounds)
//! - Geometry bounding volumes and disposal
//! - Instanced mesh bounds
//! - can_render / is_mesh_type on scene nodes as content arrives

use std::sync::Arc;

use glam::{Mat4, Vec3, Vec4};

use canopy::render::{can_render, is_mesh_type};
use canopy::resources::geometry::{AttributeKind, Geometry, GeometryAttribute};
use canopy::resources::primitives::{PlaneOptions, create_box, create_plane};
use canopy::resources::{InstancedMesh, Material, Mesh};
use canopy::scene::scene::Scene;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn box_layout_is_interleaved_position_normal_uv() {
    let geometry = create_box(1.0, 1.0, 1.0);
    let kinds: Vec<_> = geometry.attributes().iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AttributeKind::Position, AttributeKind::Normal, AttributeKind::Uv]);
    assert_eq!(geometry.stride(), 8);
    assert_eq!(geometry.vertex_count(), 24);
    assert_eq!(geometry.index_count(), 36);
}

#[test]
fn box_indices_stay_in_range() {
    let geometry = create_box(1.0, 2.0, 3.0);
    let count = geometry.vertex_count() as u32;
    assert!(geometry.index_data().iter().all(|&i| i < count));
}

#[test]
fn box_bounds_match_dimensions() {
    let geometry = create_box(2.0, 4.0, 6.0);

    let bbox = geometry.bounding_box().unwrap();
    assert_eq!(bbox.min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(bbox.max, Vec3::new(1.0, 2.0, 3.0));

    let sphere = geometry.bounding_sphere().unwrap();
    assert!(sphere.center.abs_diff_eq(Vec3::ZERO, EPSILON));
    assert!(approx_eq(sphere.radius, 14.0_f32.sqrt()));
}

#[test]
fn plane_segments_determine_counts() {
    let geometry = create_plane(&PlaneOptions {
        width: 4.0,
        height: 2.0,
        width_segments: 2,
        height_segments: 3,
    });
    assert_eq!(geometry.vertex_count(), 12);
    assert_eq!(geometry.index_count(), 36);

    let bbox = geometry.bounding_box().unwrap();
    assert!(bbox.min.abs_diff_eq(Vec3::new(-2.0, -1.0, 0.0), EPSILON));
    assert!(bbox.max.abs_diff_eq(Vec3::new(2.0, 1.0, 0.0), EPSILON));
}

#[test]
#[should_panic(expected = "segment")]
fn plane_rejects_zero_segments() {
    let _ = create_plane(&PlaneOptions {
        width_segments: 0,
        ..Default::default()
    });
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn geometry_without_positions_has_no_bounds() {
    let mut geometry = Geometry::with_data(vec![0.0; 6], Vec::new());
    geometry.set_attribute(GeometryAttribute::new(AttributeKind::Normal));
    assert!(geometry.bounding_box().is_none());
    assert!(geometry.bounding_sphere().is_none());
}

#[test]
fn bounds_follow_new_vertex_data() {
    let mut geometry = Geometry::with_data(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Vec::new());
    geometry.set_attribute(GeometryAttribute::new(AttributeKind::Position));
    assert!(approx_eq(geometry.bounding_sphere().unwrap().radius, 0.5));

    geometry.set_vertex_data(vec![0.0, 0.0, 0.0, 4.0, 0.0, 0.0]);
    assert!(approx_eq(geometry.bounding_sphere().unwrap().radius, 2.0));
}

#[test]
fn duplicate_attribute_is_ignored() {
    let mut geometry = create_box(1.0, 1.0, 1.0);
    geometry.set_attribute(GeometryAttribute::new(AttributeKind::Position));
    assert_eq!(geometry.attributes().len(), 3);
    assert_eq!(geometry.stride(), 8);
}

#[test]
fn dispose_is_idempotent() {
    let geometry = create_box(1.0, 1.0, 1.0);
    assert!(!geometry.is_disposed());
    geometry.dispose();
    geometry.dispose();
    assert!(geometry.is_disposed());
}

// ============================================================================
// Instanced Mesh
// ============================================================================

#[test]
fn instanced_bounds_cover_every_instance() {
    let geometry = Arc::new(create_box(1.0, 1.0, 1.0));
    let mut mesh = InstancedMesh::new(Some(geometry), None, 2);
    mesh.set_transform_at(0, Mat4::from_translation(Vec3::new(-5.0, 0.0, 0.0)));
    mesh.set_transform_at(1, Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));

    let sphere = mesh.bounding_sphere().unwrap();
    assert!(sphere.center.abs_diff_eq(Vec3::ZERO, 1e-4));
    assert!(approx_eq(sphere.radius, 5.0 + 0.75_f32.sqrt()));
}

#[test]
fn instanced_mesh_without_geometry_has_no_bounds() {
    let mesh = InstancedMesh::new(None, None, 4);
    assert!(mesh.bounding_sphere().is_none());
    assert_eq!(mesh.count(), 4);
    assert_eq!(mesh.color_at(3), Some(Vec4::ONE));
    assert_eq!(mesh.transform_at(4), None);
}

#[test]
#[should_panic(expected = "out of range")]
fn instanced_set_out_of_range_panics() {
    let mut mesh = InstancedMesh::new(None, None, 1);
    mesh.set_color_at(1, Vec4::ZERO);
}

// ============================================================================
// Render Validation
// ============================================================================

#[test]
fn mesh_becomes_renderable_once_material_arrives() {
    let mut scene = Scene::new();
    let node = scene.create_mesh(Mesh::with_geometry(Arc::new(create_box(1.0, 1.0, 1.0))));
    assert!(is_mesh_type(scene.get_node(node).unwrap()));
    assert!(!can_render(scene.get_node(node).unwrap()));

    assert!(scene.set_material(node, Arc::new(Material::unlit(Vec4::new(1.0, 0.0, 0.0, 1.0)))));
    assert!(can_render(scene.get_node(node).unwrap()));
}

#[test]
fn mesh_without_geometry_cannot_render() {
    let mut scene = Scene::new();
    let node = scene.create_mesh(Mesh::default());
    scene.set_material(node, Arc::new(Material::phong(Vec4::ONE)));
    assert!(!can_render(scene.get_node(node).unwrap()));

    scene.set_geometry(node, Arc::new(create_box(1.0, 1.0, 1.0)));
    assert!(can_render(scene.get_node(node).unwrap()));
}

#[test]
fn geometry_without_position_attribute_cannot_render() {
    let mut geometry = Geometry::with_data(vec![0.0; 9], Vec::new());
    geometry.set_attribute(GeometryAttribute::new(AttributeKind::Normal));
    let mut scene = Scene::new();
    let material = Arc::new(Material::unlit(Vec4::ONE));
    let node = scene.create_mesh(Mesh::new(Arc::new(geometry), material));
    assert!(!can_render(scene.get_node(node).unwrap()));
}

#[test]
fn empty_geometry_cannot_render() {
    let mut geometry = Geometry::new();
    geometry.set_attribute(GeometryAttribute::new(AttributeKind::Position));
    let mut scene = Scene::new();
    let material = Arc::new(Material::unlit(Vec4::ONE));
    let node = scene.create_mesh(Mesh::new(Arc::new(geometry), material));
    assert!(!can_render(scene.get_node(node).unwrap()));
}

#[test]
fn content_setters_reject_non_renderables() {
    let mut scene = Scene::new();
    let node = scene.create_node();
    assert!(!scene.set_material(node, Arc::new(Material::unlit(Vec4::ONE))));
    assert!(!scene.set_geometry(node, Arc::new(create_box(1.0, 1.0, 1.0))));
    assert!(!can_render(scene.get_node(node).unwrap()));
    assert!(!is_mesh_type(scene.get_node(node).unwrap()));
}

#[test]
fn sprite_uses_shared_quad_and_sprite_material() {
    let mut scene = Scene::new();
    let sprite = scene.create_sprite(Some(Arc::new(Material::sprite(Vec4::ONE))));
    let node = scene.get_node(sprite).unwrap();
    assert!(can_render(node));
    assert!(!is_mesh_type(node));

    let quad = scene.sprite_geometry();
    let node = scene.get_node(sprite).unwrap();
    assert!(Arc::ptr_eq(node.sprite().unwrap().geometry.as_ref().unwrap(), &quad));
}

#[test]
fn instanced_mesh_is_mesh_type() {
    let mut scene = Scene::new();
    let node = scene.create_instanced_mesh(InstancedMesh::new(
        Some(Arc::new(create_box(1.0, 1.0, 1.0))),
        Some(Arc::new(Material::phong(Vec4::ONE))),
        3,
    ));
    let node = scene.get_node(node).unwrap();
    assert!(is_mesh_type(node));
    assert!(can_render(node));
}
