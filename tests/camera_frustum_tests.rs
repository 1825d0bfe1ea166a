//! Camera and Frustum Tests
//!
//! Tests for:
//! - Perspective/Orthographic projection matrix generation
//! - View transform tracking the camera node
//! - Frustum plane extraction (Gribb-Hartmann)
//! - Frustum point / sphere / box tests, boundary inclusive

use glam::{Mat4, Vec3, Vec4};

use canopy::math::{Box3, Frustum, Plane, Sphere};
use canopy::scene::camera::{Camera, Projection};
use canopy::scene::scene::Scene;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn unit_cube_frustum() -> Frustum {
    // identity projection-view: the frustum is the clip cube [-1, 1]^3
    Frustum::new(Mat4::IDENTITY)
}

// ============================================================================
// Projection Matrix Tests
// ============================================================================

#[test]
fn perspective_near_maps_to_minus_one_far_to_one() {
    let cam = Camera::new_perspective(60.0, 1.0, 0.1, 50.0);

    let near = cam.projection_transform * Vec4::new(0.0, 0.0, -0.1, 1.0);
    let far = cam.projection_transform * Vec4::new(0.0, 0.0, -50.0, 1.0);
    assert!(approx(near.z / near.w, -1.0), "near should map to -1, got {}", near.z / near.w);
    assert!(approx(far.z / far.w, 1.0), "far should map to 1, got {}", far.z / far.w);
}

#[test]
fn perspective_aspect_ratio_affects_x_scale() {
    let wide = Camera::new_perspective(60.0, 2.0, 0.1, 10.0);
    let square = Camera::new_perspective(60.0, 1.0, 0.1, 10.0);
    assert_ne!(wide.projection_transform.x_axis.x, square.projection_transform.x_axis.x);
}

#[test]
fn set_aspect_rebuilds_projection() {
    let mut cam = Camera::new_perspective(60.0, 1.0, 0.1, 10.0);
    let before = cam.projection_transform;
    cam.set_aspect(2.0);
    assert_ne!(before, cam.projection_transform);
    assert!(matches!(
        cam.projection(),
        Projection::Perspective { aspect, .. } if approx(aspect, 2.0)
    ));
}

#[test]
fn orthographic_maps_box_to_clip_cube() {
    let cam = Camera::new_orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
    let corner = cam.projection_transform * Vec4::new(2.0, 1.0, -10.0, 1.0);
    assert!(approx(corner.x, 1.0));
    assert!(approx(corner.y, 1.0));
    assert!(approx(corner.z, 1.0));
}

// ============================================================================
// Plane Tests
// ============================================================================

#[test]
fn plane_from_coefficients_is_normalized() {
    let plane = Plane::from_coefficients(Vec4::new(0.0, 2.0, 0.0, 4.0)).normalized();
    assert!(approx(plane.normal.length(), 1.0));
    assert!(approx(plane.distance, 2.0));
    assert!(approx(plane.distance_to_point(Vec3::new(0.0, -2.0, 0.0)), 0.0));
}

// ============================================================================
// Frustum Extraction Tests
// ============================================================================

#[test]
fn frustum_planes_are_unit_length() {
    let cam = Camera::new_perspective(75.0, 1.5, 0.5, 200.0);
    let frustum = cam.frustum();
    for plane in &frustum.planes {
        assert!(approx(plane.normal.length(), 1.0));
    }
}

#[test]
fn unit_cube_frustum_is_boundary_inclusive() {
    let frustum = unit_cube_frustum();
    assert!(frustum.contains_point(Vec3::ZERO));
    assert!(frustum.contains_point(Vec3::new(1.0, 1.0, 1.0)));
    assert!(frustum.contains_point(Vec3::new(-1.0, 0.0, 0.0)));
    assert!(!frustum.contains_point(Vec3::new(1.0001, 0.0, 0.0)));
}

#[test]
fn camera_scenario_contains_points_between_near_and_far() {
    let mut scene = Scene::new();
    let camera = scene.create_camera(Camera::new_perspective(90.0, 1.0, 1.0, 100.0));
    scene.add_to_root(camera);

    let frustum = scene.frustum(camera).expect("camera node");
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -50.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 0.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -101.0)));
}

#[test]
fn frustum_follows_camera_node_transform() {
    let mut scene = Scene::new();
    let camera = scene.create_camera(Camera::new_perspective(90.0, 1.0, 1.0, 100.0));
    scene.add_to_root(camera);
    scene
        .get_node_mut(camera)
        .unwrap()
        .transform
        .set_position(Vec3::new(0.0, 0.0, 200.0));

    let frustum = scene.frustum(camera).unwrap();
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 150.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -50.0)));
}

#[test]
fn frustum_of_non_camera_is_none() {
    let mut scene = Scene::new();
    let node = scene.create_node();
    assert!(scene.frustum(node).is_none());
}

#[test]
fn camera_look_at_points_view_at_target() {
    let mut scene = Scene::new();
    let camera = scene.create_camera(Camera::new_perspective(60.0, 1.0, 0.1, 100.0));
    scene.add_to_root(camera);
    scene
        .get_node_mut(camera)
        .unwrap()
        .transform
        .set_position(Vec3::new(10.0, 0.0, 0.0));
    scene.look_at(camera, Vec3::ZERO);

    let frustum = scene.frustum(camera).unwrap();
    assert!(frustum.contains_point(Vec3::ZERO));
    let forward = scene.get_node(camera).unwrap().camera().unwrap().view_forward();
    assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-4));
}

// ============================================================================
// Frustum Intersection Tests
// ============================================================================

#[test]
fn sphere_touching_plane_intersects() {
    let frustum = unit_cube_frustum();
    assert!(frustum.intersects_sphere(&Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0)));
    assert!(!frustum.intersects_sphere(&Sphere::new(Vec3::new(2.5, 0.0, 0.0), 1.0)));
}

#[test]
fn empty_sphere_never_intersects() {
    assert!(!unit_cube_frustum().intersects_sphere(&Sphere::EMPTY));
}

#[test]
fn box_partially_inside_intersects() {
    let frustum = unit_cube_frustum();
    let straddling = Box3::new(Vec3::new(0.5, -0.5, -0.5), Vec3::new(3.0, 0.5, 0.5));
    let outside = Box3::new(Vec3::new(1.5, -0.5, -0.5), Vec3::new(3.0, 0.5, 0.5));
    assert!(frustum.intersects_box3(&straddling));
    assert!(!frustum.intersects_box3(&outside));
}

#[test]
fn empty_box_never_intersects() {
    assert!(!unit_cube_frustum().intersects_box3(&Box3::EMPTY));
}
