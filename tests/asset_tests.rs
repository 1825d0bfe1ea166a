//! Asset Loading Tests
//!
//! Tests for:
//! - Synchronous Loader::load (success, missing file, decode failure)
//! - Background Loader::load_async callbacks
//! - Loader::load_deferred through a LoadQueue, applied to scene nodes

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec4;

use canopy::assets::{LoadQueue, LoadedAsset, Loader};
use canopy::errors::{CanopyError, Result};
use canopy::render::can_render;
use canopy::resources::geometry::{AttributeKind, Geometry, GeometryAttribute};
use canopy::resources::{Material, Mesh};
use canopy::scene::scene::Scene;

/// Reads whitespace-separated `x y z` positions.
struct PointCloudLoader;

impl Loader for PointCloudLoader {
    type Resource = Geometry;

    fn load_resource(&self, path: &Path) -> Result<Geometry> {
        let text = fs::read_to_string(path)?;
        let values = text
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| CanopyError::Decode {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        if values.len() % 3 != 0 {
            return Err(CanopyError::Decode {
                path: path.to_path_buf(),
                message: format!("{} values is not a whole number of points", values.len()),
            });
        }

        let mut geometry = Geometry::with_data(values, Vec::new());
        geometry.set_attribute(GeometryAttribute::new(AttributeKind::Position));
        Ok(geometry)
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn wait_for<T>(queue: &LoadQueue<T>) -> Vec<LoadedAsset<T>> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while queue.is_empty() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    queue.drain().collect()
}

// ============================================================================
// Synchronous Loading
// ============================================================================

#[test]
fn load_decodes_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "triangle.pts", "0 0 0\n1 0 0\n0 1 0\n");

    let geometry = PointCloudLoader.load(&path).unwrap();

    assert_eq!(geometry.vertex_count(), 3);
    assert!(geometry.has_attribute(AttributeKind::Position));
}

#[test]
fn load_missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pts");

    let err = PointCloudLoader.load(&path).unwrap_err();

    assert!(matches!(&err, CanopyError::FileNotFound(p) if p == &path));
    assert!(err.to_string().contains("missing.pts"));
}

#[test]
fn load_reports_decode_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.pts", "0 0 zero");

    let err = PointCloudLoader.load(&path).unwrap_err();

    assert!(matches!(err, CanopyError::Decode { .. }));
}

// ============================================================================
// Background Loading
// ============================================================================

#[test]
fn load_async_delivers_on_background_thread() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "line.pts", "0 0 0 2 0 0");
    let (tx, rx) = flume::bounded(1);

    Arc::new(PointCloudLoader)
        .load_async(path, move |result| {
            let thread = std::thread::current().name().map(str::to_owned);
            tx.send((result.map(|g| g.vertex_count()).ok(), thread)).unwrap();
        })
        .unwrap();

    let (count, thread) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(count, Some(2));
    assert_eq!(thread.as_deref(), Some("canopy-loader:line.pts"));
}

#[test]
fn load_async_missing_file_calls_back_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = flume::bounded(1);

    Arc::new(PointCloudLoader)
        .load_async(dir.path().join("nope.pts"), move |result| {
            tx.send(matches!(result, Err(CanopyError::FileNotFound(_)))).unwrap();
        })
        .unwrap();

    // already delivered before load_async returned
    assert_eq!(rx.try_recv(), Ok(true));
}

#[test]
fn load_deferred_fills_queue_with_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "tri.pts", "0 0 0 1 0 0 0 1 0");
    let mut scene = Scene::new();
    let node = scene.create_mesh(Mesh::default());
    let queue = LoadQueue::new();

    Arc::new(PointCloudLoader)
        .load_deferred(path.clone(), Some(node), &queue)
        .unwrap();

    let arrived = wait_for(&queue);
    assert_eq!(arrived.len(), 1);
    assert_eq!(arrived[0].path, path);
    assert_eq!(arrived[0].target, Some(node));
    assert!(arrived[0].result.is_ok());
}

#[test]
fn deferred_results_are_applied_on_scene_thread() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "good.pts", "0 0 0 1 0 0 0 1 0");
    let mut scene = Scene::new();
    let good_node = scene.create_mesh(Mesh::default());
    let missing_node = scene.create_mesh(Mesh::default());
    for node in [good_node, missing_node] {
        scene.set_material(node, Arc::new(Material::unlit(Vec4::ONE)));
        scene.add_to_root(node);
    }
    let queue = LoadQueue::new();
    let loader = Arc::new(PointCloudLoader);

    loader.clone().load_deferred(good, Some(good_node), &queue).unwrap();
    loader
        .load_deferred(dir.path().join("missing.pts"), Some(missing_node), &queue)
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while queue.len() < 2 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    for asset in queue.drain() {
        if let (Some(target), Ok(geometry)) = (asset.target, asset.result) {
            scene.set_geometry(target, geometry);
        }
    }

    assert!(queue.is_empty());
    assert!(can_render(scene.get_node(good_node).unwrap()));
    assert!(!can_render(scene.get_node(missing_node).unwrap()));
}

#[test]
fn dropped_queue_does_not_panic_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "late.pts", "0 0 0");
    let queue = LoadQueue::<Geometry>::new();
    Arc::new(PointCloudLoader).load_deferred(path, None, &queue).unwrap();
    drop(queue);
    // give the loader thread time to notice the closed queue
    std::thread::sleep(Duration::from_millis(50));
}
