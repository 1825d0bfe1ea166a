//! # Canopy
//!
//! A real-time 3D scene graph: a hierarchy of nodes whose transforms, input
//! and update hooks, and renderable state are kept consistent frame to
//! frame, then reduced to frustum-culled, sorted draw lists for a renderer.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use glam::Vec4;
//! use canopy::{Camera, FrameClock, Material, Mesh, RenderLists, Scene, create_box};
//!
//! let mut scene = Scene::new();
//! let camera = scene.create_camera(Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0));
//! scene.add_to_root(camera);
//!
//! let cube = scene.create_mesh(Mesh::new(
//!     Arc::new(create_box(1.0, 1.0, 1.0)),
//!     Arc::new(Material::phong(Vec4::ONE)),
//! ));
//! scene.add_to_root(cube);
//!
//! let mut lists = RenderLists::new();
//! let mut clock = FrameClock::new();
//! loop {
//!     scene.advance(clock.tick().dt);
//!     lists.process_scene(&mut scene, camera);
//!     // draw lists.opaque(), lists.transparent(), lists.sprites()
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod assets;
pub mod errors;
pub mod math;
pub mod render;
pub mod resources;
pub mod scene;
pub mod utils;

pub use assets::{LoadQueue, LoadedAsset, Loader};
pub use errors::{CanopyError, Result};
pub use math::{Box3, Frustum, Plane, Sphere};
pub use render::{RenderLists, RenderSettings, Revalidation, can_render, in_frustum, is_mesh_type};
pub use resources::primitives::{PlaneOptions, create_box, create_plane};
pub use resources::{Geometry, InstancedMesh, Material, Mesh, Sprite};
pub use scene::{
    Camera, Event, Fog, Light, Node, NodeBehavior, NodeContext, NodeHandle, Scene, Transform,
};
pub use utils::{FrameClock, FrameTime, OrbitControls};

