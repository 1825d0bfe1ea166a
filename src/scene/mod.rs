//! Scene graph
//!
//! - Node: hierarchy entry with a kind payload and a cached world transform
//! - Transform: local position, rotation and scale
//! - Scene: node arena, hierarchy mutation and per-frame dispatch
//! - Camera / Light: node payloads
//! - Fog: scene-wide distance fog
//! - Event / NodeBehavior: input and lifecycle hooks
//! - TransformSystem: world transform resolution, decoupled from Scene

pub mod behavior;
pub mod camera;
pub mod event;
pub mod fog;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use behavior::{NodeBehavior, NodeContext};
pub use camera::{Camera, Projection};
pub use event::{
    Event, Key, KeyboardEvent, KeyboardEventKind, MouseButton, MouseEvent, MouseEventKind,
    SceneEvent, SceneEventKind,
};
pub use fog::Fog;
pub use light::{Light, LightKind};
pub use node::{Node, NodeId, NodeKind, NodeType};
pub use scene::Scene;
pub use transform::{Axis, Euler, Transform};

use slotmap::new_key_type;

new_key_type! {
    /// Arena key of a node. Stays valid until the node is destroyed; after
    /// that it resolves to nothing.
    pub struct NodeHandle;
}
