//! Per-node behavior hooks
//!
//! A node may carry one [`NodeBehavior`]. The scene calls into it during
//! [`Scene::advance`], [`Scene::handle_input_event`] and when the node first
//! becomes reachable from the scene root. Every hook has an empty default,
//! so an implementation only overrides what it reacts to.
//!
//! Hooks receive a [`NodeContext`] with mutable access to the whole scene.
//! Adding, removing or destroying nodes from inside a hook is allowed; the
//! traversal in progress skips nodes that were detached or destroyed before
//! it reached them.

use glam::Mat4;

use crate::scene::event::{KeyboardEvent, MouseEvent};
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, Scene};

pub trait NodeBehavior: 'static {
    /// Called once per [`Scene::advance`] with the elapsed time in seconds.
    fn on_update(&mut self, _ctx: &mut NodeContext<'_>, _delta: f32) {}

    /// Set `event.handled` to stop the event from reaching further nodes.
    fn on_keyboard_event(&mut self, _ctx: &mut NodeContext<'_>, _event: &mut KeyboardEvent) {}

    /// Set `event.handled` to stop the event from reaching further nodes.
    fn on_mouse_event(&mut self, _ctx: &mut NodeContext<'_>, _event: &mut MouseEvent) {}

    /// Called once when the node becomes part of a scene.
    fn on_attached(&mut self, _ctx: &mut NodeContext<'_>) {}
}

/// The scene plus the node a hook is running for.
pub struct NodeContext<'a> {
    pub scene: &'a mut Scene,
    pub node: NodeHandle,
}

impl<'a> NodeContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, node: NodeHandle) -> Self {
        Self { scene, node }
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.node
    }

    /// `None` once the node has been destroyed from inside the hook.
    #[must_use]
    pub fn get(&self) -> Option<&Node> {
        self.scene.get_node(self.node)
    }

    pub fn get_mut(&mut self) -> Option<&mut Node> {
        self.scene.get_node_mut(self.node)
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.get_mut().map(|node| &mut node.transform)
    }

    pub fn world_transform(&mut self) -> Mat4 {
        self.scene.world_transform(self.node)
    }
}
