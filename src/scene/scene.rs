use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::{Mat4, Vec3};
use slotmap::{SecondaryMap, SlotMap};

use crate::math::Frustum;
use crate::resources::primitives::{PlaneOptions, create_plane};
use crate::resources::{Geometry, InstancedMesh, Material, Mesh, Sprite};
use crate::scene::NodeHandle;
use crate::scene::behavior::{NodeBehavior, NodeContext};
use crate::scene::camera::Camera;
use crate::scene::event::{Event, SceneEvent, SceneEventKind};
use crate::scene::fog::Fog;
use crate::scene::light::Light;
use crate::scene::node::{Node, NodeKind};
use crate::scene::transform_system;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Owns every node in an arena and a single root node. Nodes created through
/// the `create_*` factories start detached; they take part in
/// [`advance`](Self::advance), input dispatch and rendering once they are
/// [`add`](Self::add)ed somewhere below the root.
///
/// The scene keeps a private `touched` bit that is set whenever the set of
/// nodes reachable from the root changes. The render lists read and clear
/// it to decide when to rebuild their cached membership.
pub struct Scene {
    id: u32,

    nodes: SlotMap<NodeHandle, Node>,
    root: NodeHandle,

    touched: bool,

    fog: Option<Fog>,

    sprite_geometry: Option<Arc<Geometry>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_node = Node::with_name(NodeKind::Scene, "Scene");
        root_node.attached = true;
        let root = nodes.insert(root_node);

        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            root,
            touched: true,
            fog: None,
            sprite_geometry: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Number of live nodes, attached or not, including the root.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Fog applied to everything this scene draws, if any.
    #[inline]
    #[must_use]
    pub fn fog(&self) -> Option<&Fog> {
        self.fog.as_ref()
    }

    pub fn set_fog(&mut self, fog: Fog) {
        self.fog = Some(fog);
    }

    pub fn clear_fog(&mut self) -> Option<Fog> {
        self.fog.take()
    }

    // ========================================================================
    // Node factories
    // ========================================================================

    /// Moves a node into the arena. The node starts detached; any parent or
    /// children it claims are discarded.
    pub fn insert(&mut self, mut node: Node) -> NodeHandle {
        node.parent = None;
        node.children.clear();
        node.attached = false;
        self.nodes.insert(node)
    }

    pub fn create_node(&mut self) -> NodeHandle {
        self.insert(Node::default())
    }

    pub fn create_node_with_name(&mut self, name: impl Into<String>) -> NodeHandle {
        self.insert(Node::with_name(NodeKind::Generic, name))
    }

    pub fn create_mesh(&mut self, mesh: Mesh) -> NodeHandle {
        self.insert(Node::new(NodeKind::Mesh(mesh)))
    }

    pub fn create_instanced_mesh(&mut self, mesh: InstancedMesh) -> NodeHandle {
        self.insert(Node::new(NodeKind::InstancedMesh(mesh)))
    }

    /// Creates a sprite node backed by the scene's shared quad.
    pub fn create_sprite(&mut self, material: Option<Arc<Material>>) -> NodeHandle {
        let geometry = self.sprite_geometry();
        self.insert(Node::new(NodeKind::Sprite(Sprite::new(geometry, material))))
    }

    pub fn create_camera(&mut self, camera: Camera) -> NodeHandle {
        self.insert(Node::new(NodeKind::Camera(camera)))
    }

    pub fn create_light(&mut self, light: Light) -> NodeHandle {
        self.insert(Node::new(NodeKind::Light(light)))
    }

    /// Unit quad shared by every sprite of this scene, created on first use.
    pub fn sprite_geometry(&mut self) -> Arc<Geometry> {
        self.sprite_geometry
            .get_or_insert_with(|| Arc::new(create_plane(&PlaneOptions::default())))
            .clone()
    }

    // ========================================================================
    // Node access
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(handle)?.parent
    }

    /// Children in insertion order; empty for a stale handle.
    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.nodes
            .get(handle)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `node` sits anywhere below `ancestor`.
    #[must_use]
    pub fn is_descendant(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `handle` is the root or reachable from it.
    #[must_use]
    pub fn is_in_scene(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
            && (handle == self.root || self.is_descendant(self.root, handle))
    }

    /// Pre-order handles of `start` and everything below it.
    #[must_use]
    pub fn subtree(&self, start: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// First node in pre-order below the root with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.subtree(self.root)
            .into_iter()
            .find(|&h| self.nodes.get(h).and_then(|n| n.name.as_deref()) == Some(name))
    }

    // ========================================================================
    // Hierarchy mutation
    // ========================================================================

    fn check_handle(&self, handle: NodeHandle, op: &str) -> bool {
        let valid = self.nodes.contains_key(handle);
        debug_assert!(valid, "{op}: node handle {handle:?} does not resolve");
        if !valid {
            log::error!("{op}: node handle {handle:?} does not resolve");
        }
        valid
    }

    /// Appends `child` to `parent`'s children.
    ///
    /// A child that already has a parent is detached from it first. Adding
    /// a node to itself, adding the root, or adding an ancestor below its
    /// own descendant is a caller bug: it asserts in debug builds and is
    /// ignored in release builds.
    pub fn add(&mut self, parent: NodeHandle, child: NodeHandle) {
        if !self.check_handle(parent, "add") || !self.check_handle(child, "add") {
            return;
        }
        let invalid = child == parent || child == self.root || self.is_descendant(child, parent);
        debug_assert!(!invalid, "add: attaching {child:?} under {parent:?} would create a cycle");
        if invalid {
            log::error!("add: attaching {child:?} under {parent:?} would create a cycle");
            return;
        }

        let was_in_scene = self.is_in_scene(child);
        if self.unlink(child).is_some() && was_in_scene {
            self.raise(SceneEvent::new(SceneEventKind::NodeRemoved, child));
        }

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();

        if self.is_in_scene(child) {
            self.raise(SceneEvent::new(SceneEventKind::NodeAdded, child));
            self.attach_subtree(child);
        } else if was_in_scene {
            self.clear_attached(child);
        }
    }

    /// Shorthand for `add(scene.root(), child)`.
    pub fn add_to_root(&mut self, child: NodeHandle) {
        self.add(self.root, child);
    }

    /// Detaches `child` from `parent`. The subtree stays alive and may be
    /// added again; use [`destroy`](Self::destroy) to free it.
    ///
    /// Removing a node that is not a child of `parent` does nothing.
    pub fn remove(&mut self, parent: NodeHandle, child: NodeHandle) {
        if !self.check_handle(parent, "remove") || !self.check_handle(child, "remove") {
            return;
        }
        if self.nodes[child].parent != Some(parent) {
            log::warn!("remove: {child:?} is not a child of {parent:?}");
            return;
        }

        let was_in_scene = self.is_in_scene(child);
        self.unlink(child);
        if was_in_scene {
            self.raise(SceneEvent::new(SceneEventKind::NodeRemoved, child));
            self.clear_attached(child);
        }
    }

    pub fn remove_all_children(&mut self, parent: NodeHandle) {
        let children = self.children(parent).to_vec();
        for child in children {
            self.remove(parent, child);
        }
    }

    /// Detaches `handle` and frees it together with its whole subtree.
    /// Handles to freed nodes resolve to nothing afterward.
    ///
    /// The root cannot be destroyed.
    pub fn destroy(&mut self, handle: NodeHandle) {
        if !self.check_handle(handle, "destroy") {
            return;
        }
        if handle == self.root {
            log::warn!("destroy: the scene root cannot be destroyed");
            return;
        }

        let was_in_scene = self.is_in_scene(handle);
        self.unlink(handle);
        if was_in_scene {
            self.raise(SceneEvent::new(SceneEventKind::NodeRemoved, handle));
        }

        for node in self.subtree(handle) {
            self.nodes.remove(node);
        }
    }

    /// Cuts the edge between `child` and its parent. Returns the old parent.
    fn unlink(&mut self, child: NodeHandle) -> Option<NodeHandle> {
        let old_parent = self.nodes.get_mut(child)?.parent.take()?;
        if let Some(parent) = self.nodes.get_mut(old_parent) {
            parent.children.retain(|&c| c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.transform.mark_dirty();
        }
        Some(old_parent)
    }

    fn raise(&mut self, event: SceneEvent) {
        self.handle_scene_event(&event);
    }

    /// Internal listener for lifecycle events. Never forwarded to behaviors.
    fn handle_scene_event(&mut self, event: &SceneEvent) {
        log::trace!("Scene {}: {:?} {:?}", self.id, event.kind, event.node);
        self.touched = true;
    }

    fn attach_subtree(&mut self, start: NodeHandle) {
        let mut newly_attached = Vec::new();
        for handle in self.subtree(start) {
            if let Some(node) = self.nodes.get_mut(handle)
                && !node.attached
            {
                node.attached = true;
                newly_attached.push(handle);
            }
        }
        for handle in newly_attached {
            self.call_behavior(handle, |behavior, ctx| behavior.on_attached(ctx));
        }
    }

    fn clear_attached(&mut self, start: NodeHandle) {
        for handle in self.subtree(start) {
            if let Some(node) = self.nodes.get_mut(handle) {
                node.attached = false;
            }
        }
    }

    // ========================================================================
    // Touched flag
    // ========================================================================

    /// Forces the render lists to rebuild their membership on the next
    /// frame. Useful after swapping content on nodes that were previously
    /// skipped.
    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Reads and clears the touched flag.
    pub(crate) fn take_touched(&mut self) -> bool {
        std::mem::take(&mut self.touched)
    }

    // ========================================================================
    // World transforms
    // ========================================================================

    #[must_use]
    pub fn should_update_world_transform(&self, handle: NodeHandle) -> bool {
        transform_system::should_update(&self.nodes, handle)
    }

    /// Resolves the world transform of `handle`, refreshing only its
    /// ancestor path.
    pub fn update_world_transform(&mut self, handle: NodeHandle) {
        transform_system::resolve(&mut self.nodes, handle);
    }

    /// Resolved world transform; identity for a stale handle.
    pub fn world_transform(&mut self, handle: NodeHandle) -> Mat4 {
        transform_system::resolve(&mut self.nodes, handle)
    }

    pub fn world_position(&mut self, handle: NodeHandle) -> Vec3 {
        self.world_transform(handle).w_axis.truncate()
    }

    /// Refreshes every stale world transform below the root. Returns how
    /// many nodes were recomputed.
    pub fn update_world_transforms(&mut self) -> usize {
        transform_system::update_hierarchy_iterative(&mut self.nodes, self.root)
    }

    /// Rotates `handle` so it faces the world-space `target`.
    ///
    /// Cameras turn their view direction (-Z) toward the target, every other
    /// node its +Z axis.
    pub fn look_at(&mut self, handle: NodeHandle, target: Vec3) {
        if !self.check_handle(handle, "look_at") {
            return;
        }
        let parent_world = match self.parent(handle) {
            Some(parent) => self.world_transform(parent),
            None => Mat4::IDENTITY,
        };
        let local_target = parent_world.inverse().transform_point3(target);

        let node = &mut self.nodes[handle];
        let eye = node.transform.position();
        let up = node.up;
        if node.camera().is_some() {
            node.transform.face_direction(eye - local_target, up);
        } else {
            node.transform.look_at(eye, local_target, up);
        }
    }

    /// Frustum of a camera node in world space, or `None` if `camera` is not
    /// a live camera.
    pub fn frustum(&mut self, camera: NodeHandle) -> Option<Frustum> {
        let world = self.world_transform(camera);
        let camera = self.nodes.get_mut(camera)?.camera_mut()?;
        camera.update_view_transform(&world);
        Some(camera.frustum())
    }

    // ========================================================================
    // Content
    // ========================================================================

    /// Attaches geometry to a mesh, instanced mesh or sprite node. Returns
    /// `false` for any other node.
    pub fn set_geometry(&mut self, handle: NodeHandle, geometry: Arc<Geometry>) -> bool {
        let Some(node) = self.nodes.get_mut(handle) else {
            return false;
        };
        let node_type = node.node_type();
        match &mut node.kind {
            NodeKind::Mesh(mesh) => mesh.geometry = Some(geometry),
            NodeKind::InstancedMesh(mesh) => mesh.set_geometry(geometry),
            NodeKind::Sprite(sprite) => sprite.geometry = Some(geometry),
            _ => {
                log::warn!("set_geometry: {node_type:?} cannot hold geometry");
                return false;
            }
        }
        true
    }

    /// Attaches a material to a mesh, instanced mesh or sprite node. Returns
    /// `false` for any other node.
    pub fn set_material(&mut self, handle: NodeHandle, material: Arc<Material>) -> bool {
        let Some(node) = self.nodes.get_mut(handle) else {
            return false;
        };
        let node_type = node.node_type();
        match &mut node.kind {
            NodeKind::Mesh(mesh) => mesh.material = Some(material),
            NodeKind::InstancedMesh(mesh) => mesh.set_material(material),
            NodeKind::Sprite(sprite) => sprite.material = Some(material),
            _ => {
                log::warn!("set_material: {node_type:?} cannot hold a material");
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Behaviors & dispatch
    // ========================================================================

    /// Installs the behavior of `handle`, replacing any previous one.
    ///
    /// A node that is already part of the scene does not receive
    /// `on_attached` for the new behavior.
    pub fn set_behavior(&mut self, handle: NodeHandle, behavior: impl NodeBehavior) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.behavior = Some(Box::new(behavior));
        }
    }

    pub fn take_behavior(&mut self, handle: NodeHandle) -> Option<Box<dyn NodeBehavior>> {
        self.nodes.get_mut(handle)?.behavior.take()
    }

    /// Runs `f` with the node's behavior temporarily moved out, so the hook
    /// can borrow the scene mutably. The behavior goes back only if the node
    /// survived and no new behavior was installed meanwhile.
    fn call_behavior<F>(&mut self, handle: NodeHandle, f: F)
    where
        F: FnOnce(&mut dyn NodeBehavior, &mut NodeContext<'_>),
    {
        let Some(mut behavior) = self.nodes.get_mut(handle).and_then(|n| n.behavior.take()) else {
            return;
        };
        f(behavior.as_mut(), &mut NodeContext::new(self, handle));
        if let Some(node) = self.nodes.get_mut(handle)
            && node.behavior.is_none()
        {
            node.behavior = Some(behavior);
        }
    }

    /// Pre-order walk from the root. `visit` returns `false` to stop.
    ///
    /// Each stack entry remembers the parent it was reached through; nodes
    /// that were destroyed or moved elsewhere by an earlier visit are
    /// skipped. A node is visited at most once per walk, even if a hook
    /// moves it below a node that has not been reached yet.
    fn walk(&mut self, mut visit: impl FnMut(&mut Self, NodeHandle) -> bool) {
        let mut visited: SecondaryMap<NodeHandle, ()> = SecondaryMap::new();
        let mut stack: Vec<(NodeHandle, Option<NodeHandle>)> = vec![(self.root, None)];
        while let Some((handle, expected_parent)) = stack.pop() {
            match self.nodes.get(handle) {
                Some(node) if node.parent == expected_parent => {}
                _ => continue,
            }
            if visited.insert(handle, ()).is_some() {
                continue;
            }
            if !visit(self, handle) {
                return;
            }
            if let Some(node) = self.nodes.get(handle) {
                stack.extend(node.children.iter().rev().map(|&c| (c, Some(handle))));
            }
        }
    }

    /// Calls `on_update` on every node reachable from the root, parents
    /// before children, children in insertion order.
    pub fn advance(&mut self, delta: f32) {
        self.walk(|scene, handle| {
            scene.call_behavior(handle, |behavior, ctx| behavior.on_update(ctx, delta));
            true
        });
    }

    /// Dispatches an input event in the same order as
    /// [`advance`](Self::advance), stopping at the first node that marks it
    /// handled.
    ///
    /// Scene lifecycle events are consumed by the scene itself.
    pub fn handle_input_event(&mut self, event: &mut Event) {
        if event.handled() {
            return;
        }
        match event {
            Event::Keyboard(keyboard) => self.walk(|scene, handle| {
                scene.call_behavior(handle, |behavior, ctx| {
                    behavior.on_keyboard_event(ctx, keyboard);
                });
                !keyboard.handled
            }),
            Event::Mouse(mouse) => self.walk(|scene, handle| {
                scene.call_behavior(handle, |behavior, ctx| behavior.on_mouse_event(ctx, mouse));
                !mouse.handled
            }),
            Event::Scene(scene_event) => {
                self.handle_scene_event(scene_event);
                scene_event.handled = true;
            }
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("touched", &self.touched)
            .field("fog", &self.fog)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_starts_touched() {
        let mut scene = Scene::new();
        assert!(scene.take_touched());
        assert!(!scene.take_touched());
    }

    #[test]
    fn detached_mutation_does_not_touch() {
        let mut scene = Scene::new();
        scene.take_touched();

        let a = scene.create_node();
        let b = scene.create_node();
        scene.add(a, b);
        assert!(!scene.take_touched());

        scene.add_to_root(a);
        assert!(scene.take_touched());

        scene.remove(a, b);
        assert!(scene.take_touched());
    }

    #[test]
    fn removing_absent_child_is_noop() {
        let mut scene = Scene::new();
        let a = scene.create_node();
        let b = scene.create_node();
        scene.add_to_root(a);
        scene.take_touched();

        scene.remove(a, b);
        assert!(!scene.take_touched());
        assert_eq!(scene.parent(a), Some(scene.root()));
    }

    #[test]
    fn sprite_quad_is_shared() {
        let mut scene = Scene::new();
        let first = scene.sprite_geometry();
        let second = scene.sprite_geometry();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
