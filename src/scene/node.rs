use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Vec3};

use crate::resources::{InstancedMesh, Mesh, Sprite};
use crate::scene::NodeHandle;
use crate::scene::behavior::NodeBehavior;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::transform::Transform;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identifier. Unlike a [`NodeHandle`] it never gets
/// reused, which makes it suitable as a key for renderer-side caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload that decides what a node is.
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    /// Pure grouping node.
    #[default]
    Generic,
    /// The root of a [`Scene`](crate::scene::Scene).
    Scene,
    Camera(Camera),
    Light(Light),
    Mesh(Mesh),
    InstancedMesh(InstancedMesh),
    Sprite(Sprite),
}

/// Field-less tag of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Generic,
    Scene,
    Camera,
    Light,
    Mesh,
    InstancedMesh,
    Sprite,
}

impl NodeKind {
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Generic => NodeType::Generic,
            NodeKind::Scene => NodeType::Scene,
            NodeKind::Camera(_) => NodeType::Camera,
            NodeKind::Light(_) => NodeType::Light,
            NodeKind::Mesh(_) => NodeType::Mesh,
            NodeKind::InstancedMesh(_) => NodeType::InstancedMesh,
            NodeKind::Sprite(_) => NodeType::Sprite,
        }
    }
}

/// A scene node.
///
/// # Hierarchy
///
/// Nodes live in the [`Scene`](crate::scene::Scene) arena and link to each
/// other through handles:
/// - `parent`: non-owning back-reference, `None` for detached nodes and the
///   scene root
/// - `children`: insertion-ordered owning edges
///
/// Both are only mutated through the scene so the two sides never disagree.
///
/// # World transform
///
/// `world_transform` caches `parent.world * local`. `world_version` counts
/// recomputations; a child remembers the parent version it composed against
/// in `parent_version_seen` (and the local matrix version in
/// `local_version_seen`), so staleness propagates without walking the
/// subtree on every mutation.
pub struct Node {
    id: NodeId,
    pub name: Option<String>,

    pub transform: Transform,
    pub kind: NodeKind,

    /// Up vector used by [`Scene::look_at`](crate::scene::Scene::look_at).
    pub up: Vec3,
    /// When false the world transform is left as is by every update path.
    pub transform_auto_update: bool,
    /// When false the node is never rejected by frustum culling.
    pub frustum_culled: bool,
    /// Invisible nodes are still updated and still receive input.
    pub visible: bool,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub(crate) world_transform: Mat4,
    pub(crate) world_version: u64,
    pub(crate) parent_version_seen: u64,
    pub(crate) local_version_seen: u64,

    pub(crate) attached: bool,
    pub(crate) behavior: Option<Box<dyn NodeBehavior>>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::next(),
            name: None,
            transform: Transform::new(),
            kind,
            up: Vec3::Y,
            transform_auto_update: true,
            frustum_culled: true,
            visible: true,
            parent: None,
            children: Vec::new(),
            world_transform: Mat4::IDENTITY,
            world_version: 0,
            parent_version_seen: 0,
            local_version_seen: 0,
            attached: false,
            behavior: None,
        }
    }

    #[must_use]
    pub fn with_name(kind: NodeKind, name: impl Into<String>) -> Self {
        let mut node = Self::new(kind);
        node.name = Some(name.into());
        node
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Last composed world transform. May be stale; use
    /// [`Scene::world_transform`](crate::scene::Scene::world_transform) for
    /// a resolved value.
    #[inline]
    #[must_use]
    pub fn cached_world_transform(&self) -> &Mat4 {
        &self.world_transform
    }

    #[inline]
    #[must_use]
    pub fn world_version(&self) -> u64 {
        self.world_version
    }

    /// Whether the node has been announced to a scene root and received
    /// `on_attached`.
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[inline]
    #[must_use]
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }

    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    #[must_use]
    pub fn light(&self) -> Option<&Light> {
        match &self.kind {
            NodeKind::Light(light) => Some(light),
            _ => None,
        }
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    #[must_use]
    pub fn instanced_mesh(&self) -> Option<&InstancedMesh> {
        match &self.kind {
            NodeKind::InstancedMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn instanced_mesh_mut(&mut self) -> Option<&mut InstancedMesh> {
        match &mut self.kind {
            NodeKind::InstancedMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    #[must_use]
    pub fn sprite(&self) -> Option<&Sprite> {
        match &self.kind {
            NodeKind::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        match &mut self.kind {
            NodeKind::Sprite(sprite) => Some(sprite),
            _ => None,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(NodeKind::Generic)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &self.node_type())
            .field("visible", &self.visible)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("attached", &self.attached)
            .field("has_behavior", &self.behavior.is_some())
            .finish_non_exhaustive()
    }
}
