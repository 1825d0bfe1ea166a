//! Transform System
//!
//! World transform resolution for the scene graph, kept apart from
//! [`Scene`](crate::scene::Scene) so it only borrows the node arena.
//!
//! Two entry points share the same per-node refresh step:
//! - [`resolve`] walks only the ancestor path of one node, top-down, so a
//!   query on a leaf never touches unrelated branches.
//! - [`update_hierarchy_iterative`] refreshes a whole subtree once per
//!   frame with an explicit stack.
//!
//! A node is refreshed iff its local matrix changed or its parent's world
//! transform was recomputed after the node last composed against it. Nodes
//! with `transform_auto_update == false` keep their cached value, and their
//! children compose against that value.

use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

fn parent_state(nodes: &SlotMap<NodeHandle, Node>, node: &Node) -> (Mat4, u64) {
    node.parent
        .and_then(|p| nodes.get(p))
        .map_or((Mat4::IDENTITY, 0), |p| (p.world_transform, p.world_version))
}

/// Whether the cached world transform of `handle` is stale.
///
/// Stale handles and nodes with auto update disabled report `false`.
#[must_use]
pub fn should_update(nodes: &SlotMap<NodeHandle, Node>, handle: NodeHandle) -> bool {
    let Some(node) = nodes.get(handle) else {
        return false;
    };
    if !node.transform_auto_update {
        return false;
    }
    let (_, parent_version) = parent_state(nodes, node);
    node.transform.is_dirty()
        || node.transform.version() != node.local_version_seen
        || node.parent_version_seen != parent_version
}

/// Recomposes one node against its parent's cached world transform.
///
/// Returns `true` if the world transform was recomputed. The parent must
/// already be up to date.
fn refresh(nodes: &mut SlotMap<NodeHandle, Node>, handle: NodeHandle) -> bool {
    if !should_update(nodes, handle) {
        return false;
    }
    let Some(node) = nodes.get(handle) else {
        return false;
    };
    let (parent_world, parent_version) = parent_state(nodes, node);

    let Some(node) = nodes.get_mut(handle) else {
        return false;
    };
    let local = node.transform.get();
    node.local_version_seen = node.transform.version();
    node.parent_version_seen = parent_version;
    node.world_transform = parent_world * local;
    node.world_version += 1;

    let world = node.world_transform;
    if let Some(camera) = node.camera_mut() {
        camera.update_view_transform(&world);
    }
    true
}

/// Brings the world transform of `handle` up to date by refreshing the
/// path from its topmost ancestor down to the node itself.
///
/// Returns the resolved world transform, or identity for a stale handle.
pub fn resolve(nodes: &mut SlotMap<NodeHandle, Node>, handle: NodeHandle) -> Mat4 {
    let mut path: Vec<NodeHandle> = Vec::with_capacity(16);
    let mut cursor = Some(handle);
    while let Some(current) = cursor {
        let Some(node) = nodes.get(current) else {
            break;
        };
        path.push(current);
        cursor = node.parent;
    }

    for &current in path.iter().rev() {
        refresh(nodes, current);
    }

    nodes
        .get(handle)
        .map_or(Mat4::IDENTITY, |node| node.world_transform)
}

/// Refreshes every node reachable from `root`, parents before children.
///
/// Uses an explicit stack so deep hierarchies cannot overflow the call
/// stack. Returns the number of nodes whose world transform was recomputed.
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    root: NodeHandle,
) -> usize {
    let mut updated = 0;
    let mut stack: Vec<NodeHandle> = Vec::with_capacity(64);
    stack.push(root);

    while let Some(handle) = stack.pop() {
        if refresh(nodes, handle) {
            updated += 1;
        }

        let Some(node) = nodes.get(handle) else {
            continue;
        };
        // reverse so children pop in insertion order
        stack.extend(node.children.iter().rev().copied());
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn link(nodes: &mut SlotMap<NodeHandle, Node>, parent: NodeHandle, child: NodeHandle) {
        nodes[parent].children.push(child);
        nodes[child].parent = Some(parent);
    }

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::default();
        parent.transform.set_position(Vec3::new(1.0, 0.0, 0.0));
        let parent_handle = nodes.insert(parent);

        let mut child = Node::default();
        child.transform.set_position(Vec3::new(0.0, 1.0, 0.0));
        let child_handle = nodes.insert(child);
        link(&mut nodes, parent_handle, child_handle);

        let updated = update_hierarchy_iterative(&mut nodes, parent_handle);
        assert_eq!(updated, 2);

        let child_world_pos = nodes[child_handle].world_transform.w_axis.truncate();
        assert!(child_world_pos.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5));

        // nothing changed, nothing recomputed
        assert_eq!(update_hierarchy_iterative(&mut nodes, parent_handle), 0);
    }

    #[test]
    fn resolve_only_touches_ancestor_path() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        let left = nodes.insert(Node::default());
        let right = nodes.insert(Node::default());
        link(&mut nodes, root, left);
        link(&mut nodes, root, right);

        resolve(&mut nodes, left);
        assert!(!should_update(&nodes, root));
        assert!(!should_update(&nodes, left));
        assert!(should_update(&nodes, right));
    }

    #[test]
    fn parent_recompute_marks_child_stale() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        let child = nodes.insert(Node::default());
        link(&mut nodes, root, child);
        update_hierarchy_iterative(&mut nodes, root);

        nodes[root].transform.translate_x(2.0);
        resolve(&mut nodes, root);
        assert!(should_update(&nodes, child));
    }

    #[test]
    fn auto_update_off_keeps_cached_value() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let mut node = Node::default();
        node.transform_auto_update = false;
        node.transform.set_position(Vec3::X);
        let handle = nodes.insert(node);

        assert_eq!(resolve(&mut nodes, handle), Mat4::IDENTITY);
    }
}
