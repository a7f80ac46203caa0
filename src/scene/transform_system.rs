//! Transform system
//!
//! Hierarchical world-matrix propagation, decoupled from `Scene` to avoid
//! borrow conflicts: it only needs the node arena and a list of roots.
//! Uses an explicit stack instead of recursion so deep hierarchies cannot
//! overflow the call stack.

use glam::Affine3A;
use thunderdome::Arena;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for every node reachable from `roots`.
///
/// A node's world matrix is recomputed when its own local matrix changed or
/// when an ancestor's world matrix changed this pass.
pub fn update_hierarchy(nodes: &mut Arena<Node>, roots: &[NodeHandle]) {
    for &root in roots {
        update_subtree(nodes, root);
    }
}

/// Updates world matrices for the subtree rooted at `root`.
///
/// The root's parent world matrix (identity if the root is unparented) is
/// read once; offstage subtrees can therefore be updated in isolation.
pub fn update_subtree(nodes: &mut Arena<Node>, root: NodeHandle) {
    let parent_world = nodes
        .get(root)
        .and_then(|n| n.parent)
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    // (handle, parent world matrix, parent changed this pass)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = vec![(root, parent_world, false)];

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let changed = local_changed || parent_changed;

        if changed {
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);
        }

        let world = node.transform.world_matrix;
        for &child in &node.children {
            stack.push((child, world, changed));
        }
    }
}
