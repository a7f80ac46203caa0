use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use thunderdome::Arena;

use crate::animation::clip::AnimationClip;
use crate::animation::mixer::AnimationMixer;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform_system;

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// `Scene` is a pure data layer: it owns the node arena, the hierarchy
/// bookkeeping (`root_nodes`), the animation clips that arrived with a
/// loaded asset, and the mixers currently driving playback.
///
/// Nodes that are neither parented nor registered as roots are *offstage*:
/// still owned by the arena and re-attachable by handle, but ignored by the
/// world-matrix pass. Detaching an entity from an anchor puts it offstage
/// rather than destroying it.
pub struct Scene {
    pub id: u32,

    pub nodes: Arena<Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Asset-level animation data ====
    /// Clips in asset declaration order. Order matters: "first available
    /// clip" queries follow it.
    pub clips: Vec<Arc<AnimationClip>>,

    /// Active mixers, keyed by the subtree root they were bound against.
    pub animation_mixers: HashMap<NodeHandle, AnimationMixer>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),

            nodes: Arena::new(),
            root_nodes: Vec::new(),

            clips: Vec::new(),
            animation_mixers: HashMap::new(),
        }
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Creates an anonymous offstage node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.nodes.insert(Node::default())
    }

    /// Creates a named offstage node.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.nodes.insert(Node::new(name))
    }

    /// Adds a node to the scene as a root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node as a child of `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }

        handle
    }

    // ========================================================================
    // Hierarchy operations
    // ========================================================================

    /// Establishes a parent-child relationship, detaching the child from its
    /// previous parent (or the root list) first.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }

        // 1. Detach from old
        self.unlink(child);

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach!");
            // Restore child to root_nodes so the subtree is not lost
            self.root_nodes.push(child);
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Detaches a node from its parent (or the root list), leaving it
    /// offstage. The node and its subtree stay in the arena.
    pub fn detach(&mut self, handle: NodeHandle) {
        self.unlink(handle);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.transform.mark_dirty();
        }
    }

    /// Detaches every child of `parent`, leaving them offstage.
    /// Idempotent when the child list is already empty.
    pub fn detach_children(&mut self, parent: NodeHandle) {
        let children = match self.nodes.get_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };

        for child in children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
                c.transform.mark_dirty();
            }
        }
    }

    /// Removes a node and its entire subtree from the arena.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        self.unlink(handle);
        self.animation_mixers.remove(&handle);
        self.nodes.remove(handle);
    }

    /// Removes `handle` from its parent's child list or from `root_nodes`,
    /// clearing its parent link.
    fn unlink(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);

        if let Some(p) = parent {
            if let Some(parent_node) = self.nodes.get_mut(p)
                && let Some(pos) = parent_node.children.iter().position(|&c| c == handle)
            {
                parent_node.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&c| c == handle) {
            self.root_nodes.remove(pos);
        }

        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = None;
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.into();
        }
    }

    /// Finds the first node with the given name, in arena slot order
    /// (insertion order for a scene that never removed nodes).
    ///
    /// Offstage nodes are included: an entity parked outside the render
    /// roots can still be found and re-attached.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(handle, _)| handle)
    }

    /// Collects the handles of a subtree in depth-first order, `root` first.
    #[must_use]
    pub fn collect_subtree(&self, root: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                out.push(handle);
                stack.extend(node.children.iter().copied());
            }
        }
        out
    }

    // ========================================================================
    // Animation clips
    // ========================================================================

    /// Registers a clip, preserving declaration order.
    pub fn add_clip(&mut self, clip: AnimationClip) -> Arc<AnimationClip> {
        let clip = Arc::new(clip);
        self.clips.push(clip.clone());
        clip
    }

    // ========================================================================
    // Per-update maintenance
    // ========================================================================

    /// Updates world matrices for the whole scene.
    ///
    /// Must run after animation sampling and before any world-space reads.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &self.root_nodes);
    }

    /// Updates world matrices for a single subtree (offstage subtrees
    /// included).
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}
