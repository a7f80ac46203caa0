use crate::scene::NodeHandle;
use crate::scene::transform::Transform;
use glam::Affine3A;

/// A minimal scene node containing only essential hot data.
///
/// # Design Principles
///
/// - Only keeps data that must be traversed every update (hierarchy,
///   transform and the name used for entity lookup)
/// - Improves CPU cache hit rate by keeping nodes small and contiguous
///
/// # Hierarchy
///
/// Nodes form a tree structure through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root or offstage nodes)
/// - `children`: List of child node handles
///
/// A node that has no parent and is not registered in
/// [`Scene::root_nodes`](crate::scene::Scene) is *offstage*: it stays owned
/// by the arena and re-attachable, but is not reachable from any scene root.
#[derive(Debug, Clone)]
pub struct Node {
    /// Lookup name. Empty for anonymous nodes.
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    /// Transform component (hot data accessed every update)
    pub transform: Transform,

    // === Core State ===
    /// Visibility flag
    pub visible: bool,
}

impl Node {
    /// Creates a new named node with default transform and visibility.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns a reference to the world transformation matrix.
    ///
    /// Updated by [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world)
    /// for every node reachable from a scene root.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
