//! Scene graph module
//!
//! Manages the entity hierarchy and its components:
//! - Node: scene node (name, parent/child links, transform)
//! - Transform: TRS component with cached local/world matrices
//! - Scene: scene container and hierarchy operations
//! - transform_system: decoupled world-matrix update pass

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use thunderdome::Index;

/// Handle to a node stored in a [`Scene`] arena.
pub type NodeHandle = Index;
