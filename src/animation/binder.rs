use std::sync::Arc;

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// Resolves clip tracks to concrete scene nodes by name.
pub struct Binder;

impl Binder {
    /// Resolves a clip against the subtree rooted at `root`, producing a
    /// binding for every track whose node name is found there. Unresolvable
    /// tracks are silently dropped: playing a clip on an entity only ever
    /// animates that entity's subtree.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_idx, track) in clip.tracks.iter().enumerate() {
            if let Some(node_handle) = find_node_by_name(scene, root, &track.meta.node_name) {
                bindings.push(PropertyBinding {
                    track_index: track_idx,
                    node_handle,
                    target: track.meta.target,
                });
            }
        }

        bindings
    }

    /// Whether the entity at `root` exposes this clip: the clip has at least
    /// one track and every track resolves inside the entity's subtree.
    #[must_use]
    pub fn exposes(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> bool {
        !clip.tracks.is_empty()
            && clip
                .tracks
                .iter()
                .all(|track| find_node_by_name(scene, root, &track.meta.node_name).is_some())
    }

    /// All clips of the scene exposed by the entity at `root`, in asset
    /// declaration order.
    #[must_use]
    pub fn available_clips(scene: &Scene, root: NodeHandle) -> Vec<Arc<AnimationClip>> {
        scene
            .clips
            .iter()
            .filter(|clip| Self::exposes(scene, root, clip))
            .cloned()
            .collect()
    }

    /// The entity's first exposed clip, if any.
    #[must_use]
    pub fn first_available_clip(scene: &Scene, root: NodeHandle) -> Option<Arc<AnimationClip>> {
        scene
            .clips
            .iter()
            .find(|clip| Self::exposes(scene, root, clip))
            .cloned()
    }
}

fn find_node_by_name(scene: &Scene, current: NodeHandle, name: &str) -> Option<NodeHandle> {
    if let Some(node) = scene.get_node(current) {
        if node.name == name {
            return Some(current);
        }
        for &child in node.children() {
            if let Some(found) = find_node_by_name(scene, child, name) {
                return Some(found);
            }
        }
    }
    None
}
