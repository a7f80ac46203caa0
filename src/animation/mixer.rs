use crate::animation::action::AnimationAction;
use crate::animation::binding::TargetPath;
use crate::animation::clip::TrackData;
use crate::scene::Scene;

/// The set of actions currently driving a subtree.
#[derive(Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: AnimationAction) {
        self.actions.push(action);
    }

    /// Stops and removes all actions.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Advances all actions and writes the sampled values into the scene.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            if action.paused || !action.enabled || action.weight <= 0.0 {
                continue;
            }

            // Split borrows: clip/bindings read-only, cursors mutable
            let AnimationAction {
                clip,
                time,
                bindings,
                track_cursors,
                ..
            } = action;

            for binding in bindings.iter() {
                let track = &clip.tracks[binding.track_index];
                let cursor = &mut track_cursors[binding.track_index];

                match (&track.data, binding.target) {
                    (TrackData::Vector3(t), TargetPath::Translation) => {
                        if let Some(node) = scene.get_node_mut(binding.node_handle) {
                            node.transform.position = t.sample_with_cursor(*time, cursor);
                            node.transform.mark_dirty();
                        }
                    }
                    (TrackData::Vector3(t), TargetPath::Scale) => {
                        if let Some(node) = scene.get_node_mut(binding.node_handle) {
                            node.transform.scale = t.sample_with_cursor(*time, cursor);
                            node.transform.mark_dirty();
                        }
                    }
                    (TrackData::Quaternion(t), TargetPath::Rotation) => {
                        if let Some(node) = scene.get_node_mut(binding.node_handle) {
                            node.transform.rotation = t.sample_with_cursor(*time, cursor);
                            node.transform.mark_dirty();
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
