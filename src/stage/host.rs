use std::path::Path;
use std::sync::Arc;

use crate::animation::{
    AnimationAction, AnimationClip, AnimationSystem, Binder, LoopMode, sequence_clips,
};
use crate::assets::GltfLoader;
use crate::scene::{Node, NodeHandle, Scene};
use crate::stage::selection::Selection;

/// Names of the sub-entities the character asset is expected to contain.
pub const WAVE_MODEL: &str = "wave_model";
pub const JUMP_UP_MODEL: &str = "jump_up_model";
pub const JUMP_FLOAT_MODEL: &str = "jump_float_model";
pub const JUMP_DOWN_MODEL: &str = "jump_down_model";

/// Typed outcome of a [`StageHost::sync`].
///
/// The default control surface ignores everything but `Idle`/`Playing`
/// (every failure degrades to "nothing visible plays"); the variants exist
/// so the contract is observable and testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// Nothing requested; the anchor is empty.
    Idle,
    /// The requested animation is attached and looping.
    Playing(Selection),
    /// A required named entity is absent from the asset.
    EntityMissing(&'static str),
    /// A required entity exposes no animation clip.
    ClipMissing(&'static str),
    /// The jump phases could not be composed into one sequence.
    SequenceFailed(String),
}

/// The scene host: owns the loaded character graph, one world-origin anchor,
/// and the playback state driven by the current [`Selection`].
///
/// Initialization happens once; load failures leave the host in an empty,
/// non-animating state that every later sync degrades to a no-op against.
pub struct StageHost {
    scene: Scene,
    anchor: NodeHandle,
    asset_root: Option<NodeHandle>,

    wave_model: Option<NodeHandle>,
    jump_up_model: Option<NodeHandle>,
    jump_float_model: Option<NodeHandle>,
    jump_down_model: Option<NodeHandle>,
}

impl StageHost {
    /// Loads the bundled character asset and resolves its named entities.
    ///
    /// On load failure the error is logged and the host comes up with an
    /// empty stage; this is terminal for the host instance, not retried.
    #[must_use]
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut scene = Scene::new();

        let asset_root = match GltfLoader::load(path, &mut scene) {
            Ok(root) => {
                // Keep the loaded graph offstage: only anchored entities
                // are part of the rendered scene.
                scene.detach(root);
                Some(root)
            }
            Err(err) => {
                log::error!("Failed to load stage asset {}: {err}", path.display());
                None
            }
        };

        Self::resolve(scene, asset_root)
    }

    /// Builds a host around an already-populated scene graph.
    ///
    /// `asset_root` marks the loaded hierarchy, `None` standing for a failed
    /// load. Entity resolution follows the same contract as
    /// [`StageHost::from_file`].
    #[must_use]
    pub fn from_scene(scene: Scene, asset_root: Option<NodeHandle>) -> Self {
        Self::resolve(scene, asset_root)
    }

    /// One-time entity resolution and anchor creation.
    ///
    /// The four lookups are independent: a missing name only disables the
    /// animation that needs it.
    fn resolve(mut scene: Scene, asset_root: Option<NodeHandle>) -> Self {
        let wave_model = scene.find_by_name(WAVE_MODEL);
        let jump_up_model = scene.find_by_name(JUMP_UP_MODEL);
        let jump_float_model = scene.find_by_name(JUMP_FLOAT_MODEL);
        let jump_down_model = scene.find_by_name(JUMP_DOWN_MODEL);

        // One anchor, fixed at the world origin for the host's lifetime
        let anchor = scene.add_node(Node::new("world_anchor"));

        Self {
            scene,
            anchor,
            asset_root,
            wave_model,
            jump_up_model,
            jump_float_model,
            jump_down_model,
        }
    }

    /// Applies the current selection to the stage.
    ///
    /// Always detaches all anchor children and stops playback first, then
    /// attaches and plays whatever the selection mandates. Idempotent: the
    /// resulting anchor child set depends only on `selection`, not on
    /// history. Failures leave the anchor empty and are reported in the
    /// returned status only.
    pub fn sync(&mut self, selection: Selection) -> StageStatus {
        self.scene.detach_children(self.anchor);
        self.scene.animation_mixers.remove(&self.anchor);

        match selection {
            Selection::None => StageStatus::Idle,
            Selection::Wave => self.sync_wave(),
            Selection::Jump => self.sync_jump(),
        }
    }

    fn sync_wave(&mut self) -> StageStatus {
        let Some(wave) = self.wave_model else {
            return StageStatus::EntityMissing(WAVE_MODEL);
        };
        let Some(clip) = Binder::first_available_clip(&self.scene, wave) else {
            return StageStatus::ClipMissing(WAVE_MODEL);
        };

        self.scene.attach(wave, self.anchor);
        self.play_looping(wave, clip);
        StageStatus::Playing(Selection::Wave)
    }

    fn sync_jump(&mut self) -> StageStatus {
        // All-or-nothing: verify every phase before touching the anchor
        let phases = [
            (self.jump_up_model, JUMP_UP_MODEL),
            (self.jump_float_model, JUMP_FLOAT_MODEL),
            (self.jump_down_model, JUMP_DOWN_MODEL),
        ];

        let mut entities = Vec::with_capacity(phases.len());
        let mut clips = Vec::with_capacity(phases.len());
        for (handle, name) in phases {
            let Some(entity) = handle else {
                return StageStatus::EntityMissing(name);
            };
            let Some(clip) = Binder::first_available_clip(&self.scene, entity) else {
                return StageStatus::ClipMissing(name);
            };
            entities.push(entity);
            clips.push(clip);
        }

        // Compose up -> float -> down into one sequence
        let sequence = match sequence_clips(&clips) {
            Ok(clip) => Arc::new(clip),
            Err(err) => return StageStatus::SequenceFailed(err.to_string()),
        };

        // Every phase entity loops the full composed sequence; only the
        // tracks inside each entity's subtree bind, so each phase animates
        // during its own segment and holds its pose for the rest.
        for &entity in &entities {
            self.scene.attach(entity, self.anchor);
            self.play_looping(entity, sequence.clone());
        }
        StageStatus::Playing(Selection::Jump)
    }

    fn play_looping(&mut self, entity: NodeHandle, clip: Arc<AnimationClip>) {
        let bindings = Binder::bind(&self.scene, entity, &clip);

        let mut action = AnimationAction::new(clip);
        action.loop_mode = LoopMode::Loop;
        action.bindings = bindings;

        self.scene
            .animation_mixers
            .entry(self.anchor)
            .or_default()
            .add_action(action);
    }

    /// Per-frame advance: samples active actions and refreshes world
    /// matrices.
    pub fn advance(&mut self, dt: f32) {
        AnimationSystem::update(&mut self.scene, dt);
        self.scene.update_matrix_world();
    }

    // ========================================================================
    // Observation
    // ========================================================================

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn anchor(&self) -> NodeHandle {
        self.anchor
    }

    /// Whether the asset graph loaded at construction time.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.asset_root.is_some()
    }

    /// Handles of the entities currently attached to the anchor.
    #[must_use]
    pub fn anchored(&self) -> &[NodeHandle] {
        self.scene.get_node(self.anchor).map_or(&[], Node::children)
    }

    /// Names of the entities currently attached to the anchor.
    #[must_use]
    pub fn anchored_names(&self) -> Vec<&str> {
        self.anchored()
            .iter()
            .filter_map(|&handle| self.scene.get_name(handle))
            .collect()
    }

    /// The actions currently playing on the stage.
    #[must_use]
    pub fn active_actions(&self) -> &[AnimationAction] {
        self.scene
            .animation_mixers
            .get(&self.anchor)
            .map_or(&[], |mixer| mixer.actions())
    }
}
