//! glTF loader
//!
//! Synchronous loader for `.gltf` / `.glb` scene files. Builds the node
//! hierarchy (names and transforms) under a fresh asset root and registers
//! the asset's animation clips with the scene. Geometry, materials and
//! textures are not this runtime's concern and are skipped entirely.

use std::fs;
use std::path::Path;

use base64::Engine;
use glam::{Mat4, Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::{PantomimeError, Result};
use crate::scene::{Node, NodeHandle, Scene};

/// Name given to the synthetic root the loaded hierarchy hangs from.
pub const ASSET_ROOT_NAME: &str = "gltf_root";

pub struct GltfLoader;

impl GltfLoader {
    /// Loads a glTF asset into `scene`.
    ///
    /// Returns the handle of the asset root node. The root is registered in
    /// `scene.root_nodes`; callers that want the graph offstage (loaded but
    /// not rendered) can `scene.detach(root)` afterwards.
    pub fn load(path: impl AsRef<Path>, scene: &mut Scene) -> Result<NodeHandle> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PantomimeError::AssetNotFound(path.display().to_string()));
        }

        let gltf = gltf::Gltf::open(path)?;
        let base_path = path.parent().unwrap_or_else(|| Path::new("."));
        let buffers = Self::load_buffers(&gltf, base_path)?;

        // 1. Create all nodes shallow (name + transform, no links yet)
        let mut node_mapping: Vec<NodeHandle> = Vec::new();
        for node in gltf.nodes() {
            node_mapping.push(Self::create_node_shallow(scene, &node));
        }

        // 2. Establish the hierarchy
        let root_handle = scene.create_node_with_name(ASSET_ROOT_NAME);
        scene.root_nodes.push(root_handle);

        for node in gltf.nodes() {
            let parent_handle = node_mapping[node.index()];
            for child in node.children() {
                scene.attach(node_mapping[child.index()], parent_handle);
            }
        }

        // Hang the default scene's top-level nodes off the asset root
        if let Some(default_scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
            for node in default_scene.nodes() {
                scene.attach(node_mapping[node.index()], root_handle);
            }
        }

        // 3. Animation clips, in declaration order
        for clip in Self::load_animations(&gltf, &buffers)? {
            scene.add_clip(clip);
        }

        Ok(root_handle)
    }

    // --- Helpers ---

    fn create_node_shallow(scene: &mut Scene, gltf_node: &gltf::Node) -> NodeHandle {
        let name = gltf_node
            .name()
            .map_or_else(|| format!("Node_{}", gltf_node.index()), String::from);

        let mut node = Node::new(name);
        match gltf_node.transform() {
            gltf::scene::Transform::Matrix { matrix } => {
                node.transform
                    .apply_local_matrix_from_mat4(Mat4::from_cols_array_2d(&matrix));
            }
            gltf::scene::Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => {
                node.transform.position = Vec3::from_array(translation);
                node.transform.rotation = Quat::from_array(rotation);
                node.transform.scale = Vec3::from_array(scale);
            }
        }

        scene.nodes.insert(node)
    }

    fn load_buffers(gltf: &gltf::Gltf, base_path: &Path) -> Result<Vec<Vec<u8>>> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => {
                    if let Some(blob) = gltf.blob.as_deref() {
                        buffer_data.push(blob.to_vec());
                    } else {
                        return Err(PantomimeError::MissingBufferData(
                            "GLB binary chunk".to_string(),
                        ));
                    }
                }
                gltf::buffer::Source::Uri(uri) => {
                    if let Some(encoded) = uri.strip_prefix("data:") {
                        buffer_data.push(Self::decode_data_uri(encoded)?);
                    } else {
                        let buffer_path = base_path.join(uri);
                        let data = fs::read(&buffer_path)?;
                        buffer_data.push(data);
                    }
                }
            }
        }
        Ok(buffer_data)
    }

    /// Decodes the payload of a `data:` URI (media type already stripped).
    fn decode_data_uri(encoded: &str) -> Result<Vec<u8>> {
        let (_media_type, payload) = encoded.split_once(";base64,").ok_or_else(|| {
            PantomimeError::DataUriError("only base64 data URIs are supported".to_string())
        })?;
        Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
    }

    fn load_animations(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<Vec<AnimationClip>> {
        let mut animations = Vec::new();

        for anim in gltf.animations() {
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
                let target = channel.target();
                let gltf_node = target.node();

                // Node name used for binding at play time
                let node_name = gltf_node
                    .name()
                    .map_or_else(|| format!("Node_{}", gltf_node.index()), String::from);

                let times: Vec<f32> = reader
                    .read_inputs()
                    .ok_or_else(|| {
                        PantomimeError::GltfError("animation channel has no input accessor".into())
                    })?
                    .collect();

                let interpolation = match channel.sampler().interpolation() {
                    gltf::animation::Interpolation::Linear => InterpolationMode::Linear,
                    gltf::animation::Interpolation::Step => InterpolationMode::Step,
                    gltf::animation::Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let outputs = reader.read_outputs().ok_or_else(|| {
                    PantomimeError::GltfError("animation channel has no output accessor".into())
                })?;

                let track = match outputs {
                    gltf::animation::util::ReadOutputs::Translations(iter) => Track {
                        meta: TrackMeta {
                            node_name,
                            target: TargetPath::Translation,
                        },
                        data: TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    },
                    gltf::animation::util::ReadOutputs::Rotations(iter) => Track {
                        meta: TrackMeta {
                            node_name,
                            target: TargetPath::Rotation,
                        },
                        data: TrackData::Quaternion(KeyframeTrack::new(
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )),
                    },
                    gltf::animation::util::ReadOutputs::Scales(iter) => Track {
                        meta: TrackMeta {
                            node_name,
                            target: TargetPath::Scale,
                        },
                        data: TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    },
                    // Morph target weights are not supported by this runtime
                    gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => continue,
                };

                tracks.push(track);
            }

            let clip = AnimationClip::new(anim.name().unwrap_or("anim").to_string(), tracks);
            animations.push(clip);
        }

        Ok(animations)
    }
}
