//! Clip sequencing
//!
//! Composes an ordered list of clips into a single clip that plays them
//! back to back. Tracks that drive the same (node, property) pair are
//! merged into one track with time-offset keyframes; a property touched by
//! only some segments simply holds its clamped value outside of them.

use std::sync::Arc;

use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::KeyframeTrack;
use crate::animation::values::Interpolatable;
use crate::errors::{PantomimeError, Result};

/// Composes `clips` into one clip playing them in order.
///
/// Fails on an empty input, and when two segments drive the same
/// (node, property) pair with incompatible keyframe encodings (different
/// interpolation modes, or mismatched value types).
pub fn sequence_clips(clips: &[Arc<AnimationClip>]) -> Result<AnimationClip> {
    if clips.is_empty() {
        return Err(PantomimeError::EmptySequence);
    }

    // Merged tracks keyed by (node name, target), in first-appearance order.
    let mut merged: Vec<Track> = Vec::new();
    let mut offset = 0.0_f32;

    for clip in clips {
        for track in &clip.tracks {
            let key = (&track.meta.node_name, track.meta.target);
            let existing = merged
                .iter()
                .position(|t| (&t.meta.node_name, t.meta.target) == key);

            match existing {
                Some(index) => merge_track(&mut merged[index], track, offset)?,
                None => merged.push(shifted_track(track, offset)),
            }
        }
        offset += clip.duration;
    }

    let name = clips
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join("+");

    Ok(AnimationClip::new(name, merged))
}

/// A copy of `track` with all keyframe times shifted by `offset`.
fn shifted_track(track: &Track, offset: f32) -> Track {
    let data = match &track.data {
        TrackData::Vector3(t) => TrackData::Vector3(shifted_keyframes(t, offset)),
        TrackData::Quaternion(t) => TrackData::Quaternion(shifted_keyframes(t, offset)),
        TrackData::Scalar(t) => TrackData::Scalar(shifted_keyframes(t, offset)),
    };
    Track {
        meta: track.meta.clone(),
        data,
    }
}

fn shifted_keyframes<T: Interpolatable>(track: &KeyframeTrack<T>, offset: f32) -> KeyframeTrack<T> {
    KeyframeTrack::new(
        track.times.iter().map(|t| t + offset).collect(),
        track.values.clone(),
        track.interpolation,
    )
}

/// Appends `from` (shifted by `offset`) onto the already-merged `into`.
fn merge_track(into: &mut Track, from: &Track, offset: f32) -> Result<()> {
    match (&mut into.data, &from.data) {
        (TrackData::Vector3(a), TrackData::Vector3(b)) => append_keyframes(&into.meta, a, b, offset),
        (TrackData::Quaternion(a), TrackData::Quaternion(b)) => {
            append_keyframes(&into.meta, a, b, offset)
        }
        (TrackData::Scalar(a), TrackData::Scalar(b)) => append_keyframes(&into.meta, a, b, offset),
        _ => Err(PantomimeError::IncompatibleClips(format!(
            "track {}/{:?} has mismatched value types across segments",
            into.meta.node_name, into.meta.target
        ))),
    }
}

fn append_keyframes<T: Interpolatable>(
    meta: &TrackMeta,
    into: &mut KeyframeTrack<T>,
    from: &KeyframeTrack<T>,
    offset: f32,
) -> Result<()> {
    if into.interpolation != from.interpolation {
        return Err(PantomimeError::IncompatibleClips(format!(
            "track {}/{:?} mixes {:?} and {:?} interpolation",
            meta.node_name, meta.target, into.interpolation, from.interpolation
        )));
    }

    into.times.extend(from.times.iter().map(|t| t + offset));
    into.values.extend(from.values.iter().cloned());
    Ok(())
}
