use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// Maximum number of frames scanned linearly before falling back to a
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last sampled keyframe so sequential playback is O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    /// For `CubicSpline`, length is `times.len() * 3`
    /// (in-tangent, value, out-tangent per keyframe).
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Stateless sampling: a binary search per call.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        assert!(!self.times.is_empty(), "Track has no keyframes");

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);
        let idx = next_idx.saturating_sub(1);

        self.sample_at_frame(idx, time)
    }

    /// Cursor-accelerated sampling.
    ///
    /// Sequential playback (forward or backward) hits a short linear scan
    /// around the cursor; large jumps (scrubbing, loop reset) fall back to a
    /// binary search.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        assert!(!self.times.is_empty(), "Track has no keyframes");

        let len = self.times.len();
        // Fast path: static data (single keyframe)
        if len == 1 {
            return self.get_value_at(0).clone();
        }

        let i = cursor.last_index;

        // If the cursor is out of bounds (e.g. the clip was switched), reset to 0
        let t_curr = *self.times.get(i).unwrap_or(&self.times[0]);

        let found_index = if time >= t_curr {
            // Case A: normal playback or fast-forward (time increasing)
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                // Last frame: clamp when time passed the end
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }

                // Check interval [times[idx], times[idx+1]);
                // time >= t_curr already holds, so only the right edge matters
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Case B: reverse playback (time decreasing), scan backwards
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;

                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = if let Some(idx) = found_index {
            cursor.last_index = idx;
            idx
        } else {
            // Case C: large jump, global binary search (O(log N))
            let next_idx = self.times.partition_point(|&t| t <= time);
            let idx = next_idx.saturating_sub(1);

            cursor.last_index = idx;
            idx
        };

        self.sample_at_frame(final_index, time)
    }

    /// Unified value accessor.
    /// For Linear/Step the index is used directly; for CubicSpline the value
    /// sits at `index * 3 + 1`.
    fn get_value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // Boundary: no next frame available
        if index >= len - 1 {
            return self.get_value_at(len - 1).clone();
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // Guard against zero-length segments, then clamp for float safety
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.get_value_at(index).clone(),
            InterpolationMode::Linear => {
                let v0 = self.get_value_at(index);
                let v1 = self.get_value_at(next_idx);
                T::interpolate_linear(v0, v1, t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = &self.values[i_prev + 1];
                let out_tangent0 = &self.values[i_prev + 2];
                let in_tangent1 = &self.values[i_next];
                let v1 = &self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}
