//! Assembly of backward and forward traces into a colored voxel scene.
//!
//! The newest backward tick is the time origin. Past frames get negative
//! time coordinates and fade from white toward deep blue over the backward
//! search depth; future frames get positive coordinates and shift from
//! white toward red over the forward depth.
//!
//! Emission is capped at `max_voxels`. The cap is a hard rendering budget:
//! once reached, output stops even in the middle of a frame, so oversized
//! structures are truncated rather than subsampled. Past frames are emitted
//! newest first so truncation eats the distant past before the present.

use chrono::Utc;
use spacetime_types::{Blob, GridDims, Rgb, SceneId, Voxel, VoxelScene};
use tracing::warn;

use crate::backward::{BackwardTrace, DEFAULT_BACKWARD_FRAMES};
use crate::forward::{DEFAULT_FORWARD_FRAMES, ForwardTrace};

/// Default voxel budget per scene.
pub const DEFAULT_MAX_VOXELS: usize = 50_000;

const PAST_HUE: f32 = 220.0;
const FUTURE_HUE: f32 = 0.0;
const SATURATION: f32 = 0.9;
/// Lightness of the furthest past frame.
const PAST_FLOOR: f32 = 0.25;
/// Lightness of the furthest future frame.
const FUTURE_FLOOR: f32 = 0.5;

/// Bounds and color normalization for assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Hard cap on emitted voxels.
    pub max_voxels: usize,
    /// Backward search depth; the past color ramp spans this many ticks.
    pub backward_depth: usize,
    /// Forward search depth; the future color ramp spans this many steps.
    pub forward_depth: usize,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            max_voxels: DEFAULT_MAX_VOXELS,
            backward_depth: DEFAULT_BACKWARD_FRAMES,
            forward_depth: DEFAULT_FORWARD_FRAMES,
        }
    }
}

/// Merge both traces into a single voxel scene.
pub fn assemble(
    backward: &BackwardTrace,
    forward: &ForwardTrace,
    dims: GridDims,
    options: &AssemblyOptions,
) -> VoxelScene {
    let now = backward.now_tick().unwrap_or(0);

    let past = backward.frames.iter().rev().map(|(&tick, blob)| {
        let age = now.saturating_sub(tick);
        let t = 0_i64.saturating_sub(i64::try_from(age).unwrap_or(i64::MAX));
        let color = ramp(PAST_HUE, PAST_FLOOR, age, options.backward_depth);
        (t, color, blob)
    });
    let future = forward.frames.iter().map(|(&step, blob)| {
        let t = i64::try_from(step).unwrap_or(i64::MAX);
        let color = ramp(FUTURE_HUE, FUTURE_FLOOR, step, options.forward_depth);
        (t, color, blob)
    });

    let mut emitter = Emitter::new(dims, options.max_voxels);
    for (t, color, blob) in past.chain(future) {
        if !emitter.emit_frame(blob, t, color) {
            break;
        }
    }

    if emitter.truncated {
        warn!(
            max_voxels = options.max_voxels,
            "Voxel cap reached, scene truncated"
        );
    }

    VoxelScene {
        id: SceneId::new(),
        created_at: Utc::now(),
        dims,
        now_tick: now,
        truncated: emitter.truncated,
        voxels: emitter.voxels,
    }
}

struct Emitter {
    dims: GridDims,
    half_width: i64,
    half_height: i64,
    max_voxels: usize,
    voxels: Vec<Voxel>,
    truncated: bool,
}

impl Emitter {
    fn new(dims: GridDims, max_voxels: usize) -> Self {
        Self {
            dims,
            half_width: i64::try_from(dims.width().checked_div(2).unwrap_or(0)).unwrap_or(0),
            half_height: i64::try_from(dims.height().checked_div(2).unwrap_or(0)).unwrap_or(0),
            max_voxels,
            voxels: Vec::new(),
            truncated: false,
        }
    }

    /// Emit one frame. Returns `false` once the budget is exhausted.
    fn emit_frame(&mut self, blob: &Blob, t: i64, color: Rgb) -> bool {
        for &index in blob {
            if self.voxels.len() >= self.max_voxels {
                self.truncated = true;
                return false;
            }
            let Some((x, y)) = self.dims.coords_of(index) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (i64::try_from(x), i64::try_from(y)) else {
                continue;
            };
            self.voxels.push(Voxel {
                x: x.saturating_sub(self.half_width),
                y: self.half_height.saturating_sub(y),
                t,
                color,
            });
        }
        true
    }
}

/// Color for a frame `distance` ticks from now on a ramp spanning `depth`.
fn ramp(hue: f32, floor: f32, distance: impl TryInto<u32>, depth: usize) -> Rgb {
    let distance = distance.try_into().unwrap_or(u32::MAX);
    let depth = u32::try_from(depth).unwrap_or(u32::MAX).max(1);
    // Both values fit in u32, so the f64 conversion is exact.
    let progress = (f64::from(distance) / f64::from(depth)).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation)]
    let progress = progress as f32;
    let lightness = (floor - 1.0).mul_add(progress, 1.0);
    Rgb::from_hsl(hue, SATURATION, lightness)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::backward::BackwardEnd;
    use crate::forward::ForwardEnd;

    fn dims() -> GridDims {
        GridDims::new(10, 8).unwrap()
    }

    fn blob(cells: &[usize]) -> Blob {
        cells.iter().copied().collect()
    }

    fn traces(past: &[(u64, &[usize])], future: &[(usize, &[usize])]) -> (BackwardTrace, ForwardTrace) {
        let backward = BackwardTrace {
            frames: past.iter().map(|&(t, c)| (t, blob(c))).collect(),
            end: BackwardEnd::HistoryExhausted,
        };
        let forward = ForwardTrace {
            frames: future.iter().map(|&(s, c)| (s, blob(c))).collect(),
            end: ForwardEnd::StepLimit,
        };
        (backward, forward)
    }

    #[test]
    fn positions_are_centered_and_flipped() {
        let (b, f) = traces(&[(5, &[0, 79])], &[]);
        let scene = assemble(&b, &f, dims(), &AssemblyOptions::default());
        assert_eq!(scene.len(), 2);
        let first = scene.voxels[0];
        assert_eq!((first.x, first.y, first.t), (-5, 4, 0));
        let last = scene.voxels[1];
        // Index 79 is (9, 7).
        assert_eq!((last.x, last.y), (4, -3));
        assert_eq!(scene.now_tick, 5);
    }

    #[test]
    fn time_signs_and_single_origin_frame() {
        let (b, f) = traces(
            &[(10, &[1, 2]), (9, &[1]), (8, &[3])],
            &[(1, &[4]), (2, &[5, 6])],
        );
        let scene = assemble(&b, &f, dims(), &AssemblyOptions::default());
        assert_eq!(scene.len(), 7);
        let origin: Vec<&Voxel> = scene.voxels.iter().filter(|v| v.t == 0).collect();
        assert_eq!(origin.len(), 2);
        assert!(scene.voxels[..4].iter().all(|v| v.t <= 0));
        assert!(scene.voxels[4..].iter().all(|v| v.t >= 1));
        assert_eq!(scene.time_span(), Some((-2, 2)));
        assert!(!scene.truncated);
    }

    #[test]
    fn cap_truncates_mid_frame() {
        let big: Vec<usize> = (0..40).collect();
        let (b, f) = traces(&[(3, &big), (2, &big)], &[(1, &big)]);
        let options = AssemblyOptions {
            max_voxels: 55,
            ..AssemblyOptions::default()
        };
        let scene = assemble(&b, &f, dims(), &options);
        assert_eq!(scene.len(), 55);
        assert!(scene.truncated);
        // The present is kept whole; the cut lands inside the previous tick.
        assert_eq!(scene.voxels.iter().filter(|v| v.t == 0).count(), 40);
        assert_eq!(scene.voxels.iter().filter(|v| v.t == -1).count(), 15);
        assert!(scene.voxels.iter().all(|v| v.t <= 0));
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let (b, f) = traces(&[(0, &[1, 2, 3])], &[]);
        let options = AssemblyOptions {
            max_voxels: 3,
            ..AssemblyOptions::default()
        };
        let scene = assemble(&b, &f, dims(), &options);
        assert_eq!(scene.len(), 3);
        assert!(!scene.truncated);
    }

    #[test]
    fn zero_budget_emits_nothing() {
        let (b, f) = traces(&[(0, &[1])], &[(1, &[1])]);
        let options = AssemblyOptions {
            max_voxels: 0,
            ..AssemblyOptions::default()
        };
        let scene = assemble(&b, &f, dims(), &options);
        assert!(scene.is_empty());
        assert!(scene.truncated);
    }

    #[test]
    fn colors_ramp_from_white() {
        let (b, f) = traces(&[(4, &[1]), (0, &[2])], &[(4, &[3])]);
        let options = AssemblyOptions {
            max_voxels: 10,
            backward_depth: 4,
            forward_depth: 4,
        };
        let scene = assemble(&b, &f, dims(), &options);
        let now = scene.voxels[0].color;
        assert!((now.r - 1.0).abs() < 1e-4 && (now.b - 1.0).abs() < 1e-4);

        let past = scene.voxels[1].color;
        assert!(past.b > past.r && past.b > 0.3);
        assert!(past.r < 0.2);

        let future = scene.voxels[2].color;
        assert!(future.r > 0.9 && future.g < 0.1 && future.b < 0.1);
    }

    #[test]
    fn empty_traces_give_empty_scene() {
        let backward = BackwardTrace {
            frames: BTreeMap::new(),
            end: BackwardEnd::HistoryExhausted,
        };
        let forward = ForwardTrace {
            frames: BTreeMap::new(),
            end: ForwardEnd::StepLimit,
        };
        let scene = assemble(&backward, &forward, dims(), &AssemblyOptions::default());
        assert!(scene.is_empty());
        assert_eq!(scene.now_tick, 0);
        assert_eq!(scene.time_span(), None);
    }
}
