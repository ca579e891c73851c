//! Voxels and the scene document handed to 3D exporters.
//!
//! A voxel is one grid cell at one point in time. Spatial axes are centered
//! on the grid (`x - width/2`, `height/2 - y`) so the structure sits around
//! the origin of the viewer's scene; the third axis is the signed tick
//! offset from "now".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::GridDims;
use crate::ids::SceneId;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Convert from hue (degrees), saturation and lightness (both `[0, 1]`).
    pub fn from_hsl(hue_degrees: f32, saturation: f32, lightness: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let h = hue_degrees.rem_euclid(360.0) / 360.0;

        if s <= f32::EPSILON {
            return Self { r: l, g: l, b: l };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0f32.mul_add(l, -q);
        Self {
            r: hue_to_channel(p, q, h + 1.0 / 3.0),
            g: hue_to_channel(p, q, h),
            b: hue_to_channel(p, q, h - 1.0 / 3.0),
        }
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

/// One cell of a traced structure placed in spacetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Voxel {
    /// Horizontal position, centered on the grid.
    #[ts(type = "number")]
    pub x: i64,
    /// Vertical position, centered and pointing up.
    #[ts(type = "number")]
    pub y: i64,
    /// Tick offset from "now" (negative = past, positive = future).
    #[ts(type = "number")]
    pub t: i64,
    /// Display color.
    pub color: Rgb,
}

/// An assembled spacetime structure ready for a 3D scene builder.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VoxelScene {
    /// Unique scene identifier.
    pub id: SceneId,
    /// When the scene was assembled.
    pub created_at: DateTime<Utc>,
    /// Dimensions of the grid the voxels were taken from.
    pub dims: GridDims,
    /// Absolute tick treated as `t = 0`.
    #[ts(type = "number")]
    pub now_tick: u64,
    /// Whether the voxel cap cut the structure short.
    pub truncated: bool,
    /// Emitted voxels, past first (newest to oldest), then future.
    pub voxels: Vec<Voxel>,
}

impl VoxelScene {
    /// Number of voxels in the scene.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the scene has no voxels.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Smallest and largest time coordinate present, if any.
    pub fn time_span(&self) -> Option<(i64, i64)> {
        let min = self.voxels.iter().map(|v| v.t).min()?;
        let max = self.voxels.iter().map(|v| v.t).max()?;
        Some((min, max))
    }
}
