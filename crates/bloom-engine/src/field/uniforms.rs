use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

/// Wind strength used when the host does not choose one.
pub const DEFAULT_WIND: f32 = 0.08;

/// Matches `FieldUniform` in `points.wgsl` (32 bytes, std140-compatible).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FieldUniform {
    pub resolution: [f32; 2],
    /// Sway pivot: the composition centre.
    pub center: [f32; 2],
    /// Seconds since animation started.
    pub time: f32,
    pub wind: f32,
    pub _pad: [f32; 2],
}

impl FieldUniform {
    pub fn new(resolution: Viewport, center: [f32; 2], time: f32, wind: f32) -> Self {
        Self {
            resolution: [resolution.width.max(1.0), resolution.height.max(1.0)],
            center,
            time,
            wind,
            _pad: [0.0; 2],
        }
    }
}
