use std::f32::consts::TAU;

use bloom_flora::{Point, GLYPH_SLOTS};
use bytemuck::{Pod, Zeroable};
use rand::{Rng, RngCore};

/// Generated sizes are in reference units; sprites are drawn this much
/// larger so the glyph inside stays legible.
pub const SIZE_UPLOAD_SCALE: f32 = 4.0;

/// Per-point vertex data (36 bytes):
///
///  offset  0  position [f32; 2]  loc 1
///  offset  8  size     f32       loc 2
///  offset 12  color    [f32; 3]  loc 3
///  offset 24  opacity  f32       loc 4
///  offset 28  phase    f32       loc 5
///  offset 32  glyph    u32       loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub position: [f32; 2],
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub phase: f32,
    pub glyph: u32,
}

impl PointInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // position
        2 => Float32,   // size
        3 => Float32x3, // color
        4 => Float32,   // opacity
        5 => Float32,   // phase
        6 => Uint32     // glyph
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Drops `z`, scales the size and reduces the glyph into the atlas.
    pub fn from_point(point: &Point, phase: f32) -> Self {
        Self {
            position: [point.x, point.y],
            size: point.size * SIZE_UPLOAD_SCALE,
            color: point.color,
            opacity: point.opacity,
            phase,
            glyph: u32::from(point.glyph % GLYPH_SLOTS),
        }
    }
}

/// Everything uploaded for one generation, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBatch {
    instances: Vec<PointInstance>,
}

impl PointBatch {
    /// Builds instances from depth-sorted `points`, drawing one sway phase in
    /// `[0, 2π)` per point.
    pub fn build(points: &[Point], rng: &mut dyn RngCore) -> Self {
        let instances = points
            .iter()
            .map(|p| PointInstance::from_point(p, rng.gen_range(0.0..TAU)))
            .collect();
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[PointInstance] {
        &self.instances
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn point(glyph: u16) -> Point {
        Point { x: 3.0, y: 4.0, z: -1.0, color: [0.1, 0.2, 0.3], size: 2.5, opacity: 0.7, glyph }
    }

    #[test]
    fn instance_layout_is_packed() {
        assert_eq!(std::mem::size_of::<PointInstance>(), 36);
    }

    #[test]
    fn from_point_scales_size_and_wraps_glyph() {
        let inst = PointInstance::from_point(&point(300), 1.0);
        assert_eq!(inst.position, [3.0, 4.0]);
        assert_eq!(inst.size, 10.0);
        assert_eq!(inst.glyph, 44);
        assert_eq!(inst.opacity, 0.7);
    }

    #[test]
    fn phases_cover_a_full_turn() {
        let points = vec![point(1); 500];
        let batch = PointBatch::build(&points, &mut StdRng::seed_from_u64(2));
        assert_eq!(batch.len(), 500);
        assert!(batch.instances().iter().all(|i| (0.0..TAU).contains(&i.phase)));
        assert_eq!(batch.as_bytes().len(), 500 * 36);
    }
}
