//! Instanced glyph-sprite renderer for point fields.

mod atlas;
mod renderer;

pub use renderer::PointSpriteRenderer;

/// WGSL source of the point pipeline.
pub const POINTS_WGSL: &str = include_str!("shaders/points.wgsl");
