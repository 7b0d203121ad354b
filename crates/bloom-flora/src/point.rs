use crate::color::Rgb;

/// Number of glyph slots addressable by [`Point::glyph`].
pub const GLYPH_SLOTS: u16 = 256;

/// Atlas slot reserved for the ripple / reflection glyph.
pub const REFLECTION_GLYPH: u16 = 126;

/// One generated sprite.
///
/// Coordinates are screen pixels (top-left origin, +Y down). `z` only
/// decides paint order and is dropped before upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: Rgb,
    /// Sprite diameter in pixels before GPU scaling.
    pub size: f32,
    pub opacity: f32,
    pub glyph: u16,
}

/// Stable back-to-front ordering by ascending `z`.
///
/// Uses IEEE total ordering, so a NaN depth lands at one end of the list
/// instead of breaking the sort.
pub fn depth_sort(points: &mut [Point]) {
    points.sort_by(|a, b| a.z.total_cmp(&b.z));
}
