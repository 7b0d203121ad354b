/// Single-channel coverage bitmap, row-major, `width * height` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

/// Turns a character into a coverage bitmap at a pixel size.
///
/// Returning `None` means "cannot draw this character"; the atlas leaves
/// that cell empty.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, px: f32) -> Option<Coverage>;
}

impl GlyphRasterizer for fontdue::Font {
    fn rasterize(&self, ch: char, px: f32) -> Option<Coverage> {
        // Index 0 is .notdef; drawing it would fill cells with tofu boxes.
        if self.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, pixels) = fontdue::Font::rasterize(self, ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        Some(Coverage {
            width: metrics.width,
            height: metrics.height,
            pixels,
        })
    }
}

/// Font-free fallback: every character becomes a soft disc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DotRasterizer {
    /// Disc diameter as a fraction of the requested pixel size.
    pub fill: f32,
}

impl Default for DotRasterizer {
    fn default() -> Self {
        Self { fill: 0.6 }
    }
}

impl GlyphRasterizer for DotRasterizer {
    fn rasterize(&self, _ch: char, px: f32) -> Option<Coverage> {
        let diameter = (px * self.fill).round();
        if !diameter.is_finite() || diameter < 1.0 {
            return None;
        }
        let side = diameter as usize;
        let radius = diameter * 0.5;

        let mut pixels = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                // One-pixel antialiased rim.
                let a = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
                pixels.push((a * 255.0).round() as u8);
            }
        }
        Some(Coverage {
            width: side,
            height: side,
            pixels,
        })
    }
}
