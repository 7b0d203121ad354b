use super::layout::{GlyphAtlasLayout, ATLAS_GRID};
use super::raster::{Coverage, GlyphRasterizer};

/// Glyph height as a share of the cell height.
const GLYPH_SCALE: f32 = 0.8;

/// Downward nudge (share of the cell height) so glyphs look centred.
const BASELINE_NUDGE: f32 = 0.05;

/// CPU-side atlas: one coverage byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasImage {
    size: u32,
    cell: u32,
    pixels: Vec<u8>,
    missing: usize,
}

impl AtlasImage {
    /// Rasterizes every cell of `layout`.
    ///
    /// `size` is rounded down to a multiple of the grid (at least one pixel
    /// per cell). Characters the rasterizer cannot draw leave their cell
    /// empty and are counted in [`missing`](Self::missing).
    pub fn bake(layout: &GlyphAtlasLayout, rasterizer: &dyn GlyphRasterizer, size: u32) -> Self {
        let cell = (size / ATLAS_GRID).max(1);
        let size = cell * ATLAS_GRID;
        let px = (cell as f32 * GLYPH_SCALE).floor();

        let mut image = Self {
            size,
            cell,
            pixels: vec![0; (size * size) as usize],
            missing: 0,
        };

        for (index, ch) in layout.iter() {
            match rasterizer.rasterize(ch, px) {
                Some(coverage) => image.blit(index, &coverage),
                None => {
                    log::trace!("atlas: no glyph for {ch:?} (cell {index})");
                    image.missing += 1;
                }
            }
        }

        if image.missing > 0 {
            log::warn!("atlas: {} of 256 cells have no glyph", image.missing);
        }
        log::debug!("atlas baked: {size}x{size}, {cell}px cells, {px}px glyphs");
        image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn cell_size(&self) -> u32 {
        self.cell
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Cells whose character could not be rasterized.
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Sum of coverage inside cell `index`.
    pub fn cell_coverage(&self, index: u16) -> u64 {
        let (x0, y0) = self.cell_origin(index);
        (y0..y0 + self.cell)
            .flat_map(|y| (x0..x0 + self.cell).map(move |x| (x, y)))
            .map(|(x, y)| u64::from(self.pixels[(y * self.size + x) as usize]))
            .sum()
    }

    fn cell_origin(&self, index: u16) -> (u32, u32) {
        let (col, row) = GlyphAtlasLayout::cell(index);
        (col * self.cell, row * self.cell)
    }

    /// Copies `coverage` centred into cell `index`, clipped to the cell.
    fn blit(&mut self, index: u16, coverage: &Coverage) {
        let (x0, y0) = self.cell_origin(index);
        let cell = i64::from(self.cell);
        let nudge = (self.cell as f32 * BASELINE_NUDGE).round() as i64;

        let left = (cell - coverage.width as i64) / 2;
        let top = (cell - coverage.height as i64) / 2 + nudge;

        for (gy, row) in coverage.pixels.chunks(coverage.width.max(1)).enumerate() {
            let cy = top + gy as i64;
            if !(0..cell).contains(&cy) {
                continue;
            }
            for (gx, &value) in row.iter().enumerate() {
                let cx = left + gx as i64;
                if !(0..cell).contains(&cx) {
                    continue;
                }
                let at = ((i64::from(y0) + cy) * i64::from(self.size) + i64::from(x0) + cx) as usize;
                self.pixels[at] = self.pixels[at].max(value);
            }
        }
    }
}
