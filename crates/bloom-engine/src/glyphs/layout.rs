use bloom_flora::{GLYPH_SLOTS, REFLECTION_GLYPH};

/// Cells per atlas row and column.
pub const ATLAS_GRID: u32 = 16;

/// Default atlas side in pixels (32 px cells).
pub const ATLAS_SIZE: u32 = 512;

/// Character pinned to [`REFLECTION_GLYPH`].
pub const REFLECTION_CHAR: char = '~';

/// The built-in glyph set: the thin mathematical operators U+223E..U+22F1
/// followed by ASCII letters and digits.
pub fn classic_glyphs() -> String {
    ('\u{223E}'..='\u{22F1}')
        .chain('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .collect()
}

/// Which character sits in which atlas cell.
///
/// Cell `i` holds `curated[i % curated.len()]`, except the reflection slot
/// which always holds [`REFLECTION_CHAR`]. An empty curated string leaves
/// every other cell blank.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphAtlasLayout {
    cells: Vec<Option<char>>,
}

impl GlyphAtlasLayout {
    pub fn new(curated: &str) -> Self {
        let chars: Vec<char> = curated.chars().collect();
        let mut cells: Vec<Option<char>> = (0..GLYPH_SLOTS as usize)
            .map(|i| i.checked_rem(chars.len()).and_then(|j| chars.get(j).copied()))
            .collect();
        cells[REFLECTION_GLYPH as usize] = Some(REFLECTION_CHAR);
        Self { cells }
    }

    pub fn classic() -> Self {
        Self::new(&classic_glyphs())
    }

    /// Character in cell `index`, reduced modulo 256 like the shader does.
    pub fn glyph(&self, index: u16) -> Option<char> {
        self.cells[usize::from(index % GLYPH_SLOTS)]
    }

    /// `(column, row)` of cell `index`.
    pub fn cell(index: u16) -> (u32, u32) {
        let i = u32::from(index % GLYPH_SLOTS);
        (i % ATLAS_GRID, i / ATLAS_GRID)
    }

    /// Normalized `[u0, v0, u1, v1]` of cell `index`.
    pub fn uv_rect(index: u16) -> [f32; 4] {
        let (col, row) = Self::cell(index);
        let step = 1.0 / ATLAS_GRID as f32;
        [
            col as f32 * step,
            row as f32 * step,
            (col + 1) as f32 * step,
            (row + 1) as f32 * step,
        ]
    }

    /// Non-empty cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i as u16, c)))
    }
}

impl Default for GlyphAtlasLayout {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_set_size() {
        assert_eq!(classic_glyphs().chars().count(), 180 + 26 + 26 + 10);
    }

    #[test]
    fn reflection_slot_is_always_tilde() {
        let classic = classic_glyphs();
        for curated in ["", "x", "ab", classic.as_str()] {
            let layout = GlyphAtlasLayout::new(curated);
            assert_eq!(layout.glyph(REFLECTION_GLYPH), Some(REFLECTION_CHAR), "{curated:?}");
        }
    }

    #[test]
    fn cells_repeat_the_curated_string() {
        let layout = GlyphAtlasLayout::new("abc");
        assert_eq!(layout.glyph(0), Some('a'));
        assert_eq!(layout.glyph(4), Some('b'));
        assert_eq!(layout.glyph(255), Some('a'));
    }

    #[test]
    fn empty_curated_leaves_only_reflection() {
        let layout = GlyphAtlasLayout::new("");
        let filled: Vec<_> = layout.iter().collect();
        assert_eq!(filled, vec![(REFLECTION_GLYPH, REFLECTION_CHAR)]);
    }

    #[test]
    fn index_wraps_at_256() {
        let layout = GlyphAtlasLayout::classic();
        assert_eq!(layout.glyph(256 + 126), Some(REFLECTION_CHAR));
        assert_eq!(GlyphAtlasLayout::cell(256 + 17), (1, 1));
    }

    #[test]
    fn uv_rect_of_reflection_cell() {
        // 126 = row 7, column 14
        assert_eq!(GlyphAtlasLayout::cell(126), (14, 7));
        let [u0, v0, u1, v1] = GlyphAtlasLayout::uv_rect(126);
        assert_eq!((u0, v0, u1, v1), (14.0 / 16.0, 7.0 / 16.0, 15.0 / 16.0, 8.0 / 16.0));
    }
}
