//! Glyph atlas.
//!
//! 256 characters laid out on a 16x16 grid and rasterized once into a
//! single-channel coverage image. Points address cells by index; the GPU
//! side lives in `render::points`.

mod font;
mod image;
mod layout;
mod raster;

pub use font::{load_font, FontLoadError};
pub use image::AtlasImage;
pub use layout::{classic_glyphs, GlyphAtlasLayout, ATLAS_GRID, ATLAS_SIZE, REFLECTION_CHAR};
pub use raster::{Coverage, DotRasterizer, GlyphRasterizer};
