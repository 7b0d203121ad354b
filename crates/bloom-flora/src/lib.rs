//! Point-field synthesis for the bloom renderer.
//!
//! Everything here is pure CPU code: palettes, colour gradients and the
//! flower generators that turn a surface size into a depth-sorted list of
//! [`Point`]s. Randomness is always injected so callers (and tests) decide
//! whether a field is reproducible.

pub mod color;
pub mod palette;
pub mod point;
pub mod field;
pub mod lotus;
pub mod rose;

pub use color::{gradient, lerp, Rgb};
pub use field::{generate_field, FieldInput, FlowerKind, PointField, MIN_SCALE};
pub use palette::{Catalog, ExperienceMap, Palette, PaletteTable, Role};
pub use point::{depth_sort, Point, GLYPH_SLOTS, REFLECTION_GLYPH};
