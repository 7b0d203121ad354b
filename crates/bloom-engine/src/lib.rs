//! Bloom engine crate.
//!
//! Platform and GPU runtime for procedural flower fields: window loop,
//! device, glyph atlas, point-sprite renderer and the field lifecycle that
//! ties them to the generators in `bloom-flora`.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod glyphs;
pub mod field;
