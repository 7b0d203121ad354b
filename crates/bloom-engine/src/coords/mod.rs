//! Plain geometry and colour values shared by the runtime and renderers.
//!
//! Logical pixels, origin top-left, +X right, +Y down.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
