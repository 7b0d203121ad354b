//! GPU rendering.
//!
//! CPU positions are logical pixels, origin top-left, +Y down. Shaders map
//! them to NDC through a resolution uniform.

mod common;
mod ctx;
mod error;
pub mod points;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
pub use points::{PointSpriteRenderer, POINTS_WGSL};
pub use shader::validate_wgsl;
