//! Point-field lifecycle: generation, upload and the per-frame draw.
//!
//! The state machine lives in [`FieldController`] and talks to the GPU only
//! through [`PointBackend`], so it runs unchanged against a test double.

mod backend;
mod batch;
mod config;
mod controller;
mod uniforms;

pub use backend::PointBackend;
pub use batch::{PointBatch, PointInstance, SIZE_UPLOAD_SCALE};
pub use config::{FieldConfig, DEFAULT_SURFACE};
pub use controller::{FieldController, FieldState};
pub use uniforms::{FieldUniform, DEFAULT_WIND};
