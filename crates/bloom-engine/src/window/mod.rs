//! Window and event loop.
//!
//! Owns the `winit` event loop and the single window, and binds it to a
//! `Gpu` surface.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
