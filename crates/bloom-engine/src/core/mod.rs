//! Contracts between the runtime loop and applications.
//!
//! Applications implement [`App`]; the runtime hands them a [`FrameCtx`] per
//! redraw and never exposes its own bookkeeping.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
