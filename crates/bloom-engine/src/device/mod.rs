//! wgpu device and window surface.
//!
//! - `Gpu` owns instance, device, queue and the configured surface
//! - `GpuFrame` is one acquired swapchain image plus its encoder
//! - surface errors are folded into a `SurfaceErrorAction`

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
