/// One acquired swapchain image.
///
/// Hand it back through [`Gpu::submit`](super::Gpu::submit) promptly: while
/// it is alive no further image can be acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
