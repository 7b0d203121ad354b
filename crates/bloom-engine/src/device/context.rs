use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::RenderError;

use super::surface;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// wgpu device bound to one window surface.
///
/// Every acquisition failure is reported as
/// [`RenderError::UnsupportedSurface`]; callers treat that as "draw nothing"
/// rather than as a crash.
pub struct Gpu<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Physical pixels. May be 0x0 while minimized.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            power_preference,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::unsupported(format!("cannot create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::unsupported(format!("no compatible adapter: {e}")))?;

        // Surfaces may be as large as the adapter allows, not just the
        // requested baseline.
        let required_limits = required_limits.using_resolution(adapter.limits());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bloom device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::unsupported(format!("cannot open device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, prefer_srgb)
            .ok_or_else(|| RenderError::unsupported("surface offers no formats"))?;

        let (width, height) =
            surface::surface_extent(size, device.limits().max_texture_dimension_2d);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode: surface::choose_alpha_mode(&caps, alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        let info = adapter.get_info();
        log::info!(
            "gpu ready: {} ({:?}), surface {:?} {}x{}",
            info.name,
            info.backend,
            format,
            config.width,
            config.height,
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next swapchain image and a fresh encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("bloom frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;
        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        surface::map_surface_error(&self.surface, &self.device, &self.config, self.size, err)
    }
}
