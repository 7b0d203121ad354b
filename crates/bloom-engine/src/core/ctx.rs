use winit::window::{Window, WindowId};

use crate::coords::{ColorRgba, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Inner size in logical pixels.
    pub fn logical_size(&self) -> Viewport {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        Viewport::new(logical.width as f32, logical.height as f32)
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `'a` spans the callback, `'w` is the window borrow held by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
}

impl FrameCtx<'_, '_> {
    /// Clears the surface to `clear`, lets `draw` record into the frame and
    /// presents it.
    ///
    /// A lost or outdated surface skips the frame; only an out-of-memory
    /// surface asks the runtime to exit.
    pub fn render<F>(&mut self, clear: ColorRgba, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        {
            let _clear = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("bloom clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format());

        // The target borrows the encoder; it must be gone before submit.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
