use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::render::RenderError;

use super::ctx::FrameCtx;

/// Returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub trait App {
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw of each window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// The window opened but no GPU surface could be set up for it.
    ///
    /// The runtime closes the window and exits once this returns.
    fn on_surface_unavailable(&mut self, window_id: WindowId, err: &RenderError) {
        log::warn!("window {window_id:?}: {err}; nothing will be drawn");
    }
}
