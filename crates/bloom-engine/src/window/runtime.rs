use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::field::DEFAULT_SURFACE;
use crate::time::FrameClock;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "bloom".to_string(),
            initial_size: LogicalSize::new(
                f64::from(DEFAULT_SURFACE.width),
                f64::from(DEFAULT_SURFACE.height),
            ),
        }
    }
}

pub struct Runtime;

impl Runtime {
    /// Opens the window and blocks until it is closed.
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Opens the window and binds a surface to it.
    ///
    /// A window without a usable surface is reported to the app and dropped
    /// again; the runtime then exits.
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let built = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build();

        match built {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("window {id:?}: {err}");
                self.app.on_surface_unavailable(id, &err);
                log::info!("no drawable window; exiting");
                self.request_exit();
            }
        }
        Ok(())
    }

    fn close_window(&mut self) {
        self.entry = None;
        self.request_exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit();
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Fields animate continuously.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.entry.is_none() {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.close_window(),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                let mut app_control = AppControl::Continue;

                // Split borrows so the ouroboros closure does not capture `self`.
                let (app, entry) = (&mut self.app, &mut self.entry);
                if let Some(entry) = entry.as_mut() {
                    entry.with_mut(|fields| {
                        let time = fields.clock.tick();
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                id: window_id,
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                            time,
                        };
                        app_control = app.on_frame(&mut ctx);
                    });
                }

                if app_control == AppControl::Exit {
                    self.request_exit();
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
