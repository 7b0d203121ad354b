use std::path::{Path, PathBuf};

use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use bloom_engine::coords::{ColorRgba, Viewport};
use bloom_engine::core::{App as EngineApp, AppControl, FrameCtx};
use bloom_engine::device::GpuInit;
use bloom_engine::field::{FieldConfig, FieldController, FieldState, DEFAULT_SURFACE};
use bloom_engine::glyphs::{
    load_font, AtlasImage, DotRasterizer, GlyphAtlasLayout, GlyphRasterizer, ATLAS_SIZE,
};
use bloom_engine::render::{PointSpriteRenderer, RenderError};
use bloom_engine::window::{Runtime, RuntimeConfig};

/// Searched in order when no `--font` is given.
const SYSTEM_FONTS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Frames between frame-rate log lines.
const STATS_EVERY: u64 = 600;

// ── glyph source ─────────────────────────────────────────────────────────

/// Where the atlas glyphs came from.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphSource {
    Font(PathBuf),
    Dots,
}

/// First font that loads, else soft dots.
///
/// `explicit` is tried before the system list; a bad explicit path is
/// logged and does not stop the search.
fn pick_rasterizer(explicit: Option<&Path>) -> (Box<dyn GlyphRasterizer>, GlyphSource) {
    let candidates = explicit
        .into_iter()
        .map(Path::to_path_buf)
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            if Some(path.as_path()) == explicit {
                log::warn!("font {} is not readable", path.display());
            }
            continue;
        };
        match load_font(&bytes) {
            Ok(font) => return (Box::new(font), GlyphSource::Font(path)),
            Err(err) => log::warn!("font {}: {err}", path.display()),
        }
    }

    log::info!("no usable font; atlas falls back to dots");
    (Box::new(DotRasterizer::default()), GlyphSource::Dots)
}

fn bake_atlas(rasterizer: &dyn GlyphRasterizer, source: &GlyphSource) -> AtlasImage {
    let atlas = AtlasImage::bake(&GlyphAtlasLayout::classic(), rasterizer, ATLAS_SIZE);
    log::info!(
        "atlas baked from {:?}: {}px, {} glyphs missing",
        source,
        atlas.size(),
        atlas.missing(),
    );
    atlas
}

// ── Studio ───────────────────────────────────────────────────────────────

/// Window host builder.
///
/// ```rust,ignore
/// Studio::new()
///     .title("bloom")
///     .field(FieldConfig::default().with_experience("columbia"))
///     .run()?;
/// ```
pub struct Studio {
    title: String,
    size: Viewport,
    font: Option<PathBuf>,
    field: FieldConfig,
    clear: ColorRgba,
}

impl Studio {
    pub fn new() -> Self {
        Self {
            title: "bloom".to_string(),
            size: DEFAULT_SURFACE,
            font: None,
            field: FieldConfig::default(),
            clear: ColorRgba::night(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels. Invalid sizes keep the default.
    pub fn size(mut self, size: Viewport) -> Self {
        if size.is_valid() {
            self.size = size;
        } else {
            log::warn!("ignoring window size {}x{}", size.width, size.height);
        }
        self
    }

    pub fn font(mut self, path: Option<PathBuf>) -> Self {
        self.font = path;
        self
    }

    pub fn field(mut self, config: FieldConfig) -> Self {
        self.field = config;
        self
    }

    /// Colour behind the field.
    pub fn clear(mut self, color: ColorRgba) -> Self {
        self.clear = color;
        self
    }

    /// Bakes the atlas, opens the window and blocks until it closes.
    pub fn run(self) -> Result<()> {
        let (rasterizer, source) = pick_rasterizer(self.font.as_deref());
        let atlas = bake_atlas(rasterizer.as_ref(), &source);

        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(f64::from(self.size.width), f64::from(self.size.height)),
        };
        let state = StudioState {
            field: FieldController::new(self.field.with_default_size(self.size)),
            atlas,
            clear: self.clear,
        };
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

// ── StudioState ──────────────────────────────────────────────────────────

struct StudioState {
    field: FieldController<PointSpriteRenderer>,
    atlas: AtlasImage,
    clear: ColorRgba,
}

impl EngineApp for StudioState {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed) {
            self.field.dispose();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.window.logical_size();
        let time = ctx.time;
        let now = time.now;

        if time.frame_index > 0 && time.frame_index % STATS_EVERY == 0 {
            log::debug!(
                "frame {}: {:.1} fps, {} points",
                time.frame_index,
                1.0 / time.dt,
                self.field.point_count(),
            );
        }
        let field = &mut self.field;
        let atlas = &self.atlas;

        ctx.render(self.clear, |rctx, target| {
            if field.state() == FieldState::Uninitialized {
                // Failure leaves the field Unsupported; the window stays blank.
                if field.attach(size, || PointSpriteRenderer::new(rctx, atlas)).is_ok() {
                    field.start(now);
                }
            } else {
                field.follow(size);
            }
            field.frame(now, target);
        })
    }

    fn on_surface_unavailable(&mut self, window_id: WindowId, err: &RenderError) {
        log::warn!("window {window_id:?}: {err}; the flower field is omitted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_explicit_font_does_not_fail() {
        let (rasterizer, source) = pick_rasterizer(Some(Path::new("/nonexistent/bloom.ttf")));
        // Either a system font or dots; both can draw lowercase latin.
        assert!(rasterizer.rasterize('a', 24.0).is_some());
        assert_ne!(source, GlyphSource::Font(PathBuf::from("/nonexistent/bloom.ttf")));
    }

    #[test]
    fn dot_atlas_has_no_missing_cells() {
        let atlas = bake_atlas(&DotRasterizer::default(), &GlyphSource::Dots);
        assert_eq!(atlas.size(), ATLAS_SIZE);
        assert_eq!(atlas.missing(), 0);
    }

    #[test]
    fn invalid_window_size_keeps_default() {
        let studio = Studio::new().size(Viewport::new(0.0, -5.0));
        assert_eq!(studio.size, DEFAULT_SURFACE);
        let studio = Studio::new().size(Viewport::new(800.0, 400.0));
        assert_eq!(studio.size, Viewport::new(800.0, 400.0));
    }
}
