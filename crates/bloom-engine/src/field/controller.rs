use std::time::Instant;

use bloom_flora::{generate_field, Catalog, FieldInput, FlowerKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coords::Viewport;
use crate::render::RenderError;

use super::{FieldConfig, FieldUniform, PointBackend, PointBatch};

/// Lifecycle of a [`FieldController`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldState {
    Uninitialized,
    /// Backend acquired and the current generation uploaded.
    Ready,
    Animating,
    Disposed,
    /// No backend could be acquired or it failed. Terminal; draws nothing.
    Unsupported,
}

/// Drives one point field: generation, upload and per-frame draws.
///
/// ```text
/// Uninitialized --attach--> Ready --start--> Animating --dispose--> Disposed
///       \--attach fails--> Unsupported
/// ```
///
/// Points are regenerated only on attach and on a real size change; frames
/// only refresh the uniform block.
pub struct FieldController<B: PointBackend> {
    config: FieldConfig,
    catalog: Catalog,
    flower: FlowerKind,
    rng: StdRng,

    state: FieldState,
    backend: Option<B>,

    size: Viewport,
    center: [f32; 2],
    point_count: usize,
    generation: u64,

    started: Option<Instant>,
    frame_pending: bool,
}

impl<B: PointBackend> FieldController<B> {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: FieldConfig, catalog: Catalog) -> Self {
        let flower = catalog.experiences.flower_for(&config.experience);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!("field: experience '{}' -> {}", config.experience, flower.name());

        Self {
            size: config.default_size,
            config,
            catalog,
            flower,
            rng,
            state: FieldState::Uninitialized,
            backend: None,
            center: [0.0; 2],
            point_count: 0,
            generation: 0,
            started: None,
            frame_pending: false,
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn flower(&self) -> FlowerKind {
        self.flower
    }

    pub fn size(&self) -> Viewport {
        self.size
    }

    /// Points in the current upload.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Incremented on every successful regeneration.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Acquires the backend and uploads the first generation.
    ///
    /// On failure the controller becomes [`FieldState::Unsupported`] and the
    /// error is returned for the host to log; nothing panics. Calling this
    /// twice is ignored.
    pub fn attach<F>(&mut self, size: Viewport, acquire: F) -> Result<(), RenderError>
    where
        F: FnOnce() -> Result<B, RenderError>,
    {
        if self.state != FieldState::Uninitialized {
            log::warn!("field: attach ignored in state {:?}", self.state);
            return Ok(());
        }
        self.size = self.measured_or_default(size);

        match acquire() {
            Ok(backend) => {
                self.backend = Some(backend);
                self.state = FieldState::Ready;
                self.regenerate()
            }
            Err(err) => {
                log::error!("field: {err}; visual disabled");
                self.state = FieldState::Unsupported;
                Err(err)
            }
        }
    }

    /// `Ready -> Animating`; schedules the first frame. Returns whether the
    /// transition happened.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state != FieldState::Ready {
            return false;
        }
        self.started = Some(now);
        self.frame_pending = true;
        self.state = FieldState::Animating;
        log::debug!("field: animating {} points", self.point_count);
        true
    }

    /// Draws the scheduled frame and schedules the next one.
    ///
    /// Returns `false` (and draws nothing) unless animating.
    pub fn frame(&mut self, now: Instant, target: &mut B::Target<'_>) -> bool {
        if self.state != FieldState::Animating || !self.frame_pending {
            return false;
        }
        let (Some(backend), Some(started)) = (self.backend.as_mut(), self.started) else {
            return false;
        };

        self.frame_pending = false;
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        let uniform = FieldUniform::new(self.size, self.center, elapsed, self.config.wind);
        backend.draw(target, &uniform);
        self.frame_pending = true;
        true
    }

    /// Reacts to a container size change.
    ///
    /// Unmeasured sizes use the configured default. The same size as before
    /// is a no-op. Returns whether a regeneration happened.
    pub fn resize(&mut self, size: Viewport) -> bool {
        if matches!(self.state, FieldState::Disposed | FieldState::Unsupported) {
            return false;
        }
        let size = self.measured_or_default(size);
        if size == self.size {
            log::trace!("field: resize to same size ignored");
            return false;
        }
        self.size = size;

        match self.state {
            FieldState::Ready | FieldState::Animating => self.regenerate().is_ok(),
            _ => false,
        }
    }

    /// Follows the size of a live window.
    ///
    /// A zero-area window is hidden (minimized) rather than unmeasured: the
    /// current composition is kept until it reappears. Anything else goes
    /// through [`resize`](Self::resize).
    pub fn follow(&mut self, size: Viewport) -> bool {
        if size.width == 0.0 || size.height == 0.0 {
            log::trace!("field: hidden window, keeping {}x{}", self.size.width, self.size.height);
            return false;
        }
        self.resize(size)
    }

    /// Cancels the scheduled frame and releases the backend.
    ///
    /// Only meaningful while animating; in any other state there is nothing
    /// scheduled and this does nothing. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.state != FieldState::Animating {
            log::debug!("field: dispose in state {:?} is a no-op", self.state);
            return;
        }
        self.frame_pending = false;
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
        self.state = FieldState::Disposed;
        log::debug!("field: disposed");
    }

    fn measured_or_default(&self, size: Viewport) -> Viewport {
        if size.is_valid() {
            size
        } else {
            self.config.default_size
        }
    }

    fn regenerate(&mut self) -> Result<(), RenderError> {
        let Some(backend) = self.backend.as_mut() else {
            return Ok(());
        };

        let input = FieldInput::for_surface(self.size.width, self.size.height);
        let points = generate_field(self.flower, &input, &self.catalog, &mut self.rng);
        let batch = PointBatch::build(&points, &mut self.rng);

        if let Err(err) = backend.upload(&batch) {
            log::error!("field: upload failed: {err}; visual disabled");
            backend.release();
            self.backend = None;
            self.frame_pending = false;
            self.state = FieldState::Unsupported;
            return Err(err);
        }

        self.center = [input.center_x, input.center_y];
        self.point_count = batch.len();
        self.generation += 1;
        log::debug!(
            "field: generation {} uploaded, {} points at {}x{}",
            self.generation,
            self.point_count,
            self.size.width,
            self.size.height,
        );
        Ok(())
    }
}

impl<B: PointBackend> Drop for FieldController<B> {
    fn drop(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PointInstance;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct Log {
        uploads: Vec<Vec<PointInstance>>,
        releases: usize,
    }

    /// Records uploads and releases; draws push the uniform into the target.
    struct Recorder {
        log: Rc<RefCell<Log>>,
        fail_after: Option<usize>,
    }

    impl PointBackend for Recorder {
        type Target<'t> = Vec<FieldUniform>;

        fn upload(&mut self, batch: &PointBatch) -> Result<(), RenderError> {
            let mut log = self.log.borrow_mut();
            if self.fail_after.is_some_and(|n| log.uploads.len() >= n) {
                return Err(RenderError::unsupported("buffer too large"));
            }
            log.uploads.push(batch.instances().to_vec());
            Ok(())
        }

        fn draw(&mut self, target: &mut Vec<FieldUniform>, uniform: &FieldUniform) {
            target.push(*uniform);
        }

        fn release(&mut self) {
            self.log.borrow_mut().releases += 1;
        }
    }

    fn seeded() -> FieldConfig {
        FieldConfig::default().with_seed(Some(7))
    }

    fn attached(config: FieldConfig, size: Viewport) -> (FieldController<Recorder>, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut ctl = FieldController::new(config);
        let backend = Recorder { log: Rc::clone(&log), fail_after: None };
        ctl.attach(size, || Ok(backend)).unwrap();
        (ctl, log)
    }

    // ── attach ────────────────────────────────────────────────────────────

    #[test]
    fn attach_uploads_first_generation() {
        let (ctl, log) = attached(seeded(), Viewport::new(800.0, 600.0));
        assert_eq!(ctl.state(), FieldState::Ready);
        assert_eq!(ctl.generation(), 1);
        assert_eq!(log.borrow().uploads.len(), 1);
        assert_eq!(log.borrow().uploads[0].len(), ctl.point_count());
        assert!(ctl.point_count() > 0);
    }

    #[test]
    fn failed_acquire_is_unsupported_and_inert() {
        let mut ctl: FieldController<Recorder> = FieldController::new(seeded());
        let err = ctl
            .attach(Viewport::new(100.0, 100.0), || Err(RenderError::unsupported("no adapter")))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedSurface { .. }));
        assert_eq!(ctl.state(), FieldState::Unsupported);
        assert!(!ctl.start(Instant::now()));
        assert!(!ctl.resize(Viewport::new(200.0, 200.0)));
        assert!(!ctl.frame(Instant::now(), &mut Vec::new()));
    }

    #[test]
    fn unmeasured_size_uses_default() {
        let (ctl, _) = attached(seeded(), Viewport::new(0.0, 0.0));
        assert_eq!(ctl.size(), Viewport::new(500.0, 600.0));
    }

    #[test]
    fn experience_selects_flower() {
        let (ctl, _) = attached(seeded().with_experience("columbia"), Viewport::new(400.0, 400.0));
        assert_eq!(ctl.flower(), FlowerKind::Rose);
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frames_need_start() {
        let (mut ctl, _) = attached(seeded(), Viewport::new(400.0, 400.0));
        let mut drawn = Vec::new();
        assert!(!ctl.frame(Instant::now(), &mut drawn));
        assert!(drawn.is_empty());
    }

    #[test]
    fn frame_uniform_tracks_time_and_surface() {
        let (mut ctl, _) = attached(seeded().with_wind(0.3), Viewport::new(800.0, 600.0));
        let t0 = Instant::now();
        assert!(ctl.start(t0));
        assert!(ctl.is_frame_pending());

        let mut drawn = Vec::new();
        assert!(ctl.frame(t0 + Duration::from_millis(2500), &mut drawn));
        assert!(ctl.frame(t0 + Duration::from_millis(2600), &mut drawn));
        assert!(ctl.is_frame_pending());

        assert_eq!(drawn.len(), 2);
        let u = drawn[0];
        assert!((u.time - 2.5).abs() < 1e-4);
        assert_eq!(u.wind, 0.3);
        assert_eq!(u.resolution, [800.0, 600.0]);
        assert_eq!(u.center, [400.0, 300.0]);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn identical_resize_does_not_regenerate() {
        let (mut ctl, log) = attached(seeded(), Viewport::new(640.0, 480.0));
        assert!(!ctl.resize(Viewport::new(640.0, 480.0)));
        assert!(!ctl.resize(Viewport::new(640.0, 480.0)));
        assert_eq!(ctl.generation(), 1);
        assert_eq!(log.borrow().uploads.len(), 1);
    }

    #[test]
    fn resize_regenerates_and_keeps_animating() {
        let (mut ctl, log) = attached(seeded(), Viewport::new(640.0, 480.0));
        let t0 = Instant::now();
        ctl.start(t0);

        assert!(ctl.resize(Viewport::new(1024.0, 768.0)));
        assert_eq!(ctl.state(), FieldState::Animating);
        assert_eq!(ctl.generation(), 2);
        assert_eq!(log.borrow().uploads.len(), 2);

        let mut drawn = Vec::new();
        assert!(ctl.frame(t0, &mut drawn));
        assert_eq!(drawn[0].center, [512.0, 384.0]);
    }

    #[test]
    fn minimize_and_restore_keep_the_composition() {
        let (mut ctl, log) = attached(seeded(), Viewport::new(640.0, 480.0));
        ctl.start(Instant::now());

        assert!(!ctl.follow(Viewport::new(0.0, 0.0)));
        assert_eq!(ctl.size(), Viewport::new(640.0, 480.0));
        assert!(!ctl.follow(Viewport::new(640.0, 480.0)));

        assert_eq!(ctl.generation(), 1);
        assert_eq!(log.borrow().uploads.len(), 1);
    }

    #[test]
    fn follow_regenerates_on_a_visible_change() {
        let (mut ctl, _) = attached(seeded(), Viewport::new(640.0, 480.0));
        assert!(ctl.follow(Viewport::new(800.0, 480.0)));
        assert_eq!(ctl.generation(), 2);
    }

    #[test]
    fn failed_upload_disables_the_field() {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut ctl = FieldController::new(seeded());
        let backend = Recorder { log: Rc::clone(&log), fail_after: Some(1) };
        ctl.attach(Viewport::new(300.0, 300.0), || Ok(backend)).unwrap();
        ctl.start(Instant::now());

        assert!(!ctl.resize(Viewport::new(600.0, 600.0)));
        assert_eq!(ctl.state(), FieldState::Unsupported);
        assert_eq!(log.borrow().releases, 1);
    }

    // ── dispose ───────────────────────────────────────────────────────────

    #[test]
    fn dispose_before_animating_is_a_noop() {
        let mut fresh: FieldController<Recorder> = FieldController::new(seeded());
        fresh.dispose();
        assert_eq!(fresh.state(), FieldState::Uninitialized);

        let (mut ready, log) = attached(seeded(), Viewport::new(300.0, 300.0));
        ready.dispose();
        assert_eq!(ready.state(), FieldState::Ready);
        assert_eq!(log.borrow().releases, 0);
    }

    #[test]
    fn dispose_is_idempotent_and_stops_frames() {
        let (mut ctl, log) = attached(seeded(), Viewport::new(300.0, 300.0));
        let t0 = Instant::now();
        ctl.start(t0);
        ctl.dispose();
        ctl.dispose();

        assert_eq!(ctl.state(), FieldState::Disposed);
        assert_eq!(log.borrow().releases, 1);
        assert!(!ctl.is_frame_pending());
        assert!(!ctl.frame(t0, &mut Vec::new()));
        assert!(!ctl.resize(Viewport::new(900.0, 900.0)));

        drop(ctl);
        assert_eq!(log.borrow().releases, 1);
    }

    #[test]
    fn drop_releases_backend() {
        let (ctl, log) = attached(seeded(), Viewport::new(300.0, 300.0));
        drop(ctl);
        assert_eq!(log.borrow().releases, 1);
    }

    // ── determinism ───────────────────────────────────────────────────────

    #[test]
    fn same_seed_same_upload() {
        let (_a, log_a) = attached(seeded(), Viewport::new(500.0, 500.0));
        let (_b, log_b) = attached(seeded(), Viewport::new(500.0, 500.0));
        assert_eq!(log_a.borrow().uploads[0], log_b.borrow().uploads[0]);
    }
}
