use std::time::{Duration, Instant};

/// Timing of one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,

    /// Unclamped wall-clock time of the tick; animations key on this.
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces [`FrameTime`]s.
///
/// `dt` is clamped to `[dt_min, dt_max]` so a debugger pause or a minimized
/// window does not produce a huge step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now(), Duration::from_micros(100), Duration::from_millis(250))
    }

    fn starting_at(origin: Instant, dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: origin,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(origin: Instant) -> FrameClock {
        FrameClock::starting_at(origin, Duration::from_millis(1), Duration::from_millis(100))
    }

    #[test]
    fn dt_is_clamped_both_ways() {
        let t0 = Instant::now();
        let mut c = clock(t0);

        let fast = c.tick_at(t0);
        assert!((fast.dt - 0.001).abs() < 1e-6);

        let slow = c.tick_at(t0 + Duration::from_secs(5));
        assert!((slow.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn now_is_not_clamped() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let ft = c.tick_at(t0 + Duration::from_secs(3));
        assert_eq!(ft.now, t0 + Duration::from_secs(3));
    }

    #[test]
    fn frame_index_counts_ticks() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let a = c.tick_at(t0 + Duration::from_millis(16));
        let b = c.tick_at(t0 + Duration::from_millis(32));
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
    }
}
