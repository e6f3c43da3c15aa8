//! Frame clock feeding the per-frame update with elapsed time and delta.

use web_time::{Duration, Instant};

/// Longest frame delta handed to the animation core. Longer gaps (a
/// backgrounded tab, a debugger pause) are clamped so transitions do not
/// jump straight to their end.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// One render-loop callback worth of timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped.
    pub delta: f32,
}

impl FrameTick {
    /// Tick from a host-measured delta in seconds, clamped like
    /// [`FrameTiming::tick`]. Negative or NaN deltas become zero.
    #[must_use]
    pub fn from_host_delta(elapsed: f32, delta: f32) -> Self {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA.as_secs_f32())
        } else {
            0.0
        };
        Self { elapsed, delta }
    }
}

/// Frame clock producing `(elapsed, delta)` pairs with a smoothed FPS
pub struct FrameTiming {
    /// When the clock started
    started: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Start a new clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a new clock at a given instant.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            last_frame: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    // 5% new value, 95% old value
        }
    }

    /// Advance the clock to the current instant.
    pub fn tick(&mut self) -> FrameTick {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTick {
        let raw = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = raw.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        FrameTick {
            elapsed: now.saturating_duration_since(self.started).as_secs_f32(),
            delta: raw.min(MAX_FRAME_DELTA).as_secs_f32(),
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
