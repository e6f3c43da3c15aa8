//! A single pose animation run.

use crate::transform::Pose;
use crate::util::easing::EasingFunction;

/// Executes a single animation from a start pose to a target pose.
///
/// Time is accumulated from frame deltas rather than wall-clock instants so
/// the run is fully deterministic under a scripted frame sequence.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    /// Pose at `t = 0`.
    start: Pose,
    /// Pose at `t = 1`.
    target: Pose,
    /// Seconds accumulated so far.
    elapsed: f32,
    /// Total duration in seconds.
    duration: f32,
    /// Easing curve applied to raw progress.
    easing: EasingFunction,
}

impl AnimationRun {
    /// Start a new run.
    #[must_use]
    pub fn new(
        start: Pose,
        target: Pose,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Pose at `t = 0`.
    #[must_use]
    pub fn start(&self) -> &Pose {
        &self.start
    }

    /// Pose at `t = 1`.
    #[must_use]
    pub fn target(&self) -> &Pose {
        &self.target
    }

    /// Total duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Raw normalized progress `t` in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn eased_progress(&self) -> f32 {
        self.easing.evaluate(self.progress())
    }

    /// Whether the run has reached `t = 1`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Accumulate a frame delta and return the new eased progress.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.eased_progress()
    }

    /// Interpolated pose at the current progress.
    ///
    /// Returns the target verbatim once complete.
    #[must_use]
    pub fn pose(&self) -> Pose {
        if self.is_complete() {
            return self.target;
        }
        self.start.lerp(&self.target, self.eased_progress())
    }
}
