//! Transition describes how to animate from the current pose to a new target.

use crate::options::AnimationOptions;
use crate::util::easing::EasingFunction;

/// Describes how to animate from the current pose to a new target.
///
/// Consumers construct transitions via preset constructors:
/// [`snap()`](Self::snap), [`smooth()`](Self::smooth), or
/// [`from_options()`](Self::from_options).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Duration in seconds; zero means the target is applied immediately.
    pub duration_secs: f32,
    /// Easing curve applied to raw progress.
    pub easing: EasingFunction,
}

impl Transition {
    /// Instant snap with no animation.
    #[must_use]
    pub fn snap() -> Self {
        Self {
            duration_secs: 0.0,
            easing: EasingFunction::Linear,
        }
    }

    /// Cubic ease-out over `duration_secs`.
    #[must_use]
    pub fn smooth(duration_secs: f32) -> Self {
        Self {
            duration_secs: duration_secs.max(0.0),
            easing: EasingFunction::CubicOut,
        }
    }

    /// Transition configured by the animation options.
    ///
    /// Reduced motion (from the platform or forced by the options) always
    /// yields [`snap()`](Self::snap).
    #[must_use]
    pub fn from_options(options: &AnimationOptions, reduced_motion: bool) -> Self {
        if reduced_motion || options.reduced_motion {
            return Self::snap();
        }
        Self {
            duration_secs: options.duration_secs.max(0.0),
            easing: options.easing,
        }
    }

    /// Whether runs with this transition finish without a frame.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration_secs <= 0.0
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::smooth(AnimationOptions::default().duration_secs)
    }
}
