//! Easing functions for animation interpolation.
//!
//! Transitions use [`EasingFunction::CubicOut`]; continuous follow
//! behaviors (hover tilt, held rotation, fades) use [`damp`], an
//! exponential approach that is independent of frame rate.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out: `1 - (1 - t)^3`.
    #[default]
    CubicOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0], with exact endpoints.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
        }
    }
}

/// Fraction of the remaining distance covered in `dt` seconds when
/// approaching a target at `rate` per second.
///
/// Always in `[0, 1]`; zero for non-positive `dt` or `rate`.
#[inline]
#[must_use]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    (1.0 - (-rate * dt).exp()).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by [`smoothing_factor`].
#[inline]
#[must_use]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_factor(rate, dt)
}

/// Component-wise [`damp`].
#[inline]
#[must_use]
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * smoothing_factor(rate, dt)
}
