use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// Stage transition timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Length of one stage transition in seconds.
    #[schemars(title = "Duration", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub duration_secs: f32,
    /// Eased progress at which the target stage's overlay is revealed.
    #[schemars(title = "Reveal At", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub reveal_threshold: f32,
    /// Easing curve applied to transition progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// Force reduced motion regardless of the platform preference.
    #[schemars(title = "Reduced Motion")]
    pub reduced_motion: bool,
    /// Rate (per second) at which the settled rotation follows the tilt.
    #[schemars(skip)]
    pub hold_rate: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            reveal_threshold: 0.8,
            easing: EasingFunction::CubicOut,
            reduced_motion: false,
            hold_rate: 3.0,
        }
    }
}
