use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Thresholds used to turn continuous device input into discrete steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
pub struct InputOptions {
    /// Accumulated wheel distance (pixels) needed for one step.
    #[schemars(title = "Wheel Threshold", range(min = 10.0, max = 400.0), extend("step" = 10.0))]
    pub wheel_threshold: f32,
    /// Pixels per line for line-mode wheel deltas.
    #[schemars(skip)]
    pub line_height: f32,
    /// Vertical swipe distance (pixels) needed for one step.
    #[schemars(title = "Swipe Threshold", range(min = 10.0, max = 400.0), extend("step" = 10.0))]
    pub touch_threshold: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            wheel_threshold: 80.0,
            line_height: 16.0,
            touch_threshold: 80.0,
        }
    }
}
