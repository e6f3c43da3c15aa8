use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hover tilt limits and smoothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tilt", inline)]
#[serde(default)]
pub struct TiltOptions {
    /// Rotation about X at the top/bottom edge, in degrees.
    #[schemars(title = "Max Tilt X", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub max_tilt_x_deg: f32,
    /// Rotation about Y at the left/right edge, in degrees.
    #[schemars(title = "Max Tilt Y", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub max_tilt_y_deg: f32,
    /// Initial sensitivity multiplier.
    #[schemars(title = "Sensitivity", range(min = 0.1, max = 3.0), extend("step" = 0.1))]
    pub sensitivity: f32,
    /// Follow rate (per second) while a transition runs.
    #[schemars(skip)]
    pub active_rate: f32,
    /// Follow rate (per second) while settled.
    #[schemars(skip)]
    pub settled_rate: f32,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            max_tilt_x_deg: 25.0,
            max_tilt_y_deg: 15.0,
            sensitivity: 1.0,
            active_rate: 10.0,
            settled_rate: 3.0,
        }
    }
}
