use serde::{Deserialize, Serialize};

use super::stages::PoseConfig;
use crate::stage::Stage;

/// The secondary mesh shown alongside the model at selected stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompanionOptions {
    /// Pose the companion starts at and returns to on reset.
    pub default_pose: PoseConfig,
    /// Stages at which the companion fades in.
    pub visible_stages: Vec<Stage>,
    /// Opacity follow speed (per second).
    pub fade_rate: f32,
}

impl Default for CompanionOptions {
    fn default() -> Self {
        Self {
            default_pose: PoseConfig {
                position: [0.0, 0.0, 0.0],
                rotation_deg: [0.0, 0.0, 0.0],
                scale: 1.0,
            },
            visible_stages: vec![Stage::State2],
            fade_rate: 5.0,
        }
    }
}
