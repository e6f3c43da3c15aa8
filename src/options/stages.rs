use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::stage::StagePoses;
use crate::transform::Pose;

/// A pose as written in option files: rotation in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PoseConfig {
    /// World-space position.
    pub position: [f32; 3],
    /// Euler rotation in degrees.
    pub rotation_deg: [f32; 3],
    /// Uniform scale factor.
    pub scale: f32,
}

impl PoseConfig {
    /// Convert to a runtime pose (rotation in radians).
    #[must_use]
    pub fn to_pose(&self) -> Pose {
        Pose::from_degrees(
            Vec3::from(self.position),
            Vec3::from(self.rotation_deg),
            self.scale,
        )
    }
}

/// Poses shown at each stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageOptions {
    /// Pose for the initial and reset stages.
    pub default_pose: PoseConfig,
    /// Pose for the first presented stage.
    pub state1: PoseConfig,
    /// Pose for the second presented stage.
    pub state2: PoseConfig,
}

impl StageOptions {
    /// Resolve the runtime stage → pose mapping.
    #[must_use]
    pub fn poses(&self) -> StagePoses {
        StagePoses {
            default: self.default_pose.to_pose(),
            state1: self.state1.to_pose(),
            state2: self.state2.to_pose(),
        }
    }
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            default_pose: PoseConfig {
                position: [0.8, -1.9, 9.7],
                rotation_deg: [51.0, 117.0, 13.0],
                scale: 22000.0,
            },
            state1: PoseConfig {
                position: [-2.5, -1.2, 8.0],
                rotation_deg: [20.0, 160.0, 0.0],
                scale: 26000.0,
            },
            state2: PoseConfig {
                position: [2.4, -0.6, 7.5],
                rotation_deg: [35.0, 60.0, -10.0],
                scale: 18000.0,
            },
        }
    }
}
