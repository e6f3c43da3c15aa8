//! The scripted stage sequence and its state machine.
//!
//! Stages form a fixed linear order. Transitions only ever move one step in
//! either direction; the boundaries refuse further motion rather than
//! wrapping.

mod controller;

pub use controller::{AdvanceOutcome, StageController};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::transform::Pose;

/// A named point in the scripted viewing sequence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Starting pose, before any scrolling.
    Initial,
    /// First presented pose.
    State1,
    /// Return to the default pose after the first state.
    Reset1,
    /// Second presented pose.
    State2,
    /// Return to the default pose after the second state.
    Reset2,
}

impl Stage {
    /// All stages in sequence order.
    pub const ALL: [Self; 5] = [
        Self::Initial,
        Self::State1,
        Self::Reset1,
        Self::State2,
        Self::Reset2,
    ];

    /// The last stage of the sequence.
    pub const MAX: Self = Self::Reset2;

    /// Position of this stage in the sequence.
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Stage at a given position, if in range.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    /// The adjacent stage in `direction`, or `None` at a boundary.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Forward => Self::from_ordinal(self.ordinal() + 1),
            Direction::Backward => {
                self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
            }
        }
    }

    /// Whether this stage shows the default pose.
    #[must_use]
    pub fn shows_default_pose(self) -> bool {
        matches!(self, Self::Initial | Self::Reset1 | Self::Reset2)
    }

    /// Short human-readable name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::State1 => "state 1",
            Self::Reset1 => "reset 1",
            Self::State2 => "state 2",
            Self::Reset2 => "reset 2",
        }
    }
}

/// Travel direction of a step through the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward [`Stage::MAX`] (scroll down, swipe up).
    Forward,
    /// Toward [`Stage::Initial`] (scroll up, swipe down).
    Backward,
}

impl Direction {
    /// Direction from the sign of a delta; `None` for zero or NaN.
    #[must_use]
    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Self::Forward)
        } else if value < 0.0 {
            Some(Self::Backward)
        } else {
            None
        }
    }

    /// `+1` for forward, `-1` for backward.
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// A single accepted stage step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Stage the model is leaving.
    pub from: Stage,
    /// Stage the model is heading to.
    pub to: Stage,
    /// Travel direction.
    pub direction: Direction,
}

/// The fixed stage → pose mapping.
///
/// Default-pose stages share one pose; each presented stage has its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagePoses {
    /// Pose for [`Stage::Initial`] and both reset stages.
    pub default: Pose,
    /// Pose for [`Stage::State1`].
    pub state1: Pose,
    /// Pose for [`Stage::State2`].
    pub state2: Pose,
}

impl StagePoses {
    /// Pose shown at `stage`.
    #[must_use]
    pub fn pose_for(&self, stage: Stage) -> Pose {
        match stage {
            Stage::Initial | Stage::Reset1 | Stage::Reset2 => self.default,
            Stage::State1 => self.state1,
            Stage::State2 => self.state2,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn ordinals_follow_sequence() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.ordinal(), i);
            assert_eq!(Stage::from_ordinal(i), Some(*stage));
        }
        assert_eq!(Stage::from_ordinal(Stage::ALL.len()), None);
        assert_eq!(Stage::MAX.ordinal(), Stage::ALL.len() - 1);
    }

    #[test]
    fn step_refuses_boundaries() {
        assert_eq!(Stage::Initial.step(Direction::Backward), None);
        assert_eq!(Stage::MAX.step(Direction::Forward), None);
        assert_eq!(Stage::Initial.step(Direction::Forward), Some(Stage::State1));
        assert_eq!(Stage::State2.step(Direction::Backward), Some(Stage::Reset1));
    }

    #[test]
    fn direction_from_sign() {
        assert_eq!(Direction::from_sign(80.0), Some(Direction::Forward));
        assert_eq!(Direction::from_sign(-0.5), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0.0), None);
        assert_eq!(Direction::from_sign(f32::NAN), None);
        assert_eq!(Direction::Backward.sign(), -1);
    }

    #[test]
    fn pose_mapping_is_total() {
        let poses = StagePoses {
            default: Pose::new(Vec3::ZERO, Vec3::ZERO, 1.0),
            state1: Pose::new(Vec3::X, Vec3::ZERO, 2.0),
            state2: Pose::new(Vec3::Y, Vec3::ZERO, 3.0),
        };
        for stage in Stage::ALL {
            let pose = poses.pose_for(stage);
            if stage.shows_default_pose() {
                assert_eq!(pose, poses.default);
            } else {
                assert_ne!(pose, poses.default);
            }
        }
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::State1).unwrap();
        assert_eq!(json, "\"state1\"");
    }
}
