use crate::control::ControlEdit;
use crate::options::CompanionOptions;
use crate::scene::{NodeId, SceneHost};
use crate::stage::Stage;
use crate::transform::Pose;

/// Opacity below which the companion node is hidden outright.
const VISIBILITY_CUTOFF: f32 = 0.01;

/// The secondary mesh: its own manually edited pose plus a stage-driven
/// opacity fade.
#[derive(Debug, Clone)]
pub struct CompanionModel {
    pose: Pose,
    default_pose: Pose,
    visible_stages: Vec<Stage>,
    /// Whether the current stage wants the companion shown.
    wanted: bool,
    opacity: f32,
    fade_rate: f32,
}

impl CompanionModel {
    /// Companion at its default pose, fully transparent.
    #[must_use]
    pub fn new(options: &CompanionOptions) -> Self {
        let default_pose = options.default_pose.to_pose();
        Self {
            pose: default_pose,
            default_pose,
            visible_stages: options.visible_stages.clone(),
            wanted: false,
            opacity: 0.0,
            fade_rate: options.fade_rate.max(0.0),
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Current opacity in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether the node should be drawn at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > VISIBILITY_CUTOFF
    }

    /// Retarget the fade for a committed stage.
    pub fn set_stage(&mut self, stage: Stage) {
        self.wanted = self.visible_stages.contains(&stage);
    }

    /// Ease opacity toward its target.
    pub fn update(&mut self, dt: f32) {
        let target = if self.wanted { 1.0 } else { 0.0 };
        let factor = (dt.max(0.0) * self.fade_rate).min(1.0);
        self.opacity += (target - self.opacity) * factor;
    }

    /// Apply a manual edit. Sensitivity edits are ignored.
    pub fn apply_edit(&mut self, edit: &ControlEdit) {
        edit.apply_to_pose(&mut self.pose);
    }

    /// Return to the default pose.
    pub fn reset(&mut self) {
        self.pose = self.default_pose;
    }

    /// Drop the fade: hidden, not wanted.
    pub fn hide(&mut self) {
        self.wanted = false;
        self.opacity = 0.0;
    }

    /// Write pose, visibility and material opacity into the host.
    pub fn apply_to<H: SceneHost + ?Sized>(&self, host: &mut H, node: NodeId) {
        host.set_pose(node, &self.pose);
        host.set_visible(node, self.is_visible());
        host.set_subtree_opacity(node, self.opacity);
    }
}
