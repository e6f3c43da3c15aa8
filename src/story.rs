//! The scroll story: every component wired together behind one frame
//! callback.
//!
//! [`ScrollStory`] owns the transform model, the stage controller, the
//! animator, the input normalizer, the hover tilt, the overlay sync and the
//! companion mesh. Hosts feed it raw input events and call
//! [`update`](ScrollStory::update) once per rendered frame, then read the
//! composed [`TransformModel`] (or let [`sync_scene`](ScrollStory::sync_scene)
//! write it into their scene graph).

use glam::Vec2;

use crate::animation::{Transition, TransitionAnimator};
use crate::control::{
    ControlEdit, ControlError, ControlField, ControlSurface, COMPANION_PANEL,
    LOGO_PANEL,
};
use crate::input::{InputEvent, InputNormalizer};
use crate::options::Options;
use crate::presentation::{CompanionModel, PresentationSync};
use crate::scene::{NodeId, SceneHost};
use crate::stage::{AdvanceOutcome, Direction, Stage, StageController};
use crate::tilt::{normalize_pointer, PointerTilt};
use crate::transform::TransformModel;
use crate::util::frame_timing::FrameTick;

/// Owns and sequences every story component.
#[derive(Debug)]
pub struct ScrollStory {
    model: TransformModel,
    controller: StageController,
    animator: TransitionAnimator,
    input: InputNormalizer,
    tilt: PointerTilt,
    presentation: PresentationSync,
    companion: CompanionModel,
    logo_controls: ControlSurface,
    companion_controls: ControlSurface,
    /// Render surface size in pixels, for pointer normalization.
    surface_size: Vec2,
    reduced_motion: bool,
    torn_down: bool,
}

impl ScrollStory {
    /// Story with full motion.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self::with_reduced_motion(options, false)
    }

    /// Story honoring the platform's reduced-motion preference. Read once;
    /// with reduced motion every transition is applied immediately.
    #[must_use]
    pub fn with_reduced_motion(options: &Options, reduced_motion: bool) -> Self {
        let poses = options.stages.poses();
        let transition = Transition::from_options(&options.animation, reduced_motion);
        let reduced_motion = transition.is_instant();
        log::info!(
            "scroll story ready (transition {:.2}s{})",
            transition.duration_secs,
            if reduced_motion { ", reduced motion" } else { "" }
        );

        let mut key_bindings = options.keybindings.clone();
        key_bindings.rebuild_reverse_map();

        Self {
            model: TransformModel::from_pose(&poses.default, options.tilt.sensitivity),
            controller: StageController::new(poses),
            animator: TransitionAnimator::new(
                poses.default,
                transition,
                options.animation.hold_rate,
            ),
            input: InputNormalizer::new(options.input.clone(), key_bindings),
            tilt: PointerTilt::new(&options.tilt),
            presentation: PresentationSync::new(
                &options.overlays,
                options.animation.reveal_threshold,
            ),
            companion: CompanionModel::new(&options.companion),
            logo_controls: ControlSurface::new(LOGO_PANEL),
            companion_controls: ControlSurface::new(COMPANION_PANEL),
            surface_size: Vec2::new(800.0, 800.0),
            reduced_motion,
            torn_down: false,
        }
    }

    /// The composed transform written last frame.
    #[must_use]
    pub fn model(&self) -> &TransformModel {
        &self.model
    }

    /// The last committed stage.
    #[must_use]
    pub fn current_stage(&self) -> Stage {
        self.controller.current_stage()
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.controller.is_in_flight()
    }

    /// Whether transitions are applied without animation.
    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Overlay state.
    #[must_use]
    pub fn presentation(&self) -> &PresentationSync {
        &self.presentation
    }

    /// Companion mesh state.
    #[must_use]
    pub fn companion(&self) -> &CompanionModel {
        &self.companion
    }

    /// Hover tilt state.
    #[must_use]
    pub fn tilt(&self) -> &PointerTilt {
        &self.tilt
    }

    /// The stage controller.
    #[must_use]
    pub fn controller(&self) -> &StageController {
        &self.controller
    }

    /// Manual controls for the main model.
    #[must_use]
    pub fn logo_controls(&self) -> &ControlSurface {
        &self.logo_controls
    }

    /// Manual controls for the companion mesh.
    #[must_use]
    pub fn companion_controls(&self) -> &ControlSurface {
        &self.companion_controls
    }

    /// Whether the host should suppress its default handling of `event`.
    #[must_use]
    pub fn prevents_default(&self, event: &InputEvent) -> bool {
        self.input.prevents_default(event)
    }

    /// Whether the host should suppress its default handling of a key.
    #[must_use]
    pub fn prevents_default_key(&self, code: &str) -> bool {
        self.input.prevents_default_key(code)
    }

    /// Feed a raw input event. Returns what the resulting step did, if the
    /// event produced one.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<AdvanceOutcome> {
        if self.torn_down {
            return None;
        }
        match *event {
            InputEvent::PointerEntered => self.tilt.pointer_entered(),
            InputEvent::PointerMoved { x, y } => {
                if let Some(p) =
                    normalize_pointer(x, y, self.surface_size.x, self.surface_size.y)
                {
                    self.tilt.pointer_moved(p);
                }
            }
            InputEvent::PointerLeft => self.tilt.pointer_left(),
            InputEvent::Resized { width, height } => {
                if width > 0.0 && height > 0.0 {
                    self.surface_size = Vec2::new(width, height);
                }
            }
            InputEvent::Wheel { .. }
            | InputEvent::TouchStart { .. }
            | InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd => {}
        }
        let direction = self
            .input
            .handle_event(event, self.controller.is_in_flight())?;
        Some(self.advance(direction))
    }

    /// Feed a key press (`KeyboardEvent.code` format).
    pub fn handle_key(&mut self, code: &str, repeat: bool) -> Option<AdvanceOutcome> {
        if self.torn_down {
            return None;
        }
        let direction =
            self.input
                .handle_key(code, repeat, self.controller.is_in_flight())?;
        Some(self.advance(direction))
    }

    /// Step one stage in `direction`.
    pub fn advance(&mut self, direction: Direction) -> AdvanceOutcome {
        if self.torn_down {
            return AdvanceOutcome::Rejected;
        }
        let outcome = self.controller.advance(direction, &mut self.animator);
        match outcome {
            AdvanceOutcome::Started(request) => {
                self.presentation.on_transition_started(&request);
            }
            AdvanceOutcome::Completed(request) => {
                self.presentation.on_transition_started(&request);
                self.on_committed(request.to);
                let pose = self.animator.compose(self.tilt.offset(), 0.0);
                self.model.apply_pose(&pose);
            }
            AdvanceOutcome::Busy
            | AdvanceOutcome::AtBoundary
            | AdvanceOutcome::Rejected => {}
        }
        outcome
    }

    /// Run one frame.
    ///
    /// Order: animator tick (progress → overlays), commit, tilt smoothing,
    /// compose into the model (last transform write), fades.
    pub fn update(&mut self, tick: FrameTick) {
        if self.torn_down {
            return;
        }
        let dt = tick.delta;

        self.animator.tick(dt, &mut self.presentation);
        if let Some(request) = self.controller.poll() {
            self.on_committed(request.to);
        }

        let offset = self.tilt.update(dt, self.controller.is_in_flight());
        let pose = self.animator.compose(offset, dt);
        self.model.apply_pose(&pose);

        self.presentation.update(dt);
        self.companion.update(dt);
    }

    /// Apply a manual edit to the main model. Refused during a transition.
    pub fn apply_edit(&mut self, edit: &ControlEdit) -> Result<(), ControlError> {
        if self.controller.is_in_flight() || self.animator.is_active() {
            log::warn!("manual edit ignored: transition in flight");
            return Err(ControlError::TransitionActive);
        }
        if edit.field() == ControlField::Sensitivity {
            self.model.sensitivity = edit.value();
            self.tilt.set_sensitivity(edit.value());
            return Ok(());
        }
        let mut pose = self.animator.current_pose();
        edit.apply_to_pose(&mut pose);
        self.animator
            .set_pose(pose)
            .map_err(|_| ControlError::TransitionActive)?;
        let composed = self.animator.compose(self.tilt.offset(), 0.0);
        self.model.apply_pose(&composed);
        Ok(())
    }

    /// Parse and apply free-form input for the main model.
    pub fn input_edit(&mut self, field: ControlField, text: &str) -> Result<(), ControlError> {
        let edit = self.logo_controls.input_edit(field, text)?;
        self.apply_edit(&edit)
    }

    /// Apply a slider value for the main model, snapped to the panel range.
    pub fn slider_edit(&mut self, field: ControlField, value: f32) -> Result<(), ControlError> {
        let edit = self.logo_controls.slider_edit(field, value)?;
        self.apply_edit(&edit)
    }

    /// Parse and apply free-form input for the companion mesh.
    pub fn companion_input_edit(
        &mut self,
        field: ControlField,
        text: &str,
    ) -> Result<(), ControlError> {
        let edit = self.companion_controls.input_edit(field, text)?;
        self.edit_companion(&edit);
        Ok(())
    }

    /// Apply a slider value for the companion mesh, snapped to its panel
    /// range.
    pub fn companion_slider_edit(
        &mut self,
        field: ControlField,
        value: f32,
    ) -> Result<(), ControlError> {
        let edit = self.companion_controls.slider_edit(field, value)?;
        self.edit_companion(&edit);
        Ok(())
    }

    /// Apply a manual edit to the companion mesh.
    pub fn edit_companion(&mut self, edit: &ControlEdit) {
        self.companion.apply_edit(edit);
    }

    /// Return the companion mesh to its default pose.
    pub fn reset_companion(&mut self) {
        self.companion.reset();
    }

    /// Write the model and companion into a host scene.
    pub fn sync_scene<H: SceneHost + ?Sized>(
        &self,
        host: &mut H,
        model_node: NodeId,
        companion_node: Option<NodeId>,
    ) {
        host.set_pose(model_node, &self.model.pose());
        if let Some(node) = companion_node {
            self.companion.apply_to(host, node);
        }
    }

    /// Stop everything: release input, cancel the in-flight transition and
    /// all fades. Safe to call at any point, including mid-transition, and
    /// more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.input.teardown();
        self.animator.cancel();
        self.controller.teardown();
        self.presentation.teardown();
        self.tilt.reset();
        self.companion.hide();
        log::info!("scroll story torn down at {}", self.current_stage().label());
    }

    fn on_committed(&mut self, stage: Stage) {
        self.presentation.on_stage_committed(stage);
        self.companion.set_stage(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeltaMode;
    use crate::presentation::OverlayPhase;
    use crate::transform::{Axis, Pose};

    const DT: f32 = 1.0 / 60.0;

    fn tick() -> FrameTick {
        FrameTick {
            elapsed: 0.0,
            delta: DT,
        }
    }

    fn story() -> ScrollStory {
        ScrollStory::new(&Options::default())
    }

    fn settle(story: &mut ScrollStory) {
        for _ in 0..600 {
            story.update(tick());
            if !story.is_transitioning() {
                break;
            }
        }
    }

    fn step(story: &mut ScrollStory, direction: Direction) {
        let _ = story.advance(direction);
        settle(story);
    }

    fn pose_at(stage: Stage) -> Pose {
        Options::default().stages.poses().pose_for(stage)
    }

    #[test]
    fn stage_stays_in_range_for_any_sequence() {
        let mut story = ScrollStory::with_reduced_motion(&Options::default(), true);
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let direction = if seed >> 31 == 0 {
                Direction::Forward
            } else {
                Direction::Backward
            };
            let _ = story.advance(direction);
            assert!(story.current_stage() <= Stage::MAX);
        }
        for _ in 0..10 {
            let _ = story.advance(Direction::Backward);
        }
        assert_eq!(story.current_stage(), Stage::Initial);
    }

    #[test]
    fn two_rapid_advances_make_one_transition() {
        let mut story = story();
        assert!(matches!(
            story.advance(Direction::Forward),
            AdvanceOutcome::Started(_)
        ));
        assert_eq!(story.advance(Direction::Forward), AdvanceOutcome::Busy);
        settle(&mut story);
        assert_eq!(story.current_stage(), Stage::State1);
    }

    #[test]
    fn pose_is_path_independent() {
        let mut direct = story();
        step(&mut direct, Direction::Forward);
        step(&mut direct, Direction::Forward);
        step(&mut direct, Direction::Forward);

        let mut wandering = story();
        for direction in [
            Direction::Forward,
            Direction::Backward,
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            Direction::Backward,
        ] {
            step(&mut wandering, direction);
        }

        assert_eq!(direct.current_stage(), Stage::State2);
        assert_eq!(wandering.current_stage(), Stage::State2);
        assert_eq!(direct.model().pose(), pose_at(Stage::State2));
        assert_eq!(wandering.model().pose(), direct.model().pose());
    }

    #[test]
    fn transition_lands_exactly_on_target() {
        let mut story = story();
        assert_eq!(story.model().pose(), pose_at(Stage::Initial));
        let _ = story.advance(Direction::Forward);
        story.update(FrameTick {
            elapsed: 0.0,
            delta: 0.0,
        });
        assert_eq!(story.model().pose(), pose_at(Stage::Initial));
        settle(&mut story);
        assert_eq!(story.model().pose(), pose_at(Stage::State1));
    }

    #[test]
    fn overlay_is_revealed_only_after_threshold_progress() {
        let mut story = story();
        let _ = story.advance(Direction::Forward);
        let mut revealed_before_threshold = false;
        let mut revealed_at = None;
        let mut frame = 0;
        while story.is_transitioning() {
            let progress_before = story.animator.progress().unwrap_or(0.0);
            let was_revealed = story.presentation().is_revealed(Stage::State1);
            if was_revealed && progress_before < 0.8 {
                revealed_before_threshold = true;
            }
            story.update(tick());
            if revealed_at.is_none() && story.presentation().is_revealed(Stage::State1) {
                revealed_at = Some(frame);
                // The frame that revealed it reported progress >= 0.8, and the
                // transition may still be running.
                let reported = story.animator.progress().unwrap_or(1.0);
                assert!(reported >= 0.8);
            }
            frame += 1;
        }
        assert!(!revealed_before_threshold);
        assert!(revealed_at.is_some());
        assert_eq!(story.current_stage(), Stage::State1);
    }

    #[test]
    fn progress_reaches_threshold_before_completion() {
        let mut story = story();
        let _ = story.advance(Direction::Forward);
        let mut saw_threshold_while_running = false;
        while story.is_transitioning() {
            story.update(tick());
            if let Some(p) = story.animator.progress() {
                if p >= 0.8 {
                    saw_threshold_while_running = true;
                }
            }
        }
        assert!(saw_threshold_while_running);
    }

    #[test]
    fn reduced_motion_resolves_without_a_frame() {
        let mut story = ScrollStory::with_reduced_motion(&Options::default(), true);
        assert!(story.reduced_motion());
        let outcome = story.advance(Direction::Forward);
        assert!(matches!(outcome, AdvanceOutcome::Completed(_)));
        assert!(!story.is_transitioning());
        assert_eq!(story.current_stage(), Stage::State1);
        assert_eq!(story.model().pose(), pose_at(Stage::State1));
        assert_eq!(
            story.presentation().phase(Stage::State1),
            OverlayPhase::FadingIn
        );
    }

    #[test]
    fn one_line_mode_wheel_notch_advances_once() {
        let mut story = story();
        let outcome = story.handle_input(&InputEvent::Wheel {
            delta_y: 5.0,
            mode: DeltaMode::Line,
        });
        assert!(matches!(outcome, Some(AdvanceOutcome::Started(_))));
        assert!(story.is_transitioning());
        assert_eq!(story.controller().in_flight().map(|r| r.to), Some(Stage::State1));

        // More wheel input during the transition is dropped.
        let outcome = story.handle_input(&InputEvent::Wheel {
            delta_y: 5.0,
            mode: DeltaMode::Line,
        });
        assert_eq!(outcome, None);
        settle(&mut story);
        assert_eq!(story.current_stage(), Stage::State1);
    }

    #[test]
    fn tilt_returns_to_zero_after_pointer_leaves() {
        let mut story = story();
        let _ = story.handle_input(&InputEvent::Resized {
            width: 400.0,
            height: 200.0,
        });
        let _ = story.handle_input(&InputEvent::PointerEntered);
        let _ = story.handle_input(&InputEvent::PointerMoved { x: 380.0, y: 20.0 });
        for _ in 0..120 {
            story.update(tick());
        }
        let base = pose_at(Stage::Initial).rotation;
        assert!((story.model().rotation - base).length() > 0.05);

        let _ = story.handle_input(&InputEvent::PointerLeft);
        for _ in 0..900 {
            story.update(tick());
        }
        assert!(story.tilt().offset().length() < 1e-4);
        assert!((story.model().rotation - base).length() < 1e-3);
    }

    #[test]
    fn manual_edits_are_locked_during_transitions() {
        let mut story = story();
        story
            .input_edit(ControlField::Position(Axis::X), "1.5")
            .unwrap();
        assert_eq!(story.model().position.x, 1.5);

        assert_eq!(
            story.input_edit(ControlField::Scale, "not a number"),
            Err(ControlError::NotANumber("not a number".to_owned()))
        );
        assert_eq!(story.model().scale, pose_at(Stage::Initial).scale);

        let _ = story.advance(Direction::Forward);
        assert_eq!(
            story.input_edit(ControlField::Scale, "50"),
            Err(ControlError::TransitionActive)
        );
    }

    #[test]
    fn raw_edits_cannot_write_non_finite_values() {
        let mut story = story();
        let before = story.model().pose();
        assert_eq!(
            ControlEdit::new(ControlField::Scale, f32::NAN)
                .and_then(|edit| story.apply_edit(&edit)),
            Err(ControlError::NonFinite)
        );
        assert_eq!(
            story.slider_edit(ControlField::Rotation(Axis::Y), f32::NAN),
            Err(ControlError::NonFinite)
        );
        assert_eq!(
            story.companion_slider_edit(ControlField::Scale, f32::INFINITY),
            Err(ControlError::NonFinite)
        );
        assert_eq!(story.model().pose(), before);
        assert!(story.model().pose().is_valid());
        assert!(story.companion().pose().is_valid());

        let edit = ControlEdit::new(ControlField::Scale, 40.0).unwrap();
        story.apply_edit(&edit).unwrap();
        assert_eq!(story.model().scale, 40.0);
    }

    #[test]
    fn slider_edits_snap_to_panel_ranges() {
        let mut story = story();
        story.slider_edit(ControlField::Scale, 512.0).unwrap();
        assert_eq!(story.model().scale, 200.0);
        story
            .slider_edit(ControlField::Rotation(Axis::X), 400.0)
            .unwrap();
        assert!((story.model().rotation.x - std::f32::consts::PI).abs() < 1e-5);

        story
            .companion_slider_edit(ControlField::Position(Axis::Z), 40.0)
            .unwrap();
        assert_eq!(story.companion().pose().position.z, 15.0);
        story
            .companion_input_edit(ControlField::Position(Axis::Z), "40")
            .unwrap();
        assert_eq!(story.companion().pose().position.z, 40.0);
    }

    #[test]
    fn companion_fades_in_at_its_stage() {
        let mut story = story();
        step(&mut story, Direction::Forward);
        step(&mut story, Direction::Forward);
        step(&mut story, Direction::Forward);
        assert_eq!(story.current_stage(), Stage::State2);
        for _ in 0..120 {
            story.update(tick());
        }
        assert!(story.companion().is_visible());
    }

    #[test]
    fn teardown_mid_transition_releases_everything() {
        let mut story = story();
        let _ = story.handle_input(&InputEvent::Wheel {
            delta_y: 200.0,
            mode: DeltaMode::Pixel,
        });
        story.update(tick());
        story.teardown();
        story.teardown();
        assert!(!story.is_transitioning());
        assert!(story.is_torn_down());
        assert!(!story.prevents_default(&InputEvent::Wheel {
            delta_y: 1.0,
            mode: DeltaMode::Pixel,
        }));
        assert_eq!(story.handle_key("ArrowDown", false), None);
        story.update(tick());
        assert_eq!(story.current_stage(), Stage::Initial);
        assert!(story.presentation().views().is_empty());
    }

    #[test]
    fn sync_scene_writes_model_pose() {
        use crate::scene::SceneGraph;

        let mut graph = SceneGraph::new();
        let logo = graph.add_node("logo", None);
        let ct = graph.add_node("ct_machine", None);
        let mut story = story();
        story.update(tick());
        story.sync_scene(&mut graph, logo, Some(ct));
        assert_eq!(graph.pose(logo), Some(story.model().pose()));
        assert!(!graph.is_visible(ct));
        assert_eq!(graph.pose(ct).map(|p| p.scale), Some(1.0));
    }
}
