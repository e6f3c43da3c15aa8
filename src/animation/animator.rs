//! Pose animator for stage transitions.

use std::fmt;

use glam::Vec3;

use super::completion::{Completion, CompletionSource, CompletionState};
use super::runner::AnimationRun;
use super::transition::Transition;
use crate::transform::Pose;
use crate::util::easing::damp_vec3;

/// Receives eased progress once per animated frame.
pub trait ProgressObserver {
    /// Called with eased progress in `[0, 1]`.
    fn on_progress(&mut self, eased: f32);
}

impl<F: FnMut(f32)> ProgressObserver for F {
    fn on_progress(&mut self, eased: f32) {
        self(eased);
    }
}

/// Returned when a run is requested while another is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRejected;

impl fmt::Display for RunRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a transition is already running")
    }
}

impl std::error::Error for RunRejected {}

/// The run in progress and the completion it will resolve.
#[derive(Debug)]
struct ActiveRun {
    run: AnimationRun,
    source: CompletionSource,
}

/// Interpolates the base pose between stage poses and composes it with the
/// hover tilt.
///
/// At most one run is active. While a run is active the composed rotation is
/// `base + tilt` exactly; once settled, the displayed rotation follows
/// `base + tilt` with slow exponential smoothing so the model drifts rather
/// than snaps when the pointer moves.
#[derive(Debug)]
pub struct TransitionAnimator {
    transition: Transition,
    active: Option<ActiveRun>,
    /// Pose without tilt; the run's interpolated pose while active.
    base: Pose,
    /// Rotation written by the last compose.
    displayed_rotation: Vec3,
    /// Settled follow rate, per second.
    hold_rate: f32,
    /// Write `base + tilt` unsmoothed on the next compose.
    snap_rotation: bool,
}

impl TransitionAnimator {
    /// Animator resting at `initial`.
    #[must_use]
    pub fn new(initial: Pose, transition: Transition, hold_rate: f32) -> Self {
        Self {
            transition,
            active: None,
            base: initial,
            displayed_rotation: initial.rotation,
            hold_rate,
            snap_rotation: true,
        }
    }

    /// Transition used for new runs.
    #[must_use]
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Whether a run is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Current base pose (without tilt).
    #[must_use]
    pub fn current_pose(&self) -> Pose {
        self.base
    }

    /// Eased progress of the active run.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        self.active.as_ref().map(|a| a.run.eased_progress())
    }

    /// Target of the active run.
    #[must_use]
    pub fn target(&self) -> Option<Pose> {
        self.active.as_ref().map(|a| *a.run.target())
    }

    /// Start animating from `start` to `target`.
    ///
    /// With an instant transition the target is applied and the returned
    /// completion is already resolved.
    pub fn run(
        &mut self,
        start: Pose,
        target: Pose,
    ) -> Result<Completion, RunRejected> {
        if self.active.is_some() {
            log::warn!("transition requested while another is running");
            return Err(RunRejected);
        }

        let (completion, source) = Completion::channel();
        if self.transition.is_instant() {
            self.base = target;
            self.snap_rotation = true;
            source.resolve(CompletionState::Completed);
            log::debug!("transition applied instantly");
            return Ok(completion);
        }

        self.base = start;
        self.active = Some(ActiveRun {
            run: AnimationRun::new(
                start,
                target,
                self.transition.duration_secs,
                self.transition.easing,
            ),
            source,
        });
        log::debug!(
            "transition started ({:.2}s)",
            self.transition.duration_secs
        );
        Ok(completion)
    }

    /// Advance the active run by `dt` seconds.
    ///
    /// The observer receives the eased progress every animated frame,
    /// including the final one (`1.0`). On the final frame the base pose is
    /// set to the target exactly and the completion resolves.
    pub fn tick(&mut self, dt: f32, observer: &mut impl ProgressObserver) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let eased = active.run.advance(dt);
        self.base = active.run.pose();
        observer.on_progress(eased);

        if active.run.is_complete() {
            if let Some(done) = self.active.take() {
                self.base = *done.run.target();
                self.snap_rotation = true;
                done.source.resolve(CompletionState::Completed);
            }
        }
    }

    /// Compose the base pose with `tilt` (a rotation offset). Must be the
    /// last transform write of the frame.
    pub fn compose(&mut self, tilt: Vec3, dt: f32) -> Pose {
        let target_rotation = self.base.rotation + tilt;
        if self.active.is_some() || self.snap_rotation {
            self.displayed_rotation = target_rotation;
            self.snap_rotation = false;
        } else {
            self.displayed_rotation = damp_vec3(
                self.displayed_rotation,
                target_rotation,
                self.hold_rate,
                dt,
            );
        }
        Pose {
            rotation: self.displayed_rotation,
            ..self.base
        }
    }

    /// Replace the base pose directly (manual edits). Refused while a run is
    /// active.
    pub fn set_pose(&mut self, pose: Pose) -> Result<(), RunRejected> {
        if self.active.is_some() {
            return Err(RunRejected);
        }
        self.base = pose;
        self.snap_rotation = true;
        Ok(())
    }

    /// Abandon the active run where it is. Its completion resolves as
    /// cancelled.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            log::debug!("transition cancelled");
        }
    }
}
