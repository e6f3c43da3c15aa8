use super::{Direction, Stage, StagePoses, TransitionRequest};
use crate::animation::{Completion, CompletionState, TransitionAnimator};

/// What an [`StageController::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A transition started; it commits when the animator finishes.
    Started(TransitionRequest),
    /// The transition finished within the call (instant transition).
    Completed(TransitionRequest),
    /// Ignored: another transition is in flight.
    Busy,
    /// Ignored: already at the first or last stage.
    AtBoundary,
    /// The animator refused the run.
    Rejected,
}

impl AdvanceOutcome {
    /// The request that was accepted, if any.
    #[must_use]
    pub fn request(&self) -> Option<TransitionRequest> {
        match self {
            Self::Started(request) | Self::Completed(request) => Some(*request),
            Self::Busy | Self::AtBoundary | Self::Rejected => None,
        }
    }
}

/// A transition waiting on the animator.
#[derive(Debug)]
struct InFlight {
    request: TransitionRequest,
    completion: Completion,
}

/// The stage state machine.
///
/// Owns the current stage and the in-flight transition. The in-flight slot
/// is checked and filled within the same `advance` call, so two advances in
/// a row start at most one transition.
#[derive(Debug)]
pub struct StageController {
    current: Stage,
    poses: StagePoses,
    in_flight: Option<InFlight>,
}

impl StageController {
    /// Controller at [`Stage::Initial`].
    #[must_use]
    pub fn new(poses: StagePoses) -> Self {
        Self {
            current: Stage::Initial,
            poses,
            in_flight: None,
        }
    }

    /// The last committed stage.
    #[must_use]
    pub fn current_stage(&self) -> Stage {
        self.current
    }

    /// Whether a transition is waiting to commit.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight request, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<TransitionRequest> {
        self.in_flight.as_ref().map(|f| f.request)
    }

    /// The stage → pose mapping.
    #[must_use]
    pub fn poses(&self) -> &StagePoses {
        &self.poses
    }

    /// Step one stage in `direction`, animating from the animator's current
    /// pose to the destination stage's pose.
    pub fn advance(
        &mut self,
        direction: Direction,
        animator: &mut TransitionAnimator,
    ) -> AdvanceOutcome {
        if self.in_flight.is_some() {
            return AdvanceOutcome::Busy;
        }
        let Some(next) = self.current.step(direction) else {
            return AdvanceOutcome::AtBoundary;
        };

        let request = TransitionRequest {
            from: self.current,
            to: next,
            direction,
        };
        let target = self.poses.pose_for(next);
        let completion = match animator.run(animator.current_pose(), target) {
            Ok(completion) => completion,
            Err(err) => {
                log::warn!("stage {} → {}: {err}", request.from.label(), next.label());
                return AdvanceOutcome::Rejected;
            }
        };
        log::debug!(
            "stage transition {} → {}",
            request.from.label(),
            next.label()
        );

        if completion.state() == CompletionState::Completed {
            self.commit(request);
            return AdvanceOutcome::Completed(request);
        }
        self.in_flight = Some(InFlight {
            request,
            completion,
        });
        AdvanceOutcome::Started(request)
    }

    /// Check the in-flight completion; commit it if the animator finished.
    ///
    /// Returns the committed request. A cancelled run clears the in-flight
    /// slot without changing the stage.
    pub fn poll(&mut self) -> Option<TransitionRequest> {
        let state = self.in_flight.as_ref()?.completion.state();
        match state {
            CompletionState::Pending => None,
            CompletionState::Completed => {
                let request = self.in_flight.take()?.request;
                self.commit(request);
                Some(request)
            }
            CompletionState::Cancelled => {
                if let Some(flight) = self.in_flight.take() {
                    log::debug!(
                        "transition to {} cancelled",
                        flight.request.to.label()
                    );
                }
                None
            }
        }
    }

    /// Release the in-flight slot.
    pub fn teardown(&mut self) {
        self.in_flight = None;
    }

    fn commit(&mut self, request: TransitionRequest) {
        self.current = request.to;
        log::info!("stage {}", self.current.label());
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::Transition;
    use crate::transform::Pose;

    fn poses() -> StagePoses {
        StagePoses {
            default: Pose::new(Vec3::new(0.8, -1.9, 9.7), Vec3::new(0.9, 2.0, 0.2), 22000.0),
            state1: Pose::new(Vec3::new(-2.5, -1.2, 8.0), Vec3::new(0.3, 2.8, 0.0), 26000.0),
            state2: Pose::new(Vec3::new(2.4, -0.6, 7.5), Vec3::new(0.6, 1.0, -0.2), 18000.0),
        }
    }

    fn setup(transition: Transition) -> (StageController, TransitionAnimator) {
        let poses = poses();
        (
            StageController::new(poses),
            TransitionAnimator::new(poses.default, transition, 3.0),
        )
    }

    fn finish(ctl: &mut StageController, anim: &mut TransitionAnimator) {
        for _ in 0..1000 {
            anim.tick(1.0 / 60.0, &mut |_: f32| {});
            if ctl.poll().is_some() {
                return;
            }
        }
    }

    #[test]
    fn rapid_advances_start_one_transition() {
        let (mut ctl, mut anim) = setup(Transition::smooth(1.2));
        let first = ctl.advance(Direction::Forward, &mut anim);
        let second = ctl.advance(Direction::Forward, &mut anim);
        assert!(matches!(first, AdvanceOutcome::Started(_)));
        assert_eq!(second, AdvanceOutcome::Busy);

        finish(&mut ctl, &mut anim);
        assert_eq!(ctl.current_stage(), Stage::State1);
        assert!(!ctl.is_in_flight());
    }

    #[test]
    fn stage_commits_only_on_completion() {
        let (mut ctl, mut anim) = setup(Transition::smooth(1.0));
        let _ = ctl.advance(Direction::Forward, &mut anim);
        anim.tick(0.5, &mut |_: f32| {});
        assert_eq!(ctl.poll(), None);
        assert_eq!(ctl.current_stage(), Stage::Initial);
        anim.tick(0.5, &mut |_: f32| {});
        assert_eq!(ctl.poll().map(|r| r.to), Some(Stage::State1));
    }

    #[test]
    fn boundaries_are_no_ops() {
        let (mut ctl, mut anim) = setup(Transition::snap());
        assert_eq!(
            ctl.advance(Direction::Backward, &mut anim),
            AdvanceOutcome::AtBoundary
        );
        for _ in 0..10 {
            let _ = ctl.advance(Direction::Forward, &mut anim);
        }
        assert_eq!(ctl.current_stage(), Stage::MAX);
        assert_eq!(
            ctl.advance(Direction::Forward, &mut anim),
            AdvanceOutcome::AtBoundary
        );
    }

    #[test]
    fn instant_transition_commits_in_call() {
        let (mut ctl, mut anim) = setup(Transition::snap());
        let outcome = ctl.advance(Direction::Forward, &mut anim);
        assert!(matches!(outcome, AdvanceOutcome::Completed(_)));
        assert_eq!(ctl.current_stage(), Stage::State1);
        assert_eq!(anim.current_pose(), poses().state1);
        assert!(!ctl.is_in_flight());
    }

    #[test]
    fn pose_depends_only_on_destination() {
        let (mut ctl, mut anim) = setup(Transition::smooth(0.4));
        // Initial → State1 → Reset1 → State2 → Reset1
        for direction in [
            Direction::Forward,
            Direction::Forward,
            Direction::Forward,
            Direction::Backward,
        ] {
            let _ = ctl.advance(direction, &mut anim);
            finish(&mut ctl, &mut anim);
        }
        assert_eq!(ctl.current_stage(), Stage::Reset1);
        assert_eq!(anim.current_pose(), poses().default);
    }

    #[test]
    fn cancelled_run_releases_slot_without_commit() {
        let (mut ctl, mut anim) = setup(Transition::smooth(1.0));
        let _ = ctl.advance(Direction::Forward, &mut anim);
        anim.cancel();
        assert_eq!(ctl.poll(), None);
        assert!(!ctl.is_in_flight());
        assert_eq!(ctl.current_stage(), Stage::Initial);
    }

    #[test]
    fn teardown_releases_slot() {
        let (mut ctl, mut anim) = setup(Transition::smooth(1.0));
        let _ = ctl.advance(Direction::Forward, &mut anim);
        ctl.teardown();
        assert!(!ctl.is_in_flight());
    }
}
