//! Overlay text synchronized with stage transitions.
//!
//! Each stage may carry an overlay. When a transition starts, whatever is
//! showing fades out and the destination's overlay is armed; it is revealed
//! on the first progress report at or past the reveal threshold, or on commit
//! if the transition finished without progress reports. Fades are timers
//! advanced by the frame delta; starting a new fade replaces the old one.

mod companion;

use std::collections::BTreeMap;

pub use companion::CompanionModel;
use serde::Serialize;

use crate::animation::ProgressObserver;
use crate::options::OverlayOptions;
use crate::stage::{Stage, TransitionRequest};

/// Where an overlay is in its fade cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPhase {
    /// Not shown.
    Hidden,
    /// Opacity rising toward 1.
    FadingIn,
    /// Fully shown.
    Visible,
    /// Opacity falling toward 0.
    FadingOut,
}

impl OverlayPhase {
    /// Whether the overlay has been revealed (and not yet dismissed).
    #[must_use]
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::FadingIn | Self::Visible)
    }
}

#[derive(Debug, Clone)]
struct Overlay {
    text: String,
    phase: OverlayPhase,
    opacity: f32,
}

/// Snapshot of one overlay for host widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView<'a> {
    /// Stage the overlay belongs to.
    pub stage: Stage,
    /// Text to show.
    pub text: &'a str,
    /// Current opacity in `[0, 1]`.
    pub opacity: f32,
    /// Fade phase.
    pub phase: OverlayPhase,
}

/// Overlay visibility keyed to stage and transition progress.
#[derive(Debug, Clone)]
pub struct PresentationSync {
    overlays: BTreeMap<Stage, Overlay>,
    /// Stage whose overlay is waiting for the reveal threshold.
    armed: Option<Stage>,
    reveal_threshold: f32,
    fade_secs: f32,
    active: bool,
}

impl PresentationSync {
    /// Overlays from options, all hidden.
    #[must_use]
    pub fn new(options: &OverlayOptions, reveal_threshold: f32) -> Self {
        let overlays = options
            .texts
            .iter()
            .map(|(stage, text)| {
                (
                    *stage,
                    Overlay {
                        text: text.clone(),
                        phase: OverlayPhase::Hidden,
                        opacity: 0.0,
                    },
                )
            })
            .collect();
        Self {
            overlays,
            armed: None,
            reveal_threshold,
            fade_secs: options.fade_secs.max(0.0),
            active: true,
        }
    }

    /// Stage waiting to be revealed.
    #[must_use]
    pub fn armed(&self) -> Option<Stage> {
        self.armed
    }

    /// Phase of a stage's overlay (`Hidden` if it has none).
    #[must_use]
    pub fn phase(&self, stage: Stage) -> OverlayPhase {
        self.overlays
            .get(&stage)
            .map_or(OverlayPhase::Hidden, |o| o.phase)
    }

    /// Whether a stage's overlay is revealed.
    #[must_use]
    pub fn is_revealed(&self, stage: Stage) -> bool {
        self.phase(stage).is_revealed()
    }

    /// The revealed overlay, if any.
    #[must_use]
    pub fn visible_overlay(&self) -> Option<OverlayView<'_>> {
        self.views().into_iter().find(|v| v.phase.is_revealed())
    }

    /// Every overlay that is not fully hidden.
    #[must_use]
    pub fn views(&self) -> Vec<OverlayView<'_>> {
        self.overlays
            .iter()
            .filter(|(_, o)| o.phase != OverlayPhase::Hidden)
            .map(|(stage, o)| OverlayView {
                stage: *stage,
                text: &o.text,
                opacity: o.opacity,
                phase: o.phase,
            })
            .collect()
    }

    /// A transition started: dismiss what is showing, arm the destination.
    pub fn on_transition_started(&mut self, request: &TransitionRequest) {
        if !self.active {
            return;
        }
        for overlay in self.overlays.values_mut() {
            if overlay.phase.is_revealed() {
                overlay.phase = OverlayPhase::FadingOut;
            }
        }
        self.armed = self.overlays.contains_key(&request.to).then_some(request.to);
    }

    /// The transition to `stage` committed.
    pub fn on_stage_committed(&mut self, stage: Stage) {
        if !self.active {
            return;
        }
        if self.armed == Some(stage) {
            self.reveal(stage);
        }
    }

    /// Advance fade timers.
    pub fn update(&mut self, dt: f32) {
        let step = if self.fade_secs > 0.0 {
            (dt / self.fade_secs).max(0.0)
        } else {
            1.0
        };
        for overlay in self.overlays.values_mut() {
            match overlay.phase {
                OverlayPhase::FadingIn => {
                    overlay.opacity = (overlay.opacity + step).min(1.0);
                    if overlay.opacity >= 1.0 {
                        overlay.phase = OverlayPhase::Visible;
                    }
                }
                OverlayPhase::FadingOut => {
                    overlay.opacity = (overlay.opacity - step).max(0.0);
                    if overlay.opacity <= 0.0 {
                        overlay.phase = OverlayPhase::Hidden;
                    }
                }
                OverlayPhase::Hidden | OverlayPhase::Visible => {}
            }
        }
    }

    /// Cancel all fades and hide everything. Later calls are ignored.
    pub fn teardown(&mut self) {
        self.active = false;
        self.armed = None;
        for overlay in self.overlays.values_mut() {
            overlay.phase = OverlayPhase::Hidden;
            overlay.opacity = 0.0;
        }
    }

    fn reveal(&mut self, stage: Stage) {
        self.armed = None;
        if let Some(overlay) = self.overlays.get_mut(&stage) {
            overlay.phase = OverlayPhase::FadingIn;
            log::debug!("overlay for {} revealed", stage.label());
        }
    }
}

impl ProgressObserver for PresentationSync {
    fn on_progress(&mut self, eased: f32) {
        if !self.active {
            return;
        }
        if let Some(stage) = self.armed {
            if eased >= self.reveal_threshold {
                self.reveal(stage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Direction;

    fn sync() -> PresentationSync {
        PresentationSync::new(&OverlayOptions::default(), 0.8)
    }

    fn request(from: Stage, to: Stage) -> TransitionRequest {
        TransitionRequest {
            from,
            to,
            direction: if to > from {
                Direction::Forward
            } else {
                Direction::Backward
            },
        }
    }

    #[test]
    fn reveals_at_threshold_not_before() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Initial, Stage::State1));
        assert_eq!(p.armed(), Some(Stage::State1));
        p.on_progress(0.5);
        p.on_progress(0.79);
        assert!(!p.is_revealed(Stage::State1));
        p.on_progress(0.8);
        assert!(p.is_revealed(Stage::State1));
        assert_eq!(p.armed(), None);
    }

    #[test]
    fn stage_without_overlay_arms_nothing() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::State1, Stage::Reset1));
        assert_eq!(p.armed(), None);
        p.on_progress(1.0);
        assert!(p.visible_overlay().is_none());
    }

    #[test]
    fn commit_reveals_when_no_progress_was_reported() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Reset1, Stage::State2));
        p.on_stage_committed(Stage::State2);
        assert!(p.is_revealed(Stage::State2));
    }

    #[test]
    fn next_transition_fades_previous_out() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Initial, Stage::State1));
        p.on_progress(1.0);
        p.update(1.0);
        assert_eq!(p.phase(Stage::State1), OverlayPhase::Visible);

        p.on_transition_started(&request(Stage::State1, Stage::Reset1));
        assert_eq!(p.phase(Stage::State1), OverlayPhase::FadingOut);
        p.update(0.25);
        assert_eq!(p.views()[0].opacity, 0.5);
        p.update(0.25);
        assert_eq!(p.phase(Stage::State1), OverlayPhase::Hidden);
        assert!(p.views().is_empty());
    }

    #[test]
    fn fade_in_takes_fade_duration() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Initial, Stage::State1));
        p.on_progress(0.9);
        p.update(0.25);
        let view = p.visible_overlay().unwrap();
        assert_eq!(view.phase, OverlayPhase::FadingIn);
        assert_eq!(view.opacity, 0.5);
        p.update(0.25);
        assert_eq!(p.phase(Stage::State1), OverlayPhase::Visible);
    }

    #[test]
    fn teardown_cancels_pending_fades() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Initial, Stage::State1));
        p.on_progress(0.9);
        p.teardown();
        p.update(1.0);
        assert!(p.views().is_empty());
        p.on_transition_started(&request(Stage::State1, Stage::State2));
        p.on_progress(1.0);
        assert!(p.views().is_empty());
    }

    #[test]
    fn views_serialize_for_hosts() {
        let mut p = sync();
        p.on_transition_started(&request(Stage::Initial, Stage::State1));
        p.on_progress(1.0);
        let json = serde_json::to_value(p.views()).unwrap();
        assert_eq!(json[0]["stage"], "state1");
        assert_eq!(json[0]["phase"], "fading_in");
    }
}
