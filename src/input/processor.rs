//! Converts raw device input into discrete stage steps.
//!
//! The `InputNormalizer` owns all transient input state (wheel accumulator,
//! touch anchor, viewport height) and the key-binding map. It is the only
//! thing between raw window events and the stage controller's `advance`.

use super::event::{DeltaMode, InputEvent};
use super::keyboard::ScrollAction;
use crate::options::{InputOptions, KeybindingOptions};
use crate::stage::Direction;

/// Converts wheel, touch and key input into [`Direction`] steps.
///
/// Input that arrives while a transition is in flight is dropped rather than
/// queued: the wheel accumulator is cleared and the touch anchor follows the
/// finger, so nothing carries over into the next step.
///
/// # Usage
///
/// ```ignore
/// if let Some(direction) = normalizer.handle_event(&event, in_flight) {
///     controller.advance(direction, &mut animator);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    /// Thresholds and line height.
    options: InputOptions,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
    /// Wheel distance accumulated toward the next step, in pixels.
    wheel_accumulator: f32,
    /// Y position the current swipe is measured from.
    touch_anchor: Option<f32>,
    /// Viewport height used for page-mode wheel deltas.
    viewport_height: f32,
    /// Cleared on teardown; an inactive normalizer ignores everything.
    active: bool,
}

impl InputNormalizer {
    /// Create a normalizer with the given thresholds and bindings.
    #[must_use]
    pub fn new(options: InputOptions, key_bindings: KeybindingOptions) -> Self {
        Self {
            options,
            key_bindings,
            wheel_accumulator: 0.0,
            touch_anchor: None,
            viewport_height: 800.0,
            active: true,
        }
    }

    /// Wheel distance accumulated so far, in pixels.
    #[must_use]
    pub fn wheel_accumulator(&self) -> f32 {
        self.wheel_accumulator
    }

    /// Whether the normalizer is still consuming input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Process a raw input event and return zero or one steps.
    ///
    /// `transitioning` is whether a stage transition is currently in flight.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        transitioning: bool,
    ) -> Option<Direction> {
        if !self.active {
            return None;
        }
        match *event {
            InputEvent::Wheel { delta_y, mode } => {
                self.handle_wheel(delta_y, mode, transitioning)
            }
            InputEvent::TouchStart { y } => {
                self.touch_anchor = Some(y);
                None
            }
            InputEvent::TouchMove { y } => self.handle_touch_move(y, transitioning),
            InputEvent::TouchEnd => {
                self.touch_anchor = None;
                None
            }
            InputEvent::Resized { height, .. } => {
                if height > 0.0 {
                    self.viewport_height = height;
                }
                None
            }
            InputEvent::PointerEntered
            | InputEvent::PointerMoved { .. }
            | InputEvent::PointerLeft => None,
        }
    }

    /// Look up a key press and return the step it requests, if bound.
    ///
    /// Auto-repeat presses are ignored so each physical press moves at most
    /// one stage.
    pub fn handle_key(
        &mut self,
        code: &str,
        repeat: bool,
        transitioning: bool,
    ) -> Option<Direction> {
        if !self.active || repeat || transitioning {
            return None;
        }
        self.key_bindings.lookup(code).map(ScrollAction::direction)
    }

    /// Whether the host's default handling of `event` (page scroll, touch
    /// panning) should be suppressed.
    #[must_use]
    pub fn prevents_default(&self, event: &InputEvent) -> bool {
        self.active
            && matches!(
                event,
                InputEvent::Wheel { .. }
                    | InputEvent::TouchStart { .. }
                    | InputEvent::TouchMove { .. }
            )
    }

    /// Whether the host's default handling of a key should be suppressed.
    #[must_use]
    pub fn prevents_default_key(&self, code: &str) -> bool {
        self.active && self.key_bindings.lookup(code).is_some()
    }

    /// Stop consuming input and drop all transient state.
    pub fn teardown(&mut self) {
        self.active = false;
        self.wheel_accumulator = 0.0;
        self.touch_anchor = None;
    }

    fn handle_wheel(
        &mut self,
        delta_y: f32,
        mode: DeltaMode,
        transitioning: bool,
    ) -> Option<Direction> {
        if transitioning {
            self.wheel_accumulator = 0.0;
            return None;
        }
        if !delta_y.is_finite() {
            return None;
        }
        let pixels = match mode {
            DeltaMode::Pixel => delta_y,
            DeltaMode::Line => delta_y * self.options.line_height,
            DeltaMode::Page => delta_y * self.viewport_height,
        };
        self.wheel_accumulator += pixels;

        if self.wheel_accumulator.abs() < self.options.wheel_threshold {
            return None;
        }
        let direction = Direction::from_sign(self.wheel_accumulator);
        self.wheel_accumulator = 0.0;
        direction
    }

    fn handle_touch_move(
        &mut self,
        y: f32,
        transitioning: bool,
    ) -> Option<Direction> {
        let anchor = self.touch_anchor?;
        if transitioning {
            self.touch_anchor = Some(y);
            return None;
        }
        // Finger moving up (y decreasing) scrolls forward.
        let travel = anchor - y;
        if travel.abs() < self.options.touch_threshold {
            return None;
        }
        self.touch_anchor = Some(y);
        Direction::from_sign(travel)
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new(InputOptions::default(), KeybindingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_y: f32, mode: DeltaMode) -> InputEvent {
        InputEvent::Wheel { delta_y, mode }
    }

    #[test]
    fn single_line_mode_notch_advances() {
        let mut input = InputNormalizer::default();
        assert_eq!(
            input.handle_event(&wheel(5.0, DeltaMode::Line), false),
            Some(Direction::Forward)
        );
        assert_eq!(input.wheel_accumulator(), 0.0);
    }

    #[test]
    fn pixel_deltas_accumulate_to_threshold() {
        let mut input = InputNormalizer::default();
        assert_eq!(input.handle_event(&wheel(30.0, DeltaMode::Pixel), false), None);
        assert_eq!(input.handle_event(&wheel(30.0, DeltaMode::Pixel), false), None);
        assert_eq!(
            input.handle_event(&wheel(30.0, DeltaMode::Pixel), false),
            Some(Direction::Forward)
        );
        assert_eq!(
            input.handle_event(&wheel(-100.0, DeltaMode::Pixel), false),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn page_mode_uses_viewport_height() {
        let mut input = InputNormalizer::default();
        let _ = input.handle_event(
            &InputEvent::Resized {
                width: 1000.0,
                height: 60.0,
            },
            false,
        );
        assert_eq!(input.handle_event(&wheel(1.0, DeltaMode::Page), false), None);
        assert_eq!(
            input.handle_event(&wheel(1.0, DeltaMode::Page), false),
            Some(Direction::Forward)
        );
    }

    #[test]
    fn wheel_during_transition_is_dropped_not_buffered() {
        let mut input = InputNormalizer::default();
        let _ = input.handle_event(&wheel(70.0, DeltaMode::Pixel), false);
        assert_eq!(input.handle_event(&wheel(500.0, DeltaMode::Pixel), true), None);
        assert_eq!(input.wheel_accumulator(), 0.0);
        assert_eq!(input.handle_event(&wheel(10.0, DeltaMode::Pixel), false), None);
    }

    #[test]
    fn swipe_up_advances_and_reanchors() {
        let mut input = InputNormalizer::default();
        let _ = input.handle_event(&InputEvent::TouchStart { y: 500.0 }, false);
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 450.0 }, false), None);
        assert_eq!(
            input.handle_event(&InputEvent::TouchMove { y: 410.0 }, false),
            Some(Direction::Forward)
        );
        // Measured from the new anchor at 410.
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 380.0 }, false), None);
        assert_eq!(
            input.handle_event(&InputEvent::TouchMove { y: 500.0 }, false),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn touch_move_without_start_is_ignored() {
        let mut input = InputNormalizer::default();
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 0.0 }, false), None);
        let _ = input.handle_event(&InputEvent::TouchStart { y: 300.0 }, false);
        let _ = input.handle_event(&InputEvent::TouchEnd, false);
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 0.0 }, false), None);
    }

    #[test]
    fn swipe_during_transition_follows_finger() {
        let mut input = InputNormalizer::default();
        let _ = input.handle_event(&InputEvent::TouchStart { y: 500.0 }, false);
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 300.0 }, true), None);
        assert_eq!(input.handle_event(&InputEvent::TouchMove { y: 250.0 }, false), None);
    }

    #[test]
    fn keys_step_once_per_press() {
        let mut input = InputNormalizer::default();
        assert_eq!(
            input.handle_key("ArrowDown", false, false),
            Some(Direction::Forward)
        );
        assert_eq!(input.handle_key("ArrowDown", true, false), None);
        assert_eq!(
            input.handle_key("PageUp", false, false),
            Some(Direction::Backward)
        );
        assert_eq!(input.handle_key("Space", false, true), None);
        assert_eq!(input.handle_key("KeyA", false, false), None);
    }

    #[test]
    fn teardown_stops_everything() {
        let mut input = InputNormalizer::default();
        let event = wheel(500.0, DeltaMode::Pixel);
        assert!(input.prevents_default(&event));
        assert!(input.prevents_default_key("ArrowDown"));
        input.teardown();
        assert!(!input.is_active());
        assert!(!input.prevents_default(&event));
        assert_eq!(input.handle_event(&event, false), None);
        assert_eq!(input.handle_key("ArrowDown", false, false), None);
    }

    #[test]
    fn pointer_events_never_step() {
        let mut input = InputNormalizer::default();
        assert_eq!(input.handle_event(&InputEvent::PointerEntered, false), None);
        assert!(!input.prevents_default(&InputEvent::PointerLeft));
    }
}
