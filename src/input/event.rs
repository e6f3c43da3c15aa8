/// Platform-agnostic input events.
///
/// These are fed into an [`InputNormalizer`](super::InputNormalizer), which
/// turns wheel and touch gestures into stage steps, and into the hover tilt,
/// which consumes the pointer events.
///
/// Wheel deltas follow the DOM convention: positive `delta_y` scrolls the
/// page down, which advances the story.
///
/// # Example
///
/// ```ignore
/// let step = normalizer.handle_event(
///     &InputEvent::Wheel { delta_y: 5.0, mode: DeltaMode::Line },
///     controller.is_in_flight(),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel or trackpad scroll.
    Wheel {
        /// Vertical delta in `mode` units (positive = scroll down).
        delta_y: f32,
        /// Unit of `delta_y`.
        mode: DeltaMode,
    },
    /// A finger touched the surface.
    TouchStart {
        /// Vertical position in pixels.
        y: f32,
    },
    /// A touching finger moved.
    TouchMove {
        /// Vertical position in pixels.
        y: f32,
    },
    /// The finger was lifted or the touch cancelled.
    TouchEnd,
    /// The pointer entered the render surface.
    PointerEntered,
    /// The pointer moved over the render surface.
    PointerMoved {
        /// Horizontal position relative to the surface's left edge, in pixels.
        x: f32,
        /// Vertical position relative to the surface's top edge, in pixels.
        y: f32,
    },
    /// The pointer left the render surface.
    PointerLeft,
    /// The render surface changed size.
    Resized {
        /// New width in pixels.
        width: f32,
        /// New height in pixels.
        height: f32,
    },
}

/// Unit of a wheel delta, mirroring `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    /// Pixels (`DOM_DELTA_PIXEL`).
    #[default]
    Pixel,
    /// Lines (`DOM_DELTA_LINE`).
    Line,
    /// Pages (`DOM_DELTA_PAGE`).
    Page,
}

impl DeltaMode {
    /// Map a raw `WheelEvent.deltaMode` value. Unknown values are pixels.
    #[must_use]
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for InputEvent {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        // winit reports positive y for scrolling up; flip to the DOM sign.
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => Self::Wheel {
                delta_y: -y,
                mode: DeltaMode::Line,
            },
            winit::event::MouseScrollDelta::PixelDelta(pos) => Self::Wheel {
                delta_y: -pos.y as f32,
                mode: DeltaMode::Pixel,
            },
        }
    }
}

#[cfg(feature = "viewer")]
impl From<&winit::event::Touch> for InputEvent {
    fn from(touch: &winit::event::Touch) -> Self {
        let y = touch.location.y as f32;
        match touch.phase {
            winit::event::TouchPhase::Started => Self::TouchStart { y },
            winit::event::TouchPhase::Moved => Self::TouchMove { y },
            winit::event::TouchPhase::Ended
            | winit::event::TouchPhase::Cancelled => Self::TouchEnd,
        }
    }
}
