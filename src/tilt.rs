//! Pointer-reactive hover tilt.
//!
//! While the pointer is over the render surface its normalized position maps
//! to a small rotation offset that is added on top of the animated pose.
//! Leaving the surface recentres the pointer so the offset eases back to
//! zero.

use glam::{Vec2, Vec3};

use crate::options::TiltOptions;
use crate::util::easing::damp_vec3;

/// Whether the pointer is over the surface, and where.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    /// Pointer is over the render surface.
    pub is_hovering: bool,
    /// Pointer position in `[-1, 1]²`, `+y` up.
    pub pointer: Vec2,
}

/// Map a surface-local pixel position to `[-1, 1]²` with `+y` up.
///
/// Returns `None` for an empty surface.
#[must_use]
pub fn normalize_pointer(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let nx = (x / width) * 2.0 - 1.0;
    let ny = -((y / height) * 2.0 - 1.0);
    Some(Vec2::new(nx, ny).clamp(Vec2::NEG_ONE, Vec2::ONE))
}

/// Smoothed rotation offset driven by the hover state.
#[derive(Debug, Clone)]
pub struct PointerTilt {
    hover: HoverState,
    /// Current smoothed offset (radians, z always zero).
    offset: Vec3,
    max_tilt_x: f32,
    max_tilt_y: f32,
    sensitivity: f32,
    active_rate: f32,
    settled_rate: f32,
}

impl PointerTilt {
    /// Tilt configured from options.
    #[must_use]
    pub fn new(options: &TiltOptions) -> Self {
        Self {
            hover: HoverState::default(),
            offset: Vec3::ZERO,
            max_tilt_x: options.max_tilt_x_deg.to_radians(),
            max_tilt_y: options.max_tilt_y_deg.to_radians(),
            sensitivity: options.sensitivity,
            active_rate: options.active_rate,
            settled_rate: options.settled_rate,
        }
    }

    /// Current hover state.
    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Current smoothed offset.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Sensitivity multiplier.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Change the sensitivity multiplier. Non-finite values are ignored.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() {
            self.sensitivity = sensitivity.max(0.0);
        }
    }

    /// The pointer entered the surface.
    pub fn pointer_entered(&mut self) {
        self.hover.is_hovering = true;
    }

    /// The pointer moved to a normalized position. Ignored unless hovering.
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if !self.hover.is_hovering || !pointer.is_finite() {
            return;
        }
        self.hover.pointer = pointer.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// The pointer left the surface; recentre.
    pub fn pointer_left(&mut self) {
        self.hover = HoverState::default();
    }

    /// Offset the tilt is easing toward.
    #[must_use]
    pub fn target_offset(&self) -> Vec3 {
        let p = self.hover.pointer;
        Vec3::new(
            p.y * self.max_tilt_x * self.sensitivity,
            p.x * self.max_tilt_y * self.sensitivity,
            0.0,
        )
    }

    /// Ease the offset toward its target. Faster while a transition runs.
    pub fn update(&mut self, dt: f32, transitioning: bool) -> Vec3 {
        let rate = if transitioning {
            self.active_rate
        } else {
            self.settled_rate
        };
        self.offset = damp_vec3(self.offset, self.target_offset(), rate, dt);
        self.offset
    }

    /// Drop hover state and the offset.
    pub fn reset(&mut self) {
        self.hover = HoverState::default();
        self.offset = Vec3::ZERO;
    }
}

impl Default for PointerTilt {
    fn default() -> Self {
        Self::new(&TiltOptions::default())
    }
}
