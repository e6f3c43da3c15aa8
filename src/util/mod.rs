//! Shared utilities for the viewer core.
//!
//! Helpers for frame timing, easing curves and frame-rate independent
//! exponential smoothing.

pub mod easing;
pub mod frame_timing;
