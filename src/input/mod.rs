//! Input handling: event types and the normalizer that converts raw
//! wheel, touch and key input into stage steps.

/// Platform-agnostic input events.
pub mod event;
/// Bindable story actions.
pub mod keyboard;
/// Converts raw events into stage steps.
pub mod processor;

pub use event::{DeltaMode, InputEvent};
pub use keyboard::ScrollAction;
pub use processor::InputNormalizer;
