//! Animation system for eased stage transitions.
//!
//! A [`TransitionAnimator`] runs one [`AnimationRun`] at a time and hands out
//! a [`Completion`] that the frame loop resolves when the run lands on its
//! target.

mod animator;
mod completion;
mod runner;
pub mod transition;

pub use animator::{ProgressObserver, RunRejected, TransitionAnimator};
pub use completion::{Completion, CompletionState};
pub use runner::AnimationRun;
pub use transition::Transition;
