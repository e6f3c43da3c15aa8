// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math casts and float comparisons are intentional
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! Scroll-driven staged 3D model viewer core.
//!
//! A model (plus an optional companion mesh) is walked through a fixed
//! sequence of named [`stage::Stage`]s. Wheel, keyboard and touch input is
//! normalized into discrete advance steps, each step plays an eased pose
//! transition, and overlay text is revealed as the transition nears its end.
//!
//! # Key entry points
//!
//! - [`story::ScrollStory`] - owns every component and runs one update per
//!   rendered frame
//! - [`stage::StageController`] - the stage state machine
//! - [`animation::TransitionAnimator`] - eased pose interpolation
//! - [`input::InputNormalizer`] - raw device input to advance steps
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame order
//!
//! Each frame the animator advances first, then a finished transition is
//! committed to the stage controller, then the hover tilt is smoothed, and
//! finally the animator composes `base + tilt` into the transform model.
//! The composed write is always the last write of the frame.

pub mod animation;
pub mod control;
pub mod error;
pub mod input;
pub mod options;
pub mod presentation;
pub mod scene;
pub mod stage;
pub mod story;
pub mod tilt;
pub mod transform;
pub mod util;

#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use error::ViewerError;
pub use input::{DeltaMode, InputEvent};
pub use options::Options;
pub use stage::{Direction, Stage};
pub use story::ScrollStory;
pub use transform::{Pose, TransformModel};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
