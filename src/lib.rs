// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
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
// Unpublished crate without a hosted repository
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! Interactive GPU ray-marcher for an Apollonian-gasket fractal.
//!
//! A single fixed-layout [`control::ControlState`] record carries every
//! camera, fractal, lighting and coloring parameter. The host mutates it
//! through a [`Session`] and one compute dispatch per eye turns it into an
//! image.
//!
//! # Key entry points
//!
//! - [`Session`] - owns the record and reacts to input, commands and ticks
//! - [`SessionHandler`] - panel buttons, drags and key presses
//! - [`renderer::RenderDispatcher`] - busy-latched per-eye dispatch over a
//!   [`renderer::ComputeBackend`]
//! - [`camera`] - arcball orbiting, panning and stereo eye derivation
//! - [`options::Options`] - TOML-backed session, interaction and key
//!   binding settings
//!
//! # Architecture
//!
//! Everything runs on the host thread. A periodic tick applies held drags
//! and the shading walk; any change re-renders through the dispatcher,
//! which blocks until the GPU finishes and drops requests that arrive
//! while a frame is in flight. Work only the host UI can do, such as file
//! dialogs, is queued as [`UiRequest`] values.

pub mod camera;
pub mod control;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod panel;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{DragMode, Session, SessionHandler, UiRequest, WidgetCommand};
pub use error::GasketError;
pub use input::event::{InputEvent, Modifiers, MouseButton};
pub use input::keyboard::KeyAction;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
