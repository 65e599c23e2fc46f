//! Ray-march frame production.
//!
//! The dispatcher owns the frame sequencing (eyes, snapshots, busy latch)
//! and talks to the GPU through [`ComputeBackend`]. The wgpu backend and
//! the on-screen presenter are only built with the `viewer` feature's
//! window, but compile everywhere.

/// Per-frame eye dispatch and the busy latch.
pub mod dispatcher;
/// Workgroup sizing and grid policy.
pub mod grid;
/// Blit of the eye images into the window.
pub mod presenter;
/// wgpu compute backend.
pub mod wgpu_backend;

pub use dispatcher::{ComputeBackend, FrameOutcome, RenderDispatcher};
pub use grid::{DispatchGrid, WorkgroupSize};
pub use presenter::Presenter;
pub use wgpu_backend::WgpuBackend;
