//! Camera steering and the per-dispatch camera basis.

/// Virtual trackball mapping pointer motion to rotations.
pub mod arcball;
/// View/top/side basis derivation and stereo eye offsets.
pub mod basis;
/// Drag-driven rotate and pan of camera and focus.
pub mod controller;

pub use arcball::ArcBall;
pub use basis::{eye_snapshot, CameraBasis, Eye};
pub use controller::InteractionController;
