//! Small standalone helpers.

/// Fixed-period session timer.
pub mod tick;
