//! Input handling: event types, key actions, and the processor that
//! turns raw window events into a held-drag offset.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
pub mod keyboard;
/// Held-pointer and modifier tracking.
pub mod processor;

pub use event::{InputEvent, Modifiers, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
