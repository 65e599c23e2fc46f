//! Tracks the held pointer and modifier keys between timer ticks.
//!
//! Dragging behaves like a joystick: the offset of the pointer from where
//! it was pressed is applied on every tick until the button is released,
//! so holding still away from the press point keeps the camera moving.

use glam::Vec2;

use super::event::{InputEvent, Modifiers, MouseButton};

/// Converts raw window events into the drag offset and modifier state the
/// session consumes.
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Current cursor position in physical pixels.
    cursor: Vec2,
    /// Where the primary button went down, while it is held.
    press_point: Option<Vec2>,
    modifiers: Modifiers,
}

impl InputProcessor {
    /// Create a processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.press_point.is_some()
    }

    /// Current modifier state.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Offset of the cursor from the press point while the primary button
    /// is held. `None` once it is released.
    #[must_use]
    pub fn drag_offset(&self) -> Option<Vec2> {
        self.press_point.map(|press| self.cursor - press)
    }

    /// Release the button without waiting for the window event (focus
    /// loss, cursor leaving the window).
    pub fn release(&mut self) {
        self.press_point = None;
    }

    /// Feed one event. Returns `true` if the drag state changed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.press_point.is_some()
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                let was_dragging = self.press_point.is_some();
                self.press_point = pressed.then_some(self.cursor);
                was_dragging != pressed
            }
            InputEvent::MouseButton { .. } => false,
            InputEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, pressed: bool) -> bool {
        p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        })
    }

    #[test]
    fn offset_is_anchored_at_press_point() {
        let mut p = InputProcessor::new();
        let _ = p.handle_event(InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        assert_eq!(p.drag_offset(), None);

        assert!(press(&mut p, true));
        assert_eq!(p.drag_offset(), Some(Vec2::ZERO));

        let _ = p.handle_event(InputEvent::CursorMoved { x: 13.0, y: 16.0 });
        assert_eq!(p.drag_offset(), Some(Vec2::new(3.0, -4.0)));
        // Holding still keeps reporting the same offset.
        assert_eq!(p.drag_offset(), Some(Vec2::new(3.0, -4.0)));

        assert!(press(&mut p, false));
        assert_eq!(p.drag_offset(), None);
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut p = InputProcessor::new();
        assert!(!p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        }));
        assert!(!p.dragging());
    }

    #[test]
    fn modifiers_are_tracked() {
        let mut p = InputProcessor::new();
        let mods = Modifiers {
            shift: true,
            option: false,
        };
        let _ = p.handle_event(InputEvent::ModifiersChanged(mods));
        assert_eq!(p.modifiers(), mods);
    }

    #[test]
    fn release_drops_the_drag() {
        let mut p = InputProcessor::new();
        let _ = press(&mut p, true);
        p.release();
        assert!(!p.dragging());
    }
}
