//! Panel commands, drags and key presses.

use super::command::{DragMode, KeyTarget, UiRequest, WidgetCommand};
use super::Session;
use crate::renderer::ComputeBackend;

/// Entry points the UI layer calls on the session.
pub trait SessionHandler {
    /// A panel button or bound key fired `command`.
    fn on_command(&mut self, command: WidgetCommand);

    /// Steer by a drag of `(dx, dy)` under the current drag mode, then
    /// re-render.
    fn on_drag(&mut self, dx: f32, dy: f32);

    /// Resolve a key code (`winit::keyboard::KeyCode` debug form) through
    /// the bindings. Returns `false` if unbound so the host can offer the
    /// key to the panel's own hotkeys.
    fn on_key(&mut self, code: &str) -> bool;
}

impl<B: ComputeBackend> SessionHandler for Session<B> {
    fn on_command(&mut self, command: WidgetCommand) {
        log::debug!("command {command:?}");
        match command {
            WidgetCommand::SaveLoad => self.requests.push(UiRequest::ShowSaveLoad),
            WidgetCommand::Help => self.requests.push(UiRequest::ShowHelp),
            WidgetCommand::Reset => {
                self.reset();
                self.update_image();
            }
            WidgetCommand::Stereo => {
                self.stereo = !self.stereo;
                self.requests.push(UiRequest::RebuildPanel);
                self.layout_views();
            }
            WidgetCommand::AutoChg => {
                let _ = self.auto_change.toggle();
                self.requests.push(UiRequest::RefreshPanel);
            }
            WidgetCommand::Texture => {
                let was_on = self.control.texture_enabled();
                self.control.txt_on_off = 0;
                if was_on {
                    self.requests.push(UiRequest::RefreshPanel);
                    self.update_image();
                } else {
                    self.requests.push(UiRequest::PickTexture);
                }
            }
            WidgetCommand::Refresh => self.update_image(),
            WidgetCommand::Style => {
                self.control.style = self.control.style().toggled().raw();
                self.reset();
                self.update_image();
            }
            WidgetCommand::Move => {
                self.drag_mode = DragMode::Move;
                self.requests.push(UiRequest::RefreshPanel);
            }
            WidgetCommand::Rotate => {
                self.drag_mode = DragMode::Rotate;
                self.requests.push(UiRequest::RefreshPanel);
            }
        }
    }

    fn on_drag(&mut self, dx: f32, dy: f32) {
        self.steer(dx, dy);
        self.update_image();
    }

    fn on_key(&mut self, code: &str) -> bool {
        let Some(action) = self.options.keybindings.lookup(code) else {
            return false;
        };
        match KeyTarget::from(action) {
            KeyTarget::Command(command) => self.on_command(command),
            KeyTarget::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                self.requests.push(UiRequest::Relayout);
                self.layout_views();
            }
            KeyTarget::Quit => self.requests.push(UiRequest::Quit),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Style, RESET_CAMERA};
    use crate::engine::tests::started;

    #[test]
    fn stereo_toggle_splits_and_renders_both_eyes() {
        let mut session = started();
        session.control_mut().parallax = 0.004;
        session.on_command(WidgetCommand::Stereo);

        assert!(session.stereo());
        assert!(session.highlighted(WidgetCommand::Stereo));
        assert_eq!(session.dispatcher().resolution(), (437, 800));
        let dispatches = session.dispatcher().backend().dispatches.borrow();
        let last_two = &dispatches[dispatches.len() - 2..];
        assert_ne!(last_two[0].1.camera, last_two[1].1.camera);
        drop(dispatches);
        assert!(session
            .drain_ui_requests()
            .contains(&UiRequest::RebuildPanel));

        session.on_command(WidgetCommand::Stereo);
        assert_eq!(session.dispatcher().resolution(), (875, 800));
    }

    #[test]
    fn texture_command_asks_for_image_when_off() {
        let mut session = started();
        session.on_command(WidgetCommand::Texture);
        assert_eq!(session.drain_ui_requests(), vec![UiRequest::PickTexture]);
        assert!(!session.take_frame_ready());
    }

    #[test]
    fn texture_command_disables_when_on() {
        let mut session = started();
        session.control_mut().txt_on_off = 1;
        assert!(session.highlighted(WidgetCommand::Texture));

        session.on_command(WidgetCommand::Texture);

        assert!(!session.control().texture_enabled());
        assert!(session.take_frame_ready());
        assert!(!session
            .drain_ui_requests()
            .contains(&UiRequest::PickTexture));
    }

    #[test]
    fn style_command_switches_regime_with_one_reset() {
        let mut session = started();
        session.on_command(WidgetCommand::Rotate);
        session.on_drag(12.0, -3.0);
        let _ = session.drain_ui_requests();
        let before = session.dispatcher().backend().dispatches.borrow().len();

        session.on_command(WidgetCommand::Style);

        let control = session.control();
        assert_eq!(control.style(), Style::Apollonian2);
        assert_eq!(control.min_dist, Style::Apollonian2.defaults().min_dist);
        assert_eq!(control.camera, RESET_CAMERA);
        assert_eq!(session.drag_mode(), DragMode::Move);
        assert_eq!(
            session.dispatcher().backend().dispatches.borrow().len(),
            before + 1
        );
        let rebuilds = session
            .drain_ui_requests()
            .into_iter()
            .filter(|r| *r == UiRequest::RebuildPanel)
            .count();
        assert_eq!(rebuilds, 1);
    }

    #[test]
    fn dialogs_are_requested() {
        let mut session = started();
        session.on_command(WidgetCommand::Help);
        session.on_command(WidgetCommand::SaveLoad);
        assert_eq!(
            session.drain_ui_requests(),
            vec![UiRequest::ShowHelp, UiRequest::ShowSaveLoad]
        );
    }

    #[test]
    fn rotate_mode_changes_focus_only() {
        let mut session = started();
        session.on_command(WidgetCommand::Rotate);
        assert!(session.highlighted(WidgetCommand::Rotate));
        let camera = session.control().camera;
        let focus = session.control().focus;

        session.on_drag(3.0, -2.0);

        assert_eq!(session.control().camera, camera);
        assert_ne!(session.control().focus, focus);
        assert!(session.take_frame_ready());
    }

    #[test]
    fn bound_keys_dispatch_commands() {
        let mut session = started();
        assert!(session.on_key("KeyO"));
        assert!(session.stereo());
        assert!(session.on_key("KeyM"));
        assert_eq!(session.drag_mode(), DragMode::Move);
        assert!(session.on_key("KeyR"));
        assert_eq!(session.drag_mode(), DragMode::Rotate);
        assert!(!session.on_key("KeyZ"));
    }

    #[test]
    fn panel_key_relayouts_without_panel() {
        let mut session = started();
        assert!(session.on_key("Digit1"));
        assert!(!session.panel_visible());
        assert_eq!(session.dispatcher().resolution(), (1000, 800));
        assert!(session.drain_ui_requests().contains(&UiRequest::Relayout));
    }

    #[test]
    fn escape_requests_quit() {
        let mut session = started();
        assert!(session.on_key("Escape"));
        assert_eq!(session.drain_ui_requests(), vec![UiRequest::Quit]);
    }
}
