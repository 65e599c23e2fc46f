//! The session's command vocabulary and the requests it sends back to the
//! UI layer.
//!
//! Panel buttons and bound keys both arrive as [`WidgetCommand`]s. Work
//! the session cannot do itself (opening dialogs, rebuilding the panel)
//! is queued as [`UiRequest`]s for the host to drain.

use crate::input::KeyAction;

/// Commands issued by panel buttons or key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetCommand {
    /// General reset of view, shading and fractal parameters.
    Reset,
    /// Toggle side-by-side stereo.
    Stereo,
    /// Toggle the random shading walk.
    AutoChg,
    /// Turn texturing off, or ask for a texture if it is off.
    Texture,
    /// Flip between the two fractal styles.
    Style,
    /// Show the save/load dialog.
    SaveLoad,
    /// Show the help viewer.
    Help,
    /// Re-render with the current parameters.
    Refresh,
    /// Drags pan camera and focus.
    Move,
    /// Drags rotate the view direction.
    Rotate,
}

/// What a pointer drag steers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Pan camera and focus together.
    #[default]
    Move,
    /// Rotate the focus around the camera.
    Rotate,
}

/// Work handed back to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    /// The widget list changed (style or stereo); rebuild it.
    RebuildPanel,
    /// Widget values changed; redraw them.
    RefreshPanel,
    /// Panel visibility changed; the window layout must follow.
    Relayout,
    /// Open the help viewer.
    ShowHelp,
    /// Open the save/load dialog.
    ShowSaveLoad,
    /// Let the user pick a coloring image.
    PickTexture,
    /// Ask whether to neutralize shading for the new texture.
    ConfirmNeutralizeColoring,
    /// Close the application.
    Quit,
}

/// Outcome of resolving a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyTarget {
    Command(WidgetCommand),
    TogglePanel,
    Quit,
}

impl From<KeyAction> for KeyTarget {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Reset => Self::Command(WidgetCommand::Reset),
            KeyAction::ToggleStyle => Self::Command(WidgetCommand::Style),
            KeyAction::ToggleStereo => Self::Command(WidgetCommand::Stereo),
            KeyAction::SaveLoad => Self::Command(WidgetCommand::SaveLoad),
            KeyAction::Help => Self::Command(WidgetCommand::Help),
            KeyAction::MoveMode => Self::Command(WidgetCommand::Move),
            KeyAction::RotateMode => Self::Command(WidgetCommand::Rotate),
            KeyAction::ToggleTexture => Self::Command(WidgetCommand::Texture),
            KeyAction::ToggleAutoChange => {
                Self::Command(WidgetCommand::AutoChg)
            }
            KeyAction::Refresh => Self::Command(WidgetCommand::Refresh),
            KeyAction::TogglePanel => Self::TogglePanel,
            KeyAction::Quit => Self::Quit,
        }
    }
}
