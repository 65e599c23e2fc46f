use serde::{Deserialize, Serialize};

/// Session-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// toggle_stereo = "KeyO"
/// reset = "KeyN"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the start-up camera and parameters.
    Reset,
    /// Switch between the two fractal styles.
    ToggleStyle,
    /// Toggle side-by-side stereo.
    ToggleStereo,
    /// Open the save/load flow for the control record.
    SaveLoad,
    /// Show the help text.
    Help,
    /// Drag pans the camera.
    MoveMode,
    /// Drag orbits the camera.
    RotateMode,
    /// Toggle texture coloring.
    ToggleTexture,
    /// Toggle the slow shading walk.
    ToggleAutoChange,
    /// Show or hide the widget panel.
    TogglePanel,
    /// Re-render with the current parameters.
    Refresh,
    /// Leave the viewer.
    Quit,
}
