//! Session, interaction and keybinding options with TOML support.
//!
//! Every section uses `#[serde(default)]` so a partial file (e.g. only
//! overriding `[interaction]`) fills the rest from defaults.

mod interaction;
mod keybindings;
mod session;

use std::path::Path;

pub use interaction::{InteractionOptions, MIN_PAN_DIVISOR};
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use session::SessionOptions;

use crate::error::GasketError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Timer, window and panel parameters.
    pub session: SessionOptions,
    /// Pointer-drag steering parameters.
    pub interaction: InteractionOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GasketError> {
        let content =
            std::fs::read_to_string(path).map_err(GasketError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, GasketError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| GasketError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        opts.interaction.sanitize();
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GasketError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GasketError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GasketError::Io)?;
        }
        std::fs::write(path, content).map_err(GasketError::Io)
    }
}
