use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Session", inline)]
#[serde(default)]
/// Timer, window and panel parameters.
pub struct SessionOptions {
    /// Period of the session timer in milliseconds.
    #[schemars(title = "Tick Interval (ms)", range(min = 10, max = 500), extend("step" = 10))]
    pub tick_interval_ms: u64,
    /// Timer ticks to wait after the last resize before re-laying out.
    #[schemars(skip)]
    pub resize_settle_ticks: u32,
    /// Smallest allowed window size in physical pixels.
    #[schemars(skip)]
    pub min_window: [u32; 2],
    /// Width reserved for the parameter panel when it is visible.
    #[schemars(skip)]
    pub panel_width: u32,
    /// Whether the parameter panel starts visible.
    #[schemars(title = "Show Panel")]
    pub panel_visible: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
            resize_settle_ticks: 10,
            min_window: [700, 700],
            panel_width: 125,
            panel_visible: true,
        }
    }
}
