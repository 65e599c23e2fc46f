use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Pointer-drag steering parameters.
pub struct InteractionOptions {
    /// Pan direction length without the option modifier.
    #[schemars(title = "Pan Step", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub pan_step: f32,
    /// Pan direction length while the option modifier is held.
    #[schemars(title = "Coarse Pan Step", range(min = 5.0, max = 200.0), extend("step" = 5.0))]
    pub pan_step_coarse: f32,
    /// Divisor applied to the rotated pan offset.
    #[schemars(skip)]
    pub pan_divisor: f32,
    /// Arcball anchor used for every rotation drag (both coordinates).
    #[schemars(skip)]
    pub arcball_anchor: f32,
    /// Arcball area edge length; the arcball is re-initialized to a square
    /// of this size on reset.
    #[schemars(skip)]
    pub arcball_extent: f32,
    /// Scale from held-pointer offset (pixels) to per-tick drag delta.
    #[schemars(title = "Drag Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub drag_scale: f32,
}

/// Smallest accepted pan divisor.
pub const MIN_PAN_DIVISOR: f32 = 1.0;

impl InteractionOptions {
    /// Pull values that would poison camera math back into range: a
    /// non-finite pan divisor reverts to the default and a finite one is
    /// raised to [`MIN_PAN_DIVISOR`].
    pub fn sanitize(&mut self) {
        if !self.pan_divisor.is_finite() {
            log::warn!("pan_divisor {} is not finite, using default", self.pan_divisor);
            self.pan_divisor = Self::default().pan_divisor;
        } else if self.pan_divisor < MIN_PAN_DIVISOR {
            log::warn!(
                "pan_divisor {} below {MIN_PAN_DIVISOR}, clamping",
                self.pan_divisor
            );
            self.pan_divisor = MIN_PAN_DIVISOR;
        }
    }
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            pan_step: 5.0,
            pan_step_coarse: 50.0,
            pan_divisor: 300.0,
            arcball_anchor: 25.0,
            arcball_extent: 100.0,
            drag_scale: 0.1,
        }
    }
}
