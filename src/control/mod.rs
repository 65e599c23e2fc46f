//! The shared render-parameter record.
//!
//! [`ControlState`] is the single mutable record that the interaction
//! layer edits and the render dispatcher snapshots once per eye. Its
//! memory layout *is* the kernel's parameter binding: the struct is
//! `#[repr(C)]`, padding-free, and uploaded byte-for-byte into the
//! uniform buffer read by `rayMarchShader`. The same byte image is the
//! persisted save format (see [`ControlState::to_bytes`]).

mod auto_change;
mod params;
mod style;

use std::path::Path;

pub use auto_change::AutoChange;
use glam::Vec3;
pub use params::{FloatParam, ParamRange, TripletParam};
pub use style::{Style, StyleDefaults};

use crate::error::GasketError;

/// Layout version stamped into every record. Bump whenever a field moves.
pub const CONTROL_LAYOUT_VERSION: u32 = 1;

/// Size in bytes of the kernel's parameter binding.
pub const CONTROL_SIZE: usize = std::mem::size_of::<ControlState>();

/// Camera position restored by a general reset.
pub const RESET_CAMERA: [f32; 3] = [0.424_610_35, 10.847_559, 2.574_963_3];
/// Focus point restored by a general reset.
pub const RESET_FOCUS: [f32; 3] = [0.422_632_66, 10.949_086, 14.647_235];
/// Texture placement applied whenever a new coloring image is accepted.
pub const TEXTURE_CENTER_DEFAULT: [f32; 3] = [0.5, 0.5, 0.01];

/// Shading parameters, each nominally in `[0, 1]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Lighting {
    /// Ambient term.
    pub ambient: f32,
    /// Diffuse term.
    pub diffuse: f32,
    /// Specular term.
    pub specular: f32,
    /// Specular exponent control.
    pub harshness: f32,
    /// Color saturation.
    pub saturation: f32,
    /// Output gamma.
    pub gamma: f32,
    /// Soft-shadow march start distance.
    pub shadow_min: f32,
    /// Soft-shadow march end distance.
    pub shadow_max: f32,
    /// Soft-shadow penumbra multiplier.
    pub shadow_mult: f32,
    /// Shadow darkening amount.
    pub shadow_amt: f32,
}

impl Lighting {
    /// Mutable references to all ten terms, in declaration order.
    pub fn terms_mut(&mut self) -> [&mut f32; 10] {
        [
            &mut self.ambient,
            &mut self.diffuse,
            &mut self.specular,
            &mut self.harshness,
            &mut self.saturation,
            &mut self.gamma,
            &mut self.shadow_min,
            &mut self.shadow_max,
            &mut self.shadow_mult,
            &mut self.shadow_amt,
        ]
    }
}

/// All render parameters shared with the ray-march kernel.
///
/// Three-component vectors are stored as `[f32; 3]` and each is followed
/// by a 4-byte scalar so that every vector starts on a 16-byte boundary,
/// matching WGSL's `vec3<f32>` alignment. The trailing `_pad` rounds the
/// record up to the struct alignment the kernel sees.
///
/// `view_vector`, `top_vector` and `side_vector` are derived: they are
/// overwritten on every dispatch by
/// [`eye_snapshot`](crate::camera::basis::eye_snapshot) and never
/// treated as authoritative.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ControlState {
    /// Camera position in world space.
    pub camera: [f32; 3],
    /// Layout version ([`CONTROL_LAYOUT_VERSION`]).
    pub version: u32,
    /// Point the camera looks at.
    pub focus: [f32; 3],
    /// Field-of-view scale.
    pub zoom: f32,
    /// Light direction (normalized per dispatch).
    pub light: [f32; 3],
    /// Ray-march hit threshold.
    pub min_dist: f32,
    /// Tint, each channel in `[0, 1]`.
    pub color: [f32; 3],
    /// Distance-estimate multiplier.
    pub multiplier: f32,
    /// Derived: `focus - camera`.
    pub view_vector: [f32; 3],
    /// Sphere-inversion ("Dali") scale.
    pub dali: f32,
    /// Derived: screen-up vector, perpendicular to `view_vector`.
    pub top_vector: [f32; 3],
    /// First fractal parameter.
    pub foam: f32,
    /// Derived: screen-right vector, perpendicular to both others.
    pub side_vector: [f32; 3],
    /// Second fractal parameter.
    pub foam2: f32,
    /// Texture placement: `x`, `y` offset and `z` scale.
    pub txt_center: [f32; 3],
    /// Third fractal parameter (style 0 only).
    pub bend: f32,
    /// Coloring texture dimensions in pixels.
    pub txt_size: [f32; 2],
    /// Output raster width.
    pub x_size: i32,
    /// Output raster height.
    pub y_size: i32,
    /// Fog distance.
    pub fog: f32,
    /// Stereo half eye separation along camera x.
    pub parallax: f32,
    /// Fractal regime, see [`Style`].
    pub style: i32,
    /// 1 when the coloring texture is bound and sampled.
    pub txt_on_off: i32,
    /// Shading parameters.
    pub lighting: Lighting,
    _pad: [f32; 2],
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// Start-up state: style 0, mid-range shading, then a general reset.
    #[must_use]
    pub fn new() -> Self {
        let mut control: Self = bytemuck::Zeroable::zeroed();
        control.version = CONTROL_LAYOUT_VERSION;
        control.style = Style::Apollonian1.raw();
        control.lighting.ambient = 0.5;
        control.lighting.diffuse = 0.5;
        control.lighting.specular = 0.5;
        control.lighting.harshness = 0.5;
        control.lighting.saturation = 0.5;
        control.lighting.gamma = 0.5;
        control.multiplier = 0.5;
        control.reset();
        control
    }

    /// General reset: restore view, shading and fractal parameters for
    /// the current style.
    ///
    /// Ambient/diffuse/specular/harshness/saturation/gamma are left as
    /// they are, and so is `multiplier` in style 0.
    pub fn reset(&mut self) {
        self.light = [1.0, 1.0, 1.0];
        self.color = [1.0, 1.0, 1.0];
        self.zoom = 0.956;
        self.lighting.shadow_min = 0.5;
        self.lighting.shadow_max = 0.5;
        self.lighting.shadow_mult = 0.5;
        self.lighting.shadow_amt = 0.1;
        self.apply_style_defaults();
        self.fog = 100.0;
        self.camera = RESET_CAMERA;
        self.focus = RESET_FOCUS;
    }

    /// The current fractal regime.
    #[must_use]
    pub fn style(&self) -> Style {
        Style::from_raw(self.style)
    }

    /// Overwrite the regime-dependent scalars with the current style's
    /// defaults.
    pub fn apply_style_defaults(&mut self) {
        let defaults = self.style().defaults();
        self.min_dist = defaults.min_dist;
        if let Some(multiplier) = defaults.multiplier {
            self.multiplier = multiplier;
        }
        self.dali = defaults.dali;
        self.foam = defaults.foam;
        self.foam2 = defaults.foam2;
        self.bend = defaults.bend;
    }

    /// Flip to the other style and run a general reset under it.
    pub fn switch_style(&mut self) {
        self.style = self.style().toggled().raw();
        self.reset();
    }

    /// Shading preset that lets a freshly loaded texture's colors show
    /// through unmodified.
    pub fn neutralize_coloring(&mut self) {
        self.lighting.ambient = 0.0;
        self.lighting.diffuse = 0.0;
        self.lighting.specular = 0.7;
        self.lighting.harshness = 0.0;
        self.lighting.saturation = 0.0;
        self.lighting.gamma = 0.0;
        self.color = [1.0, 1.0, 1.0];
    }

    /// Record a newly accepted coloring image and enable texturing.
    pub fn attach_texture(&mut self, width: u32, height: u32) {
        self.txt_size = [width as f32, height as f32];
        self.txt_center = TEXTURE_CENTER_DEFAULT;
        self.txt_on_off = 1;
    }

    /// Whether the coloring texture is sampled.
    #[must_use]
    pub fn texture_enabled(&self) -> bool {
        self.txt_on_off > 0
    }

    /// Set the output raster dimensions.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.x_size = width as i32;
        self.y_size = height as i32;
    }

    /// Camera position as a vector.
    #[must_use]
    pub fn camera(&self) -> Vec3 {
        Vec3::from_array(self.camera)
    }

    /// Focus point as a vector.
    #[must_use]
    pub fn focus(&self) -> Vec3 {
        Vec3::from_array(self.focus)
    }

    /// Read a scalar parameter.
    #[must_use]
    pub fn float(&self, param: FloatParam) -> f32 {
        let l = &self.lighting;
        match param {
            FloatParam::Zoom => self.zoom,
            FloatParam::MinDist => self.min_dist,
            FloatParam::Multiplier => self.multiplier,
            FloatParam::Dali => self.dali,
            FloatParam::Ambient => l.ambient,
            FloatParam::Diffuse => l.diffuse,
            FloatParam::Specular => l.specular,
            FloatParam::Harshness => l.harshness,
            FloatParam::Saturation => l.saturation,
            FloatParam::Gamma => l.gamma,
            FloatParam::ShadowMin => l.shadow_min,
            FloatParam::ShadowMax => l.shadow_max,
            FloatParam::ShadowMult => l.shadow_mult,
            FloatParam::ShadowAmt => l.shadow_amt,
            FloatParam::Foam => self.foam,
            FloatParam::Foam2 => self.foam2,
            FloatParam::Bend => self.bend,
            FloatParam::Fog => self.fog,
            FloatParam::Parallax => self.parallax,
        }
    }

    /// Live storage for a scalar parameter, for direct widget binding.
    pub fn float_mut(&mut self, param: FloatParam) -> &mut f32 {
        match param {
            FloatParam::Zoom => &mut self.zoom,
            FloatParam::MinDist => &mut self.min_dist,
            FloatParam::Multiplier => &mut self.multiplier,
            FloatParam::Dali => &mut self.dali,
            FloatParam::Ambient => &mut self.lighting.ambient,
            FloatParam::Diffuse => &mut self.lighting.diffuse,
            FloatParam::Specular => &mut self.lighting.specular,
            FloatParam::Harshness => &mut self.lighting.harshness,
            FloatParam::Saturation => &mut self.lighting.saturation,
            FloatParam::Gamma => &mut self.lighting.gamma,
            FloatParam::ShadowMin => &mut self.lighting.shadow_min,
            FloatParam::ShadowMax => &mut self.lighting.shadow_max,
            FloatParam::ShadowMult => &mut self.lighting.shadow_mult,
            FloatParam::ShadowAmt => &mut self.lighting.shadow_amt,
            FloatParam::Foam => &mut self.foam,
            FloatParam::Foam2 => &mut self.foam2,
            FloatParam::Bend => &mut self.bend,
            FloatParam::Fog => &mut self.fog,
            FloatParam::Parallax => &mut self.parallax,
        }
    }

    /// Set a scalar parameter, clamped to its panel range.
    pub fn set_float(&mut self, param: FloatParam, value: f32) {
        *self.float_mut(param) = param.range().clamp(value);
    }

    /// Live storage for a three-component parameter.
    pub fn triplet_mut(&mut self, param: TripletParam) -> &mut [f32; 3] {
        match param {
            TripletParam::Light => &mut self.light,
            TripletParam::Tint => &mut self.color,
            TripletParam::TextureCenter => &mut self.txt_center,
        }
    }

    /// Set a three-component parameter, each component clamped to the
    /// parameter's panel range.
    pub fn set_triplet(&mut self, param: TripletParam, value: [f32; 3]) {
        let range = param.range();
        *self.triplet_mut(param) = value.map(|v| range.clamp(v));
    }

    /// The exact byte image uploaded to the kernel and written to disk.
    #[must_use]
    pub fn to_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Rebuild a record from its byte image.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::ControlBlob`] if the slice is not exactly
    /// [`CONTROL_SIZE`] bytes or carries a different layout version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GasketError> {
        let control: Self =
            bytemuck::try_pod_read_unaligned(bytes).map_err(|_| {
                GasketError::ControlBlob(format!(
                    "expected {CONTROL_SIZE} bytes, found {}",
                    bytes.len()
                ))
            })?;
        if control.version != CONTROL_LAYOUT_VERSION {
            return Err(GasketError::ControlBlob(format!(
                "layout version {} is not supported (expected \
                 {CONTROL_LAYOUT_VERSION})",
                control.version
            )));
        }
        Ok(control)
    }

    /// Write the byte image to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GasketError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Read a record previously written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::Io`] on read failure, or
    /// [`GasketError::ControlBlob`] if the contents are not a valid record.
    pub fn load(path: &Path) -> Result<Self, GasketError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
