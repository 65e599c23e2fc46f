/// Closed value range and panel step for an editable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Lowest accepted value.
    pub min: f32,
    /// Highest accepted value.
    pub max: f32,
    /// Increment applied per panel nudge.
    pub step: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

const SHADING: ParamRange = ParamRange::new(0.01, 1.0, 0.01);
const PARALLAX_LIMIT: f32 = 0.008;

/// Scalar fields of [`ControlState`](super::ControlState) exposed for
/// editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatParam {
    /// Field-of-view scale.
    Zoom,
    /// Ray-march hit threshold.
    MinDist,
    /// Distance-estimate multiplier.
    Multiplier,
    /// Sphere-inversion scale.
    Dali,
    /// Ambient term.
    Ambient,
    /// Diffuse term.
    Diffuse,
    /// Specular term.
    Specular,
    /// Specular exponent control.
    Harshness,
    /// Color saturation.
    Saturation,
    /// Output gamma.
    Gamma,
    /// Soft-shadow start.
    ShadowMin,
    /// Soft-shadow end.
    ShadowMax,
    /// Soft-shadow penumbra multiplier.
    ShadowMult,
    /// Shadow darkening.
    ShadowAmt,
    /// First fractal parameter.
    Foam,
    /// Second fractal parameter.
    Foam2,
    /// Third fractal parameter.
    Bend,
    /// Fog distance.
    Fog,
    /// Stereo half eye separation.
    Parallax,
}

impl FloatParam {
    /// Valid range and panel step.
    #[must_use]
    pub fn range(self) -> ParamRange {
        match self {
            Self::Zoom => ParamRange::new(0.2, 2.0, 0.03),
            Self::MinDist => ParamRange::new(0.0002, 0.05, 0.001),
            Self::Multiplier => ParamRange::new(0.01, 1.0, 0.002),
            Self::Dali => ParamRange::new(0.1, 1.0, 0.001),
            Self::Ambient
            | Self::Diffuse
            | Self::Specular
            | Self::Harshness
            | Self::Saturation
            | Self::Gamma
            | Self::ShadowMin
            | Self::ShadowMax
            | Self::ShadowMult
            | Self::ShadowAmt => SHADING,
            Self::Foam => ParamRange::new(0.5, 2.0, 0.005),
            Self::Foam2 => ParamRange::new(0.5, 2.0, 0.003),
            Self::Bend => ParamRange::new(0.01, 0.03, 0.000_02),
            Self::Fog => ParamRange::new(10.0, 100.0, 3.0),
            Self::Parallax => {
                ParamRange::new(-PARALLAX_LIMIT, PARALLAX_LIMIT, 0.0002)
            }
        }
    }
}

/// Three-component fields exposed for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripletParam {
    /// Light direction.
    Light,
    /// Color tint.
    Tint,
    /// Texture position and scale.
    TextureCenter,
}

impl TripletParam {
    /// Per-component range and panel step.
    #[must_use]
    pub fn range(self) -> ParamRange {
        match self {
            Self::Light => ParamRange::new(-10.0, 10.0, 0.3),
            Self::Tint => ParamRange::new(0.0, 1.0, 0.02),
            Self::TextureCenter => ParamRange::new(0.01, 1.0, 0.002),
        }
    }
}
