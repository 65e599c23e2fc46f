/// The two fractal parameter regimes selectable from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Regime 0; exposes the third (`bend`) parameter.
    #[default]
    Apollonian1,
    /// Regime 1.
    Apollonian2,
}

/// Scalars restored when a style is (re)applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleDefaults {
    /// Ray-march hit threshold.
    pub min_dist: f32,
    /// Distance-estimate multiplier, `None` when the style leaves it alone.
    pub multiplier: Option<f32>,
    /// Sphere-inversion scale.
    pub dali: f32,
    /// First fractal parameter.
    pub foam: f32,
    /// Second fractal parameter.
    pub foam2: f32,
    /// Third fractal parameter.
    pub bend: f32,
}

#[allow(clippy::excessive_precision)]
const APOLLONIAN1: StyleDefaults = StyleDefaults {
    min_dist: 0.006,
    multiplier: None,
    dali: 1.0,
    foam: 1.052_652_48,
    foam2: 1.065_727_11,
    bend: 0.020_278_012_4,
};

#[allow(clippy::excessive_precision)]
const APOLLONIAN2: StyleDefaults = StyleDefaults {
    min_dist: 0.000_464_375_014,
    multiplier: Some(0.009_999_999_77),
    dali: 0.604_027_212,
    foam: 0.5,
    foam2: 0.751_381_218,
    bend: 0.019_999_999_6,
};

impl Style {
    /// Decode the kernel's integer representation. Anything non-zero is
    /// regime 1.
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        if raw > 0 {
            Self::Apollonian2
        } else {
            Self::Apollonian1
        }
    }

    /// Integer representation stored in the control record.
    #[must_use]
    pub fn raw(self) -> i32 {
        match self {
            Self::Apollonian1 => 0,
            Self::Apollonian2 => 1,
        }
    }

    /// The other regime.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Apollonian1 => Self::Apollonian2,
            Self::Apollonian2 => Self::Apollonian1,
        }
    }

    /// Default table for this regime.
    #[must_use]
    pub fn defaults(self) -> StyleDefaults {
        match self {
            Self::Apollonian1 => APOLLONIAN1,
            Self::Apollonian2 => APOLLONIAN2,
        }
    }

    /// Whether the `bend` parameter has any effect.
    #[must_use]
    pub fn uses_bend(self) -> bool {
        self == Self::Apollonian1
    }

    /// Panel label of the style command.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Apollonian1 => "Apollonian1",
            Self::Apollonian2 => "Apollonian2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip() {
        assert_eq!(Style::from_raw(0), Style::Apollonian1);
        assert_eq!(Style::from_raw(1), Style::Apollonian2);
        assert_eq!(Style::from_raw(7), Style::Apollonian2);
        assert_eq!(Style::Apollonian2.toggled().raw(), 0);
    }

    #[test]
    fn only_first_style_uses_bend() {
        assert!(Style::Apollonian1.uses_bend());
        assert!(!Style::Apollonian2.uses_bend());
        assert_eq!(Style::Apollonian1.defaults().multiplier, None);
    }
}
