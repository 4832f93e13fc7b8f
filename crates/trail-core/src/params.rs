//! The closed set of animated parameters.
//!
//! Every value the host can animate is named by a [`ParamId`]. IDs index a
//! dense array, so lookups are resolved at compile time instead of by string.
//! Names are only used at the edges (CLI, logs) via [`ParamId::from_name`].

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamId {
    /// Base hue of the stamped shape, degrees.
    Hue,
    /// Shape radius as a fraction of the shorter canvas side.
    Scale,
    /// Number of spikes around the outline (fractional values morph).
    SpikeCount,
    /// 0 = round lobes, 1 = needle-like spikes.
    SpikeSharpness,
    /// Inner fill radius relative to the outline.
    FillSize,
    FillOpacity,
    /// Overall alpha of the shape when blended into a target.
    BlendOpacity,
    /// Manual rotation, degrees. Angular: always resolved by shortest path.
    Rotation,
    /// Automatic rotation, degrees per second.
    AutoRotationSpeed,
    /// Per-tick radial growth of the trail (1 = static).
    ExpansionFactor,
    /// Per-tick attenuation of the trail.
    FadeAmount,
    /// Per-tick hue rotation of the trail, degrees.
    HueShift,
    NoiseAmount,
    NoiseRate,
    BlurAmount,
    BlurRate,
    /// Captures per second fed to the emanation timer.
    EmanationRate,
}

impl ParamId {
    pub const COUNT: usize = 17;

    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::Hue,
        ParamId::Scale,
        ParamId::SpikeCount,
        ParamId::SpikeSharpness,
        ParamId::FillSize,
        ParamId::FillOpacity,
        ParamId::BlendOpacity,
        ParamId::Rotation,
        ParamId::AutoRotationSpeed,
        ParamId::ExpansionFactor,
        ParamId::FadeAmount,
        ParamId::HueShift,
        ParamId::NoiseAmount,
        ParamId::NoiseRate,
        ParamId::BlurAmount,
        ParamId::BlurRate,
        ParamId::EmanationRate,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ParamId::Hue => "hue",
            ParamId::Scale => "scale",
            ParamId::SpikeCount => "spike_count",
            ParamId::SpikeSharpness => "spike_sharpness",
            ParamId::FillSize => "fill_size",
            ParamId::FillOpacity => "fill_opacity",
            ParamId::BlendOpacity => "blend_opacity",
            ParamId::Rotation => "rotation",
            ParamId::AutoRotationSpeed => "auto_rotation_speed",
            ParamId::ExpansionFactor => "expansion_factor",
            ParamId::FadeAmount => "fade_amount",
            ParamId::HueShift => "hue_shift",
            ParamId::NoiseAmount => "noise_amount",
            ParamId::NoiseRate => "noise_rate",
            ParamId::BlurAmount => "blur_amount",
            ParamId::BlurRate => "blur_rate",
            ParamId::EmanationRate => "emanation_rate",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamId> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Valid values for the parameter. Validation is the caller's job; the
    /// interpolator animates whatever it is given.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ParamId::Hue => 0.0..=360.0,
            ParamId::Scale => 0.05..=2.0,
            ParamId::SpikeCount => 0.0..=24.0,
            ParamId::SpikeSharpness => 0.0..=1.0,
            ParamId::FillSize => 0.0..=1.0,
            ParamId::FillOpacity => 0.0..=1.0,
            ParamId::BlendOpacity => 0.0..=1.0,
            ParamId::Rotation => 0.0..=360.0,
            ParamId::AutoRotationSpeed => -180.0..=180.0,
            ParamId::ExpansionFactor => 1.0..=1.2,
            ParamId::FadeAmount => 0.0..=0.2,
            ParamId::HueShift => -30.0..=30.0,
            ParamId::NoiseAmount => 0.0..=1.0,
            ParamId::NoiseRate => 0.0..=10.0,
            ParamId::BlurAmount => 0.0..=1.0,
            ParamId::BlurRate => 0.0..=10.0,
            ParamId::EmanationRate => 0.0..=30.0,
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            ParamId::Hue => 200.0,
            ParamId::Scale => 0.35,
            ParamId::SpikeCount => 6.0,
            ParamId::SpikeSharpness => 0.5,
            ParamId::FillSize => 0.3,
            ParamId::FillOpacity => 0.6,
            ParamId::BlendOpacity => 0.8,
            ParamId::Rotation => 0.0,
            ParamId::AutoRotationSpeed => 20.0,
            ParamId::ExpansionFactor => 1.02,
            ParamId::FadeAmount => 0.02,
            ParamId::HueShift => 1.0,
            ParamId::NoiseAmount => 0.0,
            ParamId::NoiseRate => 1.0,
            ParamId::BlurAmount => 0.0,
            ParamId::BlurRate => 1.0,
            ParamId::EmanationRate => crate::DEFAULT_EMANATION_RATE_HZ,
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let r = self.range();
        value.clamp(*r.start(), *r.end())
    }

    /// Angular parameters wrap at 360 and take the shortest path.
    pub fn is_angular(self) -> bool {
        matches!(self, ParamId::Rotation)
    }
}

impl FromStr for ParamId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::from_name(s).ok_or_else(|| CoreError::UnknownParam(s.to_string()))
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
