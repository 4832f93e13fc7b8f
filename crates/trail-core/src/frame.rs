//! Per-tick draw state handed from the host to the renderer, plus CPU mirrors of
//! the geometry the shaders apply.

use std::str::FromStr;

use glam::Vec2;

use crate::clock::Clock;
use crate::error::CoreError;
use crate::interpolator::ParameterInterpolator;
use crate::params::ParamId;

/// How a stamped shape combines with the target it is drawn into.
///
/// Shader output is premultiplied, so `src` below already carries its alpha.
/// Only pixels the shape covers are blended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// `src + dst`
    #[default]
    Additive,
    /// `src·a + dst·(1-a)`
    Alpha,
    /// `dst·src`, weighted by coverage at the shape's edges
    Multiply,
    /// `src + dst·(1-src)`
    Screen,
    /// `src + dst·src`
    Overlay,
}

impl BlendMode {
    pub const ALL: [BlendMode; 5] = [
        BlendMode::Additive,
        BlendMode::Alpha,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Additive => "additive",
            BlendMode::Alpha => "alpha",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }

    pub fn from_name(name: &str) -> Option<BlendMode> {
        let name = name.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl FromStr for BlendMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlendMode::from_name(s).ok_or_else(|| CoreError::UnknownBlendMode(s.to_string()))
    }
}

/// Inputs of the shape pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    pub hue: f32,
    pub scale: f32,
    pub spike_count: f32,
    pub spike_sharpness: f32,
    pub fill_size: f32,
    pub fill_opacity: f32,
    /// Degrees.
    pub rotation: f32,
    pub blend_opacity: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            hue: ParamId::Hue.default_value(),
            scale: ParamId::Scale.default_value(),
            spike_count: ParamId::SpikeCount.default_value(),
            spike_sharpness: ParamId::SpikeSharpness.default_value(),
            fill_size: ParamId::FillSize.default_value(),
            fill_opacity: ParamId::FillOpacity.default_value(),
            rotation: ParamId::Rotation.default_value(),
            blend_opacity: ParamId::BlendOpacity.default_value(),
        }
    }
}

/// Inputs of the post-process (dilation) pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub expansion: f32,
    pub fade: f32,
    pub hue_shift: f32,
    pub noise_amount: f32,
    pub noise_rate: f32,
    pub blur_amount: f32,
    pub blur_rate: f32,
}

impl PostParams {
    /// Pure copy: no geometric change, no color effect.
    pub const IDENTITY: PostParams = PostParams {
        expansion: 1.0,
        fade: 0.0,
        hue_shift: 0.0,
        noise_amount: 0.0,
        noise_rate: 0.0,
        blur_amount: 0.0,
        blur_rate: 0.0,
    };
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            expansion: ParamId::ExpansionFactor.default_value(),
            fade: ParamId::FadeAmount.default_value(),
            hue_shift: ParamId::HueShift.default_value(),
            noise_amount: ParamId::NoiseAmount.default_value(),
            noise_rate: ParamId::NoiseRate.default_value(),
            blur_amount: ParamId::BlurAmount.default_value(),
            blur_rate: ParamId::BlurRate.default_value(),
        }
    }
}

/// Everything the renderer needs for one tick. Owned by the host, rebuilt every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameDrawState {
    pub shape: ShapeParams,
    pub post: PostParams,
    pub blend_mode: BlendMode,
    pub manual_rotation: f32,
    /// Degrees per second.
    pub auto_rotation_speed: f32,
    pub elapsed_sec: f32,
    /// Stamp the shape into the trail this tick.
    pub capture: bool,
}

impl FrameDrawState {
    /// Read every parameter's current value. Untracked parameters use their defaults.
    /// The captured shape uses the live rotation of this tick.
    pub fn sample<C: Clock>(
        interp: &ParameterInterpolator<C>,
        blend_mode: BlendMode,
        elapsed_sec: f32,
        capture: bool,
    ) -> Self {
        let v = |id: ParamId| interp.get_current(id).unwrap_or_else(|| id.default_value());
        let manual_rotation = v(ParamId::Rotation);
        let auto_rotation_speed = v(ParamId::AutoRotationSpeed);
        let mut state = Self {
            shape: ShapeParams {
                hue: v(ParamId::Hue),
                scale: v(ParamId::Scale),
                spike_count: v(ParamId::SpikeCount),
                spike_sharpness: v(ParamId::SpikeSharpness),
                fill_size: v(ParamId::FillSize),
                fill_opacity: v(ParamId::FillOpacity),
                rotation: 0.0,
                blend_opacity: v(ParamId::BlendOpacity),
            },
            post: PostParams {
                expansion: v(ParamId::ExpansionFactor),
                fade: v(ParamId::FadeAmount),
                hue_shift: v(ParamId::HueShift),
                noise_amount: v(ParamId::NoiseAmount),
                noise_rate: v(ParamId::NoiseRate),
                blur_amount: v(ParamId::BlurAmount),
                blur_rate: v(ParamId::BlurRate),
            },
            blend_mode,
            manual_rotation,
            auto_rotation_speed,
            elapsed_sec,
            capture,
        };
        state.shape.rotation = state.live_rotation();
        state
    }

    /// Rotation of the continuously redrawn overlay, degrees.
    pub fn live_rotation(&self) -> f32 {
        self.manual_rotation + self.auto_rotation_speed * self.elapsed_sec
    }

    /// Shape parameters for the overlay pass: same shape, live rotation.
    pub fn overlay_shape(&self) -> ShapeParams {
        ShapeParams {
            rotation: self.live_rotation(),
            ..self.shape
        }
    }
}

/// Map any angle into [0, 360).
pub fn normalize_degrees(deg: f32) -> f32 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Where the dilation pass samples the previous frame for output coordinate `uv`.
/// Mirrors `dilate_uv` in `post.wgsl`.
pub fn dilate_uv(uv: Vec2, expansion: f32) -> Vec2 {
    let center = Vec2::splat(0.5);
    let dir = uv - center;
    dir / expansion + center
}

/// Pixel rectangle `(x, y, w, h)` re-cleared after dilation: a 2×2 square centered on
/// the canvas midpoint, clipped to the surface.
pub fn center_clear_rect(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let size = crate::CENTER_CLEAR_SIZE_PX;
    let half = size / 2;
    let x = (width / 2).saturating_sub(half);
    let y = (height / 2).saturating_sub(half);
    let w = size.min(width.saturating_sub(x));
    let h = size.min(height.saturating_sub(y));
    (x, y, w, h)
}
