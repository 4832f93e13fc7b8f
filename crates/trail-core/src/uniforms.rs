//! GPU uniform layouts. Field order must match the structs in `shaders/*.wgsl`.

use crate::frame::{PostParams, ShapeParams};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub hue: f32,
    pub scale: f32,
    pub spike_count: f32,
    pub spike_sharpness: f32,
    pub fill_size: f32,
    pub fill_opacity: f32,
    pub rotation: f32, // radians
    pub blend_opacity: f32,
    pub _pad: f32,
}

impl ShapeUniforms {
    pub fn new(resolution: [f32; 2], time: f32, shape: &ShapeParams) -> Self {
        Self {
            resolution,
            time,
            hue: shape.hue,
            scale: shape.scale,
            spike_count: shape.spike_count,
            spike_sharpness: shape.spike_sharpness,
            fill_size: shape.fill_size,
            fill_opacity: shape.fill_opacity,
            rotation: shape.rotation.to_radians(),
            blend_opacity: shape.blend_opacity,
            _pad: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub expansion: f32,
    pub fade: f32,
    pub hue_shift: f32, // degrees
    pub noise_amount: f32,
    pub noise_rate: f32,
    pub blur_amount: f32,
    pub blur_rate: f32,
    pub _pad: [f32; 2],
}

impl PostUniforms {
    pub fn new(resolution: [f32; 2], time: f32, post: &PostParams) -> Self {
        Self {
            resolution,
            time,
            // a zero factor would divide by zero in the shader
            expansion: if post.expansion.abs() > f32::EPSILON {
                post.expansion
            } else {
                1.0
            },
            fade: post.fade,
            hue_shift: post.hue_shift,
            noise_amount: post.noise_amount,
            noise_rate: post.noise_rate,
            blur_amount: post.blur_amount,
            blur_rate: post.blur_rate,
            _pad: [0.0; 2],
        }
    }

    /// Pure copy through the post pipeline.
    pub fn blit(resolution: [f32; 2], time: f32) -> Self {
        Self::new(resolution, time, &PostParams::IDENTITY)
    }
}
