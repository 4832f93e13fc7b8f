use trail_core::{BlendMode, ShapeUniforms};

use super::helpers;
use super::shader;
use super::targets::TRAIL_FORMAT;
use crate::RenderError;

/// Fixed-function blend for each mode. The shape shader writes premultiplied color
/// and discards pixels it does not cover. Multiply is weighted by coverage:
/// `dst·src + dst·(1-a)`, which is `dst·src` wherever the shape is opaque.
pub fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    use wgpu::{BlendComponent, BlendFactor as F, BlendOperation};
    let comp = |src_factor, dst_factor| BlendComponent {
        src_factor,
        dst_factor,
        operation: BlendOperation::Add,
    };
    match mode {
        BlendMode::Additive => wgpu::BlendState {
            color: comp(F::One, F::One),
            alpha: comp(F::One, F::One),
        },
        BlendMode::Alpha => wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
        BlendMode::Multiply => wgpu::BlendState {
            color: comp(F::Dst, F::OneMinusSrcAlpha),
            alpha: comp(F::Zero, F::One),
        },
        BlendMode::Screen => wgpu::BlendState {
            color: comp(F::One, F::OneMinusSrc),
            alpha: comp(F::One, F::OneMinusSrcAlpha),
        },
        BlendMode::Overlay => wgpu::BlendState {
            color: comp(F::One, F::Src),
            alpha: comp(F::One, F::OneMinusSrcAlpha),
        },
    }
}

/// One pipeline per blend mode, for one color format.
pub(crate) struct BlendPipelines {
    by_mode: Vec<wgpu::RenderPipeline>,
}

impl BlendPipelines {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
    ) -> Self {
        let by_mode = BlendMode::ALL
            .iter()
            .map(|mode| {
                helpers::make_fullscreen_pipeline(
                    device,
                    &format!("shape_{}_{:?}", mode.name(), format),
                    layout,
                    shader,
                    "fs_shape",
                    format,
                    Some(blend_state(*mode)),
                )
            })
            .collect();
        Self { by_mode }
    }

    pub(crate) fn get(&self, mode: BlendMode) -> &wgpu::RenderPipeline {
        &self.by_mode[mode.index()]
    }
}

/// Shape pipelines plus separate uniform slots for the captured stamp and the
/// live overlay, since both are written before the same submit.
pub(crate) struct ShapeResources {
    pub(crate) capture_uniforms: wgpu::Buffer,
    pub(crate) overlay_uniforms: wgpu::Buffer,
    pub(crate) capture_bg: wgpu::BindGroup,
    pub(crate) overlay_bg: wgpu::BindGroup,
    pub(crate) trail: BlendPipelines,
    pub(crate) output: BlendPipelines,
}

pub(crate) fn create_shape_resources(
    device: &wgpu::Device,
    shape_shader: &wgpu::ShaderModule,
    output_format: wgpu::TextureFormat,
) -> Result<ShapeResources, RenderError> {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("shape_bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let size = std::mem::size_of::<ShapeUniforms>();
    let capture_uniforms = helpers::uniform_buffer(device, "shape_capture_uniforms", size);
    let overlay_uniforms = helpers::uniform_buffer(device, "shape_overlay_uniforms", size);
    let bind = |label: &str, buffer: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    };
    let capture_bg = bind("shape_capture_bg", &capture_uniforms);
    let overlay_bg = bind("shape_overlay_bg", &overlay_uniforms);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_shape"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let (trail, output) = shader::link_checked(device, "shape", || {
        (
            BlendPipelines::new(device, &layout, shape_shader, TRAIL_FORMAT),
            BlendPipelines::new(device, &layout, shape_shader, output_format),
        )
    })?;

    Ok(ShapeResources {
        capture_uniforms,
        overlay_uniforms,
        capture_bg,
        overlay_bg,
        trail,
        output,
    })
}

/// Draw the shape on top of whatever `target` already holds.
pub(crate) fn stamp(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg: &wgpu::BindGroup,
) {
    let mut r = helpers::begin_pass(encoder, label, target, wgpu::LoadOp::Load);
    helpers::draw_fullscreen(&mut r, pipeline, bg);
}
