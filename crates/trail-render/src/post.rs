use trail_core::PostUniforms;

use super::helpers;
use super::shader;
use super::targets::TRAIL_FORMAT;
use crate::RenderError;

/// Post-process pipeline set: dilation/effects into the trail format, the same
/// program into the output format, and the scissored center clear.
pub(crate) struct PostResources {
    pub(crate) bgl: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) dilate_uniforms: wgpu::Buffer,
    pub(crate) blit_uniforms: wgpu::Buffer,
    pub(crate) trail_pipeline: wgpu::RenderPipeline,
    pub(crate) output_pipeline: wgpu::RenderPipeline,
    pub(crate) clear_pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    output_format: wgpu::TextureFormat,
) -> Result<PostResources, RenderError> {
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });
    let size = std::mem::size_of::<PostUniforms>();
    let dilate_uniforms = helpers::uniform_buffer(device, "post_dilate_uniforms", size);
    let blit_uniforms = helpers::uniform_buffer(device, "post_blit_uniforms", size);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let (trail_pipeline, output_pipeline, clear_pipeline) =
        shader::link_checked(device, "post", || {
            (
                helpers::make_fullscreen_pipeline(
                    device,
                    "post_trail_pipeline",
                    &layout,
                    post_shader,
                    "fs_post",
                    TRAIL_FORMAT,
                    None,
                ),
                helpers::make_fullscreen_pipeline(
                    device,
                    "post_output_pipeline",
                    &layout,
                    post_shader,
                    "fs_post",
                    output_format,
                    Some(wgpu::BlendState::REPLACE),
                ),
                helpers::make_fullscreen_pipeline(
                    device,
                    "center_clear_pipeline",
                    &layout,
                    post_shader,
                    "fs_clear",
                    TRAIL_FORMAT,
                    None,
                ),
            )
        })?;

    Ok(PostResources {
        bgl,
        dilate_uniforms,
        blit_uniforms,
        trail_pipeline,
        output_pipeline,
        clear_pipeline,
    })
}

pub(crate) fn source_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    source: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniforms: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(source),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniforms.as_entire_binding(),
            },
        ],
    })
}

/// Fullscreen post draw into `target`, replacing its contents.
pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg: &wgpu::BindGroup,
) {
    let mut r = helpers::begin_pass(encoder, label, target, wgpu::LoadOp::Clear(clear));
    helpers::draw_fullscreen(&mut r, pipeline, bg);
}

/// Dilation pass: re-project `history` outward into `target`, then punch the
/// 2×2 fixed point at the canvas midpoint back to transparent.
pub(crate) fn dilate(
    encoder: &mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    post: &PostResources,
    bg_history: &wgpu::BindGroup,
    center_rect: (u32, u32, u32, u32),
) {
    let mut r = helpers::begin_pass(
        encoder,
        "dilate_pass",
        target,
        wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
    );
    helpers::draw_fullscreen(&mut r, &post.trail_pipeline, bg_history);

    let (x, y, w, h) = center_rect;
    if w > 0 && h > 0 {
        // fs_clear ignores its inputs; the bind group only satisfies the layout
        r.set_scissor_rect(x, y, w, h);
        r.set_pipeline(&post.clear_pipeline);
        r.draw(0..3, 0..1);
    }
}
