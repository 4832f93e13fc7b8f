//! Accumulation-trail renderer.
//!
//! Each [`Renderer::render`] call runs five passes in one command buffer:
//!
//! 1. dilate `history` into `scratch` (radial growth, fade, hue shift, noise, blur),
//!    then re-clear the 2×2 fixed point at the canvas midpoint
//! 2. if the frame is a capture, stamp the shape into `scratch`
//! 3. present `scratch` to the output view as a pure copy
//! 4. draw the live shape on top of the output with the live rotation
//! 5. copy `scratch` into `history` for the next call
//!
//! The pass order is load-bearing: pass 1 must read the previous call's fully
//! composited trail while this call's trail is still being assembled.

mod context;
mod error;
mod helpers;
mod post;
mod readback;
mod shader;
mod shape;
mod targets;

pub use context::GpuContext;
pub use error::RenderError;
pub use readback::read_texture_rgba8;
pub use shader::{compile_wgsl, ShaderSources};
pub use shape::blend_state;
pub use targets::TRAIL_FORMAT;

use trail_core::{center_clear_rect, FrameDrawState, PostUniforms, ShapeUniforms};

use post::PostResources;
use shape::ShapeResources;
use targets::TrailTargets;

pub struct Renderer {
    output_format: wgpu::TextureFormat,
    targets: TrailTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    shape: ShapeResources,
    // Bind groups for different sources
    bg_history: wgpu::BindGroup, // dilation: samples history with the frame's effects
    bg_scratch: wgpu::BindGroup, // present/carry-forward: samples scratch as a pure copy
    frame_index: u64,
}

impl Renderer {
    pub fn new(
        ctx: &GpuContext,
        output_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        Self::with_shaders(ctx, &ShaderSources::default(), output_format, width, height)
    }

    /// Build every pipeline up front. Any compile or link failure is returned with
    /// the compiler log; a `Renderer` value only exists once all of them succeeded.
    pub fn with_shaders(
        ctx: &GpuContext,
        sources: &ShaderSources,
        output_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let device = &ctx.device;
        let shape_shader = compile_wgsl(device, "shape_shader", &sources.shape)?;
        let post_shader = compile_wgsl(device, "post_shader", &sources.post)?;

        let post = post::create_post_resources(device, &post_shader, output_format)?;
        let shape = shape::create_shape_resources(device, &shape_shader, output_format)?;

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let targets = TrailTargets::new(device, width, height);
        let (bg_history, bg_scratch) = Self::source_bind_groups(device, &post, &targets, &linear_sampler);

        let mut renderer = Self {
            output_format,
            targets,
            linear_sampler,
            post,
            shape,
            bg_history,
            bg_scratch,
            frame_index: 0,
        };
        renderer.write_blit_uniforms(ctx, 0.0);
        renderer.clear_history(ctx);
        log::info!(
            "[render] renderer ready {}x{} output={:?}",
            renderer.targets.width,
            renderer.targets.height,
            output_format
        );
        Ok(renderer)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.targets.width, self.targets.height)
    }

    pub fn output_format(&self) -> wgpu::TextureFormat {
        self.output_format
    }

    /// Number of completed `render` calls since construction.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Recreate both trail surfaces at the new size and reset them to opaque black.
    /// Existing trails are lost. Zero-sized requests are ignored.
    pub fn resize(&mut self, ctx: &GpuContext, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("[render] ignoring zero-sized resize {}x{}", width, height);
            return;
        }
        self.targets.recreate(&ctx.device, width, height);
        let (bg_history, bg_scratch) =
            Self::source_bind_groups(&ctx.device, &self.post, &self.targets, &self.linear_sampler);
        self.bg_history = bg_history;
        self.bg_scratch = bg_scratch;
        self.write_blit_uniforms(ctx, 0.0);
        self.clear_history(ctx);
        log::info!("[render] resized trail targets to {}x{}", width, height);
    }

    /// Reset both trail surfaces to opaque black.
    pub fn clear_history(&mut self, ctx: &GpuContext) {
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("clear_history_encoder"),
            });
        helpers::clear(&mut encoder, "clear_history", &self.targets.history_view, wgpu::Color::BLACK);
        helpers::clear(&mut encoder, "clear_scratch", &self.targets.scratch_view, wgpu::Color::BLACK);
        ctx.queue.submit(Some(encoder.finish()));
    }

    /// Produce one displayed frame into `output`, which must have `output_format()`
    /// and the renderer's size.
    pub fn render(&mut self, ctx: &GpuContext, output: &wgpu::TextureView, frame: &FrameDrawState) {
        let resolution = self.targets.resolution();
        let time = frame.elapsed_sec;

        let dilate = PostUniforms::new(resolution, time, &frame.post);
        ctx.queue
            .write_buffer(&self.post.dilate_uniforms, 0, bytemuck::bytes_of(&dilate));
        self.write_blit_uniforms(ctx, time);
        let captured = ShapeUniforms::new(resolution, time, &frame.shape);
        ctx.queue
            .write_buffer(&self.shape.capture_uniforms, 0, bytemuck::bytes_of(&captured));
        let live = ShapeUniforms::new(resolution, time, &frame.overlay_shape());
        ctx.queue
            .write_buffer(&self.shape.overlay_uniforms, 0, bytemuck::bytes_of(&live));

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("trail_encoder"),
            });

        // Pass 1: dilate history -> scratch, then clear the fixed point
        post::dilate(
            &mut encoder,
            &self.targets.scratch_view,
            &self.post,
            &self.bg_history,
            center_clear_rect(self.targets.width, self.targets.height),
        );

        // Pass 2: stamp the captured shape into scratch
        if frame.capture {
            shape::stamp(
                &mut encoder,
                "capture_pass",
                &self.targets.scratch_view,
                self.shape.trail.get(frame.blend_mode),
                &self.shape.capture_bg,
            );
        }

        // Pass 3: present scratch -> output
        post::blit(
            &mut encoder,
            "present_pass",
            output,
            wgpu::Color::BLACK,
            &self.post.output_pipeline,
            &self.bg_scratch,
        );

        // Pass 4: live overlay on top of the output
        shape::stamp(
            &mut encoder,
            "overlay_pass",
            output,
            self.shape.output.get(frame.blend_mode),
            &self.shape.overlay_bg,
        );

        // Pass 5: carry scratch forward into history
        post::blit(
            &mut encoder,
            "carry_forward_pass",
            &self.targets.history_view,
            wgpu::Color::BLACK,
            &self.post.trail_pipeline,
            &self.bg_scratch,
        );

        ctx.queue.submit(Some(encoder.finish()));
        self.frame_index += 1;
    }

    fn write_blit_uniforms(&self, ctx: &GpuContext, time: f32) {
        let blit = PostUniforms::blit(self.targets.resolution(), time);
        ctx.queue
            .write_buffer(&self.post.blit_uniforms, 0, bytemuck::bytes_of(&blit));
    }

    fn source_bind_groups(
        device: &wgpu::Device,
        post: &PostResources,
        targets: &TrailTargets,
        sampler: &wgpu::Sampler,
    ) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let bg_history = post::source_bind_group(
            device,
            "bg_history",
            &post.bgl,
            &targets.history_view,
            sampler,
            &post.dilate_uniforms,
        );
        let bg_scratch = post::source_bind_group(
            device,
            "bg_scratch",
            &post.bgl,
            &targets.scratch_view,
            sampler,
            &post.blit_uniforms,
        );
        (bg_history, bg_scratch)
    }
}
