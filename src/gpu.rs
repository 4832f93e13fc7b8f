use anyhow::Context;
use trail_core::FrameDrawState;
use trail_render::{GpuContext, Renderer};
use winit::window::Window;

pub struct GpuState<'w> {
    pub window: &'w Window,
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    ctx: GpuContext,
    renderer: Renderer,
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let ctx = GpuContext::new(instance, Some(&surface))
            .await
            .context("creating GPU context")?;

        let caps = surface.get_capabilities(&ctx.adapter);
        // Linear formats keep shader colors untouched on the way out
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&ctx.device, &config);

        let renderer =
            Renderer::new(&ctx, format, width, height).context("building trail renderer")?;

        Ok(Self {
            window,
            surface,
            config,
            ctx,
            renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.ctx.device, &self.config);
        self.renderer
            .resize(&self.ctx, new_size.width, new_size.height);
    }

    pub fn clear_trail(&mut self) {
        self.renderer.clear_history(&self.ctx);
    }

    pub fn render(&mut self, frame: &FrameDrawState) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&self.ctx, &view, frame);
        output.present();
        Ok(())
    }
}
