use super::helpers;

/// Format of both trail surfaces. Half floats keep slow fades from stalling.
pub const TRAIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

const TRAIL_USAGE: wgpu::TextureUsages = wgpu::TextureUsages::RENDER_ATTACHMENT
    .union(wgpu::TextureUsages::TEXTURE_BINDING)
    .union(wgpu::TextureUsages::COPY_SRC);

/// The accumulation surface pair.
///
/// - `history` holds the composited trail of the previous `render` call.
/// - `scratch` is assembled each call and must not be read across calls.
pub(crate) struct TrailTargets {
    pub(crate) history_tex: wgpu::Texture,
    pub(crate) history_view: wgpu::TextureView,
    pub(crate) scratch_tex: wgpu::Texture,
    pub(crate) scratch_view: wgpu::TextureView,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl TrailTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (history_tex, history_view) =
            helpers::create_color_texture(device, "trail_history", width, height, TRAIL_FORMAT, TRAIL_USAGE);
        let (scratch_tex, scratch_view) =
            helpers::create_color_texture(device, "trail_scratch", width, height, TRAIL_FORMAT, TRAIL_USAGE);
        Self {
            history_tex,
            history_view,
            scratch_tex,
            scratch_view,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Destroy both surfaces and allocate new ones. Contents are lost.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.history_tex.destroy();
        self.scratch_tex.destroy();
        *self = Self::new(device, width, height);
    }

    pub(crate) fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}
