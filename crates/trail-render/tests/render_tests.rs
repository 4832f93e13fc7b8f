// Headless GPU tests for the trail pipeline.
// Each test skips (with a message) when the machine has no usable adapter.

use trail_core::{BlendMode, FrameDrawState, PostParams, ShapeParams};
use trail_render::{read_texture_rgba8, GpuContext, RenderError, Renderer, ShaderSources};

const W: u32 = 64;
const H: u32 = 64;
const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

fn gpu() -> Option<GpuContext> {
    match GpuContext::headless() {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            eprintln!("skipping GPU test: {e}");
            None
        }
    }
}

fn output_texture(ctx: &GpuContext, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("test_output"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OUTPUT_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

/// Filled disc centered on the canvas, no spikes, no motion.
fn frame(opacity: f32, capture: bool, expansion: f32) -> FrameDrawState {
    FrameDrawState {
        shape: ShapeParams {
            hue: 120.0,
            scale: 0.5,
            spike_count: 0.0,
            spike_sharpness: 0.0,
            fill_size: 1.0,
            fill_opacity: 1.0,
            rotation: 0.0,
            blend_opacity: opacity,
        },
        post: PostParams {
            expansion,
            ..PostParams::IDENTITY
        },
        blend_mode: BlendMode::Additive,
        manual_rotation: 0.0,
        auto_rotation_speed: 0.0,
        elapsed_sec: 0.0,
        capture,
    }
}

fn render_and_read(
    ctx: &GpuContext,
    renderer: &mut Renderer,
    frame: &FrameDrawState,
) -> Vec<u8> {
    let (w, h) = renderer.size();
    let (tex, view) = output_texture(ctx, w, h);
    renderer.render(ctx, &view, frame);
    read_texture_rgba8(ctx, &tex).expect("readback")
}

fn rgb(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2]]
}

fn is_lit(px: [u8; 3]) -> bool {
    px.iter().any(|c| *c > 16)
}

fn lit_count(pixels: &[u8]) -> usize {
    pixels
        .chunks(4)
        .filter(|p| p[..3].iter().any(|c| *c > 16))
        .count()
}

fn in_center(x: u32, y: u32, width: u32, height: u32) -> bool {
    let (cx, cy, cw, ch) = trail_core::center_clear_rect(width, height);
    x >= cx && x < cx + cw && y >= cy && y < cy + ch
}

#[test]
fn renderer_builds_with_bundled_shaders() {
    let Some(ctx) = gpu() else { return };
    let renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    assert_eq!(renderer.size(), (W, H));
    assert_eq!(renderer.output_format(), OUTPUT_FORMAT);
    assert_eq!(renderer.frame_index(), 0);
}

#[test]
fn broken_shader_fails_with_compiler_log() {
    let Some(ctx) = gpu() else { return };
    let sources = ShaderSources {
        post: "fn fs_post( -> vec4<f32> { return 1.0; }".into(),
        ..ShaderSources::default()
    };
    match Renderer::with_shaders(&ctx, &sources, OUTPUT_FORMAT, W, H) {
        Err(RenderError::ShaderCompile { label, log }) => {
            assert_eq!(label, "post_shader");
            assert!(!log.trim().is_empty(), "compiler log should not be empty");
        }
        Err(other) => panic!("expected ShaderCompile, got {other}"),
        Ok(_) => panic!("broken shader must not produce a renderer"),
    }
}

#[test]
fn fresh_renderer_without_capture_is_black() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    let pixels = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.0));
    assert_eq!(lit_count(&pixels), 0);
    assert_eq!(renderer.frame_index(), 1);
}

#[test]
fn clear_history_leaves_only_the_live_overlay() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    render_and_read(&ctx, &mut renderer, &frame(1.0, true, 1.0));

    renderer.clear_history(&ctx);
    let with_overlay = render_and_read(&ctx, &mut renderer, &frame(1.0, false, 1.0));
    assert!(lit_count(&with_overlay) > 0, "overlay should be visible");

    // The overlay is never carried into history, so hiding it leaves nothing.
    let without_overlay = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.0));
    assert_eq!(lit_count(&without_overlay), 0);
}

#[test]
fn unit_expansion_is_an_identity_blit() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    render_and_read(&ctx, &mut renderer, &frame(1.0, true, 1.0));

    let first = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.0));
    let mut last = first.clone();
    for _ in 0..4 {
        last = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.0));
    }
    assert!(lit_count(&first) > 0, "captured shape should persist in the trail");
    for y in 0..H {
        for x in 0..W {
            if in_center(x, y, W, H) {
                continue;
            }
            let a = rgb(&first, W, x, y);
            let b = rgb(&last, W, x, y);
            for c in 0..3 {
                assert!(
                    (a[c] as i16 - b[c] as i16).abs() <= 2,
                    "pixel ({x},{y}) drifted: {a:?} -> {b:?}"
                );
            }
        }
    }
}

#[test]
fn expansion_grows_trail_outward() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    let mut ring = frame(1.0, true, 1.0);
    ring.shape.scale = 0.2;
    ring.shape.fill_opacity = 0.0;
    render_and_read(&ctx, &mut renderer, &ring);

    let early = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.2));
    let mut late = early.clone();
    for _ in 0..3 {
        late = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.2));
    }
    assert!(
        lit_count(&late) > lit_count(&early),
        "trail should cover more pixels as it dilates ({} vs {})",
        lit_count(&late),
        lit_count(&early)
    );
}

#[test]
fn dilation_fixed_point_is_cleared() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    let stamped = render_and_read(&ctx, &mut renderer, &frame(1.0, true, 1.05));
    assert!(is_lit(rgb(&stamped, W, W / 2, H / 2)), "capture draws over the center");

    let next = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.05));
    let (cx, cy, cw, ch) = trail_core::center_clear_rect(W, H);
    for y in cy..cy + ch {
        for x in cx..cx + cw {
            assert_eq!(rgb(&next, W, x, y), [0, 0, 0], "center pixel ({x},{y})");
        }
    }
    assert!(is_lit(rgb(&next, W, W / 2 - 6, H / 2)), "surroundings keep the trail");
}

#[test]
fn resize_resets_history_and_output_size() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    render_and_read(&ctx, &mut renderer, &frame(1.0, true, 1.0));

    renderer.resize(&ctx, 40, 24);
    assert_eq!(renderer.size(), (40, 24));
    let pixels = render_and_read(&ctx, &mut renderer, &frame(0.0, false, 1.0));
    assert_eq!(pixels.len(), (40 * 24 * 4) as usize);
    assert_eq!(lit_count(&pixels), 0, "history must restart from black");
}

#[test]
fn zero_sized_resize_is_ignored() {
    let Some(ctx) = gpu() else { return };
    let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
    renderer.resize(&ctx, 0, 100);
    renderer.resize(&ctx, 100, 0);
    assert_eq!(renderer.size(), (W, H));
}

#[test]
fn every_blend_mode_keeps_the_trail_outside_the_shape() {
    let Some(ctx) = gpu() else { return };
    let mut ring = frame(1.0, true, 1.0);
    ring.shape.scale = 0.8;
    ring.shape.fill_opacity = 0.0;
    let idle = frame(0.0, false, 1.0);

    for mode in BlendMode::ALL {
        let mut renderer = Renderer::new(&ctx, OUTPUT_FORMAT, W, H).expect("renderer");
        render_and_read(&ctx, &mut renderer, &ring);
        let trail = render_and_read(&ctx, &mut renderer, &idle);
        assert!(is_lit(rgb(&trail, W, W / 2 + 25, H / 2)), "{mode:?}: ring missing");

        let mut disc = frame(1.0, true, 1.0);
        disc.shape.scale = 0.2;
        disc.blend_mode = mode;
        let during = render_and_read(&ctx, &mut renderer, &disc);
        let after = render_and_read(&ctx, &mut renderer, &idle);

        for y in 0..H {
            for x in 0..W {
                let dx = x as f32 + 0.5 - W as f32 / 2.0;
                let dy = y as f32 + 0.5 - H as f32 / 2.0;
                if (dx * dx + dy * dy).sqrt() < 10.0 || !is_lit(rgb(&trail, W, x, y)) {
                    continue;
                }
                assert!(is_lit(rgb(&during, W, x, y)), "{mode:?}: ({x},{y}) lost on screen");
                assert!(is_lit(rgb(&after, W, x, y)), "{mode:?}: ({x},{y}) lost from trail");
            }
        }
    }
}

/// Draws `src` (premultiplied) once over a target cleared to `dst` with the
/// pipeline blend for `mode`, and reads the result back.
fn blend_once(ctx: &GpuContext, mode: BlendMode, src: [f32; 4], dst: [f64; 4]) -> [u8; 4] {
    let wgsl = format!(
        "@vertex
fn vs(@builtin(vertex_index) vi: u32) -> @builtin(position) vec4<f32> {{
    var c = array<vec2<f32>, 3>(vec2<f32>(-1.0, -1.0), vec2<f32>(3.0, -1.0), vec2<f32>(-1.0, 3.0));
    return vec4<f32>(c[vi], 0.0, 1.0);
}}
@fragment
fn fs() -> @location(0) vec4<f32> {{
    return vec4<f32>({:?}, {:?}, {:?}, {:?});
}}",
        src[0], src[1], src[2], src[3]
    );
    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("blend_equation_shader"),
        source: wgpu::ShaderSource::Wgsl(wgsl.into()),
    });
    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("blend_equation"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs"),
            targets: &[Some(wgpu::ColorTargetState {
                format: OUTPUT_FORMAT,
                blend: Some(trail_render::blend_state(mode)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        cache: None,
        multiview: None,
    });

    let (tex, view) = output_texture(ctx, 4, 4);
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("blend_equation"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: dst[0],
                        g: dst[1],
                        b: dst[2],
                        a: dst[3],
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            ..Default::default()
        });
        pass.set_pipeline(&pipeline);
        pass.draw(0..3, 0..1);
    }
    ctx.queue.submit(Some(encoder.finish()));
    let pixels = read_texture_rgba8(ctx, &tex).expect("readback");
    [pixels[0], pixels[1], pixels[2], pixels[3]]
}

#[test]
fn blend_states_follow_mode_equations() {
    let Some(ctx) = gpu() else { return };
    let gray = [0.5, 0.5, 0.5, 1.0];
    let opaque = [0.5, 0.25, 1.0, 1.0];
    let half = [0.25, 0.125, 0.5, 0.5];
    let cases: [(BlendMode, [f32; 4], [f32; 3]); 7] = [
        (BlendMode::Additive, opaque, [1.0, 0.75, 1.0]),
        (BlendMode::Alpha, opaque, [0.5, 0.25, 1.0]),
        (BlendMode::Alpha, half, [0.5, 0.375, 0.75]),
        (BlendMode::Multiply, opaque, [0.25, 0.125, 0.5]),
        (BlendMode::Multiply, half, [0.375, 0.3125, 0.5]),
        (BlendMode::Screen, opaque, [0.75, 0.625, 1.0]),
        (BlendMode::Overlay, opaque, [0.75, 0.375, 1.0]),
    ];
    for (mode, src, expected) in cases {
        let got = blend_once(&ctx, mode, src, gray);
        for c in 0..3 {
            let want = (expected[c] * 255.0).round() as i16;
            assert!(
                (got[c] as i16 - want).abs() <= 2,
                "{mode:?} src={src:?}: channel {c} = {} want {want}",
                got[c]
            );
        }
    }
}
