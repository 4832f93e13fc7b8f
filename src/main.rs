use anyhow::Context;
use clap::Parser;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use trail_viz::{Args, HostCommand, Session};

mod gpu;

use gpu::GpuState;

fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::Space) => Some("Space"),
        Key::Named(NamedKey::Escape) => Some("Escape"),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let mut session = Session::with_system_clock(args.session_config());

    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = WindowBuilder::new()
        .with_title("Trail Visualizer")
        .with_inner_size(winit::dpi::PhysicalSize::new(args.width, args.height))
        .build(&event_loop)
        .context("creating window")?;

    let mut state = pollster::block_on(GpuState::new(&window))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            state.resize(size);
            session.reset_emanation();
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event: key, .. },
            ..
        } if key.state == ElementState::Pressed && !key.repeat => {
            match key_name(&key.logical_key).and_then(HostCommand::for_key) {
                Some(HostCommand::ToggleInterpolation) => {
                    session.toggle_interpolation();
                }
                Some(HostCommand::ClearTrail) => {
                    state.clear_trail();
                    session.reset_emanation();
                }
                Some(HostCommand::CycleBlendMode) => {
                    session.cycle_blend_mode();
                }
                Some(HostCommand::Reseed) => session.reseed_drift(),
                Some(HostCommand::Quit) => elwt.exit(),
                None => {}
            }
        }
        Event::AboutToWait => {
            let frame = session.tick();
            match state.render(&frame) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[main] surface lost, reconfiguring");
                    state.resize(state.window.inner_size());
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[main] out of GPU memory, exiting");
                    elwt.exit();
                }
                Err(e) => log::warn!("[main] dropped frame: {e}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
