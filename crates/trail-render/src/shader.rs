//! Shader compilation and pipeline creation with captured diagnostics.
//!
//! Both run inside a validation error scope so a bad shader surfaces as a
//! [`RenderError`] carrying the compiler log instead of a blank frame or a
//! panic from the uncaptured-error handler.

use std::borrow::Cow;

use crate::RenderError;

/// WGSL sources for the two pipelines. Defaults to the bundled shaders.
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub shape: Cow<'static, str>,
    pub post: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            shape: Cow::Borrowed(trail_core::SHAPE_WGSL),
            post: Cow::Borrowed(trail_core::POST_WGSL),
        }
    }
}

pub fn compile_wgsl(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let info = pollster::block_on(module.get_compilation_info());
    let scoped = pollster::block_on(device.pop_error_scope());

    let messages: Vec<String> = info
        .messages
        .iter()
        .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();
    if !messages.is_empty() {
        return Err(RenderError::ShaderCompile {
            label: label.to_string(),
            log: messages.join("\n"),
        });
    }
    if let Some(err) = scoped {
        return Err(RenderError::ShaderCompile {
            label: label.to_string(),
            log: err.to_string(),
        });
    }
    log::debug!("[render] compiled shader {}", label);
    Ok(module)
}

/// Run `build` (pipeline creation) and turn any validation error into `PipelineLink`.
pub fn link_checked<T>(
    device: &wgpu::Device,
    label: &str,
    build: impl FnOnce() -> T,
) -> Result<T, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(RenderError::PipelineLink {
            label: label.to_string(),
            log: err.to_string(),
        }),
        None => Ok(value),
    }
}
