use thiserror::Error;

/// Fatal renderer failures. Shader and pipeline variants carry the compiler log.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no GPU adapter available")]
    NoAdapter,
    #[error("request_device failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("shader `{label}` failed to compile:\n{log}")]
    ShaderCompile { label: String, log: String },
    #[error("pipeline `{label}` failed to link:\n{log}")]
    PipelineLink { label: String, log: String },
    #[error("texture readback failed: {0}")]
    Readback(String),
}
