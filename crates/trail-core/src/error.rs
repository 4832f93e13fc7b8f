use thiserror::Error;

/// Errors raised when external names are resolved into core types.
///
/// Reads of untracked parameters never produce an error; they return `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
    #[error("unknown blend mode `{0}`")]
    UnknownBlendMode(String),
}
