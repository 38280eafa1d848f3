use thiserror::Error;

/// Layout problems are recoverable: the affected update is skipped and the
/// last good state is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("viewport has zero size ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
    #[error("element has zero size ({width}x{height})")]
    ZeroSize { width: f32, height: f32 },
    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspect(f32),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("setting `{key}`: cannot parse `{value}`")]
    Unparsable { key: String, value: String },
    #[error("setting `{key}` out of range: {reason}")]
    OutOfRange { key: &'static str, reason: &'static str },
}
