/// Core error types for the Gouache engine.

/// A specialized Result type for Gouache operations.
pub type GouacheResult<T> = Result<T, GouacheError>;

/// Top-level error type encompassing all Gouache subsystems.
#[derive(Debug, thiserror::Error)]
pub enum GouacheError {
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("malformed expression: {0}")]
    Expression(String),

    #[error("stop index {index} out of range ({len} stops)")]
    StopIndex { index: usize, len: usize },

    #[error("case index {index} out of range ({len} cases)")]
    CaseIndex { index: usize, len: usize },

    #[error("cannot remove the last remaining stop")]
    LastStop,

    #[error("layer not found: {0}")]
    LayerNotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GouacheError {
    /// Create an invalid-color error.
    pub fn invalid_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        GouacheError::InvalidColor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-expression error.
    pub fn expression(message: impl Into<String>) -> Self {
        GouacheError::Expression(message.into())
    }
}
