// Error types module

use thiserror::Error;

/// Centralized error type for asset generation
///
/// Variants follow four categories (see [`ErrorKind`]): bad caller input,
/// rendering failures, encoding failures and missing resources. Text that
/// cannot shrink far enough is not an error; it is rendered overflowing and
/// reported through a `tracing` warning.
#[derive(Error, Debug)]
pub enum AdError {
    /// Color string is not six hex digits with an optional leading '#'
    #[error("Malformed color '{value}': {reason}")]
    MalformedColor { value: String, reason: String },

    /// A required configuration field is empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Input image bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Resampling failed
    #[error("Resize failed: {0}")]
    Resize(String),

    /// Raster to bytes conversion failed
    #[error("Failed to encode to {format}: {message}")]
    Encode { format: String, message: String },

    /// A font face could not be loaded or parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Configuration or job file problem
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error categories used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied invalid input; fail fast
    Input,
    /// Compositing failed
    Render,
    /// Raster could not be serialized
    Encoding,
    /// Fonts, files or other process resources are unavailable
    Resource,
}

impl AdError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdError::MalformedColor { .. }
            | AdError::MissingField(_)
            | AdError::Decode(_)
            | AdError::Config(_) => ErrorKind::Input,
            AdError::Resize(_) => ErrorKind::Render,
            AdError::Encode { .. } => ErrorKind::Encoding,
            AdError::Font(_) | AdError::Io(_) => ErrorKind::Resource,
        }
    }

    pub fn malformed_color(value: impl Into<String>, reason: impl Into<String>) -> Self {
        AdError::MalformedColor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        AdError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn resize_failed(message: impl Into<String>) -> Self {
        AdError::Resize(message.into())
    }
}
