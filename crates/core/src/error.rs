//! Error types for plotline.

use thiserror::Error;

/// Errors produced while configuring renders or exporting their output.
///
/// Render calls themselves are infallible once their inputs are validated;
/// every variant here is raised either at a construction boundary or by I/O.
#[derive(Debug, Error)]
pub enum RenderError {
    /// `width * height` overflowed `usize`.
    #[error("invalid dimensions: width * height overflows usize")]
    InvalidDimensions,

    /// The pixel slice length did not match `width * height`.
    #[error("pixel buffer holds {got} pixels, expected {expected}")]
    BufferSizeMismatch { expected: usize, got: usize },

    /// A settings or renderer option value was out of range.
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// A renderer name was not recognized by the registry.
    #[error("unknown renderer: {0}")]
    UnknownRenderer(String),

    /// An export format name was not recognized.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// Writing an export or snapshot failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[error("image error: {0}")]
    Image(String),
}

impl RenderError {
    /// Shorthand for an [`RenderError::InvalidConfiguration`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
