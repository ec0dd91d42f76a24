//! Error types for chart rendering

use thiserror::Error;

/// Errors that can occur while rendering a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// Unknown or disabled output format
    #[error("Unsupported chart format: {0}")]
    UnsupportedFormat(String),

    /// The generated SVG could not be parsed
    #[error("SVG parsing failed: {0}")]
    InvalidSvg(String),

    /// Rasterization failed
    #[error("Rendering failed: {0}")]
    RenderFailed(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
