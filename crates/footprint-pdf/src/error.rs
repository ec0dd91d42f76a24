//! Error types for report generation

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// Chart rendering failed
    #[error("Chart rendering failed: {0}")]
    Chart(#[from] footprint_chart::ChartError),

    /// Typst compilation error
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
