//! Error types for footprint calculations

use thiserror::Error;

/// Result type for footprint operations
pub type Result<T> = std::result::Result<T, FootprintError>;

/// Errors that can occur while reading calculator inputs or report parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FootprintError {
    /// A calculator form field is missing or not a finite number
    #[error("Invalid input for '{field}': {value:?}")]
    InvalidInput { field: &'static str, value: String },

    /// One or more report parameters are absent
    #[error("Missing parameters: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    /// A report parameter is present but not a finite number
    #[error("Invalid value for parameter '{field}': {value:?}")]
    InvalidParameters { field: &'static str, value: String },
}

impl FootprintError {
    /// Human-readable text returned to the client
    pub fn user_message(&self) -> &'static str {
        match self {
            FootprintError::InvalidInput { .. } => "Invalid input, please enter valid numbers.",
            FootprintError::MissingParameters(_) => "Missing parameters for PDF generation",
            FootprintError::InvalidParameters { .. } => "Invalid parameter values",
        }
    }
}
