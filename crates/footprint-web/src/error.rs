//! Error types for server setup

use std::path::PathBuf;

use thiserror::Error;

/// Result type for server setup operations
pub type Result<T> = std::result::Result<T, WebError>;

/// Errors that can occur while configuring or starting the server
///
/// Request-level problems never surface here; they become HTTP responses.
#[derive(Error, Debug)]
pub enum WebError {
    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::Settings`]
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Bind address could not be parsed
    #[error("Invalid bind address: {0}")]
    Address(String),

    /// Listener could not be created
    #[error("Failed to start server on {addr}: {message}")]
    Bind { addr: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
