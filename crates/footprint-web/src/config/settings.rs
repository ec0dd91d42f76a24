//! Configuration Settings

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use footprint_pdf::ReportOptions;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WebError};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "footprint.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Verbose logging
    pub debug: bool,
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Report rendering settings
    pub report: ReportOptions,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WebError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| WebError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicit config file, else `footprint.toml` if present in
    /// `dir`, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address (default: 127.0.0.1)
    pub bind: String,
    /// Port (default: 5000, 0 picks a free port)
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerSettings {
    /// Resolve the configured address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind, self.port);
        addr.to_socket_addrs()
            .map_err(|e| WebError::Address(format!("{}: {}", addr, e)))?
            .next()
            .ok_or(WebError::Address(addr))
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let server = ServerSettings::default();
        assert_eq!(server.bind, "127.0.0.1");
        assert_eq!(server.port, 5000);
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerSettings {
            bind: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_socket_addr() {
        let server = ServerSettings {
            bind: "not an address".to_string(),
            port: 1,
        };
        assert!(matches!(server.socket_addr(), Err(WebError::Address(_))));
    }
}
