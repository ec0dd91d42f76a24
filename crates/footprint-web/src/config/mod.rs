//! Configuration
//!
//! Settings are loaded from `footprint.toml` in the working directory, or
//! from a file passed with `--config`:
//!
//! ```toml
//! debug = false
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 5000
//!
//! [report]
//! chart_format = "svg"
//! font_paths = []
//!
//! [report.chart]
//! width = 500
//! height = 500
//! ```

mod settings;


pub use settings::{ServerSettings, Settings, DEFAULT_CONFIG_FILE};
