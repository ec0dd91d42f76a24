//! footprint-web - Carbon footprint calculator web application
//!
//! This library provides:
//! - Router: the `/` calculator form and `/download_pdf` report endpoints
//! - ReportServer: a tiny_http listener serving the router
//! - Settings: TOML configuration
//! - CLI: the `footprint` binary (`serve`, `report`)
//!
//! # Library Usage
//!
//! ```ignore
//! use footprint_pdf::ReportRenderer;
//! use footprint_web::{ReportServer, Router, Settings};
//!
//! let settings = Settings::default();
//! let router = Router::new(ReportRenderer::new(settings.report.clone())?);
//! let server = ReportServer::start(&settings.server, router)?;
//! println!("listening on {}", server.url());
//! server.wait();
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Serve the calculator on port 8080
//! footprint serve --port 8080
//!
//! # Write a report without starting the server
//! footprint report --electricity 100 --distance 50 --waste 10 -o report.pdf
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod views;

// Re-export main entry point and types
pub use app::{init_tracing, report_command, run_cli, serve_command};
pub use config::{ServerSettings, Settings};
pub use error::{Result, WebError};
pub use routes::{HttpResponse, Router};
pub use server::ReportServer;
