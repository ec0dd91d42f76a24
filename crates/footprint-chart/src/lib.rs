//! # footprint-chart
//!
//! Pie chart of the emission distribution, rendered to an in-memory SVG or
//! PNG image for embedding in the footprint report.
//!
//! ## Example
//!
//! ```
//! use footprint_chart::{ChartFormat, ChartOptions, ChartRenderer, PieChart};
//! use footprint_core::compute;
//!
//! let chart = PieChart::from_breakdown(&compute(100.0, 50.0, 10.0));
//! let image = ChartRenderer::new().render(&chart, ChartFormat::Svg, &ChartOptions::default())?;
//! assert!(!image.is_empty());
//! # Ok::<(), footprint_chart::ChartError>(())
//! ```

pub mod error;
pub mod pie;
pub mod renderer;
pub mod types;

pub use error::{ChartError, Result};
pub use pie::{slice_color, PieChart, Slice, CHART_TITLE, EMPTY_CHART_NOTE};
pub use renderer::ChartRenderer;
pub use types::{ChartFormat, ChartImage, ChartOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
