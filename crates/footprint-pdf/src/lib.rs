//! footprint-pdf - PDF report generation via Typst
//!
//! This crate renders the downloadable carbon footprint report using Typst
//! as the typesetting backend.
//!
//! # Architecture
//!
//! The report pipeline consists of three stages:
//!
//! 1. **Chart** - Renders the emission distribution pie chart in memory
//! 2. **Transpiler** - Lays the report out as Typst markup
//! 3. **Compiler** - Compiles Typst markup (plus the chart) to PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use chrono::Local;
//! use footprint_core::compute;
//!
//! let breakdown = compute(100.0, 50.0, 10.0);
//! let (chart, pdf) = footprint_pdf::render(&breakdown, Local::now().naive_local())?;
//! ```

mod compiler;
mod error;
mod report;
mod transpiler;

pub use compiler::{Asset, Compiler, PdfDocument};
pub use error::{PdfError, Result};
pub use report::{RenderedReport, ReportOptions, ReportRenderer, REPORT_FILE_NAME};
pub use transpiler::{
    ReportContent, Transpiler, FOOTER_TEXT, REPORT_SUBTITLE, REPORT_TITLE, TIMESTAMP_FORMAT,
};

use chrono::NaiveDateTime;
use footprint_chart::ChartImage;
use footprint_core::EmissionBreakdown;

/// Render the chart and the report with default options
///
/// # Arguments
/// * `breakdown` - Emission values to report
/// * `generated_at` - Timestamp printed on the report
///
/// # Returns
/// The chart image and the PDF embedding it
pub fn render(
    breakdown: &EmissionBreakdown,
    generated_at: NaiveDateTime,
) -> Result<(ChartImage, PdfDocument)> {
    let rendered = ReportRenderer::default().render(breakdown, generated_at)?;
    Ok((rendered.chart, rendered.document))
}

/// Convenience function to render only the PDF with default options
pub fn render_pdf(breakdown: &EmissionBreakdown, generated_at: NaiveDateTime) -> Result<PdfDocument> {
    ReportRenderer::default().render_pdf(breakdown, generated_at)
}
