//! Report rendering pipeline
//!
//! Breakdown -> pie chart image (memory only) -> Typst markup -> PDF.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use footprint_chart::{ChartFormat, ChartImage, ChartOptions, ChartRenderer, PieChart};
use footprint_core::EmissionBreakdown;

use crate::compiler::{Asset, Compiler, PdfDocument};
use crate::error::Result;
use crate::transpiler::{ReportContent, Transpiler};

/// File name offered for the downloaded report
pub const REPORT_FILE_NAME: &str = "carbon_footprint_report.pdf";

/// Report rendering options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Image format the chart is embedded as
    pub chart_format: ChartFormat,
    /// Chart canvas settings
    pub chart: ChartOptions,
    /// Extra font files handed to the typesetter
    pub font_paths: Vec<PathBuf>,
}

/// Output of a single render: the chart and the document embedding it
#[derive(Debug)]
pub struct RenderedReport {
    pub chart: ChartImage,
    pub document: PdfDocument,
}

/// Renders footprint reports
///
/// Holds no per-request state and can be shared between requests.
pub struct ReportRenderer {
    charts: ChartRenderer,
    compiler: Compiler,
    options: ReportOptions,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            charts: ChartRenderer::new(),
            compiler: Compiler::new(),
            options: ReportOptions::default(),
        }
    }
}

impl ReportRenderer {
    /// Create a renderer, loading any configured font files
    pub fn new(options: ReportOptions) -> Result<Self> {
        let compiler = Compiler::new().with_font_paths(options.font_paths.iter().cloned())?;
        Ok(Self {
            charts: ChartRenderer::new(),
            compiler,
            options,
        })
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Render the chart and the PDF report for a breakdown
    ///
    /// The chart only ever exists in memory and is handed back to the caller
    /// together with the document.
    pub fn render(
        &self,
        breakdown: &EmissionBreakdown,
        generated_at: NaiveDateTime,
    ) -> Result<RenderedReport> {
        let chart = self.charts.render(
            &PieChart::from_breakdown(breakdown),
            self.options.chart_format,
            &self.options.chart,
        )?;

        let chart_path = format!("/{}", chart.file_name());
        let markup = Transpiler::transpile(&ReportContent {
            breakdown,
            generated_at,
            chart_path: Some(&chart_path),
        });
        log::trace!("Report markup:\n{}", markup);

        let assets = [Asset::new(chart_path.as_str(), chart.as_bytes().to_vec())];
        let document = self.compiler.compile(&markup, &assets)?;

        log::debug!(
            "Rendered report: {} byte chart, {} byte PDF",
            chart.len(),
            document.len()
        );
        Ok(RenderedReport { chart, document })
    }

    /// Render and keep only the PDF
    pub fn render_pdf(
        &self,
        breakdown: &EmissionBreakdown,
        generated_at: NaiveDateTime,
    ) -> Result<PdfDocument> {
        self.render(breakdown, generated_at)
            .map(|rendered| rendered.document)
    }
}
