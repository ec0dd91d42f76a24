//! Chart renderer
//!
//! Produces [`ChartImage`]s from a [`PieChart`]. SVG output is always
//! available; PNG output requires the `raster` feature, which converts the
//! SVG with `resvg`.

#[cfg(feature = "raster")]
use std::sync::Arc;

use crate::error::{ChartError, Result};
use crate::pie::PieChart;
use crate::types::{ChartFormat, ChartImage, ChartOptions};

/// Renders charts to in-memory images
///
/// Holds a font database loaded once at construction so that PNG labels can
/// be shaped without rescanning system fonts per request.
pub struct ChartRenderer {
    #[cfg(feature = "raster")]
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    /// Create a renderer with system fonts loaded
    #[cfg(feature = "raster")]
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();

        if fontdb.is_empty() {
            log::warn!("No system fonts found, PNG chart labels may be missing");
        }

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer
    #[cfg(not(feature = "raster"))]
    pub fn new() -> Self {
        Self {}
    }

    /// Check whether a format can be produced by this build
    pub fn supports_format(&self, format: ChartFormat) -> bool {
        match format {
            ChartFormat::Svg => true,
            ChartFormat::Png => cfg!(feature = "raster"),
        }
    }

    /// Render a chart in the requested format
    pub fn render(
        &self,
        chart: &PieChart,
        format: ChartFormat,
        options: &ChartOptions,
    ) -> Result<ChartImage> {
        if !self.supports_format(format) {
            return Err(ChartError::UnsupportedFormat(format.to_string()));
        }

        let svg = chart.to_svg(options);
        let bytes = match format {
            ChartFormat::Svg => svg.into_bytes(),
            ChartFormat::Png => self.svg_to_png(&svg, options)?,
        };

        log::debug!("Rendered {} chart ({} bytes)", format, bytes.len());
        Ok(ChartImage::new(format, bytes))
    }

    /// Convert SVG string to PNG bytes using resvg
    #[cfg(feature = "raster")]
    fn svg_to_png(&self, svg: &str, options: &ChartOptions) -> Result<Vec<u8>> {
        let tree = {
            let opts = usvg::Options {
                fontdb: Arc::clone(&self.fontdb),
                ..usvg::Options::default()
            };
            usvg::Tree::from_str(svg, &opts).map_err(|e| ChartError::InvalidSvg(e.to_string()))?
        };

        let scale = if options.scale > 0.0 { options.scale } else { 1.0 };
        let size = tree.size();
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            ChartError::RenderFailed(format!("Failed to create pixmap ({}x{})", width, height))
        })?;

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| ChartError::Encode(e.to_string()))
    }

    #[cfg(not(feature = "raster"))]
    fn svg_to_png(&self, _svg: &str, _options: &ChartOptions) -> Result<Vec<u8>> {
        Err(ChartError::UnsupportedFormat(ChartFormat::Png.to_string()))
    }
}
