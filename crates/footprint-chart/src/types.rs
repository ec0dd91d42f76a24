//! Chart formats, options and the rendered image

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Output formats a chart can be rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    /// SVG vector image
    #[default]
    Svg,
    /// PNG raster image
    Png,
}

impl ChartFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ChartFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(ChartError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Options for chart rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Canvas width in SVG user units
    pub width: u32,
    /// Canvas height in SVG user units
    pub height: u32,
    /// Raster scale factor (PNG only, 1.0 = one pixel per unit)
    pub scale: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            scale: 2.0,
        }
    }
}

impl ChartOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set raster scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// A rendered chart held entirely in memory
///
/// The image is never written to disk; dropping it releases the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    format: ChartFormat,
    bytes: Vec<u8>,
}

impl ChartImage {
    /// Wrap rendered bytes
    pub fn new(format: ChartFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Output format of the image
    pub fn format(&self) -> ChartFormat {
        self.format
    }

    /// Name under which the image is exposed to a document compiler
    pub fn file_name(&self) -> String {
        format!("emission_chart.{}", self.format.extension())
    }

    /// Raw image bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the image, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_format_from_str() {
        assert_eq!("svg".parse::<ChartFormat>().unwrap(), ChartFormat::Svg);
        assert_eq!("PNG".parse::<ChartFormat>().unwrap(), ChartFormat::Png);
        assert!("gif".parse::<ChartFormat>().is_err());
    }

    #[test]
    fn test_chart_format_properties() {
        assert_eq!(ChartFormat::Png.extension(), "png");
        assert_eq!(ChartFormat::Svg.mime_type(), "image/svg+xml");
        assert_eq!(ChartFormat::default(), ChartFormat::Svg);
    }

    #[test]
    fn test_chart_options_deserialize_partial() {
        let options: ChartOptions = toml::from_str("width = 640").unwrap();
        assert_eq!(options.width, 640);
        assert_eq!(options.height, 500);
    }

    #[test]
    fn test_chart_image_accessors() {
        let image = ChartImage::new(ChartFormat::Png, vec![1, 2, 3]);
        assert_eq!(image.file_name(), "emission_chart.png");
        assert_eq!(image.len(), 3);
        assert!(!image.is_empty());
        assert_eq!(image.into_bytes(), vec![1, 2, 3]);
    }
}
