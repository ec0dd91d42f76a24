//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib. Images referenced by
//! the markup are served from memory and fonts are loaded once per process,
//! so compilation never touches the disk.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use typst_as_lib::TypstEngine;
use usvg::fontdb;

use crate::error::{PdfError, Result};

/// A binary file made available to the markup under a virtual path
#[derive(Debug, Clone)]
pub struct Asset {
    /// Absolute virtual path, e.g. `/emission_chart.svg`
    pub path: String,
    pub bytes: Vec<u8>,
}

impl Asset {
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// A compiled PDF held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the document to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// System families tried for sans-serif text such as chart labels
const SANS_FAMILIES: [&str; 4] = ["Helvetica", "Arial", "Liberation Sans", "DejaVu Sans"];

/// Compiler for converting Typst markup to PDF
///
/// Font data lives for the rest of the process once loaded.
#[derive(Clone)]
pub struct Compiler {
    fonts: Vec<&'static [u8]>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Create a compiler using the bundled Typst fonts and system sans faces
    pub fn new() -> Self {
        Self {
            fonts: shared_fonts().to_vec(),
        }
    }

    /// Add font files, read once here and reused for every compilation
    pub fn with_font_paths(mut self, font_paths: impl IntoIterator<Item = PathBuf>) -> Result<Self> {
        for font_path in font_paths {
            let bytes = std::fs::read(&font_path).map_err(|e| {
                PdfError::Font(format!("Failed to read font {}: {}", font_path.display(), e))
            })?;
            log::debug!("Loaded font {} ({} bytes)", font_path.display(), bytes.len());
            self.fonts.push(leak(bytes));
        }
        Ok(self)
    }

    /// Number of font files handed to the typesetter
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Compile Typst markup to a PDF document
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `assets` - In-memory files the markup may reference by path
    pub fn compile(&self, markup: &str, assets: &[Asset]) -> Result<PdfDocument> {
        // Build the Typst engine with the markup as main file
        let builder = TypstEngine::builder()
            .main_file(markup.to_string())
            .fonts(self.fonts.iter().copied());

        let engine = builder
            .with_static_file_resolver(
                assets
                    .iter()
                    .map(|asset| (asset.path.as_str(), asset.bytes.clone())),
            )
            .build();

        // compiled is Warned<Result<Document, Error>>
        let compiled = engine.compile();
        for warning in &compiled.warnings {
            log::debug!("Typst warning: {}", warning.message);
        }

        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(PdfDocument {
            bytes: pdf_bytes.into(),
        })
    }
}

/// Fonts shared by every compiler, loaded on first use
fn shared_fonts() -> &'static [&'static [u8]] {
    static FONTS: OnceLock<Vec<&'static [u8]>> = OnceLock::new();
    FONTS.get_or_init(|| {
        let mut fonts: Vec<&'static [u8]> = typst_assets::fonts().collect();
        let bundled = fonts.len();
        fonts.extend(system_sans_fonts().into_iter().map(leak));
        log::debug!(
            "Loaded {} bundled and {} system fonts",
            bundled,
            fonts.len() - bundled
        );
        fonts
    })
}

/// Regular and bold faces of the first available sans-serif family
fn system_sans_fonts() -> Vec<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let families: Vec<fontdb::Family<'_>> = SANS_FAMILIES
        .iter()
        .map(|&name| fontdb::Family::Name(name))
        .chain([fontdb::Family::SansSerif])
        .collect();

    let mut fonts: Vec<Vec<u8>> = Vec::new();
    for weight in [fontdb::Weight::NORMAL, fontdb::Weight::BOLD] {
        let query = fontdb::Query {
            families: &families,
            weight,
            ..fontdb::Query::default()
        };
        let data = db
            .query(&query)
            .and_then(|id| db.with_face_data(id, |data, _| data.to_vec()));
        match data {
            Some(data) if !fonts.contains(&data) => fonts.push(data),
            Some(_) => {}
            None => log::debug!("No system sans-serif face for weight {}", weight.0),
        }
    }
    fonts
}

fn leak(bytes: Vec<u8>) -> &'static [u8] {
    Box::leak(bytes.into_boxed_slice())
}
