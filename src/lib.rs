//! # albcert
//!
//! Field extraction from analysed Albanian birth certificates
//! ("Certifikatë Lindje") and rendering of their Italian translation.
//!
//! The input is the block graph returned by a document-analysis (OCR)
//! service: pages, lines, words, tables and cells linked by id. The output
//! is a [`Record`] of sixteen Italian-keyed fields, ready to be rendered as
//! a certified translation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use albcert::{extract_file, model::Field, render};
//!
//! fn main() -> albcert::Result<()> {
//!     // A stored analysis response
//!     let extraction = extract_file("certificate.json")?;
//!     println!("Stato civile: {}", extraction.record.get(Field::StatoCivile));
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&extraction.record, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Table fields**: template-driven cell lookup with value normalization
//! - **Civil status**: handwritten checkbox mark matched to its label
//! - **Electronic seal** and issuing-office header
//! - **Italian exonyms** for place names
//! - **Batch processing**: uses Rayon across documents
//! - **Rendering**: Markdown, plain text, JSON

pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod ocr;
pub mod render;

// Re-export commonly used types
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, has_supported_extension, InputFormat,
};
pub use error::{Error, Result};
pub use extract::{
    BatchItem, BlockIndex, CertificateExtractor, ErrorMode, ExtractOptions, Extraction,
    TemplateLayout,
};
pub use model::{AnalysisResult, Block, BlockType, CivilStatus, Field, MaritalStatus, Record};
pub use ocr::{CommandAnalyzer, DocumentAnalyzer, SavedResponseAnalyzer};
pub use render::{JsonFormat, RenderOptions, TranslatorInfo};

use std::io::Read;
use std::path::Path;

/// Extract a certificate from a stored analysis response.
///
/// # Example
///
/// ```no_run
/// use albcert::extract_file;
///
/// let extraction = extract_file("certificate.json").unwrap();
/// println!("{}", extraction.record.get(albcert::Field::Nome));
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    CertificateExtractor::open(path)?.extract()
}

/// Extract a certificate from a stored analysis response with custom options.
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Extraction> {
    CertificateExtractor::open_with_options(path, options)?.extract()
}

/// Extract a certificate from analysis response bytes.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    CertificateExtractor::from_bytes(data)?.extract()
}

/// Extract a certificate from a reader yielding an analysis response.
pub fn extract_reader<R: Read>(reader: R) -> Result<Extraction> {
    CertificateExtractor::from_reader(reader)?.extract()
}

/// Extract a certificate from blocks already in memory.
pub fn extract_blocks(blocks: Vec<Block>) -> Result<Extraction> {
    CertificateExtractor::from_result(AnalysisResult::new(blocks), ExtractOptions::default())?
        .extract()
}

/// Extract a scan (PDF, JPEG, PNG) by sending it through `analyzer`.
///
/// # Example
///
/// ```no_run
/// use albcert::{extract_scan, CommandAnalyzer};
///
/// let analyzer = CommandAnalyzer::new("textract-analyze");
/// let data = std::fs::read("certificate.pdf").unwrap();
/// let extraction = extract_scan(&data, &analyzer).unwrap();
/// ```
pub fn extract_scan(data: &[u8], analyzer: &dyn DocumentAnalyzer) -> Result<Extraction> {
    CertificateExtractor::from_scan(data, analyzer, ExtractOptions::default())?.extract()
}

/// Extract a stored response and render its translation as Markdown.
///
/// # Example
///
/// ```no_run
/// let markdown = albcert::to_markdown("certificate.json").unwrap();
/// std::fs::write("translation.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_markdown(&extraction.record, &RenderOptions::default())
}

/// Extract a stored response and render its translation as plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_text(&extraction.record, options)
}

/// Extract a stored response and serialize its record as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let extraction = extract_file(path)?;
    render::to_json(&extraction.record, format)
}

/// Extract a stored analysis response without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let data = tokio::fs::read(path).await?;
    extract_bytes(&data)
}

/// Builder for extracting and translating certificates.
///
/// # Example
///
/// ```no_run
/// use albcert::{Albcert, TranslatorInfo};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
/// let markdown = Albcert::new()
///     .with_translator(TranslatorInfo::new("Ana Rossi", "412", date))
///     .extract("certificate.json")?
///     .to_markdown()?;
/// # Ok::<(), albcert::Error>(())
/// ```
pub struct Albcert {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Albcert {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Use another template layout.
    pub fn with_layout(mut self, layout: TemplateLayout) -> Self {
        self.extract_options = self.extract_options.with_layout(layout);
        self
    }

    /// Keep going when a document in a batch fails.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Add the translator declaration and signature.
    pub fn with_translator(mut self, translator: TranslatorInfo) -> Self {
        self.render_options = self.render_options.with_translator(translator);
        self
    }

    /// Fix the translation date.
    pub fn with_date(mut self, date: chrono::NaiveDate) -> Self {
        self.render_options = self.render_options.with_date(date);
        self
    }

    /// Extract a stored analysis response.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<AlbcertResult> {
        let extractor = CertificateExtractor::open_with_options(path, self.extract_options)?;
        Ok(AlbcertResult {
            extraction: extractor.extract()?,
            render_options: self.render_options,
        })
    }

    /// Extract analysis response bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<AlbcertResult> {
        let extractor = CertificateExtractor::from_bytes_with_options(data, self.extract_options)?;
        Ok(AlbcertResult {
            extraction: extractor.extract()?,
            render_options: self.render_options,
        })
    }

    /// Extract a scan through `analyzer`.
    pub fn extract_scan(self, data: &[u8], analyzer: &dyn DocumentAnalyzer) -> Result<AlbcertResult> {
        let extractor = CertificateExtractor::from_scan(data, analyzer, self.extract_options)?;
        Ok(AlbcertResult {
            extraction: extractor.extract()?,
            render_options: self.render_options,
        })
    }

    /// Extract many files; scans need an `analyzer`.
    pub fn extract_batch<P>(
        &self,
        paths: &[P],
        analyzer: Option<&dyn DocumentAnalyzer>,
    ) -> Result<Vec<BatchItem>>
    where
        P: AsRef<Path> + Sync,
    {
        extract::extract_files(paths, analyzer, &self.extract_options)
    }

    /// Render options in use.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }
}

impl Default for Albcert {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting one certificate.
pub struct AlbcertResult {
    /// The extraction
    pub extraction: Extraction,
    /// Render options to use
    render_options: RenderOptions,
}

impl AlbcertResult {
    /// Render the translation as Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.extraction.record, &self.render_options)
    }

    /// Render the translation as plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.extraction.record, &self.render_options)
    }

    /// Serialize the record as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.extraction.record, format)
    }

    /// Output file name without extension.
    pub fn file_stem(&self) -> String {
        render::output_file_stem(&self.extraction.record, self.render_options.effective_date())
    }

    /// The extracted record.
    pub fn record(&self) -> &Record {
        &self.extraction.record
    }
}
