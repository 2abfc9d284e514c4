//! Certificate extractor: loads one document and reads its record.

use std::io::Read;
use std::path::Path;

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::model::{AnalysisResult, Record};
use crate::ocr::DocumentAnalyzer;

use super::fields::{extract, extract_table_fields, Extraction};
use super::index::BlockIndex;
use super::options::ExtractOptions;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Extractor over one analysed certificate.
#[derive(Debug, Clone)]
pub struct CertificateExtractor {
    index: BlockIndex,
    options: ExtractOptions,
    page_count: u32,
}

impl CertificateExtractor {
    /// Open a stored analysis response.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a stored analysis response with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load an analysis response from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load an analysis response from bytes with custom options.
    ///
    /// Scans are rejected with [`Error::ScanNeedsAnalysis`]; use
    /// [`CertificateExtractor::from_scan`] for those.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        match detect_format_from_bytes(data)? {
            InputFormat::AnalysisJson => Self::from_result(parse_response(data)?, options),
            format => Err(Error::ScanNeedsAnalysis(format)),
        }
    }

    /// Load an analysis response from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ExtractOptions::default())
    }

    /// Load an analysis response from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ExtractOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load any supported input, sending scans through `analyzer`.
    pub fn from_scan(
        data: &[u8],
        analyzer: &dyn DocumentAnalyzer,
        options: ExtractOptions,
    ) -> Result<Self> {
        let format = detect_format_from_bytes(data)?;
        if !format.is_scan() {
            return Self::from_result(parse_response(data)?, options);
        }
        log::info!("Analysing {} input with {}", format, analyzer.name());
        Self::from_result(analyzer.analyze(data)?, options)
    }

    /// Wrap an already parsed analysis response.
    pub fn from_result(result: AnalysisResult, options: ExtractOptions) -> Result<Self> {
        options.layout.validate()?;
        let page_count = result.page_count();
        Ok(Self {
            index: BlockIndex::from_result(result),
            options,
            page_count,
        })
    }

    /// Read the complete record with its diagnostics.
    pub fn extract(&self) -> Result<Extraction> {
        extract(&self.index, &self.options)
    }

    /// Read the table-derived fields only (no Comune/Sezione).
    pub fn extract_table_fields(&self) -> Result<Record> {
        extract_table_fields(&self.index, &self.options)
    }

    /// The indexed blocks.
    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    /// Options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Number of analysed pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }
}

fn parse_response(data: &[u8]) -> Result<AnalysisResult> {
    AnalysisResult::from_slice(data.strip_prefix(UTF8_BOM).unwrap_or(data))
}
