//! Input format detection.
//!
//! Certificates arrive either as raw scans (PDF, JPEG, PNG), which must go
//! through the analysis service first, or as a stored analysis response
//! (JSON block graph), which can be extracted directly.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of input handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A stored analysis response (JSON block graph)
    AnalysisJson,
    /// Scanned PDF
    Pdf,
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
}

impl InputFormat {
    /// Whether this input still has to be sent to the analysis service.
    pub fn is_scan(&self) -> bool {
        !matches!(self, InputFormat::AnalysisJson)
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputFormat::AnalysisJson => "Analysis JSON",
            InputFormat::Pdf => "PDF",
            InputFormat::Jpeg => "JPEG",
            InputFormat::Png => "PNG",
        };
        f.write_str(name)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// How many leading bytes are inspected when sniffing a file.
const SNIFF_LEN: u64 = 256;

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use albcert::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("certificate.json").unwrap();
/// println!("Input: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    file.take(SNIFF_LEN).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the leading bytes of a document.
///
/// # Returns
/// * `Ok(InputFormat)` if the data is a known scan type or looks like JSON
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(InputFormat::Pdf);
    }
    if data.starts_with(PNG_MAGIC) {
        return Ok(InputFormat::Png);
    }
    if data.starts_with(JPEG_MAGIC) {
        return Ok(InputFormat::Jpeg);
    }

    let text = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match text.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(InputFormat::AnalysisJson),
        _ => Err(Error::UnknownFormat),
    }
}

/// Check if a file name has one of the extensions accepted for upload.
pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            matches!(
                e.to_ascii_lowercase().as_str(),
                "json" | "pdf" | "jpg" | "jpeg" | "png"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_scans() {
        assert_eq!(
            detect_format_from_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap(),
            InputFormat::Pdf
        );
        assert_eq!(
            detect_format_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap(),
            InputFormat::Jpeg
        );
        assert_eq!(
            detect_format_from_bytes(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap(),
            InputFormat::Png
        );
    }

    #[test]
    fn test_detect_json_with_whitespace_and_bom() {
        assert_eq!(
            detect_format_from_bytes(b"  \n {\"Blocks\": []}").unwrap(),
            InputFormat::AnalysisJson
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{\"Blocks\": []}").unwrap(),
            InputFormat::AnalysisJson
        );
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));

        let result = detect_format_from_bytes(b"");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_is_scan() {
        assert!(InputFormat::Pdf.is_scan());
        assert!(InputFormat::Png.is_scan());
        assert!(!InputFormat::AnalysisJson.is_scan());
    }

    #[test]
    fn test_supported_extensions() {
        assert!(has_supported_extension("scan.JPG"));
        assert!(has_supported_extension("response.json"));
        assert!(!has_supported_extension("notes.docx"));
        assert!(!has_supported_extension("README"));
    }
}
