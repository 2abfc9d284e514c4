//! Document analysis seam.
//!
//! Scanned certificates (PDF or photographs) have to be turned into an
//! analysis block graph by an external layout/OCR service before anything
//! can be extracted. That service sits behind [`DocumentAnalyzer`]; this
//! crate ships a subprocess-backed implementation and one that replays a
//! stored response.

mod command;
mod saved;

pub use command::{CommandAnalyzer, ANALYZER_ENV};
pub use saved::SavedResponseAnalyzer;

use std::fmt;

use crate::error::Result;
use crate::model::AnalysisResult;

/// Analysis features requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureType {
    /// Key/value pairs and selection elements
    Forms,
    /// Tables and cells
    Tables,
    /// Layout elements
    Layout,
}

impl FeatureType {
    /// Features needed for certificate extraction.
    pub const REQUIRED: [FeatureType; 3] = [
        FeatureType::Forms,
        FeatureType::Tables,
        FeatureType::Layout,
    ];

    /// Name as used by the analysis service.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Forms => "FORMS",
            FeatureType::Tables => "TABLES",
            FeatureType::Layout => "LAYOUT",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a scanned document into an analysis block graph.
///
/// Implementations are called synchronously, once per document, and may be
/// shared between the threads of a batch. Timeouts and retries are up to
/// the implementation; any failure is reported as
/// [`Error::Analysis`](crate::Error::Analysis).
pub trait DocumentAnalyzer: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Analyse the raw document bytes (PDF, JPEG or PNG).
    fn analyze(&self, document: &[u8]) -> Result<AnalysisResult>;
}
