//! Error types for albcert library.

use std::io;
use thiserror::Error;

use crate::detect::InputFormat;

/// Result type alias for albcert operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or rendering a certificate.
///
/// Missing content (no table, no seal, no checkbox mark) is never an error;
/// it degrades to empty fields. Only input of the wrong shape and failures
/// of the analysis service end up here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analysis response is not valid JSON or has the wrong shape.
    #[error("Invalid analysis response: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a scan nor an analysis response.
    #[error("Unknown input format")]
    UnknownFormat,

    /// A raw scan was given but no analyzer is configured to read it.
    #[error("{0} input must be analysed first (no document analyzer configured)")]
    ScanNeedsAnalysis(InputFormat),

    /// The external document-analysis service failed.
    #[error("Document analysis failed: {0}")]
    Analysis(String),

    /// A block lacks an attribute its type requires (geometry, text, cell position).
    #[error("Malformed block {id}: {reason}")]
    MalformedBlock {
        /// Id of the offending block
        id: String,
        /// What is missing
        reason: String,
    },

    /// A relationship points at a block id that is not in the result.
    #[error("Block {0} is referenced but not present")]
    MissingBlock(String),

    /// A substitution rule could not be compiled.
    #[error("Invalid substitution rule {pattern:?}: {message}")]
    InvalidRule {
        /// The rejected pattern
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// A template layout is inconsistent.
    #[error("Invalid template layout: {0}")]
    InvalidLayout(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Error::MalformedBlock {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
