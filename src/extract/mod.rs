//! Certificate extraction.
//!
//! The pipeline runs over one indexed analysis response:
//!
//! 1. [`BlockIndex`] resolves block ids and kinds.
//! 2. [`CellGrid`] turns the first TABLE into `(row, column) -> text`.
//! 3. A [`TemplateLayout`] picks the field cells, which are normalized.
//! 4. The civil-status checkbox, the electronic seal and the header are
//!    read from the words and lines around the table.

mod batch;
mod checkbox;
mod extractor;
mod fields;
mod header;
mod index;
mod layout;
mod options;
mod seal;
mod table;

pub use batch::{extract_files, extract_one, BatchItem};
pub use checkbox::{
    locate_labels, locate_mark, nearest, resolve_civil_status, Candidate, MARK_TEXTS,
    STATUS_FRAGMENTS,
};
pub use extractor::CertificateExtractor;
pub use fields::{extract, extract_table_fields, Extraction};
pub use header::{extract_header, extract_header_with, Header};
pub use index::BlockIndex;
pub use layout::{CellBinding, TemplateLayout};
pub use options::{ErrorMode, ExtractOptions};
pub use seal::{extract_seal, find_seal, ElectronicSeal, SEAL_HEADER, SEAL_MARKER};
pub use table::{extract_grid, CellGrid};
