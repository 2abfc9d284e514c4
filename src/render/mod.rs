//! Rendering the Italian translation to various output formats.

mod document;
mod json;
mod markdown;
mod naming;
mod options;
mod text;

pub use document::{dotted, Section, TranslationDocument, REPUBLIC, SEALED_ROW, SEAL_NOTE, TITLE};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use naming::{batch_dir_name, output_file_stem};
pub use options::{RenderOptions, TranslatorInfo};
pub use text::to_text;
