//! Electronic seal footer.
//!
//! Certificates issued online carry the phrase "Vulosur elektronikisht"
//! twice: once in the header disclaimer and once in the footer stamp. The
//! stamp is followed by its date and a hexadecimal seal hash.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Phrase marking a sealed document (lowercase).
pub const SEAL_MARKER: &str = "vulosur elektronikisht";

/// First two lines of the translated seal.
pub const SEAL_HEADER: [&str; 2] = [
    "Timbro elettronico della Direzione",
    "Generale dello Stato Civile",
];

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}/\d{2}/\d{2}").expect("valid date pattern"));
static DATE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:date|datë)\s*:?\s*").expect("valid label pattern"));
static HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]{30,40}$").expect("valid hash pattern"));

/// Date and hash read from the footer stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectronicSeal {
    /// Stamp date as printed, label removed (e.g. "2023/05/10 10:42")
    pub date: String,
    /// Hexadecimal seal hash
    pub hash: String,
}

impl ElectronicSeal {
    /// Translated four-line seal block.
    pub fn to_field_value(&self) -> String {
        [
            SEAL_HEADER[0].to_string(),
            SEAL_HEADER[1].to_string(),
            format!("In data {}", self.date),
            self.hash.clone(),
        ]
        .join("\n")
    }
}

/// Locate the footer stamp in the document lines.
///
/// Scanning starts at the second line containing [`SEAL_MARKER`]. Both the
/// date and the hash must be found, otherwise there is no seal.
pub fn find_seal(lines: &[String]) -> Option<ElectronicSeal> {
    let start = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(SEAL_MARKER))
        .map(|(i, _)| i)
        .nth(1)?;

    let mut date = None;
    let mut hash = None;

    for raw in &lines[start..] {
        let text = raw.trim();

        if date.is_none() && DATE_RE.is_match(text) {
            date = Some(DATE_LABEL_RE.replace(text, "").trim().to_string());
        } else if hash.is_none() && HASH_RE.is_match(text) {
            hash = Some(text.to_string());
        }

        if date.is_some() && hash.is_some() {
            break;
        }
    }

    match (date, hash) {
        (Some(date), Some(hash)) => Some(ElectronicSeal { date, hash }),
        _ => None,
    }
}

/// Translated seal block, or an empty string when there is no complete seal.
pub fn extract_seal(lines: &[String]) -> String {
    find_seal(lines)
        .map(|seal| seal.to_field_value())
        .unwrap_or_default()
}
