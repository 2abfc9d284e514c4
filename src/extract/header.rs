//! Issuing office from the document header lines.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::normalize::{place_rules, title_case, RuleSet};

// Keywords match as printed in the header; upper-case body lines never do.
static COMUNE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Bashkia\s+([\p{L}\-]+)").expect("valid municipality pattern")
});
static SEZIONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Nj[eë]sia Administrative(.*)$").expect("valid unit pattern")
});

/// Municipality and administrative unit of the issuing registry office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Municipality ("Bashkia ...")
    pub comune: String,
    /// Administrative unit ("Njësia Administrative ...")
    pub sezione: String,
}

/// Read the header with the built-in exonyms.
pub fn extract_header(lines: &[String]) -> Header {
    extract_header_with(lines, place_rules())
}

/// Read the header, mapping place names through `places`.
///
/// Every line is inspected and a later match replaces an earlier one. Only
/// "Bashkia" and "Njësia/Njesia Administrative" as printed count. A unit
/// number printed on its own line ("Nr." followed by "5") is joined back.
pub fn extract_header_with(lines: &[String], places: &RuleSet) -> Header {
    let mut comune = String::new();
    let mut sezione = String::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = COMUNE_RE.captures(line) {
            comune = title_case(&caps[1]);
        }
        if let Some(caps) = SEZIONE_RE.captures(line) {
            let mut suffix = caps[1].trim().to_string();
            if matches!(suffix.to_lowercase().as_str(), "nr" | "nr.") {
                let next = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
                suffix = format!("{} {}", suffix, next);
            }
            sezione = title_case(suffix.trim());
        }
    }

    let header = Header {
        comune: places.apply(&comune),
        sezione: places.apply(&sezione),
    };
    log::debug!(
        "Header: comune={:?} sezione={:?}",
        header.comune,
        header.sezione
    );
    header
}
