//! Text normalization: ordered substitution rules and value mappings.

mod places;
mod rules;
mod values;

pub use places::{
    normalize_place, normalize_residence, place_rules, residence_rules, EXONYMS,
};
pub use rules::{Rule, RuleSet, RuleSpec};
pub use values::{normalize_citizenship, normalize_sex, title_case, ALBANESE};

use unicode_normalization::UnicodeNormalization;

/// Compose OCR text to NFC so accented letters match the rule patterns.
pub fn nfc(text: &str) -> String {
    text.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes_diaeresis() {
        let decomposed = "Tirane\u{0308}";
        assert_eq!(nfc(decomposed), "Tiranë");
        assert_eq!(normalize_place(&nfc(decomposed)), "Tirana");
    }
}
