//! Place names and residence addresses.

use std::sync::LazyLock;

use super::rules::{Rule, RuleSet};

/// Albanian place names and their Italian exonyms. Whole words, any case.
pub const EXONYMS: &[(&str, &str)] = &[
    (r"\bTiran[ëe]\b", "Tirana"),
    (r"\bVlor[ëe]\b", "Valona"),
    (r"\bDurr[ëe]s\b", "Durazzo"),
    (r"\bShkod[ëe]r\b", "Scutari"),
    (r"\bKor[çc][ëe]\b", "Corizza"),
    (r"\bGjirokast[ëe]r\b", "Argirocastro"),
    (r"\bSarand[ëe]\b", "Santi Quaranta"),
    (r"\bLezh[ëe]\b", "Alessio"),
];

static PLACE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_patterns(EXONYMS, true).expect("built-in exonym rules compile")
});

// The full administrative-unit phrase must go before its single words.
static RESIDENCE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    let rules = [
        Rule::new(
            r"\bnj[eë]sia\s+administrative\b",
            "Sezione Amministrativa",
            true,
        ),
        Rule::new(r"\bnj[eë]sia\b", "Sezione", true),
        Rule::new(r"\badministrative\b", "Amministrativa", true),
        Rule::new(r"\bNd\.", "Ed.", false),
        Rule::new(r"\bAp\.", "App.", false),
        Rule::new(r"\bH\.", "Int.", false),
    ];
    rules
        .into_iter()
        .try_fold(RuleSet::new(), |set, rule| rule.map(|r| set.with_rule(r)))
        .expect("built-in residence rules compile")
});

/// The built-in exonym rules.
pub fn place_rules() -> &'static RuleSet {
    &PLACE_RULES
}

/// The built-in residence abbreviation rules.
pub fn residence_rules() -> &'static RuleSet {
    &RESIDENCE_RULES
}

/// Replace Albanian place names with their Italian exonyms.
///
/// ```
/// use albcert::normalize::normalize_place;
///
/// assert_eq!(normalize_place("Lindur në Tiranë"), "Lindur në Tirana");
/// ```
pub fn normalize_place(text: &str) -> String {
    PLACE_RULES.apply(text)
}

/// Translate the abbreviations used in residence addresses.
///
/// Building ("Nd."), floor ("H.") and apartment ("Ap.") abbreviations and
/// the administrative-unit phrase become their Italian equivalents. Place
/// names are left alone; run [`normalize_place`] afterwards.
pub fn normalize_residence(text: &str) -> String {
    RESIDENCE_RULES.apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exonyms_with_and_without_accents() {
        assert_eq!(normalize_place("Tiranë"), "Tirana");
        assert_eq!(normalize_place("TIRANE"), "Tirana");
        assert_eq!(normalize_place("Durrës"), "Durazzo");
        assert_eq!(normalize_place("vlore"), "Valona");
        assert_eq!(normalize_place("Shkodër"), "Scutari");
        assert_eq!(normalize_place("Korçë"), "Corizza");
        assert_eq!(normalize_place("Sarandë"), "Santi Quaranta");
    }

    #[test]
    fn test_exonyms_match_whole_words_only() {
        assert_eq!(normalize_place("Tiranësit"), "Tiranësit");
        assert_eq!(normalize_place("Elbasan"), "Elbasan");
    }

    #[test]
    fn test_place_normalization_is_idempotent() {
        for input in ["Tiranë", "Rr. Durrësit, Durrës", "Vlorë / Lezhë", "Gjirokastër", ""] {
            let once = normalize_place(input);
            assert_eq!(normalize_place(&once), once);
        }
    }

    #[test]
    fn test_empty_place() {
        assert_eq!(normalize_place(""), "");
    }

    #[test]
    fn test_residence_abbreviations() {
        assert_eq!(
            normalize_residence("Rr. Myslym Shyri, Nd. 12, H. 3, Ap. 7"),
            "Rr. Myslym Shyri, Ed. 12, Int. 3, App. 7"
        );
    }

    #[test]
    fn test_residence_administrative_unit_variants() {
        assert_eq!(
            normalize_residence("Njësia Administrative Nr. 5"),
            "Sezione Amministrativa Nr. 5"
        );
        assert_eq!(
            normalize_residence("NJËSIA ADMINISTRATIVE 2"),
            "Sezione Amministrativa 2"
        );
        assert_eq!(
            normalize_residence("NJESIA Administrative 9"),
            "Sezione Amministrativa 9"
        );
        assert_eq!(normalize_residence("Njesia 3"), "Sezione 3");
    }

    #[test]
    fn test_residence_leaves_longer_words_alone() {
        assert_eq!(normalize_residence("App. 4"), "App. 4");
        assert_eq!(normalize_residence("Ndërtesa"), "Ndërtesa");
    }

    #[test]
    fn test_residence_then_place() {
        let cleaned = normalize_place(&normalize_residence("Tiranë, Nd. 4"));
        assert_eq!(cleaned, "Tirana, Ed. 4");
    }
}
